use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BlackboardError, FromValue, Value, ValueKind};

/// Column width used by the tabular rendering until changed.
pub const DEFAULT_PRINT_LEN: usize = 16;

const AUTOGENERATED_DESCRIPTION: &str = "Autogenerated entry";

/// Handle through which a tree and its nodes share one blackboard.
///
/// Ticking is single-threaded; trees sharing a handle must serialize their ticks.
pub type SharedBlackboard = Rc<RefCell<Blackboard>>;

/// Per-key metadata. `kind` is the coercion target for every read of the key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlackboardEntryMetadata {
    pub key: String,
    pub description: String,
    pub kind: ValueKind,
}

impl BlackboardEntryMetadata {
    pub fn new(key: impl Into<String>, description: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            kind,
        }
    }

    /// `key | description | type`, each column padded or truncated to `width`.
    pub fn render(&self, width: usize) -> String {
        format!(
            "{:w$.w$} | {:w$.w$} | {:w$.w$}",
            self.key,
            self.description,
            self.kind.as_str(),
            w = width
        )
    }
}

/// Typed key/value store shared by the nodes of a tree.
///
/// Holds two maps over the same key set: metadata and values. Every key with a
/// value also has metadata; a write to an unseen key registers metadata
/// inferred from the written value.
#[derive(Debug, Clone)]
pub struct Blackboard {
    entries: BTreeMap<String, BlackboardEntryMetadata>,
    values: BTreeMap<String, Value>,
    print_len: usize,
}

impl Default for Blackboard {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            values: BTreeMap::new(),
            print_len: DEFAULT_PRINT_LEN,
        }
    }
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedBlackboard {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn into_shared(self) -> SharedBlackboard {
        Rc::new(RefCell::new(self))
    }

    pub fn print_len(&self) -> usize {
        self.print_len
    }

    pub fn set_print_len(&mut self, width: usize) -> Result<(), BlackboardError> {
        if width == 0 {
            return Err(BlackboardError::InvalidPrintLength(width));
        }
        self.print_len = width;
        Ok(())
    }

    /// Registers (or replaces) the metadata for `entry.key`.
    pub fn register_entry(&mut self, entry: BlackboardEntryMetadata) {
        self.entries.insert(entry.key.clone(), entry);
    }

    pub fn get_entry(&self, key: &str) -> Result<&BlackboardEntryMetadata, BlackboardError> {
        self.entries
            .get(key)
            .ok_or_else(|| BlackboardError::key_not_found(key))
    }

    /// Updates the description and/or declared kind of an existing entry.
    ///
    /// Stored values are left as written; later reads coerce them to `kind`.
    pub fn set_entry(
        &mut self,
        key: &str,
        description: Option<&str>,
        kind: Option<ValueKind>,
    ) -> Result<(), BlackboardError> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| BlackboardError::key_not_found(key))?;
        if let Some(description) = description {
            entry.description = description.to_string();
        }
        if let Some(kind) = kind {
            entry.kind = kind;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Stores `value` under `key`, auto-registering metadata for unseen keys.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if !self.entries.contains_key(&key) {
            let entry =
                BlackboardEntryMetadata::new(key.clone(), AUTOGENERATED_DESCRIPTION, value.kind());
            self.entries.insert(key.clone(), entry);
        }
        self.values.insert(key, value);
    }

    /// Reads `key`, coerced to its declared kind.
    pub fn get(&self, key: &str) -> Result<Value, BlackboardError> {
        let (entry, value) = match (self.entries.get(key), self.values.get(key)) {
            (Some(entry), Some(value)) => (entry, value),
            _ => return Err(BlackboardError::key_not_found(key)),
        };
        value
            .clone()
            .coerce(entry.kind)
            .map_err(|source| BlackboardError::Coercion {
                key: key.to_string(),
                source,
            })
    }

    /// Reads `key` coerced to its declared kind, then converted into `T`.
    pub fn get_as<T: FromValue>(&self, key: &str) -> Result<T, BlackboardError> {
        let value = self.get(key)?;
        T::from_value(value).map_err(|source| BlackboardError::Coercion {
            key: key.to_string(),
            source,
        })
    }

    /// The value as written, without coercion.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Deletes both the value and the metadata of `key`.
    pub fn remove(&mut self, key: &str) -> Result<Value, BlackboardError> {
        let value = self
            .values
            .remove(key)
            .ok_or_else(|| BlackboardError::key_not_found(key))?;
        self.entries.remove(key);
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Stored `(key, value)` pairs in key order, without coercion.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.print_len;
        writeln!(
            f,
            "{:w$.w$} | {:w$.w$} | {:w$.w$} | {:w$.w$} |",
            "Key", "Description", "Type", "Value"
        )?;
        writeln!(f, "{}", "=".repeat(w * 4 + 11))?;
        for (key, value) in &self.values {
            if let Some(entry) = self.entries.get(key) {
                writeln!(f, "{} | {:w$.w$} |", entry.render(w), value.to_string())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_render_truncates_columns() {
        let entry = BlackboardEntryMetadata::new("a_rather_long_key", "desc", ValueKind::Int);
        assert_eq!(entry.render(4), "a_ra | desc | int ");
    }

    #[test]
    fn zero_print_len_is_rejected() {
        let mut bb = Blackboard::new();
        assert_eq!(
            bb.set_print_len(0),
            Err(BlackboardError::InvalidPrintLength(0))
        );
        assert_eq!(bb.print_len(), DEFAULT_PRINT_LEN);
    }

    #[test]
    fn display_lists_every_value() {
        let mut bb = Blackboard::new();
        bb.set_print_len(6).unwrap();
        bb.set("age", 32);
        bb.set("name", "ada");

        let rendered = bb.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Key    | Descri | Type   | Value  |");
        assert_eq!(lines[1], "=".repeat(6 * 4 + 11));
        assert_eq!(lines[2], "age    | Autoge | int    | 32     |");
        assert_eq!(lines[3], "name   | Autoge | str    | ada    |");
    }
}
