//! Blackboard values and the explicit coercion between their kinds.
//!
//! Writes are permissive: any `Value` may be stored under any key. Reads
//! normalize the stored value to the entry's declared `ValueKind` through
//! [`Value::coerce`], which either converts losslessly or reports a
//! [`CoercionError`].

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::CoercionError;

/// Largest magnitude an `f64` represents without skipping integers (2^53).
const MAX_EXACT_INT: u64 = 1 << 53;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
    List,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::List => "list",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Converts `self` into `to`.
    ///
    /// Total over every `(kind, to)` pair: the result is either the converted
    /// value or an error, never a silently truncated one.
    pub fn coerce(self, to: ValueKind) -> Result<Value, CoercionError> {
        let from = self.kind();
        if from == to {
            return Ok(self);
        }

        match (self, to) {
            (Value::Bool(b), ValueKind::Int) => Ok(Value::Int(i64::from(b))),
            (Value::Bool(b), ValueKind::Float) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),

            (Value::Int(i), ValueKind::Bool) => match i {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                _ => Err(CoercionError::new(from, to, format!("{i} is neither 0 nor 1"))),
            },
            (Value::Int(i), ValueKind::Float) => {
                if i.unsigned_abs() <= MAX_EXACT_INT {
                    Ok(Value::Float(i as f64))
                } else {
                    Err(CoercionError::new(
                        from,
                        to,
                        format!("{i} is not exactly representable as a float"),
                    ))
                }
            }

            (Value::Float(x), ValueKind::Int) => {
                // i64::MIN is exactly -2^63; i64::MAX rounds up to 2^63 as f64.
                let in_range = x >= i64::MIN as f64 && x < i64::MAX as f64;
                if x.is_finite() && x.fract() == 0.0 && in_range {
                    Ok(Value::Int(x as i64))
                } else {
                    Err(CoercionError::new(
                        from,
                        to,
                        format!("{x:?} is not an integral value in range"),
                    ))
                }
            }

            (Value::Str(s), ValueKind::Bool) => match s.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(CoercionError::new(from, to, format!("{s:?} is not a boolean"))),
            },
            (Value::Str(s), ValueKind::Int) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| CoercionError::new(from, to, e.to_string())),
            (Value::Str(s), ValueKind::Float) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| CoercionError::new(from, to, e.to_string())),

            // Every kind renders to a string.
            (value, ValueKind::Str) => Ok(Value::Str(value.to_string())),

            (value, to) => Err(CoercionError::new(
                value.kind(),
                to,
                "no conversion between these kinds",
            )),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Debug keeps the trailing `.0` on integral floats.
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

/// Rust types a blackboard value can be read back as.
pub trait FromValue: Sized {
    const KIND: ValueKind;

    fn from_value(value: Value) -> Result<Self, CoercionError>;
}

macro_rules! impl_from_value {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl FromValue for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn from_value(value: Value) -> Result<Self, CoercionError> {
                match value.coerce(ValueKind::$kind)? {
                    Value::$variant(v) => Ok(v),
                    other => Err(CoercionError::new(
                        other.kind(),
                        ValueKind::$kind,
                        "coercion produced a different kind",
                    )),
                }
            }
        }
    };
}

impl_from_value!(bool, Bool, Bool);
impl_from_value!(i64, Int, Int);
impl_from_value!(f64, Float, Float);
impl_from_value!(String, Str, Str);
impl_from_value!(Vec<Value>, List, List);
