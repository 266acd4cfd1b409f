//! Error taxonomy shared by the blackboard and the tree runtime.
//!
//! None of these are retried internally. They describe a misconfigured tree or
//! a broken node implementation and propagate out of `execute_tick` to the
//! caller of the tree driver. `Failure` is an ordinary tick outcome and never
//! appears here.

use core::fmt;

use thiserror::Error;

use crate::ValueKind;

/// Errors raised while ticking, halting or wiring a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BtError {
    #[error("contract violation in node `{node}`: {violation}")]
    ContractViolation { node: String, violation: Violation },

    #[error("node `{node}` has no {direction} port named `{port}`")]
    Port {
        node: String,
        port: String,
        direction: PortDirection,
    },

    #[error(transparent)]
    Blackboard(#[from] BlackboardError),
}

pub type Result<T> = std::result::Result<T, BtError>;

impl BtError {
    pub fn violation(node: impl Into<String>, violation: Violation) -> Self {
        BtError::ContractViolation {
            node: node.into(),
            violation,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, BtError::ContractViolation { .. })
    }
}

/// Broken node contracts. These are programming errors, never business outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("a condition returned RUNNING")]
    ConditionReturnedRunning,

    #[error("child `{child}` returned IDLE as a tick result")]
    ChildReturnedIdle { child: String },

    #[error("ticked without any children")]
    NoChildren,

    #[error("decorator ticked without a child")]
    MissingChild,

    #[error("{which} threshold {threshold} exceeds the {children} available children")]
    InvalidThreshold {
        which: &'static str,
        threshold: usize,
        children: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => f.write_str("input"),
            PortDirection::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackboardError {
    #[error("entry `{key}` not in blackboard")]
    KeyNotFound { key: String },

    #[error("entry `{key}` cannot be read as its declared type: {source}")]
    Coercion {
        key: String,
        #[source]
        source: CoercionError,
    },

    #[error("print length must be positive, got {0}")]
    InvalidPrintLength(usize),
}

impl BlackboardError {
    pub fn key_not_found(key: impl Into<String>) -> Self {
        BlackboardError::KeyNotFound { key: key.into() }
    }
}

/// A stored value that has no lossless conversion to the requested kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {from} to {to}: {reason}")]
pub struct CoercionError {
    pub from: ValueKind,
    pub to: ValueKind,
    pub reason: String,
}

impl CoercionError {
    pub fn new(from: ValueKind, to: ValueKind, reason: impl Into<String>) -> Self {
        Self {
            from,
            to,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blackboard_errors_convert_into_bt_errors() {
        let err: BtError = BlackboardError::key_not_found("age").into();
        assert_eq!(err.to_string(), "entry `age` not in blackboard");
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn violation_message_names_the_node() {
        let err = BtError::violation("check_door", Violation::ConditionReturnedRunning);
        assert!(err.is_contract_violation());
        assert_eq!(
            err.to_string(),
            "contract violation in node `check_door`: a condition returned RUNNING"
        );
    }
}
