use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of ticking a node, and the status a node reports between ticks.
///
/// `Idle` is only ever a node's own pre-tick state. A tick never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeStatus {
    #[default]
    Idle,
    Running,
    Success,
    Failure,
    Skipped,
}

impl NodeStatus {
    /// `Success` or `Failure`: the activation is over.
    #[inline]
    pub fn is_completed(self) -> bool {
        matches!(self, NodeStatus::Success | NodeStatus::Failure)
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == NodeStatus::Running
    }

    /// Swaps `Success` and `Failure`, leaving every other status untouched.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            NodeStatus::Success => NodeStatus::Failure,
            NodeStatus::Failure => NodeStatus::Success,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeStatus::Idle => "IDLE",
            NodeStatus::Running => "RUNNING",
            NodeStatus::Success => "SUCCESS",
            NodeStatus::Failure => "FAILURE",
            NodeStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeType {
    Action,
    Condition,
    Control,
    Decorator,
}

impl NodeType {
    /// Leaves never own children.
    pub fn is_leaf(self) -> bool {
        matches!(self, NodeType::Action | NodeType::Condition)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Action => "Action",
            NodeType::Condition => "Condition",
            NodeType::Control => "Control",
            NodeType::Decorator => "Decorator",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_idle() {
        assert_eq!(NodeStatus::default(), NodeStatus::Idle);
    }

    #[test]
    fn invert_only_swaps_terminal_outcomes() {
        assert_eq!(NodeStatus::Success.invert(), NodeStatus::Failure);
        assert_eq!(NodeStatus::Failure.invert(), NodeStatus::Success);
        assert_eq!(NodeStatus::Running.invert(), NodeStatus::Running);
        assert_eq!(NodeStatus::Skipped.invert(), NodeStatus::Skipped);
    }

    #[test]
    fn completed_excludes_running_and_idle() {
        assert!(NodeStatus::Success.is_completed());
        assert!(NodeStatus::Failure.is_completed());
        assert!(!NodeStatus::Running.is_completed());
        assert!(!NodeStatus::Idle.is_completed());
        assert!(!NodeStatus::Skipped.is_completed());
    }
}
