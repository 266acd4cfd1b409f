//! Builder utilities for ergonomic tree construction.
//!
//! Shorthands for `Box::new(Node::new(..))` so trees read top-down:
//!
//! ```rust
//! use bt::builder::{always_failure, always_success, fallback, sequence};
//! use bt::{BehaviorTree, NodeStatus};
//!
//! let root = fallback(
//!     "root",
//!     vec![
//!         sequence("try", vec![always_success("a"), always_failure("b")]),
//!         always_success("recover"),
//!     ],
//! );
//! let mut tree = BehaviorTree::new(root);
//! assert_eq!(tree.tick_once().unwrap(), NodeStatus::Success);
//! ```

use bt_core::{NodeStatus, Result};

use crate::{
    AlwaysFailure, AlwaysSuccess, Condition, Fallback, ForceFailure, ForceSuccess, Inverter,
    NodeCore, Parallel, ParallelPolicy, Repeat, Retry, Sequence, SyncAction, TreeNode,
};

#[inline]
pub fn sequence(name: &str, children: Vec<Box<dyn TreeNode>>) -> Box<dyn TreeNode> {
    Box::new(Sequence::new(name, children))
}

#[inline]
pub fn fallback(name: &str, children: Vec<Box<dyn TreeNode>>) -> Box<dyn TreeNode> {
    Box::new(Fallback::new(name, children))
}

#[inline]
pub fn parallel(
    name: &str,
    policy: ParallelPolicy,
    children: Vec<Box<dyn TreeNode>>,
) -> Box<dyn TreeNode> {
    Box::new(Parallel::new(name, policy, children))
}

#[inline]
pub fn inverter(name: &str, child: Box<dyn TreeNode>) -> Box<dyn TreeNode> {
    Box::new(Inverter::new(name, child))
}

#[inline]
pub fn force_success(name: &str, child: Box<dyn TreeNode>) -> Box<dyn TreeNode> {
    Box::new(ForceSuccess::new(name, child))
}

#[inline]
pub fn force_failure(name: &str, child: Box<dyn TreeNode>) -> Box<dyn TreeNode> {
    Box::new(ForceFailure::new(name, child))
}

#[inline]
pub fn repeat(name: &str, num_cycles: usize, child: Box<dyn TreeNode>) -> Box<dyn TreeNode> {
    Box::new(Repeat::new(name, num_cycles, child))
}

#[inline]
pub fn retry(name: &str, num_attempts: usize, child: Box<dyn TreeNode>) -> Box<dyn TreeNode> {
    Box::new(Retry::new(name, num_attempts, child))
}

#[inline]
pub fn always_success(name: &str) -> Box<dyn TreeNode> {
    Box::new(AlwaysSuccess::new(name))
}

#[inline]
pub fn always_failure(name: &str) -> Box<dyn TreeNode> {
    Box::new(AlwaysFailure::new(name))
}

#[inline]
pub fn condition<F>(name: &str, cond: F) -> Box<dyn TreeNode>
where
    F: FnMut(&NodeCore) -> Result<bool> + 'static,
{
    Box::new(Condition::new(name, cond))
}

#[inline]
pub fn action<F>(name: &str, f: F) -> Box<dyn TreeNode>
where
    F: FnMut(&NodeCore) -> Result<NodeStatus> + 'static,
{
    Box::new(SyncAction::new(name, f))
}
