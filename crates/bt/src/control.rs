//! Control (composite) nodes.
//!
//! Each owns an ordered list of children and ticks them in declaration order.
//! `Sequence` and `Fallback` keep a cursor to the child that returned
//! `Running`, so the next tick resumes there instead of re-ticking earlier
//! children. `Parallel` ticks every unfinished child on every tick.

use bt_core::{BtError, NodeConfig, NodeStatus, NodeType, Result, Violation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::{child_returned_idle, halt_children, NodeCore, TreeNode};

fn ensure_children(core: &NodeCore, children: &[Box<dyn TreeNode>]) -> Result<()> {
    if children.is_empty() {
        return Err(BtError::violation(core.name(), Violation::NoChildren));
    }
    Ok(())
}

/// AND: succeeds once every child has succeeded, fails on the first failure.
pub struct Sequence {
    core: NodeCore,
    children: Vec<Box<dyn TreeNode>>,
    current_child_idx: usize,
}

impl Sequence {
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn TreeNode>>) -> Self {
        Self::with_config(name, NodeConfig::default(), children)
    }

    pub fn with_config(
        name: impl Into<String>,
        config: NodeConfig,
        children: Vec<Box<dyn TreeNode>>,
    ) -> Self {
        Self {
            core: NodeCore::new(name, config),
            children,
            current_child_idx: 0,
        }
    }

    pub fn add_child(&mut self, child: Box<dyn TreeNode>) {
        self.children.push(child);
    }

    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    /// Index of the child the next tick starts (or resumes) at.
    pub fn current_child(&self) -> usize {
        self.current_child_idx
    }
}

impl TreeNode for Sequence {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        NodeType::Control
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        ensure_children(&self.core, &self.children)?;

        while self.current_child_idx < self.children.len() {
            let child = &mut self.children[self.current_child_idx];
            match child.execute_tick()? {
                NodeStatus::Running => return Ok(NodeStatus::Running),
                NodeStatus::Failure => {
                    halt_children(&mut self.children);
                    self.current_child_idx = 0;
                    return Ok(NodeStatus::Failure);
                }
                NodeStatus::Success | NodeStatus::Skipped => self.current_child_idx += 1,
                NodeStatus::Idle => return Err(child_returned_idle(&self.core, child.name())),
            }
        }

        self.current_child_idx = 0;
        Ok(NodeStatus::Success)
    }

    fn on_halt(&mut self) {
        halt_children(&mut self.children);
        self.current_child_idx = 0;
    }

    fn children(&self) -> &[Box<dyn TreeNode>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn TreeNode>] {
        &mut self.children
    }
}

/// OR: succeeds on the first success, fails once every child has failed.
///
/// Children are reset both when a child succeeds and after a full failed pass.
pub struct Fallback {
    core: NodeCore,
    children: Vec<Box<dyn TreeNode>>,
    current_child_idx: usize,
}

impl Fallback {
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn TreeNode>>) -> Self {
        Self::with_config(name, NodeConfig::default(), children)
    }

    pub fn with_config(
        name: impl Into<String>,
        config: NodeConfig,
        children: Vec<Box<dyn TreeNode>>,
    ) -> Self {
        Self {
            core: NodeCore::new(name, config),
            children,
            current_child_idx: 0,
        }
    }

    pub fn add_child(&mut self, child: Box<dyn TreeNode>) {
        self.children.push(child);
    }

    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn current_child(&self) -> usize {
        self.current_child_idx
    }
}

impl TreeNode for Fallback {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        NodeType::Control
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        ensure_children(&self.core, &self.children)?;

        while self.current_child_idx < self.children.len() {
            let child = &mut self.children[self.current_child_idx];
            match child.execute_tick()? {
                NodeStatus::Running => return Ok(NodeStatus::Running),
                NodeStatus::Success => {
                    halt_children(&mut self.children);
                    self.current_child_idx = 0;
                    return Ok(NodeStatus::Success);
                }
                NodeStatus::Failure | NodeStatus::Skipped => self.current_child_idx += 1,
                NodeStatus::Idle => return Err(child_returned_idle(&self.core, child.name())),
            }
        }

        halt_children(&mut self.children);
        self.current_child_idx = 0;
        Ok(NodeStatus::Failure)
    }

    fn on_halt(&mut self) {
        halt_children(&mut self.children);
        self.current_child_idx = 0;
    }

    fn children(&self) -> &[Box<dyn TreeNode>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn TreeNode>] {
        &mut self.children
    }
}

/// Success/failure thresholds of a [`Parallel`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParallelPolicy {
    /// Successes needed to succeed; `None` means every child that did not skip.
    pub success_threshold: Option<usize>,
    /// Failures that make success impossible to wait for.
    pub failure_threshold: usize,
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            success_threshold: None,
            failure_threshold: 1,
        }
    }
}

impl ParallelPolicy {
    /// Succeed as soon as `m` children succeed.
    pub fn succeed_on(m: usize) -> Self {
        Self {
            success_threshold: Some(m),
            ..Self::default()
        }
    }

    pub fn with_failure_threshold(mut self, k: usize) -> Self {
        self.failure_threshold = k;
        self
    }

    /// Checks both thresholds against the declared child count.
    fn validate(&self, node: &NodeCore, children: usize) -> Result<()> {
        let success = self.success_threshold.unwrap_or(children);
        for (which, threshold) in [("success", success), ("failure", self.failure_threshold)] {
            if threshold == 0 || threshold > children {
                return Err(BtError::violation(
                    node.name(),
                    Violation::InvalidThreshold {
                        which,
                        threshold,
                        children,
                    },
                ));
            }
        }
        Ok(())
    }
}

/// Ticks all children every tick and aggregates their outcomes by threshold.
///
/// A child that finished during the current activation is not ticked again
/// until the parallel node itself completes or is halted. Running children
/// are halted as soon as the outcome is decided.
pub struct Parallel {
    core: NodeCore,
    children: Vec<Box<dyn TreeNode>>,
    policy: ParallelPolicy,
    results: Vec<NodeStatus>,
}

impl Parallel {
    pub fn new(
        name: impl Into<String>,
        policy: ParallelPolicy,
        children: Vec<Box<dyn TreeNode>>,
    ) -> Self {
        Self::with_config(name, NodeConfig::default(), policy, children)
    }

    pub fn with_config(
        name: impl Into<String>,
        config: NodeConfig,
        policy: ParallelPolicy,
        children: Vec<Box<dyn TreeNode>>,
    ) -> Self {
        let results = vec![NodeStatus::Idle; children.len()];
        Self {
            core: NodeCore::new(name, config),
            children,
            policy,
            results,
        }
    }

    pub fn add_child(&mut self, child: Box<dyn TreeNode>) {
        self.children.push(child);
        self.results.push(NodeStatus::Idle);
    }

    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }

    fn finish(&mut self, status: NodeStatus) -> Result<NodeStatus> {
        halt_children(&mut self.children);
        self.results.fill(NodeStatus::Idle);
        Ok(status)
    }
}

impl TreeNode for Parallel {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        NodeType::Control
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        ensure_children(&self.core, &self.children)?;
        let n = self.children.len();
        self.policy.validate(&self.core, n)?;

        for (child, result) in self.children.iter_mut().zip(self.results.iter_mut()) {
            if matches!(
                *result,
                NodeStatus::Success | NodeStatus::Failure | NodeStatus::Skipped
            ) {
                continue;
            }
            let status = child.execute_tick()?;
            if status == NodeStatus::Idle {
                return Err(child_returned_idle(&self.core, child.name()));
            }
            *result = status;
        }

        let count = |wanted: NodeStatus| self.results.iter().filter(|s| **s == wanted).count();
        let successes = count(NodeStatus::Success);
        let failures = count(NodeStatus::Failure);
        let running = count(NodeStatus::Running);
        let skipped = count(NodeStatus::Skipped);

        if skipped == n {
            return self.finish(NodeStatus::Skipped);
        }
        // Skipped children count neither way.
        let success_needed = self.policy.success_threshold.unwrap_or(n - skipped);
        let failure_limit = self.policy.failure_threshold;
        if successes >= success_needed {
            return self.finish(NodeStatus::Success);
        }
        if failures >= failure_limit || successes + running < success_needed {
            return self.finish(NodeStatus::Failure);
        }
        Ok(NodeStatus::Running)
    }

    fn on_halt(&mut self) {
        halt_children(&mut self.children);
        self.results.fill(NodeStatus::Idle);
    }

    fn children(&self) -> &[Box<dyn TreeNode>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn TreeNode>] {
        &mut self.children
    }
}
