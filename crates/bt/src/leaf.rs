//! Leaf nodes: actions and conditions.
//!
//! Concrete behaviors are supplied by the embedding application, either as
//! closures ([`SyncAction`], [`Condition`]) or as a [`StatefulBehavior`]
//! driven by [`StatefulAction`]. Leaves read and write the blackboard only
//! through the ports of the `NodeCore` they are handed.

use bt_core::{NodeConfig, NodeStatus, NodeType, Result};

use crate::node::{NodeCore, TreeNode};

/// Action whose whole activation is one call to `f`.
///
/// `f` may return `Running`; the next tick calls it again.
pub struct SyncAction<F> {
    core: NodeCore,
    f: F,
}

impl<F> SyncAction<F>
where
    F: FnMut(&NodeCore) -> Result<NodeStatus> + 'static,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self::with_config(name, NodeConfig::default(), f)
    }

    pub fn with_config(name: impl Into<String>, config: NodeConfig, f: F) -> Self {
        Self {
            core: NodeCore::new(name, config),
            f,
        }
    }
}

impl<F> TreeNode for SyncAction<F>
where
    F: FnMut(&NodeCore) -> Result<NodeStatus> + 'static,
{
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        NodeType::Action
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        (self.f)(&self.core)
    }
}

/// Stateless predicate. Cannot report `Running` by construction.
pub struct Condition<F> {
    core: NodeCore,
    cond: F,
}

impl<F> Condition<F>
where
    F: FnMut(&NodeCore) -> Result<bool> + 'static,
{
    pub fn new(name: impl Into<String>, cond: F) -> Self {
        Self::with_config(name, NodeConfig::default(), cond)
    }

    pub fn with_config(name: impl Into<String>, config: NodeConfig, cond: F) -> Self {
        Self {
            core: NodeCore::new(name, config),
            cond,
        }
    }
}

impl<F> TreeNode for Condition<F>
where
    F: FnMut(&NodeCore) -> Result<bool> + 'static,
{
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        NodeType::Condition
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        if (self.cond)(&self.core)? {
            Ok(NodeStatus::Success)
        } else {
            Ok(NodeStatus::Failure)
        }
    }
}

/// Long-running work split into start, continue and abort steps.
pub trait StatefulBehavior: 'static {
    /// First tick of an activation.
    fn on_start(&mut self, node: &NodeCore) -> Result<NodeStatus>;

    /// Every later tick while the previous one returned `Running`.
    fn on_running(&mut self, node: &NodeCore) -> Result<NodeStatus>;

    /// The node was halted while `Running`.
    fn on_halted(&mut self, _node: &NodeCore) {}
}

/// Action that distinguishes starting an activation from resuming one.
pub struct StatefulAction<B> {
    core: NodeCore,
    behavior: B,
}

impl<B: StatefulBehavior> StatefulAction<B> {
    pub fn new(name: impl Into<String>, behavior: B) -> Self {
        Self::with_config(name, NodeConfig::default(), behavior)
    }

    pub fn with_config(name: impl Into<String>, config: NodeConfig, behavior: B) -> Self {
        Self {
            core: NodeCore::new(name, config),
            behavior,
        }
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }
}

impl<B: StatefulBehavior> TreeNode for StatefulAction<B> {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        NodeType::Action
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        if self.core.status() == NodeStatus::Running {
            self.behavior.on_running(&self.core)
        } else {
            self.behavior.on_start(&self.core)
        }
    }

    fn on_halt(&mut self) {
        if self.core.status() == NodeStatus::Running {
            self.behavior.on_halted(&self.core);
        }
    }
}

pub struct AlwaysSuccess {
    core: NodeCore,
}

impl AlwaysSuccess {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: NodeCore::new(name, NodeConfig::default()),
        }
    }
}

impl TreeNode for AlwaysSuccess {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        NodeType::Action
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        Ok(NodeStatus::Success)
    }
}

pub struct AlwaysFailure {
    core: NodeCore,
}

impl AlwaysFailure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: NodeCore::new(name, NodeConfig::default()),
        }
    }
}

impl TreeNode for AlwaysFailure {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        NodeType::Action
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        Ok(NodeStatus::Failure)
    }
}
