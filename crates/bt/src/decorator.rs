//! Decorator nodes.
//!
//! Decorators own exactly one child and transform its status or how often it
//! is ticked. Halting a decorator halts its child first.

use bt_core::{BtError, NodeConfig, NodeStatus, NodeType, Result, Violation};

use crate::node::{child_returned_idle, NodeCore, TreeNode};

/// Child slot shared by every decorator. Empty until a child is attached.
struct Slot(Option<Box<dyn TreeNode>>);

impl Slot {
    fn get_mut(&mut self, core: &NodeCore) -> Result<&mut (dyn TreeNode + 'static)> {
        self.0
            .as_deref_mut()
            .ok_or_else(|| BtError::violation(core.name(), Violation::MissingChild))
    }

    fn halt(&mut self) {
        if let Some(child) = self.0.as_deref_mut() {
            child.halt_node();
        }
    }

    fn as_slice(&self) -> &[Box<dyn TreeNode>] {
        self.0.as_slice()
    }

    fn as_mut_slice(&mut self) -> &mut [Box<dyn TreeNode>] {
        self.0.as_mut_slice()
    }
}

macro_rules! decorator_common {
    ($ty:ident) => {
        impl $ty {
            pub fn set_child(&mut self, child: Box<dyn TreeNode>) {
                self.child.0 = Some(child);
            }

            pub fn get_child(&self) -> Option<&(dyn TreeNode + 'static)> {
                self.child.0.as_deref()
            }
        }
    };
}

macro_rules! decorator_tree_node {
    () => {
        fn core(&self) -> &NodeCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut NodeCore {
            &mut self.core
        }

        fn node_type(&self) -> NodeType {
            NodeType::Decorator
        }

        fn children(&self) -> &[Box<dyn TreeNode>] {
            self.child.as_slice()
        }

        fn children_mut(&mut self) -> &mut [Box<dyn TreeNode>] {
            self.child.as_mut_slice()
        }
    };
}

/// Ticks the child once and maps its status through `map`.
fn tick_mapped(
    core: &NodeCore,
    slot: &mut Slot,
    map: impl FnOnce(NodeStatus) -> NodeStatus,
) -> Result<NodeStatus> {
    let child = slot.get_mut(core)?;
    match child.execute_tick()? {
        NodeStatus::Idle => Err(child_returned_idle(core, child.name())),
        status => Ok(map(status)),
    }
}

/// NOT: swaps `Success` and `Failure`.
pub struct Inverter {
    core: NodeCore,
    child: Slot,
}

impl Inverter {
    pub fn new(name: impl Into<String>, child: Box<dyn TreeNode>) -> Self {
        Self::with_config(name, NodeConfig::default(), Some(child))
    }

    pub fn with_config(
        name: impl Into<String>,
        config: NodeConfig,
        child: Option<Box<dyn TreeNode>>,
    ) -> Self {
        Self {
            core: NodeCore::new(name, config),
            child: Slot(child),
        }
    }
}

decorator_common!(Inverter);

impl TreeNode for Inverter {
    decorator_tree_node!();

    fn tick(&mut self) -> Result<NodeStatus> {
        tick_mapped(&self.core, &mut self.child, NodeStatus::invert)
    }

    fn on_halt(&mut self) {
        self.child.halt();
    }
}

/// Turns any completed child outcome into `Success`.
pub struct ForceSuccess {
    core: NodeCore,
    child: Slot,
}

impl ForceSuccess {
    pub fn new(name: impl Into<String>, child: Box<dyn TreeNode>) -> Self {
        Self::with_config(name, NodeConfig::default(), Some(child))
    }

    pub fn with_config(
        name: impl Into<String>,
        config: NodeConfig,
        child: Option<Box<dyn TreeNode>>,
    ) -> Self {
        Self {
            core: NodeCore::new(name, config),
            child: Slot(child),
        }
    }
}

decorator_common!(ForceSuccess);

impl TreeNode for ForceSuccess {
    decorator_tree_node!();

    fn tick(&mut self) -> Result<NodeStatus> {
        tick_mapped(&self.core, &mut self.child, |status| {
            if status.is_completed() {
                NodeStatus::Success
            } else {
                status
            }
        })
    }

    fn on_halt(&mut self) {
        self.child.halt();
    }
}

/// Turns any completed child outcome into `Failure`.
pub struct ForceFailure {
    core: NodeCore,
    child: Slot,
}

impl ForceFailure {
    pub fn new(name: impl Into<String>, child: Box<dyn TreeNode>) -> Self {
        Self::with_config(name, NodeConfig::default(), Some(child))
    }

    pub fn with_config(
        name: impl Into<String>,
        config: NodeConfig,
        child: Option<Box<dyn TreeNode>>,
    ) -> Self {
        Self {
            core: NodeCore::new(name, config),
            child: Slot(child),
        }
    }
}

decorator_common!(ForceFailure);

impl TreeNode for ForceFailure {
    decorator_tree_node!();

    fn tick(&mut self) -> Result<NodeStatus> {
        tick_mapped(&self.core, &mut self.child, |status| {
            if status.is_completed() {
                NodeStatus::Failure
            } else {
                status
            }
        })
    }

    fn on_halt(&mut self) {
        self.child.halt();
    }
}

/// Re-ticks the child after each success until it has succeeded `num_cycles`
/// times. Any failure ends the loop with `Failure`.
///
/// Successive cycles run within the same tick while the child completes
/// immediately; a `Running` child suspends the loop until the next tick.
pub struct Repeat {
    core: NodeCore,
    child: Slot,
    num_cycles: usize,
    repeat_count: usize,
}

impl Repeat {
    pub fn new(name: impl Into<String>, num_cycles: usize, child: Box<dyn TreeNode>) -> Self {
        Self::with_config(name, NodeConfig::default(), num_cycles, Some(child))
    }

    pub fn with_config(
        name: impl Into<String>,
        config: NodeConfig,
        num_cycles: usize,
        child: Option<Box<dyn TreeNode>>,
    ) -> Self {
        Self {
            core: NodeCore::new(name, config),
            child: Slot(child),
            num_cycles,
            repeat_count: 0,
        }
    }

    /// Successes collected in the current activation.
    pub fn repeat_count(&self) -> usize {
        self.repeat_count
    }
}

decorator_common!(Repeat);

impl TreeNode for Repeat {
    decorator_tree_node!();

    fn tick(&mut self) -> Result<NodeStatus> {
        let child = self.child.get_mut(&self.core)?;

        while self.repeat_count < self.num_cycles {
            match child.execute_tick()? {
                NodeStatus::Success => {
                    self.repeat_count += 1;
                    child.halt_node();
                }
                NodeStatus::Running => return Ok(NodeStatus::Running),
                status @ (NodeStatus::Failure | NodeStatus::Skipped) => {
                    self.repeat_count = 0;
                    child.halt_node();
                    return Ok(status);
                }
                NodeStatus::Idle => return Err(child_returned_idle(&self.core, child.name())),
            }
        }

        self.repeat_count = 0;
        Ok(NodeStatus::Success)
    }

    fn on_halt(&mut self) {
        self.child.halt();
        self.repeat_count = 0;
    }
}

/// Re-ticks the child after each failure, up to `num_attempts` attempts in
/// total, and gives up with `Failure` once they are spent.
///
/// Like [`Repeat`], the child is left `Idle` whenever the loop ends.
pub struct Retry {
    core: NodeCore,
    child: Slot,
    num_attempts: usize,
    try_count: usize,
}

impl Retry {
    pub fn new(name: impl Into<String>, num_attempts: usize, child: Box<dyn TreeNode>) -> Self {
        Self::with_config(name, NodeConfig::default(), num_attempts, Some(child))
    }

    pub fn with_config(
        name: impl Into<String>,
        config: NodeConfig,
        num_attempts: usize,
        child: Option<Box<dyn TreeNode>>,
    ) -> Self {
        Self {
            core: NodeCore::new(name, config),
            child: Slot(child),
            num_attempts,
            try_count: 0,
        }
    }

    /// Failed attempts in the current activation.
    pub fn try_count(&self) -> usize {
        self.try_count
    }
}

decorator_common!(Retry);

impl TreeNode for Retry {
    decorator_tree_node!();

    fn tick(&mut self) -> Result<NodeStatus> {
        let child = self.child.get_mut(&self.core)?;

        while self.try_count < self.num_attempts {
            match child.execute_tick()? {
                NodeStatus::Failure => {
                    self.try_count += 1;
                    child.halt_node();
                }
                NodeStatus::Running => return Ok(NodeStatus::Running),
                status @ (NodeStatus::Success | NodeStatus::Skipped) => {
                    self.try_count = 0;
                    child.halt_node();
                    return Ok(status);
                }
                NodeStatus::Idle => return Err(child_returned_idle(&self.core, child.name())),
            }
        }

        self.try_count = 0;
        Ok(NodeStatus::Failure)
    }

    fn on_halt(&mut self) {
        self.child.halt();
        self.try_count = 0;
    }
}
