//! The node execution contract.
//!
//! [`TreeNode`] is the single capability interface every node kind implements.
//! Shared per-node state (identity, config, current status, port resolution)
//! lives in [`NodeCore`], which each concrete node embeds instead of
//! inheriting from a base class.

use bt_core::{
    BtError, FromValue, NodeConfig, NodeStatus, NodeType, PortDirection, PortsRemapping, Result,
    TraceEvent, Value, Violation,
};
use tracing::{debug, trace};

/// Identity, configuration and status embedded in every node.
#[derive(Debug)]
pub struct NodeCore {
    name: String,
    config: NodeConfig,
    status: NodeStatus,
}

impl NodeCore {
    pub fn new(name: impl Into<String>, config: NodeConfig) -> Self {
        Self {
            name: name.into(),
            config,
            status: NodeStatus::Idle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut NodeConfig {
        &mut self.config
    }

    pub fn uid(&self) -> u64 {
        self.config.uid
    }

    pub fn full_path(&self) -> &str {
        &self.config.path
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Records a new status, reporting the transition to the tree's trace sink.
    pub fn set_status(&mut self, status: NodeStatus) {
        let from = self.status;
        if from == status {
            return;
        }
        self.status = status;
        trace!(node = %self.name, path = %self.config.path, %from, to = %status, "status change");
        self.config.trace.borrow_mut().emit(TraceEvent::new(
            self.config.uid,
            self.config.path.clone(),
            from,
            status,
        ));
    }

    pub fn reset_status(&mut self) {
        self.set_status(NodeStatus::Idle);
    }

    /// Reads input port `port` through the remapping, coerced to the entry's declared kind.
    pub fn get_input(&self, port: &str) -> Result<Value> {
        let key = self.remap(&self.config.input_ports, port, PortDirection::Input)?;
        Ok(self.config.blackboard.borrow().get(key)?)
    }

    pub fn get_input_as<T: FromValue>(&self, port: &str) -> Result<T> {
        let key = self.remap(&self.config.input_ports, port, PortDirection::Input)?;
        Ok(self.config.blackboard.borrow().get_as::<T>(key)?)
    }

    /// Writes `value` to the blackboard key output port `port` is remapped to.
    pub fn set_output(&self, port: &str, value: impl Into<Value>) -> Result<()> {
        let key = self.remap(&self.config.output_ports, port, PortDirection::Output)?;
        self.config.blackboard.borrow_mut().set(key, value);
        Ok(())
    }

    fn remap<'a>(
        &self,
        ports: &'a PortsRemapping,
        port: &str,
        direction: PortDirection,
    ) -> Result<&'a str> {
        ports
            .get(port)
            .map(String::as_str)
            .ok_or_else(|| BtError::Port {
                node: self.name.clone(),
                port: port.to_string(),
                direction,
            })
    }
}

/// A behavior tree node.
///
/// Implementors provide [`tick`](TreeNode::tick); callers only ever use
/// [`execute_tick`](TreeNode::execute_tick) and [`halt_node`](TreeNode::halt_node).
pub trait TreeNode: 'static {
    fn core(&self) -> &NodeCore;

    fn core_mut(&mut self) -> &mut NodeCore;

    fn node_type(&self) -> NodeType;

    /// Node-specific evaluation. Returns the new status; never `Idle`.
    ///
    /// Called from a `Running` status it continues the current activation;
    /// from any other status it starts a new one.
    fn tick(&mut self) -> Result<NodeStatus>;

    /// Cancellation hook run by `halt_node` before the status is cleared.
    /// Composites halt their children here; leaves abort in-flight work.
    fn on_halt(&mut self) {}

    fn children(&self) -> &[Box<dyn TreeNode>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn TreeNode>] {
        &mut []
    }

    fn execute_tick(&mut self) -> Result<NodeStatus> {
        let status = self.tick()?;
        if status == NodeStatus::Running && self.node_type() == NodeType::Condition {
            return Err(BtError::violation(
                self.name(),
                Violation::ConditionReturnedRunning,
            ));
        }
        self.core_mut().set_status(status);
        Ok(status)
    }

    /// Cancels the current activation and returns the node to `Idle`.
    ///
    /// No-op on an `Idle` leaf. Composites and decorators always run their
    /// halt hook: a tick that errored leaves them `Idle` while children may
    /// still be running and cursors point mid-activation.
    fn halt_node(&mut self) {
        let status = self.status();
        if status == NodeStatus::Idle && self.node_type().is_leaf() {
            return;
        }
        debug!(node = self.name(), %status, "halting node");
        self.on_halt();
        self.core_mut().reset_status();
    }

    fn status(&self) -> NodeStatus {
        self.core().status()
    }

    /// Forces `Idle` without running the halt hook.
    fn reset_status(&mut self) {
        self.core_mut().reset_status();
    }

    fn is_halted(&self) -> bool {
        self.status() == NodeStatus::Idle
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    fn uid(&self) -> u64 {
        self.core().uid()
    }

    fn full_path(&self) -> &str {
        self.core().full_path()
    }

    fn config(&self) -> &NodeConfig {
        self.core().config()
    }

    fn get_input(&self, port: &str) -> Result<Value> {
        self.core().get_input(port)
    }

    fn set_output(&self, port: &str, value: Value) -> Result<()> {
        self.core().set_output(port, value)
    }
}

/// Depth-first lookup of the first node called `name`, starting at `node` itself.
pub fn find_node<'a>(node: &'a dyn TreeNode, name: &str) -> Option<&'a dyn TreeNode> {
    if node.name() == name {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|child| find_node(&**child, name))
}

/// Error for a child that handed `Idle` back to its parent.
pub(crate) fn child_returned_idle(parent: &NodeCore, child: &str) -> BtError {
    BtError::violation(
        parent.name(),
        Violation::ChildReturnedIdle {
            child: child.to_string(),
        },
    )
}

pub(crate) fn halt_children(children: &mut [Box<dyn TreeNode>]) {
    for child in children.iter_mut() {
        child.halt_node();
    }
}
