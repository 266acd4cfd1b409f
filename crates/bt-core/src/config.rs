use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::trace::null_sink;
use crate::{Blackboard, SharedBlackboard, SharedTraceSink};

/// Node-local port name -> blackboard key.
pub type PortsRemapping = BTreeMap<String, String>;

/// Everything a node is constructed with.
///
/// Ports are fixed once the node is built. The blackboard and trace handles are
/// rebound when a `BehaviorTree` adopts the node; `uid` and `path` are filled in
/// at that point only if the factory left them unset.
#[derive(Clone)]
pub struct NodeConfig {
    pub blackboard: SharedBlackboard,
    pub input_ports: PortsRemapping,
    pub output_ports: PortsRemapping,
    /// `0` means unassigned; binding replaces it with the node's preorder index.
    pub uid: u64,
    pub path: String,
    pub trace: SharedTraceSink,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            blackboard: Blackboard::shared(),
            input_ports: PortsRemapping::new(),
            output_ports: PortsRemapping::new(),
            uid: 0,
            path: String::new(),
            trace: null_sink(),
        }
    }
}

impl NodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blackboard(mut self, blackboard: SharedBlackboard) -> Self {
        self.blackboard = blackboard;
        self
    }

    /// Remaps input port `port` to blackboard key `key`.
    pub fn with_input(mut self, port: impl Into<String>, key: impl Into<String>) -> Self {
        self.input_ports.insert(port.into(), key.into());
        self
    }

    /// Remaps output port `port` to blackboard key `key`.
    pub fn with_output(mut self, port: impl Into<String>, key: impl Into<String>) -> Self {
        self.output_ports.insert(port.into(), key.into());
        self
    }

    pub fn with_uid(mut self, uid: u64) -> Self {
        self.uid = uid;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_trace(mut self, trace: SharedTraceSink) -> Self {
        self.trace = trace;
        self
    }

    pub fn shares_blackboard_with(&self, other: &NodeConfig) -> bool {
        Rc::ptr_eq(&self.blackboard, &other.blackboard)
    }
}

impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConfig")
            .field("input_ports", &self.input_ports)
            .field("output_ports", &self.output_ports)
            .field("uid", &self.uid)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
