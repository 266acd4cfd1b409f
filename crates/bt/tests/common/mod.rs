#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use bt::{NodeConfig, NodeCore, NodeStatus, NodeType, Result, TreeNode};
use tracing_subscriber::EnvFilter;

/// Routes the runtime's `tracing` output to the test harness (`RUST_LOG=bt=trace`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Counters shared between a test and the node it observes.
#[derive(Clone, Default)]
pub struct Probe {
    ticks: Rc<Cell<usize>>,
    halts: Rc<Cell<usize>>,
}

impl Probe {
    pub fn ticks(&self) -> usize {
        self.ticks.get()
    }

    pub fn halts(&self) -> usize {
        self.halts.get()
    }
}

/// Leaf that replays a fixed list of statuses, repeating the last one.
pub struct Scripted {
    core: NodeCore,
    node_type: NodeType,
    script: Vec<NodeStatus>,
    next: usize,
    probe: Probe,
}

impl Scripted {
    pub fn new(name: &str, node_type: NodeType, script: &[NodeStatus]) -> (Self, Probe) {
        assert!(!script.is_empty(), "script must not be empty");
        let probe = Probe::default();
        let node = Self {
            core: NodeCore::new(name, NodeConfig::default()),
            node_type,
            script: script.to_vec(),
            next: 0,
            probe: probe.clone(),
        };
        (node, probe)
    }
}

impl TreeNode for Scripted {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn node_type(&self) -> NodeType {
        self.node_type
    }

    fn tick(&mut self) -> Result<NodeStatus> {
        self.probe.ticks.set(self.probe.ticks.get() + 1);
        let status = self.script[self.next.min(self.script.len() - 1)];
        self.next += 1;
        Ok(status)
    }

    fn on_halt(&mut self) {
        self.probe.halts.set(self.probe.halts.get() + 1);
    }
}

pub fn action(name: &str, script: &[NodeStatus]) -> (Box<dyn TreeNode>, Probe) {
    let (node, probe) = Scripted::new(name, NodeType::Action, script);
    (Box::new(node), probe)
}

pub fn condition(name: &str, script: &[NodeStatus]) -> (Box<dyn TreeNode>, Probe) {
    let (node, probe) = Scripted::new(name, NodeType::Condition, script);
    (Box::new(node), probe)
}
