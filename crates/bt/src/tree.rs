use std::rc::Rc;

use bt_core::{NodeStatus, Result, SharedBlackboard, SharedTraceSink};
use tracing::{debug, warn};

use crate::node::{find_node, TreeNode};

/// What a [`BehaviorTree`] binds into every node it adopts.
///
/// A `None` field keeps the handle the root node was constructed with.
#[derive(Clone, Default)]
pub struct TreeConfig {
    pub blackboard: Option<SharedBlackboard>,
    pub trace: Option<SharedTraceSink>,
}

impl TreeConfig {
    pub fn with_blackboard(mut self, blackboard: SharedBlackboard) -> Self {
        self.blackboard = Some(blackboard);
        self
    }

    pub fn with_trace(mut self, trace: SharedTraceSink) -> Self {
        self.trace = Some(trace);
        self
    }
}

/// Binds a root node to a blackboard and drives it from the outside.
pub struct BehaviorTree {
    root: Box<dyn TreeNode>,
    blackboard: SharedBlackboard,
    trace: SharedTraceSink,
    ticks: u64,
}

impl BehaviorTree {
    /// Adopts `root`, sharing the root's own blackboard with every descendant.
    pub fn new(root: Box<dyn TreeNode>) -> Self {
        Self::with_config(root, TreeConfig::default())
    }

    /// Adopts `root` on an externally supplied (possibly shared) blackboard.
    pub fn with_blackboard(root: Box<dyn TreeNode>, blackboard: SharedBlackboard) -> Self {
        Self::with_config(root, TreeConfig::default().with_blackboard(blackboard))
    }

    pub fn with_config(mut root: Box<dyn TreeNode>, config: TreeConfig) -> Self {
        let blackboard = config
            .blackboard
            .unwrap_or_else(|| Rc::clone(&root.config().blackboard));
        let trace = config
            .trace
            .unwrap_or_else(|| Rc::clone(&root.config().trace));
        bind(&mut *root, &blackboard, &trace, "", &mut 1);
        Self {
            root,
            blackboard,
            trace,
            ticks: 0,
        }
    }

    /// Replaces the root, binding the new subtree to this tree's blackboard.
    pub fn set_root(&mut self, mut root: Box<dyn TreeNode>) {
        self.root.halt_node();
        bind(&mut *root, &self.blackboard, &self.trace, "", &mut 1);
        self.root = root;
    }

    pub fn root(&self) -> &dyn TreeNode {
        &*self.root
    }

    pub fn blackboard(&self) -> &SharedBlackboard {
        &self.blackboard
    }

    pub fn status(&self) -> NodeStatus {
        self.root.status()
    }

    /// External ticks delivered so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<&dyn TreeNode> {
        find_node(&*self.root, name)
    }

    /// One activation step of the root.
    pub fn tick_once(&mut self) -> Result<NodeStatus> {
        self.ticks += 1;
        let status = self.root.execute_tick().inspect_err(|err| {
            warn!(tick = self.ticks, root = self.root.name(), %err, "tick failed");
        })?;
        debug!(tick = self.ticks, root = self.root.name(), %status, "tick");
        Ok(status)
    }

    /// Ticks back-to-back until the root stops returning `Running`.
    ///
    /// No pacing happens between ticks.
    pub fn tick_while_running(&mut self) -> Result<NodeStatus> {
        let mut status = self.tick_once()?;
        while status == NodeStatus::Running {
            status = self.tick_once()?;
        }
        Ok(status)
    }

    /// Halts the root and, through it, every running descendant.
    pub fn halt_tree(&mut self) {
        debug!(root = self.root.name(), "halting tree");
        self.root.halt_node();
    }
}

/// Shares the tree's handles with `node` and its descendants, assigning
/// preorder uids and dotted paths where the factory left them unset.
fn bind(
    node: &mut dyn TreeNode,
    blackboard: &SharedBlackboard,
    trace: &SharedTraceSink,
    parent_path: &str,
    next_uid: &mut u64,
) {
    let path = {
        let core = node.core_mut();
        let name = core.name().to_string();
        let config = core.config_mut();
        config.blackboard = Rc::clone(blackboard);
        config.trace = Rc::clone(trace);
        if config.uid == 0 {
            config.uid = *next_uid;
        }
        *next_uid += 1;
        if config.path.is_empty() {
            config.path = if parent_path.is_empty() {
                name
            } else {
                format!("{parent_path}.{name}")
            };
        }
        config.path.clone()
    };

    for child in node.children_mut() {
        bind(&mut **child, blackboard, trace, &path, next_uid);
    }
}
