//! Behavior Tree runtime built on `bt-core`.
//!
//! - [`TreeNode`]: the execution contract every node obeys (`execute_tick`,
//!   `halt_node`, status and port access), with shared state in [`NodeCore`]
//! - Control nodes: [`Sequence`], [`Fallback`], [`Parallel`]
//! - Decorators: [`Inverter`], [`ForceSuccess`], [`ForceFailure`], [`Repeat`], [`Retry`]
//! - Leaves: [`SyncAction`], [`StatefulAction`], [`Condition`], [`AlwaysSuccess`], [`AlwaysFailure`]
//! - [`BehaviorTree`]: binds a root to a blackboard and drives ticking
//!
//! Ticking is synchronous and single-threaded. A node either completes within
//! a tick or returns `Running` and is resumed by the next one.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod builder;
pub mod control;
pub mod decorator;
pub mod leaf;
pub mod node;
pub mod tree;

pub use bt_core::{
    Blackboard, BlackboardEntryMetadata, BlackboardError, BtError, NodeConfig, NodeStatus,
    NodeType, PortsRemapping, Result, SharedBlackboard, SharedTraceSink, TraceEvent, TraceSink,
    Value, ValueKind, Violation,
};
pub use control::{Fallback, Parallel, ParallelPolicy, Sequence};
pub use decorator::{ForceFailure, ForceSuccess, Inverter, Repeat, Retry};
pub use leaf::{AlwaysFailure, AlwaysSuccess, Condition, StatefulAction, StatefulBehavior, SyncAction};
pub use node::{find_node, NodeCore, TreeNode};
pub use tree::{BehaviorTree, TreeConfig};
