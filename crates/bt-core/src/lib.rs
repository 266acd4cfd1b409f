//! Status, blackboard and error primitives for the behavior tree runtime.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod config;
pub mod error;
pub mod status;
pub mod trace;
pub mod value;

pub use blackboard::{Blackboard, BlackboardEntryMetadata, SharedBlackboard, DEFAULT_PRINT_LEN};
pub use config::{NodeConfig, PortsRemapping};
pub use error::{BlackboardError, BtError, CoercionError, PortDirection, Result, Violation};
pub use status::{NodeStatus, NodeType};
pub use trace::{null_sink, NullTraceSink, SharedTraceSink, TraceEvent, TraceSink};
pub use value::{FromValue, Value, ValueKind};
