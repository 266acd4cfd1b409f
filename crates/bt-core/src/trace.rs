use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::NodeStatus;

/// One node moving from `from` to `to`, keyed by the uid and dotted path the
/// tree assigned when it bound the node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub uid: u64,
    pub path: Cow<'static, str>,
    pub from: NodeStatus,
    pub to: NodeStatus,
}

impl TraceEvent {
    pub fn new(uid: u64, path: impl Into<Cow<'static, str>>, from: NodeStatus, to: NodeStatus) -> Self {
        Self {
            uid,
            path: path.into(),
            from,
            to,
        }
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

/// The one sink a tree reports into; cloned into every node when the tree binds.
pub type SharedTraceSink = Rc<RefCell<dyn TraceSink>>;

pub fn null_sink() -> SharedTraceSink {
    Rc::new(RefCell::new(NullTraceSink))
}
