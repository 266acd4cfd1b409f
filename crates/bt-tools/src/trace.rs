use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use bt_core::{NodeStatus, SharedTraceSink, TraceEvent, TraceSink};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Statuses `path` moved through, in order, starting with the first one it left.
    pub fn history(&self, path: &str) -> Vec<NodeStatus> {
        let mut history = Vec::new();
        for event in self.events.iter().filter(|e| e.path == path) {
            if history.is_empty() {
                history.push(event.from);
            }
            history.push(event.to);
        }
        history
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl fmt::Display for TraceLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "#{:<4} {}: {} -> {}", event.uid, event.path, event.from, event.to)?;
        }
        Ok(())
    }
}

/// Cloneable recorder: hand [`sink`](TraceRecorder::sink) to the tree, read the log here.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    log: Rc<RefCell<TraceLog>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> SharedTraceSink {
        Rc::new(RefCell::new(self.clone()))
    }

    pub fn log(&self) -> Ref<'_, TraceLog> {
        self.log.borrow()
    }

    pub fn take(&self) -> TraceLog {
        self.log.take()
    }
}

impl TraceSink for TraceRecorder {
    fn emit(&mut self, event: TraceEvent) {
        self.log.borrow_mut().push(event);
    }
}
