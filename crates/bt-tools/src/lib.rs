//! Tooling primitives for the behavior tree runtime.
//!
//! Recording trace sinks and a text rendering of a tree with its live
//! statuses. Nothing here participates in ticking.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod render;
pub mod trace;

pub use render::{pretty_repr, render, RenderOptions};
pub use trace::{TraceLog, TraceRecorder, VecTraceSink};
