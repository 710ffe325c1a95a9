//! Deterministic trace events for tickbt trees.
//!
//! Events are recorded through the blackboard so any task can emit them without extra plumbing.
//! Rendering or exporting them is left to tooling built on top.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, SharedTraceSink, TraceEvent, TraceLog, TraceSink, TASK_END, TASK_START, TRACE_LOG,
    TRACE_SINK,
};
