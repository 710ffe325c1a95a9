//! Engine-agnostic primitives shared by the tickbt crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod status;
pub mod tick;

pub use blackboard::{BbKey, Blackboard};
pub use status::{Outcome, Status};
pub use tick::TickContext;
