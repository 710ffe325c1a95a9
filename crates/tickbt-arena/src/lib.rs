//! Reference grinding agent for the tickbt engine.
//!
//! [`world::Arena`] is the collaborator world, [`warrior`] holds the leaves and the agent tree,
//! [`run`] drives one against the other. The `tickbt-arena` binary wraps this in a timed loop.

#![forbid(unsafe_code)]

pub mod config;
pub mod run;
pub mod utils;
pub mod warrior;
pub mod world;

pub use config::ArenaConfig;
pub use run::{advance, simulate, spawn, RunSummary};
pub use world::{Arena, Point};
