//! Poll-driven task-tree (behavior tree) engine built on `tickbt-core`.
//!
//! A tree is built once from [`Task`]s and ticked by an external caller through
//! [`BehaviorTree::tick`]. Each tick is a synchronous depth-first traversal; a task that needs more
//! time reports [`Status::Running`] and is resumed at the same position on the next tick.
//!
//! - Leaves run a user hook ([`TaskConfig::run`]).
//! - Composites: [`Composite::Sequence`] (AND) and [`Composite::Select`] (OR).
//! - Decorators: [`Decorator::Invert`], [`Decorator::Succeed`], [`Decorator::Fail`],
//!   [`Decorator::Repeat`], [`Decorator::RepeatUntilFail`].
//! - Blackboard stack leaves live in [`stack`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod builder;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod stack;
pub mod task;
pub mod tree;

pub use composite::Composite;
pub use decorator::Decorator;
pub use error::{BehaviorError, ConfigurationError, Result, TreeError};
pub use task::{Hook, Lifecycle, RunHook, Scope, Task, TaskConfig, TaskKindName, TasksFactory};
pub use tree::BehaviorTree;

pub use tickbt_core::{BbKey, Blackboard, Outcome, Status, TickContext};
