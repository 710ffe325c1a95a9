use thiserror::Error;

use crate::task::TaskKindName;

/// Tree shape errors, detected while building a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{kind} `{task}` has no children")]
    NoChildren { kind: TaskKindName, task: String },

    #[error("{kind} `{task}` has no child")]
    NoChild { kind: TaskKindName, task: String },
}

/// Errors raised while running a tick. Fatal: the engine never retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    #[error("task `{task}` has no run behavior")]
    NoRunBehavior { task: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;
