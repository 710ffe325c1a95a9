#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of running a task for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    Running,
    Success,
    Failure,
}

/// Terminal result of an activation (`Running` excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for Status {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Success => Status::Success,
            Outcome::Failure => Status::Failure,
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

impl Status {
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Status::Running => None,
            Status::Success => Some(Outcome::Success),
            Status::Failure => Some(Outcome::Failure),
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Status::Running
    }

    /// Swap `Success` and `Failure`; `Running` is left untouched.
    pub fn invert(self) -> Self {
        match self {
            Status::Running => Status::Running,
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Success => "success",
            Status::Failure => "failure",
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
