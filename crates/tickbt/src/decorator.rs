//! Decorators wrap exactly one child and transform its result.

use tickbt_core::Status;

/// Result transform applied by a decorator to its child's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decorator {
    /// Swap `Success` and `Failure`; `Running` passes through.
    Invert,
    /// Always `Success`, whatever the child reported.
    Succeed,
    /// Always `Failure`, whatever the child reported.
    Fail,
    /// Never terminates; the child is restarted each time it finishes.
    Repeat,
    /// Restarts the child each time it finishes, until it fails once.
    RepeatUntilFail,
}

impl Decorator {
    /// Whether the child gets a fresh activation as soon as it reaches a terminal result.
    pub fn restarts_child_on_terminal(self) -> bool {
        matches!(self, Decorator::Repeat | Decorator::RepeatUntilFail)
    }

    pub fn apply(self, child: Status) -> Status {
        match self {
            Decorator::Invert => child.invert(),
            Decorator::Succeed => Status::Success,
            Decorator::Fail => Status::Failure,
            Decorator::Repeat => Status::Running,
            Decorator::RepeatUntilFail => match child {
                Status::Failure => Status::Success,
                Status::Success | Status::Running => Status::Running,
            },
        }
    }
}
