//! Ordered aggregation of children with AND (`Sequence`) or OR (`Select`) semantics.

use tickbt_core::{Blackboard, Status, TickContext};

use crate::error::BehaviorError;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composite {
    /// Succeeds when every child succeeds; the first failure fails the whole node.
    Sequence,
    /// Succeeds on the first child success; fails once every child has failed.
    Select,
}

impl Composite {
    /// Child result that moves evaluation on to the next child. Draining the whole queue this way
    /// also produces the composite's own result.
    fn advance_on(self) -> Status {
        match self {
            Composite::Sequence => Status::Success,
            Composite::Select => Status::Failure,
        }
    }
}

/// Children plus the remaining-queue of the current activation.
///
/// The queue is always the suffix `children[cursor..]`.
pub(crate) struct CompositeState<W>
where
    W: 'static,
{
    children: Vec<Task<W>>,
    cursor: usize,
}

impl<W> CompositeState<W>
where
    W: 'static,
{
    pub(crate) fn new(children: Vec<Task<W>>) -> Self {
        Self {
            children,
            cursor: 0,
        }
    }

    pub(crate) fn children(&self) -> &[Task<W>] {
        &self.children
    }

    pub(crate) fn remaining(&self) -> &[Task<W>] {
        &self.children[self.cursor..]
    }

    /// Refill the queue and restart every child.
    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
        for c in self.children.iter_mut() {
            c.restart();
        }
    }

    pub(crate) fn run(
        &mut self,
        kind: Composite,
        ctx: &TickContext,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Result<Status, BehaviorError> {
        let advance_on = kind.advance_on();
        while self.cursor < self.children.len() {
            let status = self.children[self.cursor].run(ctx, world, blackboard)?;
            if status == Status::Running {
                return Ok(Status::Running);
            }
            if status != advance_on {
                self.cursor = self.children.len();
                return Ok(status);
            }
            self.cursor += 1;
        }

        Ok(advance_on)
    }
}
