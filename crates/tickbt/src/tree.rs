use tickbt_core::{Blackboard, Status, TickContext};

use crate::error::BehaviorError;
use crate::task::Task;

/// Owns a root task, its blackboard and the collaborator world, and advances them one tick at a
/// time.
///
/// The driver does not interpret the root's result: a root that finished simply starts a new
/// activation on the next tick. Wrap the root in `Repeat` for a perpetual loop. Tick cadence is
/// up to the caller.
pub struct BehaviorTree<W>
where
    W: 'static,
{
    root: Task<W>,
    blackboard: Blackboard,
    world: W,
    ticks: u64,
    last: Option<Status>,
}

impl<W> BehaviorTree<W>
where
    W: 'static,
{
    pub fn new(root: Task<W>, world: W) -> Self {
        Self::with_blackboard(root, world, Blackboard::new())
    }

    /// Start from a pre-seeded blackboard (e.g. with a trace log installed).
    pub fn with_blackboard(root: Task<W>, world: W, blackboard: Blackboard) -> Self {
        Self {
            root,
            blackboard,
            world,
            ticks: 0,
            last: None,
        }
    }

    /// Run the root once.
    ///
    /// A `BehaviorError` aborts the tick and is returned as-is; the driver never retries.
    pub fn tick(&mut self) -> Result<Status, BehaviorError> {
        self.ticks = self.ticks.saturating_add(1);
        let ctx = TickContext::new(self.ticks);

        match self
            .root
            .run(&ctx, &mut self.world, &mut self.blackboard)
        {
            Ok(status) => {
                tracing::debug!(tick = ctx.tick, %status, root = %self.root.name(), "tick");
                self.last = Some(status);
                Ok(status)
            }
            Err(err) => {
                tracing::error!(tick = ctx.tick, error = %err, "tick aborted");
                Err(err)
            }
        }
    }

    /// Result of the last successful tick, `None` before the first one.
    pub fn last_status(&self) -> Option<Status> {
        self.last
    }

    /// Number of ticks attempted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Drop all progress in the tree. The blackboard and world are left as they are.
    pub fn restart(&mut self) {
        self.root.restart();
        self.last = None;
    }

    pub fn root(&self) -> &Task<W> {
        &self.root
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn into_parts(self) -> (Task<W>, Blackboard, W) {
        (self.root, self.blackboard, self.world)
    }
}
