//! Driving the warrior tree against an arena.

use serde::Serialize;
use tickbt::{BehaviorError, BehaviorTree, Blackboard, ConfigurationError, Status};
use tracing::debug;
use tickbt_trace::{TraceLog, TRACE_LOG};

use crate::config::ArenaConfig;
use crate::utils;
use crate::warrior;
use crate::world::{Arena, GOLD, POTION};

/// Build the warrior tree over a fresh arena. Records trace events when `config.trace` is set.
pub fn spawn(config: &ArenaConfig) -> Result<BehaviorTree<Arena>, ConfigurationError> {
    let mut blackboard = Blackboard::new();
    if config.trace {
        blackboard.set(TRACE_LOG, TraceLog::default());
    }
    Ok(BehaviorTree::with_blackboard(
        warrior::warrior(config)?,
        Arena::from_config(config),
        blackboard,
    ))
}

/// Tick the tree once, then let the world move.
pub fn advance(tree: &mut BehaviorTree<Arena>) -> Result<Status, BehaviorError> {
    let status = tree.tick()?;
    tree.world_mut().step();
    Ok(status)
}

/// Build a tree and advance it `ticks` times with no wall-clock pacing.
///
/// Stops early when the character dies.
pub fn simulate(config: &ArenaConfig, ticks: u64) -> tickbt::Result<RunSummary> {
    let mut tree = spawn(config)?;
    for _ in 0..ticks {
        advance(&mut tree)?;
        if !tree.world().character.is_alive() {
            debug!(tick = tree.ticks(), "character died, stopping simulation");
            break;
        }
    }
    Ok(RunSummary::collect(&tree))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub last_status: Option<Status>,
    pub kills: u32,
    pub gold: u32,
    pub potions: u32,
    pub hp: f32,
    pub trace_events: usize,
}

impl RunSummary {
    pub fn collect(tree: &BehaviorTree<Arena>) -> Self {
        let arena = tree.world();
        Self {
            ticks: tree.ticks(),
            last_status: tree.last_status(),
            kills: arena.kills,
            gold: utils::item_count(&arena.character, GOLD),
            potions: utils::item_count(&arena.character, POTION),
            hp: arena.character.hp,
            trace_events: tree
                .blackboard()
                .get(TRACE_LOG)
                .map_or(0, |log| log.events.len()),
        }
    }
}
