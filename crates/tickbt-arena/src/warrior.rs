//! The grinding agent: hunt the configured monster kind, loot, heal, patrol when idle.
//!
//! Each leaf is exposed as a [`TaskConfig`] template carrying its default fields, so a caller can
//! rename it or override a field before turning it into a task with [`Task::leaf`].

use std::rc::Rc;

use tickbt::{builder, stack, BbKey, Blackboard, ConfigurationError, Status, Task, TaskConfig};
use tracing::{debug, info};

use crate::config::ArenaConfig;
use crate::utils::{self, DEFAULT_LOW_HEALTH_RATIO};
use crate::world::{Arena, Monster, MonsterId, Point};

/// Monster the agent is currently fighting.
pub const COMBAT_TARGET: BbKey<MonsterId> = BbKey::new("combat_target");
/// Waypoints still to visit, next one on top.
pub const WAYPOINTS: BbKey<Vec<Point>> = BbKey::new("waypoints");
/// Waypoint the agent is walking to.
pub const WAYPOINT: BbKey<Point> = BbKey::new("waypoint");

/// Field: which monsters `acquire_nearby_target` may pick.
pub const FILTER: BbKey<MonsterFilter> = BbKey::new("filter");
/// Field: where `move_in_range` should go.
pub const TARGET: BbKey<TargetSelector> = BbKey::new("target");
/// Field: HP ratio under which `is_low_health` succeeds.
pub const LOW_HEALTH_RATIO: BbKey<f32> = BbKey::new("low_health_ratio");

pub type MonsterFilter = Rc<dyn Fn(&Monster) -> bool>;
pub type TargetSelector = fn(&Blackboard, &Arena) -> Option<MonsterId>;

/// Filter accepting monsters of `kind`.
pub fn hunting(kind: &str) -> MonsterFilter {
    let kind = kind.to_string();
    Rc::new(move |m: &Monster| m.kind == kind)
}

/// Default target selector: the current combat target.
pub fn combat_target(blackboard: &Blackboard, _arena: &Arena) -> Option<MonsterId> {
    blackboard.get(COMBAT_TARGET).copied()
}

/// Pick the closest live monster passing [`FILTER`] and remember it as the combat target.
pub fn acquire_nearby_target(filter: MonsterFilter) -> TaskConfig<Arena> {
    TaskConfig::<Arena>::new()
        .named("acquire_nearby_target")
        .field(FILTER, filter)
        .run(|scope| {
            let Some(filter) = scope.field(FILTER).cloned() else {
                return Status::Failure;
            };
            let Some(id) = scope.world.closest_monster(|m| filter(m)) else {
                debug!("no target nearby");
                return Status::Failure;
            };
            if let Some(monster) = scope.world.monster(id) {
                info!(monster = %monster.name, "acquired target");
            }
            scope.world.change_target(Some(id));
            scope.blackboard.set(COMBAT_TARGET, id);
            Status::Success
        })
}

/// Succeeds while the combat target is alive and so is the character.
pub fn has_valid_combat_target() -> TaskConfig<Arena> {
    TaskConfig::<Arena>::new()
        .named("has_valid_combat_target")
        .run(|scope| {
            let alive = scope
                .blackboard
                .get(COMBAT_TARGET)
                .and_then(|id| scope.world.monster(*id))
                .is_some_and(|m| !m.dead);
            Status::from(alive && scope.world.character.is_alive())
        })
}

/// Walk until the monster chosen by [`TARGET`] is within attack range.
///
/// `Running` while walking, `Failure` when there is nothing to walk to.
pub fn move_in_range() -> TaskConfig<Arena> {
    TaskConfig::<Arena>::new()
        .named("move_in_range")
        .field(TARGET, combat_target as TargetSelector)
        .run(|scope| {
            let Some(select) = scope.field(TARGET).copied() else {
                return Status::Failure;
            };
            let Some(id) = select(&*scope.blackboard, &*scope.world) else {
                return Status::Failure;
            };
            let Some(target) = scope
                .world
                .monster(id)
                .filter(|m| !m.dead)
                .map(|m| m.position)
            else {
                return Status::Failure;
            };
            if scope.world.is_in_range(id) {
                return Status::Success;
            }
            if !scope.world.is_moving() {
                let here = scope.world.character.position;
                let range = scope.world.character.attack_range;
                let step = here.distance(target) - range / 2.0;
                scope.world.move_to(here.toward(target, step));
            }
            Status::Running
        })
}

/// Hit the combat target if possible. Always succeeds.
pub fn attack_target() -> TaskConfig<Arena> {
    TaskConfig::<Arena>::new()
        .named("attack_target")
        .run(|scope| {
            if let Some(id) = scope.blackboard.get(COMBAT_TARGET).copied() {
                if scope.world.can_attack(id) {
                    scope.world.attack(id);
                }
            }
            Status::Success
        })
}

/// Pick up whatever the last kills dropped. Always succeeds.
pub fn loot() -> TaskConfig<Arena> {
    TaskConfig::<Arena>::new().named("loot").run(|scope| {
        let gold = scope.world.loot();
        if gold > 0 {
            info!(gold, "looted");
        }
        Status::Success
    })
}

pub fn is_low_health(ratio: f32) -> TaskConfig<Arena> {
    TaskConfig::<Arena>::new()
        .named("is_low_health")
        .field(LOW_HEALTH_RATIO, ratio)
        .run(|scope| {
            let ratio = scope
                .field(LOW_HEALTH_RATIO)
                .copied()
                .unwrap_or(DEFAULT_LOW_HEALTH_RATIO);
            Status::from(utils::is_low_health(&scope.world.character, ratio))
        })
}

/// Fails when no potion is left.
pub fn drink_potion() -> TaskConfig<Arena> {
    TaskConfig::<Arena>::new()
        .named("drink_potion")
        .run(|scope| {
            let drank = scope.world.drink_potion();
            if drank {
                info!(hp = scope.world.character.hp, "drank potion");
            }
            Status::from(drank)
        })
}

/// Walk to the point stored under `key`. `Running` until arrival.
pub fn walk_to(key: BbKey<Point>) -> TaskConfig<Arena> {
    TaskConfig::<Arena>::new()
        .named("walk_to")
        .run(move |scope| {
            let Some(point) = scope.blackboard.get(key).copied() else {
                return Status::Failure;
            };
            if scope.world.is_at(point) {
                return Status::Success;
            }
            if scope.world.character.destination != Some(point) {
                scope.world.move_to(point);
            }
            Status::Running
        })
}

pub fn heal_if_low(ratio: f32) -> Result<Task<Arena>, ConfigurationError> {
    builder::sequence(
        "heal_if_low",
        vec![
            Task::leaf(is_low_health(ratio)),
            Task::leaf(drink_potion()),
        ],
    )
}

/// Visit `route` in order, refilling the waypoint stack once it runs dry.
pub fn patrol(route: Vec<Point>) -> Result<Task<Arena>, ConfigurationError> {
    let refill: Task<Arena> = builder::select(
        "refill_waypoints",
        vec![
            builder::invert(stack::is_empty(WAYPOINTS)),
            stack::push_to_stack(WAYPOINTS, move |_| route.iter().rev().copied().collect()),
        ],
    )?;
    builder::sequence(
        "patrol",
        vec![
            refill,
            stack::pop_from_stack(WAYPOINTS, WAYPOINT),
            Task::leaf(walk_to(WAYPOINT)),
        ],
    )
}

/// The full agent tree.
///
/// ```text
/// repeat(warrior: select[
///     heal_if_low,
///     hunt: sequence[acquire_nearby_target, repeat_until_fail(fight), loot],
///     patrol,
/// ])
/// fight: sequence[has_valid_combat_target, succeed(heal_if_low), move_in_range, attack_target]
/// ```
pub fn warrior(config: &ArenaConfig) -> Result<Task<Arena>, ConfigurationError> {
    let fight = builder::sequence(
        "fight",
        vec![
            Task::leaf(has_valid_combat_target()),
            builder::succeed(heal_if_low(config.low_health_ratio)?),
            Task::leaf(move_in_range()),
            Task::leaf(attack_target()),
        ],
    )?;
    let hunt = builder::sequence(
        "hunt",
        vec![
            Task::leaf(acquire_nearby_target(hunting(&config.hunt_kind))),
            builder::repeat_until_fail(fight),
            Task::leaf(loot()),
        ],
    )?;
    let root = builder::select(
        "warrior",
        vec![
            heal_if_low(config.low_health_ratio)?,
            hunt,
            patrol(config.patrol.clone())?,
        ],
    )?;
    Ok(builder::repeat(root))
}
