//! A tiny 2D arena the grinding agent acts on.
//!
//! The arena is the engine's external world: leaves query and command it through `Scope::world`.
//! Movement is not instantaneous. `move_to` only sets a destination and [`Arena::step`] walks the
//! character toward it, so movement leaves report `Running` across several ticks.

use serde::{Deserialize, Serialize};

use crate::config::{ArenaConfig, CharacterConfig, MonsterConfig};

pub const GOLD: &str = "gold";
pub const POTION: &str = "hpot";

/// Distance under which two points count as the same spot.
const ARRIVAL_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Step from `self` toward `target` by at most `max`.
    pub fn toward(self, target: Point, max: f32) -> Point {
        let d = self.distance(target);
        if d <= max || d == 0.0 {
            return target;
        }
        let t = max / d;
        Point::new(self.x + (target.x - self.x) * t, self.y + (target.y - self.y) * t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonsterId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    pub kind: String,
    pub position: Point,
    pub hp: f32,
    pub attack: f32,
    pub gold: u32,
    pub dead: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub name: String,
    pub position: Point,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    /// Fixed-size inventory; `None` is a free slot.
    pub items: Vec<Option<Item>>,
    pub destination: Option<Point>,
    pub target: Option<MonsterId>,
}

impl Character {
    fn from_config(config: &CharacterConfig) -> Self {
        let mut items = vec![None; config.inventory_slots.max(1)];
        if config.potions > 0 {
            items[0] = Some(Item {
                name: POTION.to_string(),
                quantity: config.potions,
            });
        }
        Self {
            name: config.name.clone(),
            position: config.position,
            hp: config.hp.min(config.max_hp),
            max_hp: config.max_hp,
            speed: config.speed,
            attack_range: config.attack_range,
            attack_damage: config.attack_damage,
            items,
            destination: None,
            target: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Add `quantity` of `name`, stacking onto an existing slot first.
    ///
    /// Returns `false` when the inventory has no room.
    pub fn add_item(&mut self, name: &str, quantity: u32) -> bool {
        if let Some(item) = self.items.iter_mut().flatten().find(|i| i.name == name) {
            item.quantity = item.quantity.saturating_add(quantity);
            return true;
        }
        match self.items.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(Item {
                    name: name.to_string(),
                    quantity,
                });
                true
            }
            None => false,
        }
    }

    /// Remove one of `name`, freeing the slot when the stack runs out.
    pub fn consume(&mut self, name: &str) -> bool {
        let Some(slot) = self
            .items
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|i| i.name == name))
        else {
            return false;
        };
        if let Some(item) = slot {
            item.quantity -= 1;
            if item.quantity == 0 {
                *slot = None;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    pub character: Character,
    pub monsters: Vec<Monster>,
    /// Gold dropped by kills that has not been picked up yet.
    pub pending_loot: u32,
    pub kills: u32,
    /// Human-readable record of every world command, oldest first.
    pub log: Vec<String>,
}

impl Arena {
    pub fn new(character: Character, monsters: Vec<Monster>) -> Self {
        Self {
            character,
            monsters,
            pending_loot: 0,
            kills: 0,
            log: Vec::new(),
        }
    }

    pub fn from_config(config: &ArenaConfig) -> Self {
        let monsters = config
            .monsters
            .iter()
            .enumerate()
            .map(|(i, m)| monster_from_config(MonsterId(i), m))
            .collect();
        Self::new(Character::from_config(&config.character), monsters)
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(id.0)
    }

    fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.get_mut(id.0)
    }

    /// Closest live monster accepted by `filter`.
    pub fn closest_monster(&self, mut filter: impl FnMut(&Monster) -> bool) -> Option<MonsterId> {
        let here = self.character.position;
        self.monsters
            .iter()
            .filter(|m| !m.dead && filter(*m))
            .min_by(|a, b| here.distance(a.position).total_cmp(&here.distance(b.position)))
            .map(|m| m.id)
    }

    pub fn change_target(&mut self, target: Option<MonsterId>) {
        self.character.target = target;
    }

    pub fn is_moving(&self) -> bool {
        self.character.destination.is_some()
    }

    pub fn is_at(&self, point: Point) -> bool {
        self.character.position.distance(point) <= ARRIVAL_EPSILON
    }

    pub fn is_in_range(&self, id: MonsterId) -> bool {
        self.monster(id).is_some_and(|m| {
            self.character.position.distance(m.position) <= self.character.attack_range
        })
    }

    pub fn can_attack(&self, id: MonsterId) -> bool {
        self.character.is_alive()
            && self.monster(id).is_some_and(|m| !m.dead)
            && self.is_in_range(id)
    }

    pub fn move_to(&mut self, destination: Point) {
        self.log.push(format!(
            "move to ({:.1}, {:.1})",
            destination.x, destination.y
        ));
        self.character.destination = Some(destination);
    }

    /// Hit `id` once. A surviving monster hits back; a killed one drops its gold.
    ///
    /// Returns `false` when the attack was not possible.
    pub fn attack(&mut self, id: MonsterId) -> bool {
        if !self.can_attack(id) {
            return false;
        }
        let damage = self.character.attack_damage;
        let Some(monster) = self.monster_mut(id) else {
            return false;
        };
        monster.hp = (monster.hp - damage).max(0.0);
        let name = monster.name.clone();
        if monster.hp <= 0.0 {
            monster.dead = true;
            let gold = monster.gold;
            self.pending_loot = self.pending_loot.saturating_add(gold);
            self.kills = self.kills.saturating_add(1);
            if self.character.target == Some(id) {
                self.character.target = None;
            }
            self.log.push(format!("killed {name}"));
        } else {
            let retaliation = monster.attack;
            self.character.hp = (self.character.hp - retaliation).max(0.0);
            self.log.push(format!("attack {name}"));
        }
        true
    }

    /// Pick up all dropped gold. Returns how much was picked up.
    pub fn loot(&mut self) -> u32 {
        let gold = self.pending_loot;
        if gold > 0 && self.character.add_item(GOLD, gold) {
            self.pending_loot = 0;
            self.log.push(format!("loot {gold} gold"));
            return gold;
        }
        0
    }

    /// Drink a health potion if one is in the inventory.
    pub fn drink_potion(&mut self) -> bool {
        if !self.character.consume(POTION) {
            return false;
        }
        self.character.hp = self.character.max_hp;
        self.log.push("drink potion".to_string());
        true
    }

    /// Advance the world by one step: the character walks toward its destination.
    pub fn step(&mut self) {
        let Some(destination) = self.character.destination else {
            return;
        };
        let next = self
            .character
            .position
            .toward(destination, self.character.speed);
        self.character.position = next;
        if next.distance(destination) <= ARRIVAL_EPSILON {
            self.character.destination = None;
        }
    }
}

fn monster_from_config(id: MonsterId, config: &MonsterConfig) -> Monster {
    Monster {
        id,
        name: config.name.clone(),
        kind: config.kind.clone(),
        position: config.position,
        hp: config.hp,
        attack: config.attack,
        gold: config.gold,
        dead: config.hp <= 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::from_config(&ArenaConfig::default())
    }

    #[test]
    fn toward_clamps_to_target() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(a.toward(Point::new(3.0, 4.0), 10.0), Point::new(3.0, 4.0));
        let p = a.toward(Point::new(10.0, 0.0), 4.0);
        assert!((p.x - 4.0).abs() < 1e-5 && p.y.abs() < 1e-5);
    }

    #[test]
    fn closest_monster_honors_the_filter() {
        let arena = arena();
        let goo = arena.closest_monster(|_| true).unwrap();
        assert_eq!(arena.monster(goo).unwrap().kind, "goo");
        let bee = arena.closest_monster(|m| m.kind == "bee").unwrap();
        assert_eq!(arena.monster(bee).unwrap().name, "bee-1");
    }

    #[test]
    fn step_walks_at_character_speed() {
        let mut arena = arena();
        arena.move_to(Point::new(25.0, 0.0));
        arena.step();
        assert_eq!(arena.character.position, Point::new(10.0, 0.0));
        assert!(arena.is_moving());
        arena.step();
        arena.step();
        assert!(arena.is_at(Point::new(25.0, 0.0)));
        assert!(!arena.is_moving());
    }

    #[test]
    fn consuming_the_last_potion_frees_the_slot() {
        let mut arena = arena();
        arena.character.hp = 10.0;
        for _ in 0..3 {
            assert!(arena.drink_potion());
        }
        assert!(!arena.drink_potion());
        assert!(arena.character.items.iter().all(Option::is_none));
        assert_eq!(arena.character.hp, arena.character.max_hp);
    }

    #[test]
    fn killing_drops_loot_once() {
        let mut arena = arena();
        let goo = MonsterId(2);
        arena.character.position = Point::new(5.0, 5.0);
        while !arena.monster(goo).unwrap().dead {
            assert!(arena.attack(goo));
        }
        assert!(!arena.attack(goo));
        assert_eq!(arena.kills, 1);
        assert_eq!(arena.loot(), 5);
        assert_eq!(arena.loot(), 0);
    }

    #[test]
    fn gold_saturates_instead_of_overflowing() {
        let mut config = ArenaConfig::default();
        config.monsters = vec![
            MonsterConfig {
                gold: u32::MAX,
                hp: 1.0,
                position: Point::new(1.0, 0.0),
                ..MonsterConfig::default()
            };
            2
        ];
        let mut arena = Arena::from_config(&config);
        assert!(arena.attack(MonsterId(0)));
        assert!(arena.attack(MonsterId(1)));
        assert_eq!(arena.pending_loot, u32::MAX);

        assert!(arena.character.add_item(GOLD, u32::MAX));
        assert!(arena.character.add_item(GOLD, 10));
        assert_eq!(crate::utils::item_count(&arena.character, GOLD), u32::MAX);
    }
}
