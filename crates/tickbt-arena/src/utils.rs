//! Small character queries shared by the agent's leaves.

use crate::world::Character;

/// Low-health threshold used when a leaf has no explicit ratio.
pub const DEFAULT_LOW_HEALTH_RATIO: f32 = 0.5;

pub fn hp_ratio(character: &Character) -> f32 {
    if character.max_hp <= 0.0 {
        return 0.0;
    }
    character.hp / character.max_hp
}

pub fn is_low_health(character: &Character, ratio: f32) -> bool {
    hp_ratio(character) < ratio
}

/// Total quantity of `name` across all inventory slots.
pub fn item_count(character: &Character, name: &str) -> u32 {
    character
        .items
        .iter()
        .flatten()
        .filter(|item| item.name == name)
        .map(|item| item.quantity)
        .sum()
}

pub fn free_inventory_slots(character: &Character) -> usize {
    character.items.iter().filter(|slot| slot.is_none()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::world::{Arena, GOLD, POTION};

    #[test]
    fn health_ratio_and_threshold() {
        let mut arena = Arena::from_config(&ArenaConfig::default());
        let c = &mut arena.character;
        c.hp = 40.0;
        assert!((hp_ratio(c) - 0.4).abs() < f32::EPSILON);
        assert!(is_low_health(c, DEFAULT_LOW_HEALTH_RATIO));
        c.hp = 50.0;
        assert!(!is_low_health(c, DEFAULT_LOW_HEALTH_RATIO));
    }

    #[test]
    fn counts_items_and_free_slots() {
        let mut arena = Arena::from_config(&ArenaConfig::default());
        let c = &mut arena.character;
        assert_eq!(item_count(c, POTION), 3);
        assert_eq!(item_count(c, GOLD), 0);
        assert_eq!(free_inventory_slots(c), 7);
        assert!(c.add_item(GOLD, 4));
        assert!(c.add_item(GOLD, 1));
        assert_eq!(item_count(c, GOLD), 5);
        assert_eq!(free_inventory_slots(c), 6);
    }
}
