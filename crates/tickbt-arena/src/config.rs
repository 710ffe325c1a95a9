//! Arena configuration, loaded from YAML.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::world::Point;

/// Top-level configuration for an arena run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Ticks per second driven by the CLI loop
    pub tick_rate_hz: f64,

    /// Stop after this many ticks (runs until Ctrl-C when unset)
    pub max_ticks: Option<u64>,

    /// Record lifecycle trace events in the blackboard
    pub trace: bool,

    /// Monster kind the agent grinds
    pub hunt_kind: String,

    /// HP ratio under which the agent drinks a potion
    pub low_health_ratio: f32,

    pub character: CharacterConfig,

    pub monsters: Vec<MonsterConfig>,

    /// Waypoints walked in order while nothing is worth hunting
    pub patrol: Vec<Point>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 1.0,
            max_ticks: None,
            trace: false,
            hunt_kind: default_hunt_kind(),
            low_health_ratio: 0.5,
            character: CharacterConfig::default(),
            monsters: default_monsters(),
            patrol: vec![
                Point::new(0.0, 0.0),
                Point::new(40.0, 0.0),
                Point::new(40.0, 40.0),
                Point::new(0.0, 40.0),
            ],
        }
    }
}

fn default_hunt_kind() -> String {
    "bee".to_string()
}

fn default_monsters() -> Vec<MonsterConfig> {
    vec![
        MonsterConfig::new("bee-1", "bee", Point::new(30.0, 10.0)),
        MonsterConfig::new("bee-2", "bee", Point::new(-25.0, 35.0)),
        MonsterConfig::new("goo-1", "goo", Point::new(5.0, 5.0)),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub name: String,
    pub position: Point,
    pub hp: f32,
    pub max_hp: f32,
    /// Distance covered per world step
    pub speed: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    /// Health potions in the starting inventory
    pub potions: u32,
    pub inventory_slots: usize,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            name: "warrior".to_string(),
            position: Point::new(0.0, 0.0),
            hp: 100.0,
            max_hp: 100.0,
            speed: 10.0,
            attack_range: 5.0,
            attack_damage: 25.0,
            potions: 3,
            inventory_slots: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    pub name: String,
    pub kind: String,
    pub position: Point,
    pub hp: f32,
    /// Damage dealt back each time the monster is hit
    pub attack: f32,
    /// Gold dropped on death
    pub gold: u32,
}

impl MonsterConfig {
    pub fn new(name: &str, kind: &str, position: Point) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            position,
            ..Self::default()
        }
    }
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            name: "monster".to_string(),
            kind: default_hunt_kind(),
            position: Point::default(),
            hp: 50.0,
            attack: 8.0,
            gold: 5,
        }
    }
}

impl ArenaConfig {
    /// Load from a YAML file. Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ArenaConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            bail!("tick_rate_hz must be a positive number, got {}", self.tick_rate_hz);
        }
        self.tick_period()?;
        if !(0.0..=1.0).contains(&self.low_health_ratio) {
            bail!(
                "low_health_ratio must be within 0..=1, got {}",
                self.low_health_ratio
            );
        }
        let character = &self.character;
        for (field, value) in [
            ("max_hp", character.max_hp),
            ("speed", character.speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                bail!("character.{field} must be a positive number, got {value}");
            }
        }
        for (field, value) in [
            ("hp", character.hp),
            ("attack_range", character.attack_range),
            ("attack_damage", character.attack_damage),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                bail!("character.{field} must be a non-negative number, got {value}");
            }
        }
        Ok(())
    }

    /// Wall-clock period between two ticks.
    ///
    /// Fails when the rate does not map to a period between 1ns and `Duration::MAX`.
    pub fn tick_period(&self) -> Result<Duration> {
        let period = Duration::try_from_secs_f64(1.0 / self.tick_rate_hz).with_context(|| {
            format!("tick_rate_hz {} is too low", self.tick_rate_hz)
        })?;
        if period.is_zero() {
            bail!("tick_rate_hz {} is too high", self.tick_rate_hz);
        }
        Ok(period)
    }
}
