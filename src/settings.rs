//! Engine and encounter settings
//!
//! Persisted as pretty-printed JSON. Every field has a default, so partial
//! files are accepted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Effect, Kind, Rules};
use crate::consts::{DEFAULT_COLS, DEFAULT_ROWS, MIN_RUN};
use crate::error::ConfigError;

/// Board shape and tile generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub rows: usize,
    pub cols: usize,
    /// Tile kinds in play (at least three, no repeats)
    pub kinds: Vec<Kind>,
    /// Shortest run that counts as a match
    pub min_run: usize,
    /// Probability (0.0 - 1.0) that a new tile is rich
    pub rich_chance: f64,
    /// Fixed seed; `None` lets the caller pick one
    pub seed: Option<u64>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            kinds: Kind::ALL.to_vec(),
            min_run: MIN_RUN,
            rich_chance: 0.0,
            seed: None,
        }
    }
}

/// Amount applied per cleared tile, by effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectWeights {
    pub damage: u32,
    pub mana: u32,
    pub heal: u32,
    pub gold: u32,
    pub curse: u32,
}

impl Default for EffectWeights {
    fn default() -> Self {
        Self {
            damage: 2,
            mana: 1,
            heal: 1,
            gold: 1,
            curse: 1,
        }
    }
}

impl EffectWeights {
    pub fn weight(&self, effect: Effect) -> u32 {
        match effect {
            Effect::Damage => self.damage,
            Effect::Mana => self.mana,
            Effect::Heal => self.heal,
            Effect::Gold => self.gold,
            Effect::Curse => self.curse,
        }
    }
}

/// Numbers for the bundled combat collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSettings {
    pub weights: EffectWeights,
    /// Rich tiles count this many times
    pub rich_multiplier: u32,
    pub player_hp: u32,
    pub player_mana: u32,
    pub mob_hp: u32,
    /// Extra mob HP per level after the first
    pub mob_hp_growth: u32,
    pub mob_attack: u32,
    pub mob_attack_growth: u32,
    /// Gold awarded per mob level when loot is claimed
    pub loot_gold: u32,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            weights: EffectWeights::default(),
            rich_multiplier: 2,
            player_hp: 100,
            player_mana: 50,
            mob_hp: 30,
            mob_hp_growth: 10,
            mob_attack: 4,
            mob_attack_growth: 1,
            loot_gold: 5,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardSettings,
    pub combat: CombatSettings,
}

impl Settings {
    /// Validated engine rules
    pub fn rules(&self) -> Result<Rules, ConfigError> {
        Rules {
            rows: self.board.rows,
            cols: self.board.cols,
            kinds: self.board.kinds.clone(),
            min_run: self.board.min_run,
            rich_chance: self.board.rich_chance,
        }
        .validate()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let settings = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or broken
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
