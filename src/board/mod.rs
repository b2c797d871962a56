//! Deterministic match-3 engine
//!
//! Everything in this module is a pure state transition over a [`Board`]:
//! - Seeded kinds only (through [`KindSource`])
//! - Stable scan order (rows, then columns; row-major fills)
//! - No rendering, input or combat dependencies

pub mod cascade;
pub mod generator;
pub mod grid;
pub mod matches;
pub mod source;
pub mod swap;
pub mod tally;

pub use cascade::{Cascade, Resolution, Step, TileMove, apply_gravity, refill, remove, resolve};
pub use generator::generate;
pub use grid::{Board, Coord, Kind, Tile};
pub use matches::{Axis, Run, causes_match, find_matches, find_runs};
pub use source::{KindSource, PcgKinds, ScriptedKinds};
pub use swap::{SwapOutcome, check_swap, find_hint, try_swap};
pub use tally::{Effect, EffectTally};

use std::collections::BTreeSet;

use crate::consts::{DEFAULT_COLS, DEFAULT_ROWS, MIN_DIMENSION, MIN_KINDS, MIN_RUN};
use crate::error::ConfigError;

/// Validated engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub rows: usize,
    pub cols: usize,
    /// Kinds drawn for new tiles, each bound to its own effect
    pub kinds: Vec<Kind>,
    /// Shortest run that counts as a match
    pub min_run: usize,
    /// Probability that a new tile is rich
    pub rich_chance: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            kinds: Kind::ALL.to_vec(),
            min_run: MIN_RUN,
            rich_chance: 0.0,
        }
    }
}

impl Rules {
    /// Reject configurations the engine cannot run safely
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.rows < MIN_DIMENSION || self.cols < MIN_DIMENSION {
            return Err(ConfigError::DimensionTooSmall {
                rows: self.rows,
                cols: self.cols,
                min: MIN_DIMENSION,
            });
        }

        let mut seen = BTreeSet::new();
        if let Some(&dup) = self.kinds.iter().find(|&&k| !seen.insert(k)) {
            return Err(ConfigError::DuplicateKind(dup));
        }
        if self.kinds.len() < MIN_KINDS {
            return Err(ConfigError::TooFewKinds {
                found: self.kinds.len(),
                min: MIN_KINDS,
            });
        }

        let longest = self.rows.max(self.cols);
        if self.min_run < MIN_RUN || self.min_run > longest {
            return Err(ConfigError::InvalidRunLength {
                min_run: self.min_run,
                floor: MIN_RUN,
                longest,
            });
        }

        if !(0.0..=1.0).contains(&self.rich_chance) {
            return Err(ConfigError::InvalidRichChance(self.rich_chance));
        }

        Ok(self)
    }
}
