//! Tilebrawl - a match-3 board engine for turn-based combat
//!
//! Core modules:
//! - `board`: Deterministic engine (grid, matching, swaps, cascades, generation)
//! - `encounter`: Session layer (selection, busy flag, combat hand-off, step events)
//! - `settings`: Data-driven configuration persisted as JSON
//! - `error`: Configuration and move rejection errors

pub mod board;
pub mod encounter;
pub mod error;
pub mod settings;

pub use board::{
    Board, Cascade, Coord, Effect, EffectTally, Kind, KindSource, PcgKinds, Resolution, Rules,
    Step, Tile,
};
pub use encounter::{Activation, CombatBridge, CombatState, Encounter, StepObserver, Turn};
pub use error::{ConfigError, InvalidMove};
pub use settings::Settings;

/// Engine configuration constants
pub mod consts {
    /// Reference board dimensions
    pub const DEFAULT_ROWS: usize = 8;
    pub const DEFAULT_COLS: usize = 8;
    /// Smallest board that can hold a run
    pub const MIN_DIMENSION: usize = 3;

    /// Shortest run that counts as a match
    pub const MIN_RUN: usize = 3;
    /// Fewest kinds for which greedy generation always finds a legal kind
    pub const MIN_KINDS: usize = 3;

    /// Random draws per cell before the generator falls back to a linear scan
    pub const GENERATION_ATTEMPTS: u32 = 32;
    /// Regenerations tried when a board has no productive swap
    pub const RESHUFFLE_ATTEMPTS: u32 = 16;
    /// Defensive cap on cascade generations per action (never hit on a correct engine)
    pub const MAX_CASCADE_GENERATIONS: u32 = 512;
}
