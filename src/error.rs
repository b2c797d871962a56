//! Error types
//!
//! Configuration errors are fatal and surface at initialization. Move
//! rejections are ordinary outcomes: they never mutate the board.

use crate::board::{Coord, Kind};

/// Invalid or unusable engine configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min}, got {rows}x{cols}")]
    DimensionTooSmall { rows: usize, cols: usize, min: usize },

    #[error("at least {min} tile kinds are required, got {found}")]
    TooFewKinds { found: usize, min: usize },

    #[error("tile kind {0:?} is configured more than once")]
    DuplicateKind(Kind),

    #[error("minimum run {min_run} must be between {floor} and the longest board side ({longest})")]
    InvalidRunLength {
        min_run: usize,
        floor: usize,
        longest: usize,
    },

    #[error("rich tile chance {0} is outside [0, 1]")]
    InvalidRichChance(f64),

    #[error("no legal kind for cell ({row}, {col}) with {kinds} kinds")]
    GenerationDeadlock { row: usize, col: usize, kinds: usize },

    #[error("board cannot be replaced while a cascade is resolving")]
    Resolving,

    #[error("invalid board layout: {0}")]
    Layout(String),

    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings json is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a player action was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("a tile cannot be swapped with itself")]
    SameTile,

    #[error("coordinate {0} is outside the board")]
    OutOfRange(Coord),

    #[error("{a} and {b} are not neighbours")]
    NotAdjacent { a: Coord, b: Coord },

    #[error("no tile at {0}")]
    EmptyTile(Coord),

    #[error("a cascade is still resolving")]
    Busy,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("loot must be claimed first")]
    LootPending,
}
