//! Initial board generation
//!
//! Cells are filled in row-major order. Each cell redraws until the kind does
//! not complete a run with the already-placed tiles to its left or above.
//! With at least three kinds a legal kind always exists: the left and upper
//! checks can each rule out at most one kind.

use super::grid::{Board, Kind, Tile};
use super::matches::causes_match;
use super::source::KindSource;
use super::Rules;
use crate::consts::GENERATION_ATTEMPTS;
use crate::error::ConfigError;

/// Build a board with no runs
pub fn generate(rules: &Rules, source: &mut impl KindSource) -> Result<Board, ConfigError> {
    let mut board = Board::empty(rules.rows, rules.cols);

    for row in 0..rules.rows {
        for col in 0..rules.cols {
            let kind = pick_kind(&board, rules, source, row, col)?;
            let mut tile = Tile::new(kind, row, col);
            tile.rich = source.roll_rich(rules.rich_chance);
            board.set(row, col, Some(tile));
        }
    }

    log::debug!("Generated {}x{} board:\n{}", rules.rows, rules.cols, board);
    Ok(board)
}

fn pick_kind(
    board: &Board,
    rules: &Rules,
    source: &mut impl KindSource,
    row: usize,
    col: usize,
) -> Result<Kind, ConfigError> {
    for _ in 0..GENERATION_ATTEMPTS {
        let kind = source.next_kind(&rules.kinds);
        if !causes_match(board, row, col, kind, rules.min_run) {
            return Ok(kind);
        }
    }

    // Unlucky streak: take the first legal kind in configuration order
    rules
        .kinds
        .iter()
        .copied()
        .find(|&k| !causes_match(board, row, col, k, rules.min_run))
        .ok_or(ConfigError::GenerationDeadlock {
            row,
            col,
            kinds: rules.kinds.len(),
        })
}
