//! Run detection
//!
//! Pure scans over a board. Rows are scanned left to right, then columns top
//! to bottom; empty slots break runs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grid::{Board, Coord, Kind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A maximal line of same-kind tiles of at least the minimum length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub kind: Kind,
    pub axis: Axis,
    pub start: Coord,
    pub len: usize,
}

impl Run {
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let Run { axis, start, .. } = *self;
        (0..self.len).map(move |i| match axis {
            Axis::Horizontal => Coord::new(start.row, start.col + i),
            Axis::Vertical => Coord::new(start.row + i, start.col),
        })
    }
}

/// Scan one line, closing runs on kind change, gap, or line end
fn scan_line(
    len: usize,
    min_run: usize,
    kind_at: impl Fn(usize) -> Option<Kind>,
    make: impl Fn(Kind, usize, usize) -> Run,
    out: &mut Vec<Run>,
) {
    let mut start = 0;
    let mut current: Option<Kind> = None;
    for i in 0..=len {
        let kind = if i < len { kind_at(i) } else { None };
        if kind.is_some() && kind == current {
            continue;
        }
        if let Some(k) = current {
            if i - start >= min_run {
                out.push(make(k, start, i - start));
            }
        }
        current = kind;
        start = i;
    }
}

/// All runs of length >= `min_run`, rows first then columns
pub fn find_runs(board: &Board, min_run: usize) -> Vec<Run> {
    let (rows, cols) = board.dimensions();
    let mut runs = Vec::new();

    for row in 0..rows {
        scan_line(
            cols,
            min_run,
            |col| board.kind_at(row, col),
            |kind, col, len| Run {
                kind,
                axis: Axis::Horizontal,
                start: Coord::new(row, col),
                len,
            },
            &mut runs,
        );
    }

    for col in 0..cols {
        scan_line(
            rows,
            min_run,
            |row| board.kind_at(row, col),
            |kind, row, len| Run {
                kind,
                axis: Axis::Vertical,
                start: Coord::new(row, col),
                len,
            },
            &mut runs,
        );
    }

    runs
}

/// Union of every coordinate covered by a run. Crossing runs share coordinates once.
pub fn find_matches(board: &Board, min_run: usize) -> BTreeSet<Coord> {
    find_runs(board, min_run)
        .iter()
        .flat_map(Run::coords)
        .collect()
}

/// Would placing `kind` at (row, col) complete a run with the tiles already
/// to its left or above? Later-scanned neighbours are not consulted.
pub fn causes_match(board: &Board, row: usize, col: usize, kind: Kind, min_run: usize) -> bool {
    let need = min_run.saturating_sub(1);
    let left = (1..=need)
        .take_while(|&d| col >= d && board.kind_at(row, col - d) == Some(kind))
        .count();
    if left >= need {
        return true;
    }
    let above = (1..=need)
        .take_while(|&d| row >= d && board.kind_at(row - d, col) == Some(kind))
        .count();
    above >= need
}
