//! Swap validation
//!
//! A player swap is legal when both coordinates are on the board, hold tiles
//! and are 4-directional neighbours. It is productive when the swapped board
//! contains a run; otherwise it is undone.

use std::collections::BTreeSet;

use super::grid::{Board, Coord};
use super::matches::find_matches;
use crate::error::InvalidMove;

/// Result of a legal swap attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap stands; these coordinates are matched
    Committed(BTreeSet<Coord>),
    /// Nothing matched; the board was restored
    Reverted,
}

/// Check the geometry of a proposed swap without touching the board
pub fn check_swap(board: &Board, a: Coord, b: Coord) -> Result<(), InvalidMove> {
    if a == b {
        return Err(InvalidMove::SameTile);
    }
    for c in [a, b] {
        if !board.in_range(c.row, c.col) {
            return Err(InvalidMove::OutOfRange(c));
        }
    }
    if !a.is_adjacent(b) {
        return Err(InvalidMove::NotAdjacent { a, b });
    }
    for c in [a, b] {
        if board.at(c).is_none() {
            return Err(InvalidMove::EmptyTile(c));
        }
    }
    Ok(())
}

/// Tentatively swap, keep it if it produces a match, otherwise swap back
pub fn try_swap(
    board: &mut Board,
    a: Coord,
    b: Coord,
    min_run: usize,
) -> Result<SwapOutcome, InvalidMove> {
    check_swap(board, a, b)?;
    board.swap(a, b);

    let matched = find_matches(board, min_run);
    if matched.is_empty() {
        board.swap(a, b);
        return Ok(SwapOutcome::Reverted);
    }
    Ok(SwapOutcome::Committed(matched))
}

/// First productive swap in row-major order, trying the right neighbour
/// before the one below
pub fn find_hint(board: &Board, min_run: usize) -> Option<(Coord, Coord)> {
    let (rows, cols) = board.dimensions();
    let mut scratch = board.clone();

    for a in board.coords() {
        let neighbours = [
            (a.col + 1 < cols).then(|| Coord::new(a.row, a.col + 1)),
            (a.row + 1 < rows).then(|| Coord::new(a.row + 1, a.col)),
        ];
        for b in neighbours.into_iter().flatten() {
            if check_swap(&scratch, a, b).is_err() {
                continue;
            }
            scratch.swap(a, b);
            let productive = !find_matches(&scratch, min_run).is_empty();
            scratch.swap(a, b);
            if productive {
                return Some((a, b));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_RUN;

    fn board(layout: &str) -> Board {
        layout.parse().unwrap()
    }

    const ROW_READY: &str = "
        RRBG
        GBRY
        YGPB
    ";

    #[test]
    fn test_productive_swap_commits() {
        let mut b = board(ROW_READY);
        let outcome = try_swap(&mut b, Coord::new(0, 2), Coord::new(1, 2), MIN_RUN).unwrap();
        let SwapOutcome::Committed(matched) = outcome else {
            panic!("expected a committed swap");
        };
        assert_eq!(
            matched.into_iter().collect::<Vec<_>>(),
            vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]
        );
        assert_eq!(b.kind_at(1, 2), Some(crate::board::Kind::Blue));
    }

    #[test]
    fn test_unproductive_swap_reverts() {
        let mut b = board(ROW_READY);
        let before = b.clone();
        let outcome = try_swap(&mut b, Coord::new(2, 0), Coord::new(2, 1), MIN_RUN).unwrap();
        assert_eq!(outcome, SwapOutcome::Reverted);
        assert_eq!(b, before);
    }

    #[test]
    fn test_invalid_swaps_do_not_mutate() {
        let mut b = board(ROW_READY);
        let before = b.clone();
        let a = Coord::new(0, 0);

        assert_eq!(try_swap(&mut b, a, a, MIN_RUN), Err(InvalidMove::SameTile));
        assert_eq!(
            try_swap(&mut b, a, Coord::new(2, 2), MIN_RUN),
            Err(InvalidMove::NotAdjacent {
                a,
                b: Coord::new(2, 2)
            })
        );
        assert_eq!(
            try_swap(&mut b, a, Coord::new(1, 1), MIN_RUN),
            Err(InvalidMove::NotAdjacent {
                a,
                b: Coord::new(1, 1)
            })
        );
        assert_eq!(
            try_swap(&mut b, Coord::new(2, 3), Coord::new(3, 3), MIN_RUN),
            Err(InvalidMove::OutOfRange(Coord::new(3, 3)))
        );
        assert_eq!(b, before);
    }

    #[test]
    fn test_empty_slot_cannot_be_swapped() {
        let mut b = board(
            "RGB
             G.R
             BRG",
        );
        assert_eq!(
            try_swap(&mut b, Coord::new(0, 1), Coord::new(1, 1), MIN_RUN),
            Err(InvalidMove::EmptyTile(Coord::new(1, 1)))
        );
    }

    #[test]
    fn test_hint_finds_first_productive_swap() {
        let b = board(ROW_READY);
        assert_eq!(
            find_hint(&b, MIN_RUN),
            Some((Coord::new(0, 2), Coord::new(1, 2)))
        );
    }

    #[test]
    fn test_hint_none_on_dead_board() {
        let b = board(
            "RGB
             PYR
             GBP",
        );
        assert_eq!(find_hint(&b, MIN_RUN), None);
    }
}
