//! Cascade resolution
//!
//! After a committed swap the board is drained to a stable state:
//! scan -> tally + remove -> gravity -> refill -> scan ... until a scan finds
//! nothing. [`Cascade`] runs one phase per [`Cascade::step`] call so a
//! presenter can animate between phases; [`resolve`] drives it to the end.
//! Each step's board mutation is complete before the step is returned.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grid::{Board, Coord, Kind, Tile};
use super::matches::find_matches;
use super::source::KindSource;
use super::tally::EffectTally;
use super::Rules;
use crate::consts::MAX_CASCADE_GENERATIONS;

/// A tile pulled down by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMove {
    pub from: Coord,
    pub to: Coord,
    pub kind: Kind,
}

/// Outcome of a whole player action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Cleared tiles per effect across every generation
    pub tally: EffectTally,
    /// Number of remove/gravity/refill rounds
    pub generations: u32,
    /// Distinct coordinates cleared across every generation
    pub removed: usize,
}

/// One observable cascade transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Matched tiles were tallied and cleared
    Removed { generation: u32, tiles: Vec<Tile> },
    /// Remaining tiles fell into the gaps
    Fell { generation: u32, moves: Vec<TileMove> },
    /// New tiles filled the empty slots
    Spawned { generation: u32, tiles: Vec<Tile> },
    /// No runs remain
    Stable(Resolution),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scan,
    Gravity,
    Refill,
    Done,
}

/// Cascade state machine for a single player action
#[derive(Debug, Clone)]
pub struct Cascade {
    phase: Phase,
    resolution: Resolution,
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new()
    }
}

impl Cascade {
    /// Start with an empty tally
    pub fn new() -> Self {
        Self {
            phase: Phase::Scan,
            resolution: Resolution::default(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Progress so far
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Run the next phase. Returns `None` once `Stable` has been produced.
    pub fn step(
        &mut self,
        board: &mut Board,
        rules: &Rules,
        source: &mut impl KindSource,
    ) -> Option<Step> {
        let generation = self.resolution.generations;
        let step = match self.phase {
            Phase::Done => return None,
            Phase::Scan => {
                let matched = find_matches(board, rules.min_run);
                if matched.is_empty() {
                    self.phase = Phase::Done;
                    return Some(Step::Stable(self.resolution));
                }
                if generation >= MAX_CASCADE_GENERATIONS {
                    log::error!(
                        "Cascade still matching after {} generations, stopping",
                        generation
                    );
                    self.phase = Phase::Done;
                    return Some(Step::Stable(self.resolution));
                }

                let generation = generation + 1;
                self.resolution.generations = generation;
                let tiles = remove(board, &matched);
                for tile in &tiles {
                    self.resolution.tally.record(tile);
                }
                self.resolution.removed += tiles.len();
                log::debug!("Generation {}: cleared {} tiles", generation, tiles.len());

                self.phase = Phase::Gravity;
                Step::Removed { generation, tiles }
            }
            Phase::Gravity => {
                self.phase = Phase::Refill;
                Step::Fell {
                    generation,
                    moves: apply_gravity(board),
                }
            }
            Phase::Refill => {
                self.phase = Phase::Scan;
                Step::Spawned {
                    generation,
                    tiles: refill(board, rules, source),
                }
            }
        };
        Some(step)
    }
}

/// Drain the board to a stable state, reporting every step
pub fn resolve(
    board: &mut Board,
    rules: &Rules,
    source: &mut impl KindSource,
    mut on_step: impl FnMut(&Board, &Step),
) -> Resolution {
    let mut cascade = Cascade::new();
    while let Some(step) = cascade.step(board, rules, source) {
        on_step(board, &step);
    }
    *cascade.resolution()
}

/// Clear the given coordinates, returning the tiles that were there
pub fn remove(board: &mut Board, coords: &BTreeSet<Coord>) -> Vec<Tile> {
    coords
        .iter()
        .filter_map(|c| board.take(c.row, c.col))
        .collect()
}

/// Compact every column toward the bottom row, keeping relative order
pub fn apply_gravity(board: &mut Board) -> Vec<TileMove> {
    let (rows, cols) = board.dimensions();
    let mut moves = Vec::new();

    for col in 0..cols {
        // Next slot to fill is `target - 1`
        let mut target = rows;
        for row in (0..rows).rev() {
            if board.get(row, col).is_none() {
                continue;
            }
            target -= 1;
            if target != row {
                let tile = board.take(row, col);
                if let Some(t) = &tile {
                    moves.push(TileMove {
                        from: Coord::new(row, col),
                        to: Coord::new(target, col),
                        kind: t.kind,
                    });
                }
                board.set(target, col, tile);
            }
        }
    }

    moves
}

/// Fill every empty slot with a fresh tile, row-major. Refills may form runs;
/// the next scan picks them up.
pub fn refill(board: &mut Board, rules: &Rules, source: &mut impl KindSource) -> Vec<Tile> {
    let empties: Vec<Coord> = board.coords().filter(|c| board.at(*c).is_none()).collect();
    let mut spawned = Vec::with_capacity(empties.len());

    for c in empties {
        let mut tile = Tile::new(source.next_kind(&rules.kinds), c.row, c.col);
        tile.rich = source.roll_rich(rules.rich_chance);
        board.set(c.row, c.col, Some(tile));
        spawned.push(tile);
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::source::ScriptedKinds;
    use crate::board::Effect;
    use crate::consts::MIN_RUN;

    fn board(layout: &str) -> Board {
        layout.parse().unwrap()
    }

    fn column(board: &Board, col: usize) -> Vec<Option<Kind>> {
        (0..board.rows()).map(|row| board.kind_at(row, col)).collect()
    }

    #[test]
    fn test_gravity_keeps_relative_order() {
        let mut b = board(
            "R..
             .G.
             B.Y
             ..P",
        );
        let moves = apply_gravity(&mut b);
        assert_eq!(
            column(&b, 0),
            vec![None, None, Some(Kind::Red), Some(Kind::Blue)]
        );
        assert_eq!(column(&b, 1), vec![None, None, None, Some(Kind::Green)]);
        assert_eq!(
            column(&b, 2),
            vec![None, None, Some(Kind::Yellow), Some(Kind::Purple)]
        );
        assert!(b.positions_consistent());
        assert_eq!(
            moves,
            vec![
                TileMove {
                    from: Coord::new(2, 0),
                    to: Coord::new(3, 0),
                    kind: Kind::Blue
                },
                TileMove {
                    from: Coord::new(0, 0),
                    to: Coord::new(2, 0),
                    kind: Kind::Red
                },
                TileMove {
                    from: Coord::new(1, 1),
                    to: Coord::new(3, 1),
                    kind: Kind::Green
                },
            ]
        );
    }

    #[test]
    fn test_gravity_on_full_board_is_noop() {
        let mut b = board(
            "RGB
             GBR
             BRG",
        );
        let before = b.clone();
        assert!(apply_gravity(&mut b).is_empty());
        assert_eq!(b, before);
    }

    #[test]
    fn test_refill_fills_only_empties() {
        let mut b = board(
            "R.G
             B.Y
             GRP",
        );
        let rules = Rules {
            rows: 3,
            cols: 3,
            ..Rules::default()
        };
        let mut source = ScriptedKinds::new(vec![Kind::Yellow, Kind::Purple]);
        let spawned = refill(&mut b, &rules, &mut source);
        assert_eq!(spawned.len(), 2);
        assert_eq!(b.kind_at(0, 1), Some(Kind::Yellow));
        assert_eq!(b.kind_at(1, 1), Some(Kind::Purple));
        assert_eq!(b.empty_count(), 0);
        assert_eq!(b.kind_at(0, 0), Some(Kind::Red));
    }

    #[test]
    fn test_single_generation_resolution() {
        // Column 0 clears; refills with non-matching kinds
        let mut b = board(
            "RGB
             RBG
             RGB",
        );
        let rules = Rules {
            rows: 3,
            cols: 3,
            ..Rules::default()
        };
        let mut source = ScriptedKinds::new(vec![Kind::Yellow, Kind::Purple, Kind::Yellow]);
        let mut steps = Vec::new();
        let res = resolve(&mut b, &rules, &mut source, |_, s| steps.push(s.clone()));

        assert_eq!(res.generations, 1);
        assert_eq!(res.removed, 3);
        assert_eq!(res.tally.get(Effect::Damage), 3);
        assert_eq!(res.tally.total(), 3);
        assert!(find_matches(&b, MIN_RUN).is_empty());
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps[0], Step::Removed { generation: 1, .. }));
        assert!(matches!(steps[1], Step::Fell { generation: 1, .. }));
        assert!(matches!(steps[2], Step::Spawned { generation: 1, .. }));
        assert_eq!(steps[3], Step::Stable(res));
    }

    #[test]
    fn test_refill_triggered_second_generation() {
        // The first refill drops a green at (0, 0), completing the top row
        let mut b = board(
            "RGG
             RBY
             RYB",
        );
        let rules = Rules {
            rows: 3,
            cols: 3,
            ..Rules::default()
        };
        let mut source = ScriptedKinds::new(vec![
            Kind::Green,
            Kind::Blue,
            Kind::Purple,
            // second generation refills (0, 0), (0, 1), (0, 2)
            Kind::Purple,
            Kind::Yellow,
            Kind::Purple,
        ]);
        let res = resolve(&mut b, &rules, &mut source, |_, _| {});

        assert_eq!(res.generations, 2);
        assert_eq!(res.tally.damage(), 3);
        assert_eq!(res.tally.heal(), 3);
        assert_eq!(res.removed, 6);
        assert_eq!(res.tally.total() as usize, res.removed);
        assert!(find_matches(&b, MIN_RUN).is_empty());
    }

    #[test]
    fn test_stable_board_resolves_immediately() {
        let mut b = board(
            "RGB
             GBR
             BRG",
        );
        let before = b.clone();
        let mut cascade = Cascade::new();
        let mut source = ScriptedKinds::new(vec![]);
        let rules = Rules::default();
        assert_eq!(
            cascade.step(&mut b, &rules, &mut source),
            Some(Step::Stable(Resolution::default()))
        );
        assert!(cascade.is_done());
        assert_eq!(cascade.step(&mut b, &rules, &mut source), None);
        assert_eq!(b, before);
    }
}
