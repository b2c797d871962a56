//! Grid model: coordinates, tile kinds, tiles and the board itself
//!
//! The board is the single point of truth for tile positions. Every write goes
//! through [`Board::set`] or [`Board::swap`], which keep each tile's stored
//! `row`/`col` equal to the slot it occupies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tally::Effect;
use crate::consts::MIN_DIMENSION;
use crate::error::ConfigError;

/// A board position. Row 0 is the top row; gravity pulls toward the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two coordinates
    pub fn distance(&self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True for 4-directional neighbours only
    pub fn is_adjacent(&self, other: Coord) -> bool {
        self.distance(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Tile colour category. Each kind drives exactly one combat effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Red,
    Blue,
    Green,
    Purple,
    Yellow,
}

impl Kind {
    pub const ALL: [Kind; 5] = [Kind::Red, Kind::Blue, Kind::Green, Kind::Purple, Kind::Yellow];

    /// The combat effect this kind feeds
    pub fn effect(&self) -> Effect {
        match self {
            Kind::Red => Effect::Damage,
            Kind::Blue => Effect::Mana,
            Kind::Green => Effect::Heal,
            Kind::Yellow => Effect::Gold,
            Kind::Purple => Effect::Curse,
        }
    }

    /// Single-letter symbol used in board layouts
    pub fn symbol(&self) -> char {
        match self {
            Kind::Red => 'R',
            Kind::Blue => 'B',
            Kind::Green => 'G',
            Kind::Purple => 'P',
            Kind::Yellow => 'Y',
        }
    }

    /// Parse a layout symbol (case-insensitive)
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Kind::Red),
            'B' => Some(Kind::Blue),
            'G' => Some(Kind::Green),
            'P' => Some(Kind::Purple),
            'Y' => Some(Kind::Yellow),
            _ => None,
        }
    }
}

/// A tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: Kind,
    /// Bonus variant, orthogonal to kind
    #[serde(default)]
    pub rich: bool,
    pub row: usize,
    pub col: usize,
}

impl Tile {
    pub fn new(kind: Kind, row: usize, col: usize) -> Self {
        Self {
            kind,
            rich: false,
            row,
            col,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// R x C matrix of tiles, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Create an empty board
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn in_range(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.in_range(row, col).then_some(row * self.cols + col)
    }

    /// Tile at a position; `None` for empty slots and out-of-range coordinates
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        self.index(row, col).and_then(|i| self.cells[i].as_ref())
    }

    /// Kind at a position, `None` when empty or out of range
    #[inline]
    pub fn kind_at(&self, row: usize, col: usize) -> Option<Kind> {
        self.get(row, col).map(|t| t.kind)
    }

    #[inline]
    pub fn at(&self, coord: Coord) -> Option<&Tile> {
        self.get(coord.row, coord.col)
    }

    /// Overwrite a slot, re-stamping the tile's position. `None` clears it.
    /// Returns the previous occupant. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, tile: Option<Tile>) -> Option<Tile> {
        let Some(i) = self.index(row, col) else {
            log::warn!(
                "Ignoring write to ({}, {}) on a {}x{} board",
                row,
                col,
                self.rows,
                self.cols
            );
            return None;
        };
        let tile = tile.map(|mut t| {
            t.row = row;
            t.col = col;
            t
        });
        std::mem::replace(&mut self.cells[i], tile)
    }

    /// Clear a slot and return what was there
    pub fn take(&mut self, row: usize, col: usize) -> Option<Tile> {
        let i = self.index(row, col)?;
        self.cells[i].take()
    }

    /// Exchange two slots and re-stamp both positions. Does not look at matches.
    /// Returns false (and changes nothing) if either coordinate is out of range.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a.row, a.col), self.index(b.row, b.col)) else {
            return false;
        };
        self.cells.swap(ia, ib);
        for (i, coord) in [(ia, a), (ib, b)] {
            if let Some(tile) = self.cells[i].as_mut() {
                tile.row = coord.row;
                tile.col = coord.col;
            }
        }
        true
    }

    /// Iterate occupied slots in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Iterate every coordinate in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |i| Coord::new(i / cols, i % cols))
    }

    /// Number of empty slots
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// True if every tile's stored position matches its slot
    pub fn positions_consistent(&self) -> bool {
        self.coords()
            .all(|c| self.at(c).is_none_or(|t| t.row == c.row && t.col == c.col))
    }
}

impl fmt::Display for Board {
    /// One line per row: kind symbols, lowercase for rich tiles, `.` for empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = match self.get(row, col) {
                    Some(t) if t.rich => t.kind.symbol().to_ascii_lowercase(),
                    Some(t) => t.kind.symbol(),
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            if row + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ConfigError;

    /// Parse the `Display` layout. Whitespace-only lines and surrounding spaces are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
            return Err(ConfigError::DimensionTooSmall {
                rows,
                cols,
                min: MIN_DIMENSION,
            });
        }

        let mut board = Board::empty(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(ConfigError::Layout(format!(
                    "row {row} has {} cells, expected {cols}",
                    line.chars().count()
                )));
            }
            for (col, c) in line.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let kind = Kind::from_symbol(c).ok_or_else(|| {
                    ConfigError::Layout(format!("unknown tile symbol {c:?} at ({row}, {col})"))
                })?;
                let mut tile = Tile::new(kind, row, col);
                tile.rich = c.is_ascii_lowercase();
                board.set(row, col, Some(tile));
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &str = "
        RGB
        bPY
        G.R
    ";

    #[test]
    fn test_get_out_of_range_is_none() {
        let board: Board = LAYOUT.parse().unwrap();
        assert!(board.get(3, 0).is_none());
        assert!(board.get(0, 3).is_none());
        assert!(board.get(usize::MAX, 0).is_none());
        assert!(board.get(2, 1).is_none());
        assert_eq!(board.kind_at(1, 1), Some(Kind::Purple));
    }

    #[test]
    fn test_set_restamps_position() {
        let mut board = Board::empty(3, 3);
        let stale = Tile::new(Kind::Red, 7, 7);
        assert!(board.set(1, 2, Some(stale)).is_none());
        let placed = board.get(1, 2).unwrap();
        assert_eq!((placed.row, placed.col), (1, 2));

        let previous = board.set(1, 2, None);
        assert_eq!(previous.map(|t| t.kind), Some(Kind::Red));
        assert!(board.get(1, 2).is_none());
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut board = Board::empty(3, 3);
        assert!(board.set(5, 5, Some(Tile::new(Kind::Red, 0, 0))).is_none());
        assert_eq!(board.empty_count(), 9);
    }

    #[test]
    fn test_swap_updates_both_positions() {
        let mut board: Board = LAYOUT.parse().unwrap();
        assert!(board.swap(Coord::new(0, 0), Coord::new(1, 0)));
        let top = board.get(0, 0).unwrap();
        let below = board.get(1, 0).unwrap();
        assert_eq!((top.kind, top.rich, top.row), (Kind::Blue, true, 0));
        assert_eq!((below.kind, below.row), (Kind::Red, 1));
        assert!(board.positions_consistent());
    }

    #[test]
    fn test_swap_with_empty_and_out_of_range() {
        let mut board: Board = LAYOUT.parse().unwrap();
        assert!(board.swap(Coord::new(2, 1), Coord::new(1, 1)));
        assert!(board.get(1, 1).is_none());
        assert_eq!(board.get(2, 1).unwrap().kind, Kind::Purple);

        let before = board.clone();
        assert!(!board.swap(Coord::new(0, 0), Coord::new(0, 9)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_layout_round_trip() {
        let board: Board = LAYOUT.parse().unwrap();
        assert_eq!(board.to_string(), "RGB\nbPY\nG.R");
        assert_eq!(board.dimensions(), (3, 3));
    }

    #[test]
    fn test_layout_rejects_bad_input() {
        assert!(matches!(
            "RG\nBP".parse::<Board>(),
            Err(ConfigError::DimensionTooSmall { .. })
        ));
        assert!(matches!(
            "RGB\nRG\nRGB".parse::<Board>(),
            Err(ConfigError::Layout(_))
        ));
        assert!(matches!(
            "RGB\nRXB\nRGB".parse::<Board>(),
            Err(ConfigError::Layout(_))
        ));
    }

    #[test]
    fn test_adjacency() {
        let c = Coord::new(3, 3);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(c.is_adjacent(Coord::new(3, 4)));
        assert!(!c.is_adjacent(Coord::new(4, 4)));
        assert!(!c.is_adjacent(c));
        assert_eq!(Coord::new(0, 0).distance(Coord::new(5, 5)), 10);
    }
}
