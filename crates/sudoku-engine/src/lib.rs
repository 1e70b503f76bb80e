//! Core Sudoku engine: puzzle generation with a uniqueness guarantee and a
//! difficulty-keyed bank of pre-generated puzzles.
//!
//! The engine is strictly layered:
//! - [`Solver`] — backtracking solve and bounded solution counting.
//! - [`Generator`] — randomized complete boards and hole-dug puzzles.
//! - [`PuzzleBank`] — fixed-capacity per-tier cache with random serving and
//!   on-demand fallback generation.

mod bank;
mod generator;
mod solver;

pub use bank::PuzzleBank;
pub use generator::{Difficulty, Generator};
pub use solver::Solver;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A (row, column) coordinate on the grid, both components in `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position. Both components must be in `0..9`.
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..81).map(|i| Position::new(i / 9, i % 9))
    }

    fn index(self) -> usize {
        self.row * 9 + self.col
    }
}

/// A 9×9 grid of values in `0..=9`, where `0` marks an empty cell.
///
/// The grid is a plain value object: it is handed across every boundary by
/// copy ([`Grid::deep_clone`]), never by shared reference, so a caller
/// mutating a returned grid can never corrupt a cached original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [u8; 81],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid (all cells zero).
    pub fn new() -> Self {
        Self { cells: [0; 81] }
    }

    /// Get the value at a position (`0` = empty).
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.index()]
    }

    /// Set the value at a position (`0` clears the cell).
    pub fn set(&mut self, pos: Position, value: u8) {
        debug_assert!(value <= 9);
        self.cells[pos.index()] = value;
    }

    /// Whether the cell at `pos` is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == 0
    }

    /// First empty cell in row-major order, if any.
    pub fn first_empty(&self) -> Option<Position> {
        self.cells
            .iter()
            .position(|&v| v == 0)
            .map(|i| Position::new(i / 9, i % 9))
    }

    /// All empty positions in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&p| self.is_empty(p)).collect()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        81 - self.empty_count()
    }

    /// Whether every cell is filled.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Whether `value` may be placed at `pos` without duplicating it in the
    /// position's row, column, or 3×3 block. This is the single rule
    /// invariant enforced throughout solving and generation.
    pub fn is_valid_placement(&self, pos: Position, value: u8) -> bool {
        for i in 0..9 {
            if self.get(Position::new(pos.row, i)) == value {
                return false;
            }
            if self.get(Position::new(i, pos.col)) == value {
                return false;
            }
        }

        let block_row = pos.row - pos.row % 3;
        let block_col = pos.col - pos.col % 3;
        for r in block_row..block_row + 3 {
            for c in block_col..block_col + 3 {
                if self.get(Position::new(r, c)) == value {
                    return false;
                }
            }
        }

        true
    }

    /// Explicit owned copy. Every grid that crosses the engine boundary
    /// (bank handout, solver result) goes through this.
    pub fn deep_clone(&self) -> Grid {
        self.clone()
    }

    /// Parse a grid from an 81-character string of digits, with `0` or `.`
    /// for empty cells. Whitespace is ignored. Returns `None` on any other
    /// character or a wrong cell count.
    pub fn from_string(s: &str) -> Option<Grid> {
        let mut cells = [0u8; 81];
        let mut i = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            if i >= 81 {
                return None;
            }
            cells[i] = match ch {
                '.' | '0' => 0,
                '1'..='9' => ch as u8 - b'0',
                _ => return None,
            };
            i += 1;
        }
        if i != 81 {
            return None;
        }
        Some(Grid { cells })
    }

    /// Compact 81-character representation, `0` for empty cells.
    pub fn to_string_compact(&self) -> String {
        self.cells.iter().map(|&v| (b'0' + v) as char).collect()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    write!(f, "| ")?;
                }
                match self.get(Position::new(row, col)) {
                    0 => write!(f, ". ")?,
                    v => write!(f, "{} ", v)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Serialized as the compact 81-character string rather than an array of 81
// integers; keeps the JSON form human-readable and stable.
impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_compact())
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Grid::from_string(&s).ok_or_else(|| D::Error::custom("invalid grid string"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_from_string_round_trip() {
        let grid = Grid::from_string(FIXTURE).unwrap();
        assert_eq!(grid.to_string_compact(), FIXTURE);
        assert_eq!(grid.filled_count(), 30);
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(Grid::from_string("12345").is_none());
        assert!(Grid::from_string(&"x".repeat(81)).is_none());
        assert!(Grid::from_string(&"1".repeat(82)).is_none());
    }

    #[test]
    fn test_from_string_accepts_dots_and_whitespace() {
        let dotted: String = FIXTURE.chars().map(|c| if c == '0' { '.' } else { c }).collect();
        let spaced = format!("{}\n{}", &dotted[..40], &dotted[40..]);
        assert_eq!(Grid::from_string(&spaced).unwrap().to_string_compact(), FIXTURE);
    }

    #[test]
    fn test_placement_validity_is_deterministic() {
        let grid = Grid::from_string(FIXTURE).unwrap();
        // Row 0 already contains a 5 at (0,0); every empty cell in that row
        // must reject 5, on every query.
        for col in 0..9 {
            let pos = Position::new(0, col);
            if grid.is_empty(pos) {
                for _ in 0..3 {
                    assert!(!grid.is_valid_placement(pos, 5));
                }
            }
        }
        // (0,2) is empty and 1 appears nowhere in its row, column, or block.
        assert!(grid.is_valid_placement(Position::new(0, 2), 1));
    }

    #[test]
    fn test_block_validity() {
        let mut grid = Grid::new();
        grid.set(Position::new(4, 4), 7);
        // Same block, different row and column.
        assert!(!grid.is_valid_placement(Position::new(3, 5), 7));
        // Outside the block, row, and column.
        assert!(grid.is_valid_placement(Position::new(0, 0), 7));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let grid = Grid::from_string(FIXTURE).unwrap();
        let mut copy = grid.deep_clone();
        copy.set(Position::new(0, 2), 4);
        assert!(grid.is_empty(Position::new(0, 2)));
    }

    #[test]
    fn test_grid_serde_as_compact_string() {
        let grid = Grid::from_string(FIXTURE).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, format!("\"{}\"", FIXTURE));
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
