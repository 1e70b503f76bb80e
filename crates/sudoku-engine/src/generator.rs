//! Puzzle generation: randomized complete boards and uniqueness-gated hole
//! digging.

use crate::{solver, Grid, Position, Solver};
use serde::{Deserialize, Serialize};

/// Difficulty tier of a puzzle.
///
/// A tier is strictly a cell-removal target, not a claim about the solving
/// techniques a puzzle demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Target number of cells to erase from a complete board, out of 81.
    pub fn cells_to_remove(self) -> usize {
        match self {
            Difficulty::Easy => 40,
            Difficulty::Medium => 50,
            Difficulty::Hard => 60,
        }
    }

    /// Parse a tier name. Anything unrecognized falls back to `Easy`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    /// All tiers in ascending order.
    pub fn all_levels() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Sudoku puzzle generator.
///
/// Owns its randomness source; construct with [`Generator::with_seed`] for
/// reproducible output.
pub struct Generator {
    rng: SimpleRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: SimpleRng::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SimpleRng::with_seed(seed),
        }
    }

    /// Generate a fully populated, rule-valid board.
    ///
    /// Runs the backtracking solver over an all-zero grid with a freshly
    /// shuffled candidate order at every cell; an empty grid always admits
    /// a completion, so this cannot fail.
    pub fn generate_complete_board(&mut self) -> Grid {
        let mut grid = Grid::new();
        solver::solve_randomized(&mut grid, &mut self.rng);
        grid
    }

    /// Generate a puzzle for a difficulty tier: a complete board with up to
    /// `difficulty.cells_to_remove()` cells erased, guaranteed to keep a
    /// unique solution.
    ///
    /// The puzzle may contain fewer holes than the tier's target when the
    /// board cannot sustain more removals without losing uniqueness; that
    /// is a natural stopping point, not an error.
    pub fn generate_puzzle(&mut self, difficulty: Difficulty) -> Grid {
        let board = self.generate_complete_board();
        let mut puzzle = board.deep_clone();
        self.dig_holes(&mut puzzle, difficulty.cells_to_remove());
        puzzle
    }

    /// Erase up to `count` cells in random order, keeping each erasure only
    /// if the grid retains a unique solution. Each position is visited at
    /// most once.
    fn dig_holes(&mut self, grid: &mut Grid, count: usize) {
        let mut positions: Vec<Position> = Position::all().collect();
        self.rng.shuffle(&mut positions);

        let solver = Solver::new();
        let mut removed = 0;
        for pos in positions {
            if removed >= count {
                break;
            }

            let saved = grid.get(pos);
            if saved == 0 {
                continue;
            }

            grid.set(pos, 0);
            if solver.has_unique_solution(grid) {
                removed += 1;
            } else {
                grid.set(pos, saved);
            }
        }
    }
}

/// Simple PCG-style PRNG, seeded from OS entropy by default.
///
/// Small enough to own per generator, with no global state; seeding is the
/// whole reproducibility story for tests.
pub(crate) struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub(crate) fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: a static counter keeps seeds distinct if the OS
            // entropy source is unavailable.
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    pub(crate) fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }

    /// Fisher–Yates shuffle.
    pub(crate) fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_usize(i + 1);
            slice.swap(i, j);
        }
    }
}
