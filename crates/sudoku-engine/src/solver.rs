//! Backtracking solver and bounded solution counting.
//!
//! Both searches scan for the first empty cell in row-major order and use
//! in-place mutate/undo on a working copy exclusively owned for the
//! duration of the call. Failure is signalled by return value; there is no
//! error path.

use crate::generator::SimpleRng;
use crate::Grid;

/// Unit struct solver — stateless, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning the solved grid if one exists.
    ///
    /// Candidates are tried in a fixed 1–9 order, so the result is
    /// deterministic for a given input.
    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        let mut working = grid.deep_clone();
        if solve_recursive(&mut working) {
            Some(working)
        } else {
            None
        }
    }

    /// Count solutions, stopping as soon as the running total reaches
    /// `limit`. A grid with no empty cells counts as exactly one solution.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut working = grid.deep_clone();
        let mut count = 0;
        count_recursive(&mut working, &mut count, limit);
        count
    }

    /// Check if the puzzle has exactly one solution.
    ///
    /// The counter is bounded at 2: distinguishing "one" from "more than
    /// one" is the only distinction hole digging needs.
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }
}

fn solve_recursive(grid: &mut Grid) -> bool {
    let pos = match grid.first_empty() {
        Some(p) => p,
        None => return true,
    };

    for value in 1..=9 {
        if grid.is_valid_placement(pos, value) {
            grid.set(pos, value);
            if solve_recursive(grid) {
                return true;
            }
            grid.set(pos, 0);
        }
    }

    false
}

/// Like [`solve_recursive`], but the candidate order is freshly shuffled at
/// every empty cell. Filling an all-zero grid this way is what makes
/// complete boards vary across generator invocations.
pub(crate) fn solve_randomized(grid: &mut Grid, rng: &mut SimpleRng) -> bool {
    let pos = match grid.first_empty() {
        Some(p) => p,
        None => return true,
    };

    let mut candidates: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    rng.shuffle(&mut candidates);

    for &value in &candidates {
        if grid.is_valid_placement(pos, value) {
            grid.set(pos, value);
            if solve_randomized(grid, rng) {
                return true;
            }
            grid.set(pos, 0);
        }
    }

    false
}

fn count_recursive(grid: &mut Grid, count: &mut usize, limit: usize) {
    let pos = match grid.first_empty() {
        Some(p) => p,
        None => {
            *count += 1;
            return;
        }
    };

    for value in 1..=9 {
        if grid.is_valid_placement(pos, value) {
            grid.set(pos, value);
            count_recursive(grid, count, limit);
            if *count >= limit {
                // Early exit: the working copy is discarded by the caller,
                // so no undo is needed here.
                return;
            }
            grid.set(pos, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    const FIXTURE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    fn assert_rule_valid(grid: &Grid) {
        for unit in 0..9 {
            let mut row_seen = [false; 10];
            let mut col_seen = [false; 10];
            let mut block_seen = [false; 10];
            for i in 0..9 {
                let r = grid.get(Position::new(unit, i));
                assert!(r == 0 || !row_seen[r as usize], "duplicate {} in row {}", r, unit);
                row_seen[r as usize] = true;

                let c = grid.get(Position::new(i, unit));
                assert!(c == 0 || !col_seen[c as usize], "duplicate {} in col {}", c, unit);
                col_seen[c as usize] = true;

                let b = grid.get(Position::new(unit / 3 * 3 + i / 3, unit % 3 * 3 + i % 3));
                assert!(b == 0 || !block_seen[b as usize], "duplicate {} in block {}", b, unit);
                block_seen[b as usize] = true;
            }
        }
    }

    #[test]
    fn test_solve_known_puzzle() {
        let grid = Grid::from_string(FIXTURE).unwrap();
        let solver = Solver::new();
        let solution = solver.solve(&grid).unwrap();

        assert!(solution.is_complete());
        assert_rule_valid(&solution);
        // Givens must survive into the solution.
        for pos in Position::all() {
            if !grid.is_empty(pos) {
                assert_eq!(solution.get(pos), grid.get(pos));
            }
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let grid = Grid::from_string(FIXTURE).unwrap();
        let solver = Solver::new();
        assert_eq!(solver.solve(&grid), solver.solve(&grid));
    }

    #[test]
    fn test_unique_solution() {
        let grid = Grid::from_string(FIXTURE).unwrap();
        let solver = Solver::new();
        assert!(solver.has_unique_solution(&grid));
        assert_eq!(solver.count_solutions(&grid, 2), 1);
    }

    #[test]
    fn test_count_solutions_early_exit() {
        // An empty grid has a vast number of solutions; the bounded counter
        // must stop at the limit rather than enumerate them.
        let grid = Grid::new();
        let solver = Solver::new();
        assert_eq!(solver.count_solutions(&grid, 2), 2);
        assert_eq!(solver.count_solutions(&grid, 5), 5);
    }

    #[test]
    fn test_complete_grid_counts_one() {
        let grid = Grid::from_string(FIXTURE).unwrap();
        let solver = Solver::new();
        let solution = solver.solve(&grid).unwrap();
        assert_eq!(solver.count_solutions(&solution, 2), 1);
    }

    #[test]
    fn test_unsolvable_grid() {
        // Row 0 holds 1..=8 leaving only 9 for (0,8), but column 8 already
        // has a 9 further down: no completion exists.
        let mut grid = Grid::new();
        for col in 0..8 {
            grid.set(Position::new(0, col), col as u8 + 1);
        }
        grid.set(Position::new(5, 8), 9);

        let solver = Solver::new();
        assert!(solver.solve(&grid).is_none());
        assert_eq!(solver.count_solutions(&grid, 2), 0);
        assert!(!solver.has_unique_solution(&grid));
    }

    #[test]
    fn test_randomized_fill_produces_valid_board() {
        let mut rng = SimpleRng::with_seed(42);
        let mut grid = Grid::new();
        assert!(solve_randomized(&mut grid, &mut rng));
        assert!(grid.is_complete());
        assert_rule_valid(&grid);
    }
}
