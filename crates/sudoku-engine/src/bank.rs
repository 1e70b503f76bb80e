//! Fixed-capacity cache of pre-generated puzzles, keyed by difficulty.

use crate::generator::SimpleRng;
use crate::{Difficulty, Generator, Grid};
use log::{debug, info, warn};
use std::collections::HashMap;

/// A bounded pool of pre-generated puzzles per difficulty tier.
///
/// The bank owns its generator and per-tier storage; it is constructed once
/// by the hosting system and passed by handle to whoever needs puzzles —
/// there is no hidden global. The design is single-threaded: a host that
/// shares one bank across threads must wrap the whole bank in a single
/// mutex, because serving and replenishing both read and mutate the same
/// backing storage.
pub struct PuzzleBank {
    generator: Generator,
    puzzles: HashMap<Difficulty, Vec<Grid>>,
    capacity_per_difficulty: usize,
    rng: SimpleRng,
}

impl Default for PuzzleBank {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl PuzzleBank {
    /// Default number of stored puzzles per tier.
    pub const DEFAULT_CAPACITY: usize = 5;

    /// Create an empty bank holding at most `capacity_per_difficulty`
    /// puzzles per tier.
    pub fn new(capacity_per_difficulty: usize) -> Self {
        Self::with_generator(Generator::new(), capacity_per_difficulty)
    }

    /// Create an empty bank around an existing generator. Pairing this with
    /// [`Generator::with_seed`] makes the bank's contents reproducible.
    pub fn with_generator(generator: Generator, capacity_per_difficulty: usize) -> Self {
        let mut puzzles = HashMap::new();
        for &difficulty in Difficulty::all_levels() {
            puzzles.insert(difficulty, Vec::with_capacity(capacity_per_difficulty));
        }
        Self {
            generator,
            puzzles,
            capacity_per_difficulty,
            rng: SimpleRng::new(),
        }
    }

    /// Configured per-tier capacity.
    pub fn capacity(&self) -> usize {
        self.capacity_per_difficulty
    }

    /// Fill every tier to capacity. Tiers fill independently; a shortfall
    /// in one never blocks another.
    pub fn pre_generate_all(&mut self) {
        info!("pre-generating puzzles, {} per tier", self.capacity_per_difficulty);
        for &difficulty in Difficulty::all_levels() {
            // Generation as designed cannot fail, but the fill loop is
            // bounded anyway rather than trusted to terminate.
            let max_attempts = self.capacity_per_difficulty.saturating_mul(4);
            let mut attempts = 0;
            while self.stored_count(difficulty) < self.capacity_per_difficulty
                && attempts < max_attempts
            {
                attempts += 1;
                let puzzle = self.generator.generate_puzzle(difficulty);
                debug!(
                    "generated {} puzzle with {} holes ({}/{})",
                    difficulty,
                    puzzle.empty_count(),
                    self.stored_count(difficulty) + 1,
                    self.capacity_per_difficulty
                );
                if let Some(pool) = self.puzzles.get_mut(&difficulty) {
                    pool.push(puzzle);
                }
            }
            if self.stored_count(difficulty) < self.capacity_per_difficulty {
                warn!(
                    "tier {} filled to {}/{} before the attempt bound",
                    difficulty,
                    self.stored_count(difficulty),
                    self.capacity_per_difficulty
                );
            }
        }
        info!("puzzle bank pre-generation complete");
    }

    /// Serve a random puzzle for the tier, as an owned copy of the cached
    /// entry. An empty tier falls back to direct generation; the result is
    /// returned uncached.
    pub fn get_random_puzzle(&mut self, difficulty: Difficulty) -> Grid {
        let pool = self
            .puzzles
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if pool.is_empty() {
            warn!("no pre-generated {} puzzles, generating on demand", difficulty);
            return self.generator.generate_puzzle(difficulty);
        }

        let index = self.rng.next_usize(pool.len());
        pool[index].deep_clone()
    }

    /// Current stored count per tier. Purely observational.
    pub fn status(&self) -> HashMap<Difficulty, usize> {
        Difficulty::all_levels()
            .iter()
            .map(|&d| (d, self.stored_count(d)))
            .collect()
    }

    fn stored_count(&self, difficulty: Difficulty) -> usize {
        self.puzzles.get(&difficulty).map_or(0, Vec::len)
    }
}
