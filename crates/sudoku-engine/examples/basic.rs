//! Basic example of using the Sudoku engine.

use sudoku_engine::{Difficulty, Generator, Grid, PuzzleBank, Solver};

fn main() {
    env_logger::init();

    // Generate a puzzle directly
    println!("Generating a medium puzzle...\n");
    let mut generator = Generator::new();
    let puzzle = generator.generate_puzzle(Difficulty::Medium);

    println!("Generated puzzle:");
    println!("{}", puzzle);
    println!("Filled cells: {}", puzzle.filled_count());
    println!("Empty cells: {}\n", puzzle.empty_count());

    // Solve it
    println!("Solving...\n");
    let solver = Solver::new();
    if let Some(solution) = solver.solve(&puzzle) {
        println!("Solution:");
        println!("{}", solution);
    } else {
        println!("No solution found (this shouldn't happen for a generated puzzle!)");
    }

    // Use the puzzle bank for low-latency serving
    println!("--- Puzzle bank ---\n");
    let mut bank = PuzzleBank::default();
    bank.pre_generate_all();

    for (&difficulty, &count) in &bank.status() {
        println!("{}: {} puzzles cached", difficulty, count);
    }

    let served = bank.get_random_puzzle(Difficulty::from_name("hard"));
    println!("\nServed hard puzzle ({} holes):", served.empty_count());
    println!("{}", served);

    // Parse a puzzle from a string
    println!("--- Parsing a puzzle from string ---\n");
    let puzzle_string =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    if let Some(grid) = Grid::from_string(puzzle_string) {
        println!("Parsed puzzle:");
        println!("{}", grid);
        println!(
            "Number of solutions (up to 2): {}",
            solver.count_solutions(&grid, 2)
        );
    }
}
