use std::error::Error;
use std::time::Instant;

use dlx_cover::problems::sudoku::Sudoku;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let sudoku = Sudoku::parse(&[
        "53..7....",
        "6..195...",
        ".98....6.",
        "8...6...3",
        "4..8.3..1",
        "7...2...6",
        ".6....28.",
        "...419..5",
        "....8..79",
    ])?;

    println!("Puzzle:");
    println!("{}", Sudoku::pretty(sudoku.givens()));

    let start = Instant::now();
    let solutions = sudoku.solutions()?;
    let elapsed = start.elapsed();

    for solution in &solutions {
        println!("Solution:");
        println!("{}", Sudoku::pretty(solution));
    }
    println!("Found {} solutions in {:?}", solutions.len(), elapsed);

    Ok(())
}
