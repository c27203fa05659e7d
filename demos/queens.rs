use std::error::Error;
use std::time::Instant;

use dlx_cover::problems::queens::NQueens;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let n = 8;
    let queens = NQueens::new(n);

    let start = Instant::now();
    let solutions = queens.solutions()?;
    let elapsed = start.elapsed();

    println!("{}", queens.render(&solutions[0]));
    println!(
        "Found {} placements of {} queens in {:?}",
        solutions.len(),
        n,
        elapsed
    );

    Ok(())
}
