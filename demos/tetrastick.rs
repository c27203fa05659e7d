use std::env;
use std::error::Error;
use std::time::Instant;

use dlx_cover::problems::tetrastick::TetrastickPacking;
use dlx_cover::Solver;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // 16 pieces carry 64 segments but the 5x5 grid only has 60, so one
    // piece sits out; pass its index to try the others.
    let omit: usize = env::args().nth(1).map(|arg| arg.parse()).transpose()?.unwrap_or(5);

    let mut packing = TetrastickPacking::new(5);
    packing.omit_piece(omit);
    println!("Packing {} tetrasticks, piece {} left out", packing.pieces().len() - 1, omit);

    let solver = Solver::new(packing.generate_problem());

    let start = Instant::now();
    let mut first = None;
    let count = solver.for_each_solution(|sol| {
        if first.is_none() {
            first = Some(sol);
        }
    })?;
    let elapsed = start.elapsed();

    if let Some(sol) = first {
        println!("{}", packing.render(&sol));
    }
    println!("Found {} packings in {:?}", count, elapsed);

    Ok(())
}
