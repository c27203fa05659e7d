use std::error::Error;
use std::time::Instant;

use dlx_cover::problems::word_square::WordSquare;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let dictionary = [
        "ATE", "WIN", "LED", "BED", "OAR", "WRY", "OHM", "RUE", "BET", "PEA",
        "URN", "BAY", "TWO", "ION", "TEE", "AWL", "TIE", "END", "BOW", "EAR",
        "DRY", "ORB", "HUE", "MET", "PUB", "ERA", "ANY", "TIT", "WOE", "ONE",
    ];
    let square = WordSquare::new(3, &dictionary)?;

    let start = Instant::now();
    let squares = square.solutions()?;
    let elapsed = start.elapsed();

    for rows in &squares {
        for row in rows {
            println!("{}", row);
        }
        println!();
    }
    println!("Found {} word squares in {:?}", squares.len(), elapsed);

    Ok(())
}
