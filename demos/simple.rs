use std::error::Error;
use std::time::Instant;

use dlx_cover::{Matrix, SolutionCallback};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Knuth's toy instance: items A..G, six options.
    let mut mat = Matrix::new(7, 0, 16);
    mat.add_option(&[2, 4, 5])?;
    mat.add_option(&[0, 3, 6])?;
    mat.add_option(&[1, 2, 5])?;
    mat.add_option(&[0, 3])?;
    mat.add_option(&[1, 6])?;
    mat.add_option(&[3, 4, 6])?;

    let mut callback = SolutionCallback::default();
    let start = Instant::now();
    let found = mat.solve(&mut callback);
    let elapsed = start.elapsed();

    for solution in &callback.solutions {
        for option in solution {
            let names: String = option.iter().map(|&id| (b'A' + id as u8) as char).collect();
            print!("{} ", names);
        }
        println!();
    }
    println!("Found {} solutions in {:?}", found, elapsed);
    println!();
    println!("{}", mat.stats());

    Ok(())
}
