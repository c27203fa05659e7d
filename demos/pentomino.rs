use std::error::Error;
use std::time::Instant;

use dlx_cover::problems::polyomino::{
    free_pentominoes, Board, PlacementName, PolyominoPacking, Square,
};
use dlx_cover::vector::Vector2D;
use dlx_cover::Solver;

fn print_sol(prob: &PolyominoPacking<char>, sol: &[PlacementName<char>]) {
    let size = prob.board().size();
    let mut buff = vec![vec![' '; size.x as usize]; size.y as usize];

    for y in 0..size.y {
        for x in 0..size.x {
            if prob.board().square(Vector2D::new(x, y)) == Square::Hole {
                buff[y as usize][x as usize] = '*';
            }
        }
    }
    for &(name, o, t) in sol {
        for Vector2D { x, y } in prob.pieces()[&name].orient(o).translated_cells(t) {
            buff[y as usize][x as usize] = name;
        }
    }

    for row in buff {
        println!("{}", row.into_iter().collect::<String>());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // The 8x8 board with its centre released: the twelve pentominoes
    // fill everything else.
    let mut prob = PolyominoPacking::default();
    *prob.board_mut() = Board::from_pattern(&[
        "........",
        "........",
        "........",
        "...**...",
        "...**...",
        "........",
        "........",
        "........",
    ]);
    for (label, piece) in free_pentominoes() {
        prob.add_piece(label, piece);
    }

    println!("Generating the problem...");
    let solver = Solver::new(prob.generate_problem());

    println!("Solving...");
    let start = Instant::now();
    let mut first = None;
    let count = solver.for_each_solution(|sol| {
        if first.is_none() {
            first = Some(sol);
        }
    })?;
    let elapsed = start.elapsed();

    if let Some(sol) = first {
        print_sol(&prob, &sol);
    }
    println!("Found {} tilings in {:?}", count, elapsed);

    Ok(())
}
