//! The N queens problem.
//!
//! Each queen placement claims one rank, one file, and two diagonals.
//! Ranks and files must hold exactly one queen; a diagonal holds at most
//! one, so the 2(2n - 1) diagonals become at-most-once constraints.

use crate::problem::Problem;
use crate::solver::{SolveError, Solver};

/// A line of the board that a queen placement claims.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(test, derive(Debug))]
pub enum QueensConstraint {
    Rank(usize),
    File(usize),
    /// Positive-sloped diagonals, indexed by `row + col`.
    Diagonal(usize),
    /// Negative-sloped diagonals, indexed by `(n - 1 - row) + col`.
    Antidiagonal(usize),
}

/// An instance of the N queens problem.
///
/// ```
/// use dlx_cover::problems::queens::NQueens;
///
/// let counts: Vec<usize> = (1..=6)
///     .map(|n| NQueens::new(n).count().unwrap())
///     .collect();
/// assert_eq!(counts, vec![1, 0, 0, 2, 10, 4]);
/// ```
pub struct NQueens {
    n: usize,
    solver: Solver<(usize, usize), QueensConstraint>,
}

/// Ranks in "organ-pipe" order: the centre first, then outwards. Central
/// lines cross the most diagonals, so putting them first makes the
/// branching tie-break start where the search prunes hardest.
fn organ_pipe(n: usize) -> Vec<usize> {
    let mid = n / 2;
    let mut order = vec![mid];
    for step in 1..=mid {
        order.push(mid - step);
        if mid + step < n {
            order.push(mid + step);
        }
    }
    order
}

impl NQueens {
    /// Sets up the constraints for an `n` by `n` board.
    pub fn new(n: usize) -> NQueens {
        assert!(n > 0, "board must have at least one rank");
        let mut problem = Problem::default();

        for line in organ_pipe(n) {
            problem.add_exact_constraint(QueensConstraint::Rank(line));
            problem.add_exact_constraint(QueensConstraint::File(line));
        }
        for d in 0..2 * n - 1 {
            problem.add_optional_constraint(QueensConstraint::Diagonal(d));
            problem.add_optional_constraint(QueensConstraint::Antidiagonal(d));
        }

        for row in 0..n {
            for col in 0..n {
                problem.add_subset(
                    (row, col),
                    vec![
                        QueensConstraint::Rank(row),
                        QueensConstraint::File(col),
                        QueensConstraint::Diagonal(row + col),
                        QueensConstraint::Antidiagonal(n - 1 - row + col),
                    ],
                );
            }
        }

        NQueens { n, solver: Solver::new(problem) }
    }

    /// Every placement of `n` non-attacking queens, one `(row, col)` pair
    /// per queen.
    pub fn solutions(&self) -> Result<Vec<Vec<(usize, usize)>>, SolveError> {
        self.solver.solutions()
    }

    /// Number of placements.
    pub fn count(&self) -> Result<usize, SolveError> {
        self.solver.count()
    }

    /// Renders one placement as an ascii board, rank 0 at the top.
    pub fn render(&self, solution: &[(usize, usize)]) -> String {
        let mut board = vec![vec!['.'; self.n]; self.n];
        for &(row, col) in solution {
            board[row][col] = 'Q';
        }
        board
            .into_iter()
            .map(|rank| rank.into_iter().collect::<String>() + "\n")
            .collect()
    }
}
