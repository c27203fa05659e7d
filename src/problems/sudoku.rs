//! Sudoku of arbitrary box width.
//!
//! A board of box width `b` has side `b * b`. Every (row, col, digit)
//! triple becomes one candidate subset covering four constraints; each
//! given clue additionally covers a constraint of its own, so the clue's
//! subset is forced into every solution.

use thiserror::Error;

use crate::problem::Problem;
use crate::solver::{SolveError, Solver};

/// A solved or partially-filled board, `grid[row][col]`, `0` for blank.
pub type Grid = Vec<Vec<usize>>;

/// One of the four-plus-one constraint families of a sudoku board.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(test, derive(Debug))]
pub enum SudokuConstraint {
    /// Cell (row, col) holds exactly one digit.
    Cell(usize, usize),
    /// Row holds the digit exactly once.
    RowDigit(usize, usize),
    /// Column holds the digit exactly once.
    ColDigit(usize, usize),
    /// Box holds the digit exactly once.
    BoxDigit(usize, usize),
    /// The k-th clue is used.
    Given(usize),
}

/// An error returned when a board definition is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SudokuError {
    #[error("board must be {side}x{side}, got a row of length {got}")]
    Shape { side: usize, got: usize },
    #[error("digit {digit} out of range 1..={side}")]
    Digit { digit: usize, side: usize },
    #[error("unrecognised character {0:?} in board row")]
    Unparsable(char),
    #[error("board side {0} is not a square number")]
    NotSquare(usize),
}

/// A sudoku instance: box width plus the given clues.
///
/// ```
/// use dlx_cover::problems::sudoku::Sudoku;
///
/// let sudoku = Sudoku::parse(&[
///     "2...",
///     "..3.",
///     ".4..",
///     "...1",
/// ]).unwrap();
/// assert_eq!(sudoku.count().unwrap(), 1);
/// ```
#[cfg_attr(test, derive(Debug))]
pub struct Sudoku {
    side: usize,
    givens: Grid,
    solver: Solver<(usize, usize, usize), SudokuConstraint>,
}

impl Sudoku {
    /// Builds an instance from a numeric grid; the side must be a square
    /// number (4, 9, 16, ...) and entries run `1..=side` with `0` blank.
    pub fn new(givens: Grid) -> Result<Sudoku, SudokuError> {
        let side = givens.len();
        let box_width = (1..=side).find(|b| b * b == side).ok_or(SudokuError::NotSquare(side))?;
        for row in &givens {
            if row.len() != side {
                return Err(SudokuError::Shape { side, got: row.len() });
            }
            for &digit in row {
                if digit > side {
                    return Err(SudokuError::Digit { digit, side });
                }
            }
        }

        let mut problem = Problem::default();
        for row in 0..side {
            for col in 0..side {
                problem.add_exact_constraint(SudokuConstraint::Cell(row, col));
            }
        }
        for line in 0..side {
            for digit in 1..=side {
                problem.add_exact_constraint(SudokuConstraint::RowDigit(line, digit));
                problem.add_exact_constraint(SudokuConstraint::ColDigit(line, digit));
                problem.add_exact_constraint(SudokuConstraint::BoxDigit(line, digit));
            }
        }

        let box_of = |row: usize, col: usize| (row / box_width) * box_width + col / box_width;
        for row in 0..side {
            for col in 0..side {
                for digit in 1..=side {
                    problem.add_subset(
                        (row, col, digit),
                        vec![
                            SudokuConstraint::Cell(row, col),
                            SudokuConstraint::RowDigit(row, digit),
                            SudokuConstraint::ColDigit(col, digit),
                            SudokuConstraint::BoxDigit(box_of(row, col), digit),
                        ],
                    );
                }
            }
        }

        // Clues replace the plain candidate for their triple with one
        // that also covers a Given item nothing else covers, which forces
        // the clue into every solution.
        let mut clue = 0;
        for row in 0..side {
            for col in 0..side {
                let digit = givens[row][col];
                if digit != 0 {
                    problem.add_exact_constraint(SudokuConstraint::Given(clue));
                    problem.add_subset(
                        (row, col, digit),
                        vec![
                            SudokuConstraint::Cell(row, col),
                            SudokuConstraint::RowDigit(row, digit),
                            SudokuConstraint::ColDigit(col, digit),
                            SudokuConstraint::BoxDigit(box_of(row, col), digit),
                            SudokuConstraint::Given(clue),
                        ],
                    );
                    clue += 1;
                }
            }
        }

        Ok(Sudoku { side, givens, solver: Solver::new(problem) })
    }

    /// Parses a board from one string per row: digits `1`-`9`, blanks as
    /// `.` or `0`. Boards wider than 9 need [`Sudoku::new`].
    pub fn parse(rows: &[&str]) -> Result<Sudoku, SudokuError> {
        let mut grid = Vec::with_capacity(rows.len());
        for row in rows {
            let mut parsed = Vec::with_capacity(row.len());
            for ch in row.chars() {
                match ch {
                    '.' | '0' => parsed.push(0),
                    '1'..='9' => parsed.push(ch as usize - '0' as usize),
                    other => return Err(SudokuError::Unparsable(other)),
                }
            }
            grid.push(parsed);
        }
        Sudoku::new(grid)
    }

    /// The clues this instance was built from.
    pub fn givens(&self) -> &Grid {
        &self.givens
    }

    /// Every completed board.
    pub fn solutions(&self) -> Result<Vec<Grid>, SolveError> {
        let mut grids = vec![];
        let side = self.side;
        self.solver.for_each_solution(|placements| {
            let mut grid = vec![vec![0; side]; side];
            for (row, col, digit) in placements {
                grid[row][col] = digit;
            }
            grids.push(grid);
        })?;
        Ok(grids)
    }

    /// Number of completions.
    pub fn count(&self) -> Result<usize, SolveError> {
        self.solver.count()
    }

    /// Renders a grid with box separators:
    ///
    /// ```text
    /// 5 3 4 | 6 7 8 | 9 1 2
    /// ...
    /// ------+-------+------
    /// ```
    pub fn pretty(grid: &Grid) -> String {
        let side = grid.len();
        let box_width = (side as f64).sqrt() as usize;
        let mut out = String::new();
        for (r, row) in grid.iter().enumerate() {
            if r % box_width == 0 && r != 0 {
                for b in 0..box_width {
                    if b != 0 {
                        out.push('+');
                    }
                    out.push_str(&"-".repeat(2 * box_width));
                }
                out.push('\n');
            }
            for (c, &digit) in row.iter().enumerate() {
                if c % box_width == 0 && c != 0 {
                    out.push_str("| ");
                }
                match digit {
                    0 => out.push('.'),
                    d => out.push_str(&d.to_string()),
                }
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
