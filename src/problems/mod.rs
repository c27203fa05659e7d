//! Ready-made puzzle front-ends.
//!
//! Each module lowers one family of puzzles to a
//! [`Problem`](crate::Problem) instance and decodes the solutions back
//! into puzzle terms.

pub mod polyomino;
pub mod queens;
pub mod sudoku;
pub mod tetrastick;
pub mod word_square;
