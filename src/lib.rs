//! [Exact cover] solver library using Knuth's [dancing links (DLX)]
//! algorithm.
//!
//! [exact cover]: https://en.wikipedia.org/wiki/Exact_cover
//! [dancing links (DLX)]: https://en.wikipedia.org/wiki/Dancing_Links
//!
//! # Concept
//!
//! Many puzzle-like problems, such as polyomino packing, Sudoku, the
//! N queens problem, word squares or tetrastick packing, can be modeled
//! as exact cover problems: given a set of items and a collection of
//! candidate subsets, choose subsets whose disjoint union is exactly the
//! item set. This library provides the sparse toroidal matrix and
//! backtracking search that solve the generic problem, a typed
//! [`Problem`]/[`Solver`] layer on top of it, and front-ends for the
//! puzzles above in [`problems`].
//!
//! Items come in two kinds: *strict* ones that must be covered exactly
//! once, and *optional* ones that may be covered at most once. Optional
//! items are how boards with don't-care cells or puzzles with omissible
//! pieces are expressed.
//!
//! # Basic example
//!
//! ```
//! use dlx_cover::{Problem, Solver};
//!
//! let mut prob = Problem::default();
//! prob.add_exact_constraints(1..=3);
//! prob.add_subset("A", vec![1, 2, 3]);
//! prob.add_subset("B", vec![1]);
//! prob.add_subset("C", vec![2]);
//! prob.add_subset("D", vec![3]);
//! prob.add_subset("E", vec![1, 2]);
//! prob.add_subset("F", vec![2, 3]);
//!
//! let solver = Solver::new(prob);
//! let solutions = solver.solutions().unwrap();
//! assert_eq!(solutions.len(), 4);
//! assert!(solutions.contains(&vec!["B", "C", "D"]));
//! ```
//!
//! # Raw matrix
//!
//! The [`Matrix`] speaks plain item ids and reports each chosen option
//! as the sorted ids it covers; see its documentation for the builder
//! contract and [`SearchStats`] for the per-depth instrumentation.

pub mod vector;

pub mod callback;
pub mod matrix;
pub mod stats;

pub mod problem;
pub mod solver;

pub mod problems;

pub use callback::{Callback, CountOnly, SolutionCallback};
pub use matrix::{Matrix, MatrixError};
pub use problem::{Coverage, Problem};
pub use solver::{SolveError, Solver};
pub use stats::SearchStats;
