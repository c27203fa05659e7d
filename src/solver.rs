//! Provides a solver that solves a generic [`Problem`].

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::matrix::{Matrix, MatrixError};
use crate::problem::{Coverage, Problem, Value};

/// An error returned when a [`Problem`] cannot be lowered to a matrix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("subset references an element with no constraint")]
    UnknownElement,
    #[error("released element has no constraint")]
    UnknownRelease,
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// A solver for a [`Problem`] instance.
///
/// Lowers the problem to a fresh [`Matrix`] on every call: exact
/// constraints are numbered first (in insertion order) so they form the
/// strict item range, at-most-once constraints follow as optional items,
/// one option is added per subset, and released constraints are unlinked
/// before the search starts. Solutions come back as lists of subset
/// names, in the order the search selected them.
///
/// ```
/// use dlx_cover::{Problem, Solver};
///
/// let mut prob = Problem::default();
/// prob.add_exact_constraints(1..=3);
/// prob.add_subset("A", vec![1, 2, 3]);
/// prob.add_subset("B", vec![1]);
/// prob.add_subset("C", vec![2]);
/// prob.add_subset("D", vec![3]);
/// prob.add_subset("E", vec![1, 2]);
/// prob.add_subset("F", vec![2, 3]);
///
/// let solver = Solver::new(prob);
/// assert_eq!(solver.count().unwrap(), 4);
/// ```
#[cfg_attr(test, derive(Debug))]
pub struct Solver<N: Value, E: Value> {
    problem: Problem<N, E>,
}

impl<N: Value, E: Value> Solver<N, E> {
    /// Creates a new solver that solves `problem`.
    pub fn new(problem: Problem<N, E>) -> Solver<N, E> {
        Solver { problem }
    }

    /// Returns a reference to the underlying problem.
    pub fn problem(&self) -> &Problem<N, E> {
        &self.problem
    }

    /// Builds the matrix and the sorted-ids-to-name table used to decode
    /// emitted options. Two subsets with the same contents share a key;
    /// the later definition wins.
    fn generate_matrix(&self) -> Result<(Matrix, IndexMap<Vec<usize>, N>), SolveError> {
        let constraints = self.problem.constraints();

        let mut ids: IndexMap<&E, usize> = IndexMap::with_capacity(constraints.len());
        for (elem, &coverage) in constraints {
            if coverage == Coverage::Exact {
                ids.insert(elem, ids.len());
            }
        }
        let strict = ids.len();
        for (elem, &coverage) in constraints {
            if coverage == Coverage::AtMostOnce {
                ids.insert(elem, ids.len());
            }
        }
        let optional = ids.len() - strict;

        let max_cells = self.problem.subsets().values().map(Vec::len).sum();
        let mut mat = Matrix::new(strict, optional, max_cells);

        let mut names = IndexMap::with_capacity(self.problem.subsets().len());
        for (name, subset) in self.problem.subsets() {
            let mut option = Vec::with_capacity(subset.len());
            for elem in subset {
                let &id = ids.get(elem).ok_or(SolveError::UnknownElement)?;
                option.push(id);
            }
            mat.add_option(&option)?;
            option.sort_unstable();
            names.insert(option, name.clone());
        }

        for elem in self.problem.released() {
            let &id = ids.get(elem).ok_or(SolveError::UnknownRelease)?;
            mat.remove_item(id)?;
        }

        debug!(
            "lowered problem: {} strict + {} optional items, {} subsets, {} released",
            strict,
            optional,
            self.problem.subsets().len(),
            self.problem.released().len()
        );
        Ok((mat, names))
    }

    /// Runs the search, invoking `f` once per solution, and returns the
    /// solution count.
    pub fn for_each_solution(&self, mut f: impl FnMut(Vec<N>)) -> Result<usize, SolveError> {
        let (mut mat, names) = self.generate_matrix()?;
        let count = mat.solve(&mut |sol: Vec<Vec<usize>>| {
            f(sol.iter().map(|option| names[option].clone()).collect());
        });
        Ok(count)
    }

    /// Collects every solution as a list of subset names.
    pub fn solutions(&self) -> Result<Vec<Vec<N>>, SolveError> {
        let mut all = vec![];
        self.for_each_solution(|sol| all.push(sol))?;
        Ok(all)
    }

    /// Counts solutions without decoding them.
    pub fn count(&self) -> Result<usize, SolveError> {
        self.for_each_solution(|_| {})
    }
}
