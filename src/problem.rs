//! Provides a generic problem type that defines constraints and subsets.
//!
//! Every complex exact cover problem (such as polyomino packing or Sudoku)
//! first generates this basic [`Problem`] instance before handing it to a
//! [`Solver`](crate::Solver). To see examples of more complex problems,
//! see the [`problems`](crate::problems) module.

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// Base trait for subset names and set elements.
pub trait Value: Clone + Hash + Eq {}
impl<T: Clone + Hash + Eq> Value for T {}

/// How often a constraint must be covered by the chosen subsets.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
pub enum Coverage {
    /// Exactly once.
    Exact,
    /// At most once; such constraints are never branched on.
    AtMostOnce,
}

/// An exact cover problem instance.
///
/// The set elements are of type `E`; each forms a constraint together
/// with a [`Coverage`]. The subsets are identified by names of type `N`.
///
/// # Ordering
///
/// The order of the subsets and the elements is determined by the
/// insertion order ([`IndexMap`] internally). Element order decides how
/// the search breaks branching ties, and subset order may affect the
/// order of the solutions.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
pub struct Problem<N: Value, E: Value> {
    constraints: IndexMap<E, Coverage>,
    released: IndexSet<E>,
    subsets: IndexMap<N, Vec<E>>,
}

impl<N: Value, E: Value> Default for Problem<N, E> {
    fn default() -> Problem<N, E> {
        Problem {
            constraints: Default::default(),
            released: Default::default(),
            subsets: Default::default(),
        }
    }
}

impl<N: Value, E: Value> Problem<N, E> {
    /// Returns a reference to the constraints of the problem.
    pub fn constraints(&self) -> &IndexMap<E, Coverage> {
        &self.constraints
    }

    /// Returns a reference to the released constraints of the problem.
    pub fn released(&self) -> &IndexSet<E> {
        &self.released
    }

    /// Returns a reference to the subsets of the problem.
    pub fn subsets(&self) -> &IndexMap<N, Vec<E>> {
        &self.subsets
    }

    /// Adds a subset to the problem.
    ///
    /// If the subset name already exists, it replaces the corresponding
    /// subset.
    pub fn add_subset(&mut self, name: N, subset: Vec<E>) {
        self.subsets.insert(name, subset);
    }

    /// Adds a constraint with the given coverage requirement.
    pub fn add_constraint(&mut self, elem: E, coverage: Coverage) {
        self.constraints.insert(elem, coverage);
    }

    /// Adds a constraint that has to be covered exactly once.
    pub fn add_exact_constraint(&mut self, elem: E) {
        self.add_constraint(elem, Coverage::Exact);
    }

    /// Adds several exact constraints.
    pub fn add_exact_constraints<I: IntoIterator<Item = E>>(&mut self, constraints: I) {
        for constraint in constraints {
            self.add_exact_constraint(constraint);
        }
    }

    /// Adds a constraint that may be covered at most once.
    pub fn add_optional_constraint(&mut self, elem: E) {
        self.add_constraint(elem, Coverage::AtMostOnce);
    }

    /// Adds several at-most-once constraints.
    pub fn add_optional_constraints<I: IntoIterator<Item = E>>(&mut self, constraints: I) {
        for constraint in constraints {
            self.add_optional_constraint(constraint);
        }
    }

    /// Marks an exact constraint as pre-satisfied: the subsets may still
    /// name it (at most one of the chosen ones), but the search no longer
    /// requires covering it.
    ///
    /// Used for cells of a board that need not be filled.
    pub fn release_constraint(&mut self, elem: E) {
        self.released.insert(elem);
    }
}
