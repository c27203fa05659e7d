//! Word squares: an n by n grid whose rows and columns all spell
//! dictionary words.
//!
//! The encoding keeps one (cell, letter) item per axis. A word placed
//! across covers its own letters in the across family and, for each of
//! its cells, every *other* letter of the alphabet in the down family;
//! down placements mirror this. A cell's letter is then pinned from both
//! axes: the across word supplies it and the down word excludes all
//! alternatives, so crossing words always agree.

use indexmap::IndexSet;
use thiserror::Error;

use crate::problem::Problem;
use crate::solver::{SolveError, Solver};

/// Direction a word is placed in.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(test, derive(Debug))]
pub enum Axis {
    Across,
    Down,
}

/// A (axis, cell, letter) item; cells are numbered row-major.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(test, derive(Debug))]
pub struct SquareConstraint {
    pub axis: Axis,
    pub cell: usize,
    pub letter: usize,
}

/// A word placed on a line: `(axis, line, word index)`.
pub type Placement = (Axis, usize, usize);

/// An error returned when the dictionary does not fit the square.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordSquareError {
    #[error("word {word:?} has length {got}, square needs {side}")]
    BadLength { word: String, got: usize, side: usize },
    #[error("dictionary is empty")]
    EmptyDictionary,
}

/// A word square instance over a fixed dictionary.
///
/// ```
/// use dlx_cover::problems::word_square::WordSquare;
///
/// let square = WordSquare::new(3, &["CAT", "ACE", "TEN"]).unwrap();
/// let squares = square.solutions().unwrap();
/// assert_eq!(squares, vec![vec!["CAT".to_string(), "ACE".into(), "TEN".into()]]);
/// ```
#[cfg_attr(test, derive(Debug))]
pub struct WordSquare {
    side: usize,
    words: Vec<String>,
    solver: Solver<Placement, SquareConstraint>,
}

impl WordSquare {
    /// Sets up a `side` by `side` square over the given dictionary; the
    /// alphabet is the set of letters the dictionary uses. Duplicate
    /// words are dropped.
    pub fn new(side: usize, dictionary: &[&str]) -> Result<WordSquare, WordSquareError> {
        let words: IndexSet<String> = dictionary.iter().map(|w| w.to_string()).collect();
        if words.is_empty() {
            return Err(WordSquareError::EmptyDictionary);
        }
        for word in &words {
            if word.chars().count() != side {
                return Err(WordSquareError::BadLength {
                    word: word.clone(),
                    got: word.chars().count(),
                    side,
                });
            }
        }

        let mut alphabet: Vec<char> = words.iter().flat_map(|w| w.chars()).collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        let letter_ix = |ch: char| alphabet.iter().position(|&l| l == ch);

        let mut problem = Problem::default();
        for cell in 0..side * side {
            for letter in 0..alphabet.len() {
                problem.add_exact_constraint(SquareConstraint { axis: Axis::Across, cell, letter });
                problem.add_exact_constraint(SquareConstraint { axis: Axis::Down, cell, letter });
            }
        }

        for (wi, word) in words.iter().enumerate() {
            let letters: Vec<usize> = word
                .chars()
                .map(|ch| letter_ix(ch).expect("alphabet built from these words"))
                .collect();

            for line in 0..side {
                let across_cells: Vec<usize> = (0..side).map(|j| line * side + j).collect();
                let down_cells: Vec<usize> = (0..side).map(|j| j * side + line).collect();

                problem.add_subset(
                    (Axis::Across, line, wi),
                    Self::placement_subset(Axis::Across, &across_cells, &letters, alphabet.len()),
                );
                problem.add_subset(
                    (Axis::Down, line, wi),
                    Self::placement_subset(Axis::Down, &down_cells, &letters, alphabet.len()),
                );
            }
        }

        Ok(WordSquare {
            side,
            words: words.into_iter().collect(),
            solver: Solver::new(problem),
        })
    }

    /// The items a single placement covers: its own letters on its own
    /// axis, the complement letters on the crossing axis.
    fn placement_subset(
        axis: Axis,
        cells: &[usize],
        letters: &[usize],
        alphabet: usize,
    ) -> Vec<SquareConstraint> {
        let crossing = match axis {
            Axis::Across => Axis::Down,
            Axis::Down => Axis::Across,
        };

        let mut subset = Vec::with_capacity(cells.len() * alphabet);
        for (&cell, &letter) in cells.iter().zip(letters) {
            subset.push(SquareConstraint { axis, cell, letter });
            for other in (0..alphabet).filter(|&l| l != letter) {
                subset.push(SquareConstraint { axis: crossing, cell, letter: other });
            }
        }
        subset
    }

    /// Every word square, reported as its rows, top to bottom.
    pub fn solutions(&self) -> Result<Vec<Vec<String>>, SolveError> {
        let mut squares = vec![];
        self.solver.for_each_solution(|placements| {
            let mut rows = vec![String::new(); self.side];
            for (axis, line, wi) in placements {
                if axis == Axis::Across {
                    rows[line] = self.words[wi].clone();
                }
            }
            squares.push(rows);
        })?;
        Ok(squares)
    }

    /// Number of word squares.
    pub fn count(&self) -> Result<usize, SolveError> {
        self.solver.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cat_ace_ten_is_the_unique_square() {
        let square = WordSquare::new(3, &["CAT", "ACE", "TEN"]).unwrap();
        let squares = square.solutions().unwrap();
        assert_eq!(squares, vec![vec!["CAT".to_string(), "ACE".into(), "TEN".into()]]);
    }

    #[test]
    fn asymmetric_dictionary_has_no_square() {
        // no common letters at the crossings
        assert_eq!(WordSquare::new(3, &["CAT", "DOG", "OWL"]).unwrap().count().unwrap(), 0);
    }

    #[test]
    fn duplicates_and_bad_lengths() {
        let square = WordSquare::new(3, &["CAT", "CAT", "ACE", "TEN"]).unwrap();
        assert_eq!(square.count().unwrap(), 1);

        assert_eq!(
            WordSquare::new(3, &["CATS"]).unwrap_err(),
            WordSquareError::BadLength { word: "CATS".into(), got: 4, side: 3 }
        );
        assert_eq!(WordSquareError::EmptyDictionary, WordSquare::new(3, &[]).unwrap_err());
    }

    #[test]
    fn two_by_two_squares_are_counted() {
        // AB over BA and BA over AB both read correctly in each direction
        let square = WordSquare::new(2, &["AB", "BA"]).unwrap();
        assert_eq!(square.count().unwrap(), 2);
    }
}
