//! The dancing-links constraint matrix.
//!
//! If you are looking for a typed [`Problem`](crate::problem::Problem) API,
//! see the [`solver`](crate::solver) module; this one speaks raw item ids.

use log::debug;
use thiserror::Error;

use crate::callback::Callback;
use crate::stats::SearchStats;

/// A single cell of [`Matrix`]: the root sentinel, an item header, or a
/// data cell, all sharing the four-way link shape.
#[derive(Default)]
#[cfg_attr(test, derive(Debug, Clone, PartialEq, Eq))]
struct Cell {
    /// Pool index of the owning item header (unused on the root and on
    /// headers themselves).
    item: usize,
    left: usize,
    right: usize,
    up: usize,
    down: usize,
}

/// An error returned when a matrix is built with invalid input.
///
/// Every variant is a caller fault caught before the grid is touched;
/// a failed call leaves the matrix exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("data cell capacity ({0}) exhausted")]
    CellCapacity(usize),
    #[error("item id {id} out of range (matrix has {items} items)")]
    ItemOutOfRange { id: usize, items: usize },
    #[error("item id {0} appears twice in one option")]
    DuplicateItem(usize),
    #[error("option covers no items")]
    EmptyOption,
}

/// A sparse toroidal matrix over which the search runs.
///
/// Items are identified by `0..strict + optional`; the first `strict` ids
/// are strict (covered exactly once), the rest optional (at most once).
/// The whole grid lives in one arena indexed by `usize`, with index 0
/// reserved for the root sentinel and `1..=items` for the item headers.
///
/// A matrix is single-use: build it, call [`solve`](Matrix::solve), then
/// discard it. Adding options after a solve is not supported.
///
/// ```
/// use dlx_cover::{Matrix, SolutionCallback};
///
/// let mut mat = Matrix::new(3, 0, 6);
/// mat.add_option(&[0, 1]).unwrap();
/// mat.add_option(&[2]).unwrap();
/// mat.add_option(&[1, 2]).unwrap();
///
/// let mut cb = SolutionCallback::default();
/// assert_eq!(mat.solve(&mut cb), 1);
/// assert_eq!(cb.solutions, vec![vec![vec![0, 1], vec![2]]]);
/// ```
#[cfg_attr(test, derive(Debug))]
pub struct Matrix {
    pool: Vec<Cell>, // root: 0, headers: 1..=items, data cells after
    count: Vec<usize>,
    strict: usize,
    items: usize,
    max_cells: usize,

    solution: Vec<usize>,
    stats: SearchStats,
}

impl Matrix {
    const ROOT: usize = 0;

    /// Creates a matrix with `strict + optional` items and room for at
    /// most `max_cells` data cells.
    ///
    /// Strict headers are threaded onto the root ring in ascending id
    /// order; optional headers start out self-linked horizontally, so the
    /// search never branches on them. All storage is reserved here and no
    /// allocation happens during [`solve`](Matrix::solve).
    pub fn new(strict: usize, optional: usize, max_cells: usize) -> Matrix {
        let items = strict + optional;
        let mut mat = Matrix {
            pool: Vec::with_capacity(1 + items + max_cells),
            count: vec![0; items + 1],
            strict,
            items,
            max_cells,
            solution: vec![],
            stats: SearchStats::default(),
        };

        mat.create_cell(0); // root
        for id in 0..items {
            let header = mat.create_cell(0);
            if id < strict {
                // headers are allocated consecutively, so the previous
                // one (or the root) sits at header - 1
                mat.insert_right(header - 1, header);
            }
        }
        mat
    }

    /// Number of data cells added so far.
    pub fn cells(&self) -> usize {
        self.pool.len() - 1 - self.items
    }

    /// Instrumentation gathered by the most recent [`solve`](Matrix::solve).
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Adds one option covering the given items.
    ///
    /// A data cell is appended at the bottom of each named column, so
    /// walking a column top to bottom visits options in insertion order,
    /// and the new cells are linked into one horizontal ring. The id
    /// sequence must be non-empty, in range, and free of duplicates.
    pub fn add_option(&mut self, option: &[usize]) -> Result<(), MatrixError> {
        self.validate(option)?;

        let mut left_cell = 0;
        for &id in option {
            let header = id + 1;
            let cell = self.create_cell(header);

            self.insert_down(self.pool[header].up, cell);
            if left_cell != 0 {
                self.insert_right(left_cell, cell);
            }

            self.count[header] += 1;
            left_cell = cell;
        }
        Ok(())
    }

    fn validate(&self, option: &[usize]) -> Result<(), MatrixError> {
        if option.is_empty() {
            return Err(MatrixError::EmptyOption);
        }
        for &id in option {
            if id >= self.items {
                return Err(MatrixError::ItemOutOfRange { id, items: self.items });
            }
        }
        let mut seen: Vec<usize> = option.to_vec();
        seen.sort_unstable();
        for pair in seen.windows(2) {
            if pair[0] == pair[1] {
                return Err(MatrixError::DuplicateItem(pair[0]));
            }
        }
        if self.cells() + option.len() > self.max_cells {
            return Err(MatrixError::CellCapacity(self.max_cells));
        }
        Ok(())
    }

    /// Marks the item permanently satisfied without consuming any option,
    /// by unlinking its header from the root ring.
    ///
    /// Used for cells of a puzzle that need not be filled. Releasing an
    /// optional item is a no-op (it was never on the ring). Must be
    /// called before [`solve`](Matrix::solve).
    pub fn remove_item(&mut self, id: usize) -> Result<(), MatrixError> {
        if id >= self.items {
            return Err(MatrixError::ItemOutOfRange { id, items: self.items });
        }
        let header = id + 1;
        let Cell { left, right, .. } = self.pool[header];
        self.pool[left].right = right;
        self.pool[right].left = left;
        Ok(())
    }

    /// Searches the matrix to exhaustion and returns the number of
    /// solutions found.
    ///
    /// The callback fires once per solution with the chosen options, each
    /// reported as the ascending list of item ids it covers, in the order
    /// the search selected them. The grid is restored afterwards, but the
    /// engine stays single-use: rebuild instead of adding more options.
    ///
    /// If the callback panics, the unwind propagates with the grid left
    /// mid-search; the matrix must be discarded.
    pub fn solve(&mut self, callback: &mut impl Callback) -> usize {
        self.stats.reset();
        debug!(
            "searching: {} strict + {} optional items, {} cells",
            self.strict,
            self.items - self.strict,
            self.cells()
        );
        let found = self.search(0, callback);
        debug!("search exhausted: {} solutions", found);
        found
    }

    fn search(&mut self, depth: usize, callback: &mut impl Callback) -> usize {
        if self.pool[Self::ROOT].right == Self::ROOT {
            // no strict item left uncovered
            callback.on_solution(self.decode_solution());
            return 1;
        }

        let col = self.choose_column();
        self.stats.set_depth(depth);
        self.cover(col);

        let mut found = 0;
        let mut r = self.pool[col].down;
        while r != col {
            self.solution.push(r);
            self.stats.node_visited();

            let mut j = self.pool[r].right;
            while j != r {
                self.cover(self.pool[j].item);
                j = self.pool[j].right;
            }

            found += self.search(depth + 1, callback);

            self.stats.set_depth(depth);
            let mut j = self.pool[r].left;
            while j != r {
                self.uncover(self.pool[j].item);
                j = self.pool[j].left;
            }
            self.solution.pop();

            r = self.pool[r].down;
        }

        self.uncover(col);
        found
    }

    /// Chooses the live strict header with the fewest remaining options
    /// (MRV heuristic). Ties go to the leftmost header on the root ring.
    ///
    /// A zero count is fine: the branching loop over that column is
    /// simply empty.
    fn choose_column(&self) -> usize {
        let mut best = self.pool[Self::ROOT].right;
        let mut best_count = self.count[best];

        let mut c = self.pool[best].right;
        while c != Self::ROOT {
            if self.count[c] < best_count {
                best = c;
                best_count = self.count[c];
            }
            c = self.pool[c].right;
        }
        best
    }

    /// Hides a column and every option intersecting it.
    ///
    /// Walks the column downwards and each row rightwards, splicing cells
    /// out of their columns only; horizontal links are never touched, so
    /// each option's ring stays intact for the mirror walk in
    /// [`uncover`](Matrix::uncover).
    fn cover(&mut self, col: usize) {
        let Cell { left, right, .. } = self.pool[col];
        self.pool[left].right = right;
        self.pool[right].left = left;
        self.stats.update();

        let mut i = self.pool[col].down;
        while i != col {
            let mut j = self.pool[i].right;
            while j != i {
                let Cell { item, up, down, .. } = self.pool[j];
                self.pool[up].down = down;
                self.pool[down].up = up;
                self.count[item] -= 1;
                self.stats.update();
                j = self.pool[j].right;
            }
            i = self.pool[i].down;
        }
    }

    /// Exact inverse of [`cover`](Matrix::cover): walks up then left, so
    /// the last splice done is the first one undone.
    fn uncover(&mut self, col: usize) {
        let mut i = self.pool[col].up;
        while i != col {
            let mut j = self.pool[i].left;
            while j != i {
                let Cell { item, up, down, .. } = self.pool[j];
                self.pool[up].down = j;
                self.pool[down].up = j;
                self.count[item] += 1;
                j = self.pool[j].left;
            }
            i = self.pool[i].up;
        }

        let Cell { left, right, .. } = self.pool[col];
        self.pool[left].right = col;
        self.pool[right].left = col;
    }

    /// Decodes the solution stack: one ascending id list per chosen
    /// option, outermost in depth order.
    fn decode_solution(&self) -> Vec<Vec<usize>> {
        self.solution
            .iter()
            .map(|&cell| {
                let mut option = vec![self.pool[cell].item - 1];
                let mut j = self.pool[cell].right;
                while j != cell {
                    option.push(self.pool[j].item - 1);
                    j = self.pool[j].right;
                }
                option.sort_unstable();
                option
            })
            .collect()
    }

    // Arena helpers. A fresh cell is self-linked in all four directions;
    // the splice helpers then stitch it into the rings.

    fn create_cell(&mut self, item: usize) -> usize {
        let idx = self.pool.len();
        self.pool.push(Cell {
            item,
            left: idx,
            right: idx,
            up: idx,
            down: idx,
        });
        idx
    }

    fn insert_right(&mut self, at: usize, cell: usize) {
        let right = self.pool[at].right;
        self.pool[cell].right = right;
        self.pool[right].left = cell;
        self.pool[cell].left = at;
        self.pool[at].right = cell;
    }

    fn insert_down(&mut self, at: usize, cell: usize) {
        let down = self.pool[at].down;
        self.pool[cell].down = down;
        self.pool[down].up = cell;
        self.pool[cell].up = at;
        self.pool[at].down = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::{CountOnly, SolutionCallback};
    use rand::prelude::*;

    impl Matrix {
        /// Link-for-link, count-for-count snapshot of the grid.
        fn snapshot(&self) -> (Vec<Cell>, Vec<usize>) {
            (self.pool.clone(), self.count.clone())
        }

        /// Checks the mutual-link equations on the live structure and the
        /// count of every header against its column.
        ///
        /// Data cells' horizontal rings are never broken by cover, so they
        /// are checked unconditionally; vertical links and the root ring
        /// are checked along the walks that the solver itself performs.
        fn assert_consistent(&self) {
            let mut c = self.pool[Self::ROOT].right;
            while c != Self::ROOT {
                assert_eq!(self.pool[self.pool[c].left].right, c, "root ring broken at {c}");
                assert_eq!(self.pool[self.pool[c].right].left, c, "root ring broken at {c}");
                c = self.pool[c].right;
            }

            for header in 1..=self.items {
                let mut live = 0;
                let mut c = self.pool[header].down;
                while c != header {
                    assert_eq!(self.pool[self.pool[c].up].down, c, "column broken at {c}");
                    assert_eq!(self.pool[self.pool[c].down].up, c, "column broken at {c}");
                    live += 1;
                    c = self.pool[c].down;
                }
                assert_eq!(self.count[header], live, "count wrong on header {header}");
            }

            for i in (self.items + 1)..self.pool.len() {
                assert_eq!(self.pool[self.pool[i].left].right, i, "row ring broken at {i}");
                assert_eq!(self.pool[self.pool[i].right].left, i, "row ring broken at {i}");
            }
        }

        /// Live strict headers, left to right along the root ring.
        fn live_columns(&self) -> Vec<usize> {
            let mut cols = vec![];
            let mut c = self.pool[Self::ROOT].right;
            while c != Self::ROOT {
                cols.push(c);
                c = self.pool[c].right;
            }
            cols
        }
    }

    /// Knuth's 6x7 toy instance: items A..G as 0..6.
    fn knuth_toy() -> Matrix {
        let mut mat = Matrix::new(7, 0, 16);
        mat.add_option(&[2, 4, 5]).unwrap();
        mat.add_option(&[0, 3, 6]).unwrap();
        mat.add_option(&[1, 2, 5]).unwrap();
        mat.add_option(&[0, 3]).unwrap();
        mat.add_option(&[1, 6]).unwrap();
        mat.add_option(&[3, 4, 6]).unwrap();
        mat
    }

    #[test]
    fn knuth_toy_has_unique_solution() {
        let mut mat = knuth_toy();
        let mut cb = SolutionCallback::default();
        assert_eq!(mat.solve(&mut cb), 1);
        assert_eq!(
            cb.solutions,
            vec![vec![vec![0, 3], vec![2, 4, 5], vec![1, 6]]]
        );
    }

    #[test]
    fn solve_restores_the_grid_and_counts_again() {
        let mut mat = knuth_toy();
        let before = mat.snapshot();
        assert_eq!(mat.solve(&mut CountOnly), 1);
        assert_eq!(mat.snapshot(), before);
        assert_eq!(mat.solve(&mut CountOnly), 1);
    }

    #[test]
    fn finds_multiple_solutions() {
        let mut mat = Matrix::new(4, 0, 8);
        mat.add_option(&[0]).unwrap();
        mat.add_option(&[1]).unwrap();
        mat.add_option(&[2]).unwrap();
        mat.add_option(&[3]).unwrap();
        mat.add_option(&[0, 2]).unwrap();
        mat.add_option(&[1, 3]).unwrap();
        assert_eq!(mat.solve(&mut CountOnly), 4);
    }

    #[test]
    fn unsatisfiable_yields_zero_not_an_error() {
        let mut mat = Matrix::new(2, 0, 2);
        mat.add_option(&[0]).unwrap();
        // item 1 has no options at all
        assert_eq!(mat.solve(&mut CountOnly), 0);
    }

    #[test]
    fn optional_item_may_stay_uncovered_but_never_doubles() {
        // strict 0, 1; optional 2 shared by both options
        let mut mat = Matrix::new(2, 1, 4);
        mat.add_option(&[0, 2]).unwrap();
        mat.add_option(&[1, 2]).unwrap();
        mat.add_option(&[1]).unwrap();
        // {0,2} excludes {1,2}, so only {0,2}+{1} works
        let mut cb = SolutionCallback::default();
        assert_eq!(mat.solve(&mut cb), 1);
        assert_eq!(cb.solutions, vec![vec![vec![0, 2], vec![1]]]);
    }

    #[test]
    fn optional_item_may_be_covered_once() {
        let mut mat = Matrix::new(1, 1, 2);
        mat.add_option(&[0, 1]).unwrap();
        assert_eq!(mat.solve(&mut CountOnly), 1);
    }

    #[test]
    fn removed_item_acts_like_an_absent_column() {
        // With item 2 strict and uncoverable, nothing works; removing it
        // behaves exactly like building the matrix without it.
        let mut mat = Matrix::new(3, 0, 4);
        mat.add_option(&[0]).unwrap();
        mat.add_option(&[1]).unwrap();
        assert_eq!(mat.solve(&mut CountOnly), 0);

        let mut mat = Matrix::new(3, 0, 4);
        mat.add_option(&[0]).unwrap();
        mat.add_option(&[1]).unwrap();
        mat.remove_item(2).unwrap();
        assert_eq!(mat.solve(&mut CountOnly), 1);

        let mut reference = Matrix::new(2, 1, 4);
        reference.add_option(&[0]).unwrap();
        reference.add_option(&[1]).unwrap();
        assert_eq!(reference.solve(&mut CountOnly), 1);
    }

    #[test]
    fn builder_rejects_bad_input() {
        let mut mat = Matrix::new(3, 0, 4);
        assert_eq!(mat.add_option(&[]), Err(MatrixError::EmptyOption));
        assert_eq!(
            mat.add_option(&[3]),
            Err(MatrixError::ItemOutOfRange { id: 3, items: 3 })
        );
        assert_eq!(mat.add_option(&[1, 0, 1]), Err(MatrixError::DuplicateItem(1)));
        mat.add_option(&[0, 1, 2]).unwrap();
        assert_eq!(mat.add_option(&[0, 1]), Err(MatrixError::CellCapacity(4)));
        // the failed calls must not have left partial rows behind
        assert_eq!(mat.cells(), 3);
        mat.assert_consistent();
    }

    #[test]
    fn remove_item_rejects_out_of_range() {
        let mut mat = Matrix::new(2, 1, 2);
        assert_eq!(
            mat.remove_item(3),
            Err(MatrixError::ItemOutOfRange { id: 3, items: 3 })
        );
        mat.remove_item(2).unwrap(); // optional: harmless no-op
    }

    #[test]
    fn mrv_chooses_smallest_count_leftmost() {
        let mut mat = Matrix::new(3, 0, 8);
        mat.add_option(&[0, 1]).unwrap();
        mat.add_option(&[0, 2]).unwrap();
        mat.add_option(&[1]).unwrap();
        mat.add_option(&[2]).unwrap();
        // counts: 0 -> 2, 1 -> 2, 2 -> 2: tie broken leftmost
        assert_eq!(mat.choose_column(), 1);

        mat.add_option(&[0]).unwrap();
        // counts: 0 -> 3, 1 -> 2, 2 -> 2: leftmost minimum is item 1
        assert_eq!(mat.choose_column(), 2);
    }

    #[test]
    fn instrumentation_counts_nodes_and_updates() {
        let mut mat = knuth_toy();
        mat.solve(&mut CountOnly);
        let stats = mat.stats();
        assert!(stats.total_nodes() > 0);
        assert!(stats.total_updates() >= stats.total_nodes());
        // depth 0 visited at least the two options of column A
        assert!(stats.nodes_at(0) >= 2);
    }

    fn random_matrix(rng: &mut StdRng) -> (Matrix, usize, usize, Vec<Vec<usize>>) {
        let strict = rng.gen_range(2..6);
        let optional = rng.gen_range(0..3);
        let items = strict + optional;
        let rows = rng.gen_range(1..10);

        let mut options = vec![];
        let mut mat = Matrix::new(strict, optional, rows * items);
        for _ in 0..rows {
            let len = rng.gen_range(1..=items.min(3));
            let mut ids: Vec<usize> = (0..items).collect();
            ids.shuffle(rng);
            ids.truncate(len);
            mat.add_option(&ids).unwrap();
            options.push(ids);
        }
        (mat, strict, optional, options)
    }

    /// Reference count by enumerating every subcollection of options.
    fn brute_force_count(strict: usize, optional: usize, options: &[Vec<usize>]) -> usize {
        let items = strict + optional;
        let mut found = 0;
        for mask in 0u32..1 << options.len() {
            let mut covered = vec![0u8; items];
            for (i, option) in options.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    for &id in option {
                        covered[id] += 1;
                    }
                }
            }
            let strict_ok = covered[..strict].iter().all(|&c| c == 1);
            let optional_ok = covered[strict..].iter().all(|&c| c <= 1);
            if strict_ok && optional_ok {
                found += 1;
            }
        }
        found
    }

    #[test]
    fn cover_uncover_round_trips_link_for_link() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let (mut mat, _, _, _) = random_matrix(&mut rng);
            let before = mat.snapshot();

            let mut covered = vec![];
            for _ in 0..rng.gen_range(1..4) {
                let live = mat.live_columns();
                if live.is_empty() {
                    break;
                }
                let col = live[rng.gen_range(0..live.len())];
                mat.cover(col);
                mat.assert_consistent();
                covered.push(col);
            }
            for col in covered.into_iter().rev() {
                mat.uncover(col);
                mat.assert_consistent();
            }
            assert_eq!(mat.snapshot(), before);
        }
    }

    #[test]
    fn count_matches_brute_force_enumeration() {
        let mut rng = StdRng::seed_from_u64(0xdead);
        for _ in 0..300 {
            let (mut mat, strict, optional, options) = random_matrix(&mut rng);
            let expected = brute_force_count(strict, optional, &options);
            assert_eq!(
                mat.solve(&mut CountOnly),
                expected,
                "disagreement on {strict}+{optional} items, options {options:?}"
            );
        }
    }

    #[test]
    fn two_runs_emit_identical_solutions() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let (mut mat, _, _, _) = random_matrix(&mut rng);
            let mut first = SolutionCallback::default();
            let mut second = SolutionCallback::default();
            mat.solve(&mut first);
            mat.solve(&mut second);
            assert_eq!(first.solutions, second.solutions);
        }
    }
}
