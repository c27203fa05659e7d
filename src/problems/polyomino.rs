//! Polyomino tiling problems.
//!
//! Pieces must all be placed; every fillable board square must be
//! covered, except designated holes which may stay empty. Holes go
//! through the engine's released-item path rather than being cut out of
//! the board, so a piece may still lie across one.

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::problem::{Problem, Value};
use crate::vector::Vector2D;

// Orientation
// ===========

/// An orientation of a piece.
///
/// Reflection is applied first, then rotation.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Orientation {
    pub reflection: bool,
    pub rotation: i32, // 0..4
}

// Polyomino
// =========

/// A polyomino piece, possibly with disconnected cells.
///
/// The coordinates are normalized upon creation, so a piece carries no
/// translation information.
#[derive(PartialEq, Eq, Clone, Hash, Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Polyomino {
    cells: Vec<Vector2D>,
    size: Vector2D,
}

/// An error returned when a piece without any cells is given.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("piece has no cells")]
pub struct BlankPieceError;

impl Polyomino {
    /// Creates a new `Polyomino` from a list of cell positions.
    ///
    /// The coordinates are normalized (minimum x/y shifted to 0) and the
    /// cell list sorted, so two pieces compare equal exactly when they
    /// have the same shape in the same orientation.
    pub fn new(cells: &[Vector2D]) -> Result<Polyomino, BlankPieceError> {
        let min = Vector2D::new(
            cells.iter().map(|c| c.x).min().ok_or(BlankPieceError)?,
            cells.iter().map(|c| c.y).min().ok_or(BlankPieceError)?,
        );
        let max = Vector2D::new(
            cells.iter().map(|c| c.x).max().ok_or(BlankPieceError)?,
            cells.iter().map(|c| c.y).max().ok_or(BlankPieceError)?,
        );

        let mut cells: Vec<Vector2D> = cells.iter().map(|&c| c - min).collect();
        cells.sort_unstable();

        Ok(Polyomino {
            cells,
            size: max - min + Vector2D::new(1, 1),
        })
    }

    /// Convenience constructor from one string per row, `#` marking a
    /// cell of the piece. Uses the inverted y-axis coordinate system:
    /// `rows[y]` is the y-th row from the top.
    pub fn from_pattern(rows: &[&str]) -> Result<Polyomino, BlankPieceError> {
        let mut cells = vec![];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    cells.push(Vector2D::new(x as i32, y as i32));
                }
            }
        }
        Polyomino::new(&cells)
    }

    /// Returns the list of cells in the piece.
    pub fn cells(&self) -> &[Vector2D] {
        &self.cells
    }

    /// Returns the size of the bounding box.
    pub fn size(&self) -> Vector2D {
        self.size
    }

    /// Orients the piece: reflection first, then rotation.
    pub fn orient(&self, orientation: Orientation) -> Polyomino {
        if orientation.reflection {
            self.reflect().rotate(orientation.rotation)
        } else {
            self.rotate(orientation.rotation)
        }
    }

    /// Reflects the piece in the y axis.
    pub fn reflect(&self) -> Polyomino {
        let reflected: Vec<Vector2D> =
            self.cells.iter().map(|&c| Vector2D::new(-c.x, c.y)).collect();
        Polyomino::new(&reflected).unwrap()
    }

    /// Rotates the piece by the given number of quarter turns.
    pub fn rotate(&self, rotation: i32) -> Polyomino {
        let rotated: Vec<Vector2D> = self.cells.iter().map(|c| c.rotate(rotation)).collect();
        Polyomino::new(&rotated).unwrap()
    }

    /// Returns the orientations of the piece without duplication.
    pub fn unique_orientations(&self) -> Vec<Orientation> {
        let mut shapes = IndexSet::new();
        let mut orientations = vec![];

        for reflection in [false, true] {
            for rotation in 0..4 {
                let o = Orientation { reflection, rotation };
                if shapes.insert(self.orient(o)) {
                    orientations.push(o);
                }
            }
        }
        orientations
    }

    /// Returns the list of cells after translation.
    pub fn translated_cells(&self, trans: Vector2D) -> Vec<Vector2D> {
        self.cells.iter().map(|&c| c + trans).collect()
    }
}

/// The twelve free pentominoes, keyed by their conventional letters.
pub fn free_pentominoes() -> IndexMap<char, Polyomino> {
    let patterns: [(char, &[&str]); 12] = [
        ('F', &[".##", "##.", ".#."]),
        ('I', &["#####"]),
        ('L', &["####", "#..."]),
        ('N', &[".###", "##.."]),
        ('P', &["###", ".##"]),
        ('T', &["###", ".#.", ".#."]),
        ('U', &["#.#", "###"]),
        ('V', &["#..", "#..", "###"]),
        ('W', &["#..", "##.", ".##"]),
        ('X', &[".#.", "###", ".#."]),
        ('Y', &["####", ".#.."]),
        ('Z', &["##.", ".#.", ".##"]),
    ];

    patterns
        .into_iter()
        .map(|(label, rows)| (label, Polyomino::from_pattern(rows).unwrap()))
        .collect()
}

// Board
// =====

/// What a board square expects from a tiling.
#[derive(PartialEq, Eq, Clone, Copy)]
#[cfg_attr(test, derive(Debug))]
pub enum Square {
    /// Must be covered by exactly one piece.
    Fill,
    /// May be covered once or left empty.
    Hole,
    /// Not part of the board.
    Blocked,
}

/// A board to fit the pieces in.
#[derive(Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Board {
    squares: Vec<Vec<Square>>,
    size: Vector2D,
}

impl Board {
    /// Creates a board from one string per row (inverted y axis):
    /// `.` must be filled, `*` is a hole that may stay empty, anything
    /// else is off the board.
    pub fn from_pattern(rows: &[&str]) -> Board {
        let squares: Vec<Vec<Square>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '.' => Square::Fill,
                        '*' => Square::Hole,
                        _ => Square::Blocked,
                    })
                    .collect()
            })
            .collect();

        let width = squares.iter().map(Vec::len).max().unwrap_or(0);
        Board {
            size: Vector2D::new(width as i32, squares.len() as i32),
            squares,
        }
    }

    /// A fully fillable `width` by `height` board.
    pub fn rectangle(width: i32, height: i32) -> Board {
        Board {
            squares: vec![vec![Square::Fill; width as usize]; height as usize],
            size: Vector2D::new(width, height),
        }
    }

    /// Returns the size of the board.
    pub fn size(&self) -> Vector2D {
        self.size
    }

    /// The square at `pos`, or [`Square::Blocked`] outside the board.
    pub fn square(&self, pos: Vector2D) -> Square {
        if pos.y < 0 || pos.y >= self.size.y || pos.x < 0 {
            return Square::Blocked;
        }
        *self.squares[pos.y as usize]
            .get(pos.x as usize)
            .unwrap_or(&Square::Blocked)
    }

    /// Returns whether the piece, oriented and translated as given, lies
    /// entirely on fillable squares.
    pub fn piece_fits(&self, piece: &Polyomino, orien: Orientation, trans: Vector2D) -> bool {
        piece
            .orient(orien)
            .translated_cells(trans)
            .iter()
            .all(|&c| self.square(c) != Square::Blocked)
    }
}

// Problem
// =======

/// An identifier of a piece placed in a specified orientation and
/// translation. It is used as a subset name of the generated
/// [`Problem`] instance.
pub type PlacementName<N> = (N, Orientation, Vector2D);

/// An exact cover constraint for a polyomino tiling.
#[derive(PartialEq, Eq, Clone, Hash)]
#[cfg_attr(test, derive(Debug))]
pub enum TileConstraint<N> {
    Piece(N),
    Cell(Vector2D),
}

/// A polyomino tiling problem.
pub struct PolyominoPacking<N: Value> {
    board: Board,
    pieces: IndexMap<N, Polyomino>,
    pinned: IndexMap<N, (Orientation, Vector2D)>,
}

impl<N: Value> Default for PolyominoPacking<N> {
    fn default() -> PolyominoPacking<N> {
        PolyominoPacking {
            board: Default::default(),
            pieces: Default::default(),
            pinned: Default::default(),
        }
    }
}

impl<N: Value> PolyominoPacking<N> {
    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns a mutable reference to the board.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns a reference to the pieces.
    pub fn pieces(&self) -> &IndexMap<N, Polyomino> {
        &self.pieces
    }

    /// Adds a piece to the problem. Adding a piece with an existing name
    /// replaces it.
    pub fn add_piece(&mut self, name: N, piece: Polyomino) {
        self.pieces.insert(name, piece);
    }

    /// Restricts a piece to a single placement.
    ///
    /// Fixing one asymmetric piece is the usual way to quotient out the
    /// symmetries of the board; a pin that does not fit the board leaves
    /// the piece unplaceable and the problem unsatisfiable.
    pub fn pin_piece(&mut self, name: N, orientation: Orientation, translation: Vector2D) {
        self.pinned.insert(name, (orientation, translation));
    }

    /// Generates the exact cover problem for this tiling.
    pub fn generate_problem(&self) -> Problem<PlacementName<N>, TileConstraint<N>> {
        let mut prob = Problem::default();

        for name in self.pieces.keys() {
            prob.add_exact_constraint(TileConstraint::Piece(name.clone()));
        }

        for y in 0..self.board.size.y {
            for x in 0..self.board.size.x {
                let pos = Vector2D::new(x, y);
                match self.board.square(pos) {
                    Square::Fill => prob.add_exact_constraint(TileConstraint::Cell(pos)),
                    Square::Hole => {
                        prob.add_exact_constraint(TileConstraint::Cell(pos));
                        prob.release_constraint(TileConstraint::Cell(pos));
                    }
                    Square::Blocked => {}
                }
            }
        }

        for (name, piece) in &self.pieces {
            if let Some(&(o, t)) = self.pinned.get(name) {
                if self.board.piece_fits(piece, o, t) {
                    self.add_placement(&mut prob, name, piece, o, t);
                }
                continue;
            }

            for o in piece.unique_orientations() {
                let oriented = piece.orient(o);
                for y in 0..=(self.board.size.y - oriented.size.y) {
                    for x in 0..=(self.board.size.x - oriented.size.x) {
                        let t = Vector2D::new(x, y);
                        if self.board.piece_fits(piece, o, t) {
                            self.add_placement(&mut prob, name, piece, o, t);
                        }
                    }
                }
            }
        }

        prob
    }

    fn add_placement(
        &self,
        prob: &mut Problem<PlacementName<N>, TileConstraint<N>>,
        name: &N,
        piece: &Polyomino,
        o: Orientation,
        t: Vector2D,
    ) {
        let mut subset = vec![TileConstraint::Piece(name.clone())];
        subset.extend(
            piece
                .orient(o)
                .translated_cells(t)
                .into_iter()
                .map(TileConstraint::Cell),
        );
        prob.add_subset((name.clone(), o, t), subset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Solver;
    use std::collections::HashSet;

    fn compare_unique_orientations(piece: &Polyomino, expected: &[(bool, i32)]) {
        assert_eq!(
            piece.unique_orientations().into_iter().collect::<HashSet<_>>(),
            expected
                .iter()
                .map(|&(f, r)| Orientation { reflection: f, rotation: r })
                .collect::<HashSet<_>>()
        )
    }

    #[test]
    fn unique_orientations_can_be_found() {
        let tetro_l = Polyomino::from_pattern(&[".#.", ".#.", ".##"]).unwrap();
        compare_unique_orientations(
            &tetro_l,
            &[
                (false, 0), (false, 1), (false, 2), (false, 3),
                (true, 0), (true, 1), (true, 2), (true, 3),
            ],
        );

        let tetro_s = Polyomino::from_pattern(&["...", ".##", "##."]).unwrap();
        compare_unique_orientations(&tetro_s, &[(false, 0), (false, 1), (true, 0), (true, 1)]);

        let tetro_o = Polyomino::from_pattern(&["...", ".##", ".##"]).unwrap();
        compare_unique_orientations(&tetro_o, &[(false, 0)]);

        let pento_w = Polyomino::from_pattern(&["..#", ".##", "##."]).unwrap();
        compare_unique_orientations(
            &pento_w,
            &[(false, 0), (false, 1), (false, 2), (false, 3)],
        );
    }

    #[test]
    fn blank_pieces_are_rejected() {
        assert_eq!(Polyomino::new(&[]).unwrap_err(), BlankPieceError);
        assert_eq!(Polyomino::from_pattern(&["..", ".."]).unwrap_err(), BlankPieceError);
    }

    #[test]
    fn pentomino_table_is_complete() {
        let pieces = free_pentominoes();
        assert_eq!(pieces.len(), 12);
        for piece in pieces.values() {
            assert_eq!(piece.cells().len(), 5);
        }
        // fixed orientations over all twelve pieces
        let fixed: usize = pieces.values().map(|p| p.unique_orientations().len()).sum();
        assert_eq!(fixed, 63);
    }

    #[test]
    fn problem_can_be_solved() {
        let mut prob = PolyominoPacking::default();
        *prob.board_mut() = Board::rectangle(3, 3);
        prob.add_piece("1", Polyomino::from_pattern(&["###", "#.#"]).unwrap());
        prob.add_piece("2", Polyomino::from_pattern(&["###", ".#."]).unwrap());

        let solver = Solver::new(prob.generate_problem());
        assert_eq!(solver.count().unwrap(), 4);
    }

    #[test]
    fn pinning_a_piece_breaks_symmetry() {
        let mut prob = PolyominoPacking::default();
        *prob.board_mut() = Board::rectangle(3, 3);
        prob.add_piece("1", Polyomino::from_pattern(&["###", "#.#"]).unwrap());
        prob.add_piece("2", Polyomino::from_pattern(&["###", ".#."]).unwrap());
        prob.pin_piece("1", Orientation::default(), Vector2D::new(0, 0));

        let solver = Solver::new(prob.generate_problem());
        assert_eq!(solver.count().unwrap(), 1);
    }

    #[test]
    fn holes_may_stay_empty() {
        let mut prob = PolyominoPacking::default();
        *prob.board_mut() = Board::from_pattern(&["..", ".*"]);
        prob.add_piece("L", Polyomino::from_pattern(&["##", "#."]).unwrap());

        let solver = Solver::new(prob.generate_problem());
        let solutions = solver.solutions().unwrap();
        // only the orientation avoiding the hole leaves every Fill
        // square covered
        assert_eq!(solutions.len(), 1);
        let (_, o, t) = solutions[0][0];
        assert_eq!((o, t), (Orientation::default(), Vector2D::new(0, 0)));
    }

    #[test]
    fn blocked_squares_are_not_constraints() {
        let mut prob = PolyominoPacking::default();
        *prob.board_mut() = Board::from_pattern(&["..", ".#"]);
        prob.add_piece("L", Polyomino::from_pattern(&["##", "#."]).unwrap());

        let solver = Solver::new(prob.generate_problem());
        assert_eq!(solver.count().unwrap(), 1);
    }

    /// The full pentomino census: slow in debug builds, so ignored by
    /// default. Run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn eight_by_eight_with_centre_hole_has_520_tilings() {
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

        let solver = Solver::new(prob.generate_problem());
        assert_eq!(solver.count().unwrap(), 520);
    }
}
