//! Tetrastick packing.
//!
//! A tetrastick is four unit segments of the lattice joined at their
//! endpoints. Packing a square grid means using every unit segment of
//! the grid exactly once, placing every piece once, and never letting
//! two pieces cross at an interior lattice point. The no-crossing rule
//! is an at-most-once constraint per interior point, claimed only by
//! pieces that run straight through it.

use indexmap::IndexSet;

use crate::problem::Problem;
use crate::vector::Vector2D;

/// A polystick made of unit lattice segments.
///
/// `horizontal` stores the left endpoint of each horizontal segment and
/// `vertical` the lower endpoint of each vertical one; both lists are
/// kept normalized (minimum coordinates at 0) and sorted, so equal
/// shapes compare equal.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Tetrastick {
    horizontal: Vec<Vector2D>,
    vertical: Vec<Vector2D>,
}

impl Tetrastick {
    /// Creates a stick from segment lists, normalizing the coordinates.
    pub fn new(horizontal: &[Vector2D], vertical: &[Vector2D]) -> Tetrastick {
        Tetrastick {
            horizontal: horizontal.to_vec(),
            vertical: vertical.to_vec(),
        }
        .normalized()
    }

    /// Left endpoints of the horizontal segments.
    pub fn horizontal(&self) -> &[Vector2D] {
        &self.horizontal
    }

    /// Lower endpoints of the vertical segments.
    pub fn vertical(&self) -> &[Vector2D] {
        &self.vertical
    }

    /// Lattice points the stick runs straight through: two collinear
    /// segments meeting at a node. Bends do not count, which is what
    /// lets two bent pieces touch at a point without crossing.
    pub fn junctions(&self) -> Vec<Vector2D> {
        let mut junctions = vec![];
        for &s in &self.horizontal {
            let next = Vector2D::new(s.x + 1, s.y);
            if self.horizontal.contains(&next) {
                junctions.push(next);
            }
        }
        for &s in &self.vertical {
            let next = Vector2D::new(s.x, s.y + 1);
            if self.vertical.contains(&next) {
                junctions.push(next);
            }
        }
        junctions.sort_unstable();
        junctions.dedup();
        junctions
    }

    /// Every lattice point the stick touches.
    fn nodes(&self) -> Vec<Vector2D> {
        let mut nodes = IndexSet::new();
        for &s in &self.horizontal {
            nodes.insert(s);
            nodes.insert(Vector2D::new(s.x + 1, s.y));
        }
        for &s in &self.vertical {
            nodes.insert(s);
            nodes.insert(Vector2D::new(s.x, s.y + 1));
        }
        nodes.into_iter().collect()
    }

    fn normalized(&self) -> Tetrastick {
        let endpoints = || self.horizontal.iter().chain(&self.vertical);
        let min = Vector2D::new(
            endpoints().map(|s| s.x).min().unwrap_or(0),
            endpoints().map(|s| s.y).min().unwrap_or(0),
        );

        let mut horizontal: Vec<Vector2D> = self.horizontal.iter().map(|&s| s - min).collect();
        let mut vertical: Vec<Vector2D> = self.vertical.iter().map(|&s| s - min).collect();
        horizontal.sort_unstable();
        vertical.sort_unstable();
        Tetrastick { horizontal, vertical }
    }

    /// Quarter turn clockwise. A horizontal segment turns vertical and
    /// vice versa; the endpoint convention shifts the origin of the
    /// segments that change family.
    fn rotated(&self) -> Tetrastick {
        let horizontal = self.vertical.iter().map(|&s| Vector2D::new(s.y, -s.x)).collect();
        let vertical = self
            .horizontal
            .iter()
            .map(|&s| Vector2D::new(s.y, -s.x - 1))
            .collect();
        Tetrastick { horizontal, vertical }.normalized()
    }

    /// Mirror image in the y axis.
    fn flipped(&self) -> Tetrastick {
        let horizontal = self
            .horizontal
            .iter()
            .map(|&s| Vector2D::new(-s.x - 1, s.y))
            .collect();
        let vertical = self.vertical.iter().map(|&s| Vector2D::new(-s.x, s.y)).collect();
        Tetrastick { horizontal, vertical }.normalized()
    }

    /// The least of the eight transforms of this stick, used to identify
    /// free sticks.
    fn canonical(&self) -> Tetrastick {
        let mut best = self.normalized();
        let mut s = best.clone();
        for flip in 0..2 {
            if flip == 1 {
                s = s.flipped();
            }
            for _ in 0..4 {
                s = s.rotated();
                if s < best {
                    best = s.clone();
                }
            }
        }
        best
    }

    /// The distinct shapes this stick can be placed in.
    pub fn unique_orientations(&self) -> Vec<Tetrastick> {
        let mut shapes = IndexSet::new();
        let mut s = self.normalized();
        for flip in 0..2 {
            if flip == 1 {
                s = s.flipped();
            }
            for _ in 0..4 {
                shapes.insert(s.clone());
                s = s.rotated();
            }
        }
        shapes.into_iter().collect()
    }

    /// The stick shifted by `offset`, without re-normalizing.
    pub fn translated(&self, offset: Vector2D) -> Tetrastick {
        Tetrastick {
            horizontal: self.horizontal.iter().map(|&s| s + offset).collect(),
            vertical: self.vertical.iter().map(|&s| s + offset).collect(),
        }
    }
}

/// Generates the sixteen free tetrasticks in a deterministic order.
pub fn free_tetrasticks() -> Vec<Tetrastick> {
    let mut found = IndexSet::new();
    let mut seed = Tetrastick {
        horizontal: vec![],
        vertical: vec![Vector2D::new(0, 0)],
    };
    grow(&mut seed, 3, &mut found);

    let mut sticks: Vec<Tetrastick> = found.into_iter().collect();
    sticks.sort_unstable();
    sticks
}

/// Attaches `remaining` more segments at the stick's nodes, recording
/// the canonical form of every complete stick.
fn grow(stick: &mut Tetrastick, remaining: usize, found: &mut IndexSet<Tetrastick>) {
    if remaining == 0 {
        found.insert(stick.canonical());
        return;
    }

    for node in stick.nodes() {
        for candidate in [node, Vector2D::new(node.x, node.y - 1)] {
            if !stick.vertical.contains(&candidate) {
                stick.vertical.push(candidate);
                grow(stick, remaining - 1, found);
                stick.vertical.pop();
            }
        }
        for candidate in [node, Vector2D::new(node.x - 1, node.y)] {
            if !stick.horizontal.contains(&candidate) {
                stick.horizontal.push(candidate);
                grow(stick, remaining - 1, found);
                stick.horizontal.pop();
            }
        }
    }
}

/// One constraint family of the packing.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(test, derive(Debug))]
pub enum StickConstraint {
    /// The piece is placed.
    Piece(usize),
    /// A horizontal unit segment of the grid, by left endpoint.
    Horizontal(Vector2D),
    /// A vertical unit segment of the grid, by lower endpoint.
    Vertical(Vector2D),
    /// An interior lattice point passed straight through.
    Junction(Vector2D),
}

/// A piece placed in absolute grid coordinates.
pub type StickPlacement = (usize, Tetrastick);

/// Packing tetrasticks onto a `size` by `size` grid of cells.
///
/// The classic puzzle is `size = 5` with one of the sixteen free pieces
/// left out, since the grid holds 60 segments and 16 pieces carry 64.
pub struct TetrastickPacking {
    size: i32,
    pieces: Vec<Tetrastick>,
    omitted: Option<usize>,
}

impl TetrastickPacking {
    /// A packing of all sixteen free tetrasticks.
    pub fn new(size: i32) -> TetrastickPacking {
        TetrastickPacking::with_pieces(size, free_tetrasticks())
    }

    /// A packing with a caller-chosen piece set.
    pub fn with_pieces(size: i32, pieces: Vec<Tetrastick>) -> TetrastickPacking {
        TetrastickPacking { size, pieces, omitted: None }
    }

    /// Leaves one piece (by index) out of the packing.
    pub fn omit_piece(&mut self, piece: usize) {
        self.omitted = Some(piece);
    }

    /// Returns the piece set.
    pub fn pieces(&self) -> &[Tetrastick] {
        &self.pieces
    }

    fn fits(&self, stick: &Tetrastick) -> bool {
        stick.horizontal.iter().all(|s| s.x < self.size && s.y <= self.size)
            && stick.vertical.iter().all(|s| s.x <= self.size && s.y < self.size)
    }

    /// Generates the exact cover problem for this packing.
    pub fn generate_problem(&self) -> Problem<StickPlacement, StickConstraint> {
        let mut prob = Problem::default();

        for piece in 0..self.pieces.len() {
            if Some(piece) != self.omitted {
                prob.add_exact_constraint(StickConstraint::Piece(piece));
            }
        }
        for y in 0..=self.size {
            for x in 0..self.size {
                prob.add_exact_constraint(StickConstraint::Horizontal(Vector2D::new(x, y)));
            }
        }
        for y in 0..self.size {
            for x in 0..=self.size {
                prob.add_exact_constraint(StickConstraint::Vertical(Vector2D::new(x, y)));
            }
        }
        for y in 1..self.size {
            for x in 1..self.size {
                prob.add_optional_constraint(StickConstraint::Junction(Vector2D::new(x, y)));
            }
        }

        for (piece, stick) in self.pieces.iter().enumerate() {
            if Some(piece) == self.omitted {
                continue;
            }
            for shape in stick.unique_orientations() {
                for y in 0..=self.size {
                    for x in 0..=self.size {
                        let placed = shape.translated(Vector2D::new(x, y));
                        if self.fits(&placed) {
                            prob.add_subset((piece, placed.clone()), self.placement_subset(piece, &placed));
                        }
                    }
                }
            }
        }

        prob
    }

    fn placement_subset(&self, piece: usize, placed: &Tetrastick) -> Vec<StickConstraint> {
        let mut subset = vec![StickConstraint::Piece(piece)];
        subset.extend(placed.horizontal.iter().map(|&s| StickConstraint::Horizontal(s)));
        subset.extend(placed.vertical.iter().map(|&s| StickConstraint::Vertical(s)));
        subset.extend(
            placed
                .junctions()
                .into_iter()
                .filter(|j| j.x >= 1 && j.x < self.size && j.y >= 1 && j.y < self.size)
                .map(StickConstraint::Junction),
        );
        subset
    }

    /// Renders placed pieces as a segment map, one hex digit per piece.
    pub fn render(&self, placements: &[StickPlacement]) -> String {
        const LABELS: &[u8] = b"0123456789ABCDEF";
        let size = self.size as usize;
        let mut horizontal = vec![vec![' '; size]; size + 1];
        let mut vertical = vec![vec![' '; size + 1]; size];

        for &(piece, ref stick) in placements {
            let label = LABELS[piece % LABELS.len()] as char;
            for s in &stick.horizontal {
                horizontal[s.y as usize][s.x as usize] = label;
            }
            for s in &stick.vertical {
                vertical[s.y as usize][s.x as usize] = label;
            }
        }

        let mut out = String::new();
        for y in (0..=size).rev() {
            for x in 0..size {
                out.push('+');
                out.push(horizontal[y][x]);
            }
            out.push_str("+\n");
            if y > 0 {
                for x in 0..=size {
                    out.push(vertical[y - 1][x]);
                    if x < size {
                        out.push(' ');
                    }
                }
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Solver;

    fn square() -> Tetrastick {
        Tetrastick::new(
            &[Vector2D::new(0, 0), Vector2D::new(0, 1)],
            &[Vector2D::new(0, 0), Vector2D::new(1, 0)],
        )
    }

    fn plus() -> Tetrastick {
        Tetrastick::new(
            &[Vector2D::new(0, 1), Vector2D::new(1, 1)],
            &[Vector2D::new(1, 0), Vector2D::new(1, 1)],
        )
    }

    #[test]
    fn there_are_sixteen_free_tetrasticks() {
        let sticks = free_tetrasticks();
        assert_eq!(sticks.len(), 16);
        for stick in &sticks {
            assert_eq!(stick.horizontal.len() + stick.vertical.len(), 4);
        }
        assert!(sticks.contains(&square().canonical()));
        assert!(sticks.contains(&plus().canonical()));
    }

    #[test]
    fn straight_stick_has_interior_junctions() {
        let bar = Tetrastick::new(
            &[],
            &[
                Vector2D::new(0, 0),
                Vector2D::new(0, 1),
                Vector2D::new(0, 2),
                Vector2D::new(0, 3),
            ],
        );
        assert_eq!(
            bar.junctions(),
            vec![Vector2D::new(0, 1), Vector2D::new(0, 2), Vector2D::new(0, 3)]
        );
        assert_eq!(bar.unique_orientations().len(), 2);
    }

    #[test]
    fn self_crossing_piece_claims_its_junction_once() {
        assert_eq!(plus().junctions(), vec![Vector2D::new(1, 1)]);
    }

    #[test]
    fn square_tiles_the_unit_grid() {
        let packing = TetrastickPacking::with_pieces(1, vec![square()]);
        let solver = Solver::new(packing.generate_problem());
        assert_eq!(solver.count().unwrap(), 1);
    }

    #[test]
    fn straight_stick_cannot_tile_the_unit_grid() {
        let bar = Tetrastick::new(
            &[],
            &[
                Vector2D::new(0, 0),
                Vector2D::new(0, 1),
                Vector2D::new(0, 2),
                Vector2D::new(0, 3),
            ],
        );
        let packing = TetrastickPacking::with_pieces(1, vec![bar]);
        let solver = Solver::new(packing.generate_problem());
        assert_eq!(solver.count().unwrap(), 0);
    }

    #[test]
    fn placements_carry_interior_junction_constraints() {
        let packing = TetrastickPacking::with_pieces(2, vec![plus()]);
        let prob = packing.generate_problem();

        // the plus only fits centred on the single interior point
        assert_eq!(prob.subsets().len(), 1);
        let subset = prob.subsets().get_index(0).unwrap().1;
        assert!(subset.contains(&StickConstraint::Junction(Vector2D::new(1, 1))));
        assert_eq!(subset.len(), 6); // piece + four segments + one junction
    }

    #[test]
    fn render_draws_each_segment_once() {
        let packing = TetrastickPacking::with_pieces(1, vec![square()]);
        let solutions = Solver::new(packing.generate_problem()).solutions().unwrap();
        let drawing = packing.render(&solutions[0]);
        assert_eq!(drawing.matches('0').count(), 4);
    }
}
