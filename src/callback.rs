//! Solution observers to pass to the matrix search.

/// An observer handed to [`Matrix::solve`](crate::Matrix::solve).
///
/// `on_solution` fires once per solution with the chosen options, each an
/// ascending list of the item ids it covers, outermost in the order the
/// search selected them.
///
/// Any `FnMut(Vec<Vec<usize>>)` closure is a callback, so most callers
/// never implement this by hand:
///
/// ```
/// use dlx_cover::Matrix;
///
/// let mut mat = Matrix::new(2, 0, 2);
/// mat.add_option(&[0, 1]).unwrap();
///
/// let mut seen = vec![];
/// mat.solve(&mut |sol| seen.push(sol));
/// assert_eq!(seen, vec![vec![vec![0, 1]]]);
/// ```
pub trait Callback {
    fn on_solution(&mut self, _sol: Vec<Vec<usize>>) {}
}

impl<F: FnMut(Vec<Vec<usize>>)> Callback for F {
    fn on_solution(&mut self, sol: Vec<Vec<usize>>) {
        self(sol)
    }
}

/// A simple callback that just collects solutions into a vector.
#[derive(Default)]
pub struct SolutionCallback {
    pub solutions: Vec<Vec<Vec<usize>>>,
}

impl Callback for SolutionCallback {
    fn on_solution(&mut self, sol: Vec<Vec<usize>>) {
        self.solutions.push(sol);
    }
}

/// A callback that ignores every solution; pair it with the count that
/// [`Matrix::solve`](crate::Matrix::solve) returns.
pub struct CountOnly;

impl Callback for CountOnly {}
