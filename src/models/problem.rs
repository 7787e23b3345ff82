//! TSP problem trait.

/// Distance oracle over a fixed set of cities.
///
/// This is the interface the annealing engine uses to evaluate tours.
/// Implementations must be read-only after construction so that a single
/// problem can back many independent runs.
///
/// # Examples
///
/// ```
/// use tsp_anneal::models::TspProblem;
///
/// struct Line {
///     positions: Vec<f64>,
/// }
///
/// impl TspProblem for Line {
///     fn num_cities(&self) -> usize { self.positions.len() }
///     fn distance(&self, from: usize, to: usize) -> f64 {
///         (self.positions[from] - self.positions[to]).abs()
///     }
/// }
///
/// let line = Line { positions: vec![0.0, 1.0, 3.0] };
/// assert!((line.tour_length(&[0, 1, 2]) - 6.0).abs() < 1e-10);
/// ```
pub trait TspProblem: Send + Sync {
    /// Number of cities.
    fn num_cities(&self) -> usize;

    /// Distance from city `from` to city `to`.
    fn distance(&self, from: usize, to: usize) -> f64;

    /// Length of the closed tour visiting `order`.
    ///
    /// Tours with fewer than two cities have length zero.
    fn tour_length(&self, order: &[usize]) -> f64 {
        let n = order.len();
        if n < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for i in 0..n - 1 {
            total += self.distance(order[i], order[i + 1]);
        }
        total + self.distance(order[n - 1], order[0])
    }
}
