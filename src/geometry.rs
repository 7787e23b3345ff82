//! Euclidean distances and closed-tour lengths.
//!
//! These are the free-function forms of the queries [`TspInstance`] answers;
//! they are useful when a caller holds raw coordinates and wants a length
//! without building an instance.
//!
//! [`TspInstance`]: crate::models::TspInstance

use crate::distance::DistanceMatrix;
use crate::models::City;

/// Euclidean distance between two cities.
pub fn distance(a: &City, b: &City) -> f64 {
    a.distance_to(b)
}

/// Computes all pairwise distances. The result is symmetric with a zero diagonal.
pub fn build_distance_matrix(cities: &[City]) -> DistanceMatrix {
    DistanceMatrix::from_cities(cities)
}

/// Total length of the closed tour `order` over `cities`.
///
/// Sums consecutive edges plus the closing edge back to the first city. When
/// `matrix` is given every edge is an O(1) lookup, otherwise it is computed
/// from coordinates; both paths agree within floating-point tolerance.
/// Tours with fewer than two cities have length zero.
///
/// # Panics
///
/// Panics if `order` holds an index outside `cities` (or outside `matrix`).
///
/// # Examples
///
/// ```
/// use tsp_anneal::geometry::{build_distance_matrix, tour_length};
/// use tsp_anneal::models::City;
///
/// let square = vec![
///     City::new(0.0, 0.0),
///     City::new(1.0, 0.0),
///     City::new(1.0, 1.0),
///     City::new(0.0, 1.0),
/// ];
/// let dm = build_distance_matrix(&square);
/// assert!((tour_length(&square, &[0, 1, 2, 3], None) - 4.0).abs() < 1e-10);
/// assert!((tour_length(&square, &[0, 1, 2, 3], Some(&dm)) - 4.0).abs() < 1e-10);
/// ```
pub fn tour_length(cities: &[City], order: &[usize], matrix: Option<&DistanceMatrix>) -> f64 {
    let n = order.len();
    if n < 2 {
        return 0.0;
    }
    let edge = |a: usize, b: usize| match matrix {
        Some(dm) => dm.get(a, b),
        None => cities[a].distance_to(&cities[b]),
    };
    let mut total = 0.0;
    for i in 0..n - 1 {
        total += edge(order[i], order[i + 1]);
    }
    total + edge(order[n - 1], order[0])
}
