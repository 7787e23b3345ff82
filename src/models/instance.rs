//! Euclidean TSP instance.

use serde::{Deserialize, Serialize};

use super::tour::is_permutation;
use super::{City, TspProblem};
use crate::distance::{DistanceMatrix, DistanceMode};
use crate::error::AnnealError;
use crate::geometry;

/// A Euclidean TSP instance: a list of cities and, optionally, their
/// precomputed distance matrix.
///
/// Without a matrix every distance query is computed from coordinates,
/// which keeps memory at O(n) for very large instances.
///
/// # Examples
///
/// ```
/// use tsp_anneal::models::{City, TspInstance, TspProblem};
/// use tsp_anneal::distance::DistanceMode;
///
/// let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0)];
/// let lazy = TspInstance::new(cities.clone());
/// let eager = TspInstance::new(cities).with_precomputed_distances();
///
/// assert_eq!(lazy.distance_mode(), DistanceMode::OnTheFly);
/// assert_eq!(eager.distance_mode(), DistanceMode::Precomputed);
/// assert_eq!(lazy.distance(0, 1), eager.distance(0, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspInstance {
    name: Option<String>,
    cities: Vec<City>,
    matrix: Option<DistanceMatrix>,
}

impl TspInstance {
    /// Creates an instance that computes distances on demand.
    pub fn new(cities: Vec<City>) -> Self {
        Self {
            name: None,
            cities,
            matrix: None,
        }
    }

    /// Attaches a name (e.g. the TSPLIB `NAME` header).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Precomputes the full distance matrix from the city coordinates.
    pub fn with_precomputed_distances(mut self) -> Self {
        self.matrix = Some(geometry::build_distance_matrix(&self.cities));
        self
    }

    /// Uses a caller-supplied distance matrix instead of coordinates.
    ///
    /// The matrix is symmetric with a zero diagonal by construction (see
    /// [`DistanceMatrix::from_rows`]); only its size is checked here.
    ///
    /// # Errors
    ///
    /// [`AnnealError::MatrixSizeMismatch`] if the matrix size differs from the
    /// city count.
    pub fn with_distance_matrix(mut self, matrix: DistanceMatrix) -> Result<Self, AnnealError> {
        if matrix.size() != self.cities.len() {
            return Err(AnnealError::MatrixSizeMismatch {
                matrix: matrix.size(),
                cities: self.cities.len(),
            });
        }
        self.matrix = Some(matrix);
        Ok(self)
    }

    /// Instance name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The cities, indexed by city id.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The precomputed distance matrix, if any.
    pub fn matrix(&self) -> Option<&DistanceMatrix> {
        self.matrix.as_ref()
    }

    /// How distance queries are answered.
    pub fn distance_mode(&self) -> DistanceMode {
        if self.matrix.is_some() {
            DistanceMode::Precomputed
        } else {
            DistanceMode::OnTheFly
        }
    }

    /// Checks that `order` is a full tour of this instance.
    pub fn validate_tour(&self, order: &[usize]) -> Result<(), AnnealError> {
        validate_tour_for(self.cities.len(), order)
    }
}

impl TspProblem for TspInstance {
    fn num_cities(&self) -> usize {
        self.cities.len()
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        match &self.matrix {
            Some(dm) => dm.get(from, to),
            None => self.cities[from].distance_to(&self.cities[to]),
        }
    }

    fn tour_length(&self, order: &[usize]) -> f64 {
        geometry::tour_length(&self.cities, order, self.matrix.as_ref())
    }
}

/// Checks that `order` is a permutation of `0..num_cities`.
pub(crate) fn validate_tour_for(num_cities: usize, order: &[usize]) -> Result<(), AnnealError> {
    if num_cities == 0 {
        return Err(AnnealError::EmptyInstance);
    }
    if order.len() != num_cities {
        return Err(AnnealError::TourLengthMismatch {
            tour: order.len(),
            cities: num_cities,
        });
    }
    if !is_permutation(order) {
        return Err(AnnealError::NotAPermutation(num_cities));
    }
    Ok(())
}
