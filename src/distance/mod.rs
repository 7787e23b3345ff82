//! Distance matrices.
//!
//! Provides an immutable all-pairs distance matrix for TSP instances, and the
//! [`DistanceMode`] switch between precomputed and on-the-fly evaluation.

mod matrix;

pub use matrix::DistanceMatrix;

use serde::{Deserialize, Serialize};

/// How an instance answers distance queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMode {
    /// O(1) lookups in a precomputed [`DistanceMatrix`] (O(n²) memory).
    Precomputed,
    /// Each query recomputes the Euclidean distance from coordinates.
    OnTheFly,
}
