//! Error types.
//!
//! Every variant of [`AnnealError`] is a caller contract violation detected
//! before (or, for [`AnnealError::TemperatureCollapsed`], instead of) producing
//! any output. [`TsplibError`] covers malformed instance and tour text.

use thiserror::Error;

/// Precondition violations reported by the annealing engine and harness.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnealError {
    /// The problem instance has no cities.
    #[error("instance must contain at least one city")]
    EmptyInstance,

    /// The tour does not have one entry per city.
    #[error("tour visits {tour} cities but the instance has {cities}")]
    TourLengthMismatch {
        /// Length of the supplied tour.
        tour: usize,
        /// Number of cities in the instance.
        cities: usize,
    },

    /// The tour has the right length but repeats or skips a city.
    #[error("tour is not a permutation of 0..{0}")]
    NotAPermutation(usize),

    /// A precomputed distance matrix does not match the city count.
    #[error("distance matrix is {matrix}x{matrix} but the instance has {cities} cities")]
    MatrixSizeMismatch {
        /// Side length of the matrix.
        matrix: usize,
        /// Number of cities in the instance.
        cities: usize,
    },

    /// A caller-supplied distance table is not square, symmetric, non-negative,
    /// or zero on its diagonal.
    #[error("invalid distance matrix at ({row}, {col}): {reason}")]
    InvalidDistanceMatrix {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry (row length for ragged input).
        col: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The initial temperature is zero, negative, or not finite.
    #[error("initial temperature must be positive and finite, got {0}")]
    InvalidInitialTemperature(f64),

    /// A cooling rule parameter is outside its valid range.
    #[error("invalid cooling rule: {0}")]
    InvalidCooling(String),

    /// The Markov chain length is zero.
    #[error("chain length must be greater than zero")]
    ZeroChainLength,

    /// The schedule produced a temperature that is not strictly positive.
    #[error("temperature collapsed to {temperature} at outer step {step}")]
    TemperatureCollapsed {
        /// Outer step at which the collapse was observed.
        step: usize,
        /// Offending temperature.
        temperature: f64,
    },

    /// A harness entry point was asked for zero runs or samples.
    #[error("{0} must be greater than zero")]
    ZeroCount(&'static str),
}

/// Errors raised while reading TSPLIB text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TsplibError {
    /// A header or data line could not be interpreted.
    #[error("line {line}: {message}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The data section was never found.
    #[error("missing {0} section")]
    MissingSection(&'static str),

    /// The declared `DIMENSION` disagrees with the number of entries read.
    #[error("DIMENSION is {declared} but {found} entries were read")]
    DimensionMismatch {
        /// Value of the `DIMENSION` header.
        declared: usize,
        /// Entries actually present.
        found: usize,
    },

    /// A tour section does not list every city exactly once.
    #[error("tour is not a permutation of 1..={0}")]
    InvalidTour(usize),

    /// Only 2D Euclidean instances are supported.
    #[error("unsupported EDGE_WEIGHT_TYPE {0}")]
    UnsupportedEdgeWeight(String),

    /// Underlying reader failure.
    #[error("read failed: {0}")]
    Io(String),
}

impl From<std::io::Error> for TsplibError {
    fn from(err: std::io::Error) -> Self {
        TsplibError::Io(err.to_string())
    }
}
