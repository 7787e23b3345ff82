//! # tsp-anneal
//!
//! Simulated annealing for the Euclidean Traveling Salesman Problem, with
//! pluggable cooling schedules, segment reversal and transport moves, and
//! per-run acceptance statistics.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (City, Tour, TspInstance, TspProblem trait)
//! - [`distance`] — Immutable symmetric distance matrix
//! - [`geometry`] — Euclidean distance and closed-tour length
//! - [`moves`] — Reversal and transport neighborhood moves
//! - [`annealing`] — Cooling schedules and the Metropolis annealing engine
//! - [`harness`] — Repeated runs, summaries, and `T0` calibration
//! - [`tsplib`] — TSPLIB instance and tour parsing
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tsp_anneal::annealing::{Annealer, Schedule};
//! use tsp_anneal::models::{City, Tour, TspInstance};
//!
//! let instance = TspInstance::new(vec![
//!     City::new(0.0, 0.0),
//!     City::new(4.0, 0.0),
//!     City::new(4.0, 3.0),
//!     City::new(0.0, 3.0),
//! ])
//! .with_precomputed_distances();
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let initial = Tour::random(4, &mut rng);
//! let outcome = Annealer::new(&instance)
//!     .run(initial, &Schedule::geometric(10.0, 0.9, 40, 25), &mut rng)
//!     .unwrap();
//! assert!((outcome.best_cost - 14.0).abs() < 1e-9);
//! ```

pub mod annealing;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod harness;
pub mod models;
pub mod moves;
pub mod tsplib;

pub use error::{AnnealError, TsplibError};
