//! Experiment harness around the annealing engine.
//!
//! - [`simulate`] — repeated independent runs with per-step aggregation
//! - [`summarize`] — mean, sample variance, and 95% confidence interval
//! - [`sample_cost_differences`] / [`suggest_initial_temperature`] —
//!   calibrating `T0` from random-walk cost changes

mod sampling;
mod simulate;
mod summary;

pub use sampling::{sample_cost_differences, suggest_initial_temperature};
pub use simulate::{simulate, Simulation};
pub use summary::{gap_to_reference, mean_series, summarize, Summary};
