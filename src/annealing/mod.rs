//! Simulated annealing for closed tours.
//!
//! A single-solution trajectory search: each outer step fixes a temperature
//! from the [`CoolingSchedule`], then evaluates a Markov chain of random
//! segment moves, accepting worsening ones with the Metropolis probability
//! `exp(-delta / T)`.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod engine;
mod schedule;
mod stats;

pub use engine::{AnnealOutcome, Annealer, DeltaMode};
pub use schedule::{Cooling, CoolingSchedule, Schedule};
pub use stats::{RunStatistics, StepStatistics};
