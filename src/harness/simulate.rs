//! Repeated independent annealing runs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::summary::{mean_series, summarize, Summary};
use crate::annealing::{AnnealOutcome, Annealer, CoolingSchedule, DeltaMode};
use crate::error::AnnealError;
use crate::models::{Tour, TspProblem};

/// Outcomes of a batch of independent runs on the same problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    outcomes: Vec<AnnealOutcome>,
}

impl Simulation {
    /// Individual run outcomes, in execution order.
    pub fn outcomes(&self) -> &[AnnealOutcome] {
        &self.outcomes
    }

    /// Consumes the batch, returning the outcomes.
    pub fn into_outcomes(self) -> Vec<AnnealOutcome> {
        self.outcomes
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if the batch holds no runs.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Terminal incumbent cost of each run.
    pub fn final_costs(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.cost).collect()
    }

    /// The run whose final tour is shortest.
    pub fn best(&self) -> Option<&AnnealOutcome> {
        self.outcomes.iter().min_by(|a, b| a.cost.total_cmp(&b.cost))
    }

    /// Summary of the terminal costs.
    pub fn summary(&self) -> Option<Summary> {
        summarize(&self.final_costs())
    }

    /// Per-step acceptance rate averaged across runs.
    pub fn mean_acceptance_rates(&self) -> Vec<f64> {
        let series: Vec<Vec<f64>> = self
            .outcomes
            .iter()
            .map(|o| o.statistics.acceptance_rates())
            .collect();
        mean_series(&series)
    }

    /// Per-step mean rejected cost delta averaged across runs.
    pub fn mean_rejected_deltas(&self) -> Vec<f64> {
        let series: Vec<Vec<f64>> = self
            .outcomes
            .iter()
            .map(|o| o.statistics.mean_rejected_deltas())
            .collect();
        mean_series(&series)
    }

    /// Cost trace averaged across runs, iteration by iteration.
    pub fn mean_cost_trace(&self) -> Vec<f64> {
        let series: Vec<Vec<f64>> = self.outcomes.iter().map(|o| o.cost_trace.clone()).collect();
        mean_series(&series)
    }
}

/// Runs `runs` independent annealing runs, each from a fresh uniformly
/// random tour.
///
/// Runs share nothing but the read-only problem and schedule; the batch
/// consumes `rng` sequentially, so a seeded generator reproduces the batch.
///
/// # Errors
///
/// Returns [`AnnealError::ZeroCount`] if `runs == 0`, and otherwise any
/// precondition error of [`Annealer::run`] before the first run starts.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tsp_anneal::annealing::{DeltaMode, Schedule};
/// use tsp_anneal::harness::simulate;
/// use tsp_anneal::models::{City, TspInstance};
///
/// let instance = TspInstance::new(vec![
///     City::new(0.0, 0.0),
///     City::new(2.0, 0.0),
///     City::new(2.0, 2.0),
///     City::new(0.0, 2.0),
///     City::new(1.0, 3.0),
/// ]);
/// let schedule = Schedule::geometric(5.0, 0.9, 20, 25);
/// let mut rng = StdRng::seed_from_u64(11);
///
/// let batch = simulate(&instance, 4, &schedule, DeltaMode::Absolute, &mut rng).unwrap();
/// assert_eq!(batch.len(), 4);
/// assert_eq!(batch.mean_acceptance_rates().len(), 20);
/// ```
pub fn simulate<P, S, R>(
    problem: &P,
    runs: usize,
    schedule: &S,
    mode: DeltaMode,
    rng: &mut R,
) -> Result<Simulation, AnnealError>
where
    P: TspProblem,
    S: CoolingSchedule + ?Sized,
    R: Rng,
{
    if runs == 0 {
        return Err(AnnealError::ZeroCount("runs"));
    }
    if problem.num_cities() == 0 {
        return Err(AnnealError::EmptyInstance);
    }
    schedule.validate()?;

    let engine = Annealer::new(problem).with_delta_mode(mode);
    let mut outcomes = Vec::with_capacity(runs);
    for run in 0..runs {
        let initial = Tour::random(problem.num_cities(), rng);
        let outcome = engine.run(initial, schedule, rng)?;
        tracing::debug!(run, cost = outcome.cost, "simulation run finished");
        outcomes.push(outcome);
    }
    Ok(Simulation { outcomes })
}
