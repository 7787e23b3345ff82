//! Annealing run loop.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::schedule::CoolingSchedule;
use super::stats::{RunStatistics, StepStatistics};
use crate::error::AnnealError;
use crate::models::{validate_tour_for, Tour, TspProblem};
use crate::moves::neighbor;

/// How the cost difference between candidate and incumbent is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaMode {
    /// `delta = cost_new - cost_orig`.
    #[default]
    Absolute,
    /// `delta = (cost_new - cost_orig) / cost_orig`.
    ///
    /// Makes temperatures comparable across instances of different scale.
    /// Falls back to the absolute difference when `cost_orig` is zero.
    Relative,
}

impl DeltaMode {
    /// Cost delta of moving from `current` to `candidate`.
    pub fn delta(&self, current: f64, candidate: f64) -> f64 {
        let diff = candidate - current;
        match self {
            DeltaMode::Absolute => diff,
            DeltaMode::Relative if current != 0.0 => diff / current,
            DeltaMode::Relative => diff,
        }
    }
}

/// Result of one annealing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealOutcome {
    /// Incumbent tour when the run finished.
    pub tour: Tour,
    /// Length of `tour`.
    pub cost: f64,
    /// Shortest tour seen during the run.
    pub best_tour: Tour,
    /// Length of `best_tour`.
    pub best_cost: f64,
    /// Incumbent cost after every inner iteration, across all outer steps.
    pub cost_trace: Vec<f64>,
    /// Per-step acceptance statistics.
    pub statistics: RunStatistics,
}

/// Simulated annealing engine for a fixed TSP problem.
///
/// Each call to [`run`](Annealer::run) is an independent, self-contained
/// state machine: the problem is only read, so one `Annealer` (or several,
/// on different threads) can execute many runs against the same instance.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tsp_anneal::annealing::{Annealer, Schedule};
/// use tsp_anneal::models::{City, Tour, TspInstance};
///
/// let square = TspInstance::new(vec![
///     City::new(0.0, 0.0),
///     City::new(1.0, 0.0),
///     City::new(1.0, 1.0),
///     City::new(0.0, 1.0),
/// ])
/// .with_precomputed_distances();
///
/// let schedule = Schedule::geometric(10.0, 0.9, 50, 20);
/// let initial = Tour::new(vec![0, 1, 3, 2]).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let outcome = Annealer::new(&square).run(initial, &schedule, &mut rng).unwrap();
/// assert_eq!(outcome.cost_trace.len(), 50 * 20);
/// assert!((outcome.best_cost - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Annealer<'a, P: TspProblem> {
    problem: &'a P,
    mode: DeltaMode,
}

impl<'a, P: TspProblem> Annealer<'a, P> {
    /// Creates an engine using absolute cost deltas.
    pub fn new(problem: &'a P) -> Self {
        Self {
            problem,
            mode: DeltaMode::Absolute,
        }
    }

    /// Selects how cost deltas are measured.
    pub fn with_delta_mode(mut self, mode: DeltaMode) -> Self {
        self.mode = mode;
        self
    }

    /// The delta mode in use.
    pub fn delta_mode(&self) -> DeltaMode {
        self.mode
    }

    /// Executes one full annealing run from `initial`.
    ///
    /// For each of the schedule's outer steps the temperature is updated
    /// first, then candidates are drawn while the schedule's inner predicate
    /// holds. A candidate with `delta < 0` always replaces the incumbent;
    /// otherwise it is accepted iff `u < exp(-delta / T)` for a fresh
    /// `u ~ U[0, 1)`. After every candidate the incumbent's cost is appended
    /// to the cost trace.
    ///
    /// # Errors
    ///
    /// Fails before doing any work if the instance is empty, `initial` is not
    /// a permutation of the instance's cities, or the schedule is invalid.
    /// Fails with [`AnnealError::TemperatureCollapsed`] if the schedule ever
    /// yields a temperature that is not strictly positive and finite. A
    /// subnormal temperature that underflows to zero is floored at
    /// `f64::MIN_POSITIVE` instead, which makes the walk greedy.
    #[tracing::instrument(
        level = "debug",
        name = "anneal",
        skip_all,
        fields(cities = self.problem.num_cities(), steps = schedule.steps())
    )]
    pub fn run<S, R>(
        &self,
        initial: Tour,
        schedule: &S,
        rng: &mut R,
    ) -> Result<AnnealOutcome, AnnealError>
    where
        S: CoolingSchedule + ?Sized,
        R: Rng,
    {
        validate_tour_for(self.problem.num_cities(), initial.cities())?;
        schedule.validate()?;

        let steps = schedule.steps();
        let mut current_cost = self.problem.tour_length(initial.cities());
        let mut current = initial;
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut temperature = schedule.initial_temperature();
        let mut cost_trace = Vec::new();
        let mut statistics = RunStatistics::with_capacity(steps);

        tracing::debug!(initial_cost = current_cost, mode = ?self.mode, "run started");

        for step in 0..steps {
            let next = schedule.next_temperature(temperature, step);
            temperature = if next == 0.0 && temperature < f64::MIN_POSITIVE {
                // A subnormal temperature decayed past zero.
                f64::MIN_POSITIVE
            } else {
                next
            };
            if !(temperature.is_finite() && temperature > 0.0) {
                tracing::warn!(step, temperature, "schedule produced a non-positive temperature");
                return Err(AnnealError::TemperatureCollapsed { step, temperature });
            }

            let mut counters = StepStatistics::new(step, temperature);
            let mut inner = 0usize;
            while schedule.continue_inner(inner) {
                let (candidate, _) = neighbor(&current, rng);
                let candidate_cost = self.problem.tour_length(candidate.cities());
                let delta = self.mode.delta(current_cost, candidate_cost);

                let accept = if delta < 0.0 {
                    counters.improving += 1;
                    true
                } else {
                    let probability = (-delta / temperature).exp();
                    let u: f64 = rng.random();
                    if u < probability {
                        counters.uphill_accepted += 1;
                        true
                    } else {
                        counters.rejected += 1;
                        counters.rejected_delta_sum += delta;
                        false
                    }
                };

                if accept {
                    current = candidate;
                    current_cost = candidate_cost;
                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                    }
                }

                cost_trace.push(current_cost);
                counters.evaluated += 1;
                inner += 1;
            }

            tracing::trace!(
                step,
                temperature,
                acceptance_rate = counters.acceptance_rate(),
                cost = current_cost,
                "outer step finished"
            );
            statistics.push(counters);
        }

        tracing::debug!(final_cost = current_cost, best_cost, "run finished");

        Ok(AnnealOutcome {
            tour: current,
            cost: current_cost,
            best_tour: best,
            best_cost,
            cost_trace,
            statistics,
        })
    }
}
