//! Cost-difference sampling for choosing an initial temperature.
//!
//! A random walk that accepts every move measures how much a typical move
//! changes the tour length on a given instance. The mean relative change
//! fixes the temperature at which a chosen fraction of worsening moves
//! would be accepted.

use rand::Rng;

use crate::error::AnnealError;
use crate::models::{validate_tour_for, Tour, TspProblem};
use crate::moves::neighbor;

/// Walks `samples` random moves from `initial`, accepting all of them, and
/// records `|cost_new - cost_orig| / cost_orig` for each.
///
/// When `cost_orig` is zero the absolute difference is recorded instead.
///
/// # Errors
///
/// Fails if `samples == 0` or `initial` is not a tour of `problem`.
pub fn sample_cost_differences<P, R>(
    problem: &P,
    initial: Tour,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<f64>, AnnealError>
where
    P: TspProblem,
    R: Rng,
{
    if samples == 0 {
        return Err(AnnealError::ZeroCount("samples"));
    }
    validate_tour_for(problem.num_cities(), initial.cities())?;

    let mut current_cost = problem.tour_length(initial.cities());
    let mut current = initial;
    let mut differences = Vec::with_capacity(samples);
    for _ in 0..samples {
        let (candidate, _) = neighbor(&current, rng);
        let candidate_cost = problem.tour_length(candidate.cities());
        let diff = (candidate_cost - current_cost).abs();
        differences.push(if current_cost != 0.0 {
            diff / current_cost
        } else {
            diff
        });
        current = candidate;
        current_cost = candidate_cost;
    }
    Ok(differences)
}

/// Temperature at which a move of the mean sampled size is accepted with
/// probability `acceptance`: `T0 = -mean / ln(acceptance)`.
///
/// Returns `None` if `differences` is empty, its mean is not positive, or
/// `acceptance` is outside (0, 1). The result is on the same scale as the
/// differences, i.e. suited to [`DeltaMode::Relative`].
///
/// [`DeltaMode::Relative`]: crate::annealing::DeltaMode::Relative
///
/// # Examples
///
/// ```
/// use tsp_anneal::harness::suggest_initial_temperature;
///
/// let t0 = suggest_initial_temperature(&[0.02, 0.04], 0.5).unwrap();
/// assert!(((-0.03f64 / t0).exp() - 0.5).abs() < 1e-12);
/// assert!(suggest_initial_temperature(&[], 0.5).is_none());
/// ```
pub fn suggest_initial_temperature(differences: &[f64], acceptance: f64) -> Option<f64> {
    if differences.is_empty() || !(acceptance > 0.0 && acceptance < 1.0) {
        return None;
    }
    let mean = differences.iter().sum::<f64>() / differences.len() as f64;
    if !(mean.is_finite() && mean > 0.0) {
        return None;
    }
    Some(-mean / acceptance.ln())
}
