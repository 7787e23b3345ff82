//! Per-run statistics.

use serde::{Deserialize, Serialize};

/// Counters for one outer (temperature) step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepStatistics {
    /// Outer step index.
    pub step: usize,
    /// Temperature used for this step.
    pub temperature: f64,
    /// Candidate moves evaluated.
    pub evaluated: usize,
    /// Strictly improving candidates (always accepted).
    pub improving: usize,
    /// Non-improving candidates accepted by the Metropolis draw.
    pub uphill_accepted: usize,
    /// Candidates rejected.
    pub rejected: usize,
    /// Sum of the cost deltas of rejected candidates.
    pub rejected_delta_sum: f64,
}

impl StepStatistics {
    pub(crate) fn new(step: usize, temperature: f64) -> Self {
        Self {
            step,
            temperature,
            evaluated: 0,
            improving: 0,
            uphill_accepted: 0,
            rejected: 0,
            rejected_delta_sum: 0.0,
        }
    }

    /// Accepted candidates, improving or not.
    pub fn accepted(&self) -> usize {
        self.improving + self.uphill_accepted
    }

    /// Fraction of non-improving candidates that were accepted.
    ///
    /// Always in `[0, 1]`; zero when no non-improving candidate was seen.
    pub fn acceptance_rate(&self) -> f64 {
        let uphill = self.uphill_accepted + self.rejected;
        if uphill == 0 {
            0.0
        } else {
            self.uphill_accepted as f64 / uphill as f64
        }
    }

    /// Mean cost delta of rejected candidates; zero when none were rejected.
    pub fn mean_rejected_delta(&self) -> f64 {
        if self.rejected == 0 {
            0.0
        } else {
            self.rejected_delta_sum / self.rejected as f64
        }
    }
}

/// Statistics of a single annealing run, one entry per outer step.
///
/// Created empty at the start of every run and only appended to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    steps: Vec<StepStatistics>,
}

impl RunStatistics {
    pub(crate) fn with_capacity(steps: usize) -> Self {
        Self {
            steps: Vec::with_capacity(steps),
        }
    }

    pub(crate) fn push(&mut self, step: StepStatistics) {
        self.steps.push(step);
    }

    /// Per-step counters, in step order.
    pub fn steps(&self) -> &[StepStatistics] {
        &self.steps
    }

    /// Number of recorded outer steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no outer step was run.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Acceptance rate of each outer step.
    pub fn acceptance_rates(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.acceptance_rate()).collect()
    }

    /// Mean rejected cost delta of each outer step.
    pub fn mean_rejected_deltas(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.mean_rejected_delta()).collect()
    }

    /// Temperature of each outer step.
    pub fn temperatures(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.temperature).collect()
    }

    /// Total candidates evaluated over the run.
    pub fn total_evaluated(&self) -> usize {
        self.steps.iter().map(|s| s.evaluated).sum()
    }

    /// Total candidates accepted over the run.
    pub fn total_accepted(&self) -> usize {
        self.steps.iter().map(|s| s.accepted()).sum()
    }
}
