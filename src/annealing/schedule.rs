//! Cooling schedules.
//!
//! A schedule is passive configuration: the initial temperature, how the
//! temperature moves between outer steps, how many outer steps to run, and
//! how long each inner Markov chain is. The engine reads it and never
//! mutates it, so one schedule can drive any number of runs.

use serde::{Deserialize, Serialize};

use crate::error::AnnealError;

/// Temperature policy consumed by [`Annealer`](super::Annealer).
///
/// Implement this for schedules that [`Schedule`] cannot express.
///
/// # Examples
///
/// ```
/// use tsp_anneal::annealing::CoolingSchedule;
///
/// /// Halves the temperature each step; 30 moves per temperature.
/// struct Halving;
///
/// impl CoolingSchedule for Halving {
///     fn initial_temperature(&self) -> f64 { 8.0 }
///     fn steps(&self) -> usize { 3 }
///     fn next_temperature(&self, current: f64, _step: usize) -> f64 { current / 2.0 }
///     fn continue_inner(&self, inner: usize) -> bool { inner < 30 }
/// }
///
/// assert_eq!(Halving.temperature_profile(), vec![4.0, 2.0, 1.0]);
/// ```
pub trait CoolingSchedule {
    /// Temperature before the first outer step.
    fn initial_temperature(&self) -> f64;

    /// Number of outer (temperature) steps.
    fn steps(&self) -> usize;

    /// Temperature to use for outer step `step`, given the temperature of
    /// the previous step (or the initial temperature when `step == 0`).
    fn next_temperature(&self, current: f64, step: usize) -> f64;

    /// Whether the inner loop should evaluate move number `inner`.
    fn continue_inner(&self, inner: usize) -> bool;

    /// Checks the schedule before a run starts.
    ///
    /// The default only checks the initial temperature.
    fn validate(&self) -> Result<(), AnnealError> {
        let t0 = self.initial_temperature();
        if !(t0.is_finite() && t0 > 0.0) {
            return Err(AnnealError::InvalidInitialTemperature(t0));
        }
        Ok(())
    }

    /// The temperature used at each outer step, in order.
    fn temperature_profile(&self) -> Vec<f64> {
        let mut temperature = self.initial_temperature();
        (0..self.steps())
            .map(|step| {
                temperature = self.next_temperature(temperature, step);
                temperature
            })
            .collect()
    }
}

/// Rule for moving from one outer-step temperature to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cooling {
    /// Geometric cooling: `T_{k+1} = alpha * T_k`, `alpha` in (0, 1).
    Geometric {
        /// Cooling factor. Higher = slower cooling.
        alpha: f64,
    },

    /// Logarithmic cooling: `T_k = scale / log10(k + 2)`.
    ///
    /// Depends only on the step index, not on the previous temperature.
    Logarithmic {
        /// Numerator of the schedule, usually the initial temperature.
        scale: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },

    /// Geometric cooling applied only every `length` steps, holding the
    /// temperature constant in between.
    Plateau {
        /// Cooling factor applied at each drop, in (0, 1).
        alpha: f64,
        /// Number of steps per plateau.
        length: usize,
    },

    /// The temperature never changes.
    Constant,
}

impl Default for Cooling {
    fn default() -> Self {
        Cooling::Geometric { alpha: 0.9 }
    }
}

impl Cooling {
    /// Applies the rule for outer step `step`.
    pub fn apply(&self, current: f64, step: usize) -> f64 {
        match *self {
            Cooling::Geometric { alpha } => decay(alpha, current),
            Cooling::Logarithmic { scale } => scale / ((step + 2) as f64).log10(),
            Cooling::LundyMees { beta } => current / (1.0 + beta * current),
            Cooling::Plateau { alpha, length } => {
                if step % length == 0 {
                    decay(alpha, current)
                } else {
                    current
                }
            }
            Cooling::Constant => current,
        }
    }

    /// Checks the rule's parameters.
    pub fn validate(&self) -> Result<(), AnnealError> {
        match *self {
            Cooling::Geometric { alpha } => check_alpha(alpha),
            Cooling::Logarithmic { scale } => {
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(AnnealError::InvalidCooling(format!(
                        "logarithmic scale must be positive, got {scale}"
                    )));
                }
                Ok(())
            }
            Cooling::LundyMees { beta } => {
                if !(beta.is_finite() && beta > 0.0) {
                    return Err(AnnealError::InvalidCooling(format!(
                        "lundy-mees beta must be positive, got {beta}"
                    )));
                }
                Ok(())
            }
            Cooling::Plateau { alpha, length } => {
                if length == 0 {
                    return Err(AnnealError::InvalidCooling(
                        "plateau length must be greater than zero".into(),
                    ));
                }
                check_alpha(alpha)
            }
            Cooling::Constant => Ok(()),
        }
    }
}

/// Multiplicative cooling step. Long geometric runs would underflow to `0.0`;
/// the temperature bottoms out at the smallest positive normal value instead,
/// where the walk is greedy.
fn decay(alpha: f64, current: f64) -> f64 {
    (alpha * current).max(f64::MIN_POSITIVE)
}

fn check_alpha(alpha: f64) -> Result<(), AnnealError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(AnnealError::InvalidCooling(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}

/// Declarative cooling schedule with a fixed Markov chain length.
///
/// # Examples
///
/// ```
/// use tsp_anneal::annealing::{Cooling, CoolingSchedule, Schedule};
///
/// let schedule = Schedule::default()
///     .with_initial_temperature(10.0)
///     .with_steps(50)
///     .with_cooling(Cooling::Geometric { alpha: 0.9 })
///     .with_chain_length(20);
///
/// assert!(schedule.validate().is_ok());
/// assert!((schedule.next_temperature(10.0, 0) - 9.0).abs() < 1e-12);
/// assert!(schedule.continue_inner(19));
/// assert!(!schedule.continue_inner(20));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Initial temperature `T0`.
    pub initial_temperature: f64,

    /// Number of outer (temperature) steps.
    pub steps: usize,

    /// Temperature update rule.
    pub cooling: Cooling,

    /// Moves evaluated per temperature level.
    pub chain_length: usize,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            initial_temperature: 80.0,
            steps: 80,
            cooling: Cooling::default(),
            chain_length: 50,
        }
    }
}

impl Schedule {
    /// Geometric schedule `T_{k+1} = alpha * T_k`.
    pub fn geometric(initial_temperature: f64, alpha: f64, steps: usize, chain_length: usize) -> Self {
        Self {
            initial_temperature,
            steps,
            cooling: Cooling::Geometric { alpha },
            chain_length,
        }
    }

    /// Logarithmic schedule `T_k = T0 / log10(k + 2)`.
    pub fn logarithmic(initial_temperature: f64, steps: usize, chain_length: usize) -> Self {
        Self {
            initial_temperature,
            steps,
            cooling: Cooling::Logarithmic {
                scale: initial_temperature,
            },
            chain_length,
        }
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_cooling(mut self, cooling: Cooling) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_chain_length(mut self, n: usize) -> Self {
        self.chain_length = n;
        self
    }

    /// Total number of moves a run with this schedule evaluates.
    pub fn total_moves(&self) -> usize {
        self.steps * self.chain_length
    }
}

impl CoolingSchedule for Schedule {
    fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    fn steps(&self) -> usize {
        self.steps
    }

    fn next_temperature(&self, current: f64, step: usize) -> f64 {
        self.cooling.apply(current, step)
    }

    fn continue_inner(&self, inner: usize) -> bool {
        inner < self.chain_length
    }

    fn validate(&self) -> Result<(), AnnealError> {
        let t0 = self.initial_temperature;
        if !(t0.is_finite() && t0 > 0.0) {
            return Err(AnnealError::InvalidInitialTemperature(t0));
        }
        if self.chain_length == 0 {
            return Err(AnnealError::ZeroChainLength);
        }
        self.cooling.validate()
    }
}
