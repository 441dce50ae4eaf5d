//! Annealing configuration.

use crate::error::CoverageError;

/// Configuration for [`HeuristicScheduler`](super::HeuristicScheduler).
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`, applied after
/// every iteration. The run always executes `iterations` steps.
///
/// # Examples
///
/// ```
/// use u_coverage::sa::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.99)
///     .with_iterations(5_000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingConfig {
    /// Starting temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Multiplier applied to the temperature after each iteration, in (0, 1].
    pub cooling_rate: f64,

    /// Number of neighbor evaluations.
    pub iterations: usize,

    /// Random seed for reproducibility. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.95,
            iterations: 1000,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), CoverageError> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(CoverageError::InvalidConfig(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(CoverageError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}
