//! Annealing loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::AnnealingConfig;
use crate::error::CoverageError;
use crate::evaluate::SolutionEvaluator;
use crate::model::{ProblemModel, Schedule};

/// Best-value history is sampled every this many iterations.
const HISTORY_INTERVAL: usize = 100;

/// Result of an annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingResult {
    /// The best schedule found.
    pub best: Schedule,

    /// Score of the best schedule.
    pub best_value: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Temperature after the last cooling step.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of moves that beat the best score.
    pub improving_moves: usize,

    /// Best score sampled at regular intervals. Never decreases.
    pub value_history: Vec<f64>,
}

/// Simulated-annealing scheduler.
///
/// Starts from every sensor active at all eligible slots, then repeatedly
/// resamples the slots of one random sensor. A candidate is compared with
/// the best score seen so far, not with the current schedule:
///
/// - `new > best`: adopted as both current and best
/// - otherwise: adopted as current with probability `exp((new - best) / T)`
///
/// Schedules are scored by [`SolutionEvaluator`], which does not check
/// per-time-step coverage. The scheduler never fails on a valid model; weak
/// coverage only lowers the score.
///
/// # Examples
///
/// ```
/// use u_coverage::model::{ProblemModel, Sensor};
/// use u_coverage::sa::{AnnealingConfig, HeuristicScheduler};
///
/// let model = ProblemModel::new(vec![Sensor::new(0, 3.0, [0])], 1).unwrap();
/// let scheduler = HeuristicScheduler::new(AnnealingConfig::default().with_seed(7)).unwrap();
/// let result = scheduler.run(&model);
/// assert_eq!(result.best_value, 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicScheduler {
    config: AnnealingConfig,
}

impl HeuristicScheduler {
    /// Creates a scheduler, rejecting invalid configurations.
    pub fn new(config: AnnealingConfig) -> Result<Self, CoverageError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Runs with a generator seeded from the config, or from the OS when
    /// no seed is set.
    pub fn run(&self, model: &ProblemModel) -> AnnealingResult {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        self.run_seeded(model, seed)
    }

    /// Runs with a generator seeded from `seed`, ignoring the config seed.
    pub fn run_seeded(&self, model: &ProblemModel, seed: u64) -> AnnealingResult {
        let mut rng = create_rng(seed);
        self.run_with_rng(model, &mut rng)
    }

    /// Runs with a caller-supplied random source.
    pub fn run_with_rng<R: Rng>(&self, model: &ProblemModel, rng: &mut R) -> AnnealingResult {
        let evaluator = SolutionEvaluator::new(model);

        let mut current = Schedule::maximal(model);
        let mut best = current.clone();
        let mut best_value = evaluator.evaluate(&best);

        let mut temperature = self.config.initial_temperature;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut value_history = vec![best_value];

        for iteration in 1..=self.config.iterations {
            let candidate = neighbor(model, &current, rng);
            let value = evaluator.evaluate(&candidate);

            if value > best_value {
                improving_moves += 1;
                accepted_moves += 1;
                best = candidate.clone();
                best_value = value;
                current = candidate;
            } else if rng.random::<f64>() < ((value - best_value) / temperature).exp() {
                accepted_moves += 1;
                current = candidate;
            }

            temperature *= self.config.cooling_rate;

            if iteration.is_multiple_of(HISTORY_INTERVAL) {
                value_history.push(best_value);
            }
        }

        if value_history.last().is_none_or(|&last| last != best_value) {
            value_history.push(best_value);
        }

        debug!(
            best_value,
            accepted_moves,
            improving_moves,
            final_temperature = temperature,
            "annealing finished"
        );

        AnnealingResult {
            best,
            best_value,
            iterations: self.config.iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            value_history,
        }
    }

    /// Runs once per seed and keeps the highest-scoring result.
    ///
    /// Runs are independent and execute in parallel with the `parallel`
    /// feature. Ties go to the earliest seed, so the outcome does not depend
    /// on thread scheduling.
    pub fn run_multi_start(
        &self,
        model: &ProblemModel,
        seeds: &[u64],
    ) -> Result<AnnealingResult, CoverageError> {
        #[cfg(feature = "parallel")]
        let results: Vec<AnnealingResult> = seeds
            .par_iter()
            .map(|&seed| self.run_seeded(model, seed))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results: Vec<AnnealingResult> = seeds
            .iter()
            .map(|&seed| self.run_seeded(model, seed))
            .collect();

        results
            .into_iter()
            .reduce(|kept, next| if next.best_value > kept.best_value { next } else { kept })
            .ok_or_else(|| CoverageError::InvalidConfig("multi-start needs at least one seed".into()))
    }
}

/// Creates the per-run generator.
fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resamples the active slots of one uniformly chosen sensor.
///
/// The new slot set is a uniform subset of the sensor's eligible range whose
/// size is drawn from `[0, current_size]`.
fn neighbor<R: Rng>(model: &ProblemModel, current: &Schedule, rng: &mut R) -> Schedule {
    let sensors = model.sensors();
    let sensor = &sensors[rng.random_range(0..sensors.len())];
    let size = rng.random_range(0..=current.slots(sensor.id).len());
    let picked = rand::seq::index::sample(rng, sensor.slot_count(), size).into_vec();

    let mut next = current.clone();
    next.set(sensor.id, picked);
    next
}
