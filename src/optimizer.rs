//! Optimizer facade.
//!
//! [`SensorOptimizer`] owns a [`ProblemModel`], dispatches to the exact or
//! the annealing solver, and keeps the most recent schedule with its
//! objective value.

use std::fmt::Write as _;

use rand::Rng;
use tracing::info;

use crate::error::CoverageError;
use crate::evaluate::time_coverage_gaps;
use crate::exact::ExactCoverageSolver;
use crate::milp::{MilpSolver, SolverConfig};
use crate::model::{ProblemModel, Schedule, Slot, ZoneId};
use crate::sa::{AnnealingConfig, HeuristicScheduler};

/// Summary text when no solve call has succeeded yet.
pub const NO_SOLUTION: &str = "No solution yet.";

/// Which solver produced a held solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveMethod {
    LinearProgramming,
    SimulatedAnnealing,
}

/// A schedule together with the objective value that scored it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldSolution {
    pub schedule: Schedule,
    pub objective_value: f64,
    pub method: SolveMethod,
}

/// Entry point tying the model to both solvers.
///
/// Each successful solve call replaces the held solution; no history is
/// kept. A failed call leaves the previous solution in place.
///
/// The two methods differ in how they treat coverage. The exact solver
/// enforces coverage of every zone at every time step and may return
/// [`CoverageError::Infeasible`]. Annealing always returns a schedule and
/// only asks that each zone has some active sensor at some time; use
/// [`coverage_gaps`](Self::coverage_gaps) to audit its output.
///
/// # Examples
///
/// ```
/// use u_coverage::milp::ExhaustiveSolver;
/// use u_coverage::model::{ProblemModel, Sensor};
/// use u_coverage::optimizer::SensorOptimizer;
///
/// let model = ProblemModel::new(vec![Sensor::new(0, 2.0, [0])], 1).unwrap();
/// let mut optimizer = SensorOptimizer::new(model, ExhaustiveSolver);
/// optimizer.solve_linear_programming().unwrap();
/// assert_eq!(
///     optimizer.solution_summary(),
///     "Objective value: 2\nSensor 0: active at times [0, 1]\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SensorOptimizer<S> {
    model: ProblemModel,
    exact: ExactCoverageSolver<S>,
    solution: Option<HeldSolution>,
}

#[cfg(feature = "microlp")]
impl SensorOptimizer<crate::milp::GoodLpSolver> {
    /// Creates an optimizer backed by the `microlp` engine.
    pub fn with_default_backend(model: ProblemModel) -> Self {
        Self::new(model, crate::milp::GoodLpSolver)
    }
}

impl<S: MilpSolver> SensorOptimizer<S> {
    pub fn new(model: ProblemModel, backend: S) -> Self {
        Self {
            model,
            exact: ExactCoverageSolver::new(backend),
            solution: None,
        }
    }

    /// Overrides the backend configuration used by the exact solver.
    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.exact = self.exact.with_config(config);
        self
    }

    pub fn model(&self) -> &ProblemModel {
        &self.model
    }

    /// Solves the covering program exactly and holds the result.
    pub fn solve_linear_programming(&mut self) -> Result<&Schedule, CoverageError> {
        let solved = self.exact.solve(&self.model)?;
        Ok(self.adopt(HeldSolution {
            schedule: solved.schedule,
            objective_value: solved.objective_value,
            method: SolveMethod::LinearProgramming,
        }))
    }

    /// Runs simulated annealing and holds the best schedule found.
    ///
    /// Only an invalid `config` makes this fail.
    pub fn solve_simulated_annealing(
        &mut self,
        config: AnnealingConfig,
    ) -> Result<&Schedule, CoverageError> {
        let result = HeuristicScheduler::new(config)?.run(&self.model);
        Ok(self.adopt(HeldSolution {
            schedule: result.best,
            objective_value: result.best_value,
            method: SolveMethod::SimulatedAnnealing,
        }))
    }

    /// Like [`solve_simulated_annealing`](Self::solve_simulated_annealing)
    /// with a caller-supplied random source.
    pub fn solve_simulated_annealing_with_rng<R: Rng>(
        &mut self,
        config: AnnealingConfig,
        rng: &mut R,
    ) -> Result<&Schedule, CoverageError> {
        let result = HeuristicScheduler::new(config)?.run_with_rng(&self.model, rng);
        Ok(self.adopt(HeldSolution {
            schedule: result.best,
            objective_value: result.best_value,
            method: SolveMethod::SimulatedAnnealing,
        }))
    }

    fn adopt(&mut self, held: HeldSolution) -> &Schedule {
        info!(
            method = ?held.method,
            objective = held.objective_value,
            active_slots = held.schedule.total_active_slots(),
            "adopted new solution"
        );
        &self.solution.insert(held).schedule
    }

    pub fn solution(&self) -> Option<&HeldSolution> {
        self.solution.as_ref()
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.solution.as_ref().map(|s| &s.schedule)
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.solution.as_ref().map(|s| s.objective_value)
    }

    /// `(zone, t)` pairs the held schedule leaves uncovered; empty when no
    /// solution is held.
    pub fn coverage_gaps(&self) -> Vec<(ZoneId, Slot)> {
        self.schedule()
            .map(|s| time_coverage_gaps(&self.model, s))
            .unwrap_or_default()
    }

    /// Objective value on the first line, then one line per sensor.
    pub fn solution_summary(&self) -> String {
        let Some(held) = &self.solution else {
            return NO_SOLUTION.to_string();
        };
        let mut out = format!("Objective value: {}\n", held.objective_value);
        for (sensor, slots) in held.schedule.iter() {
            let _ = writeln!(out, "Sensor {sensor}: active at times {slots:?}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    use crate::evaluate::COVERAGE_PENALTY;
    use crate::milp::ExhaustiveSolver;
    use crate::model::Sensor;

    fn optimizer(s0_battery: f64) -> SensorOptimizer<ExhaustiveSolver> {
        let model = ProblemModel::new(
            vec![
                Sensor::new(0, s0_battery, [0, 1]),
                Sensor::new(1, 2.0, [1, 2]),
                Sensor::new(2, 4.0, [0, 2]),
            ],
            3,
        )
        .unwrap();
        SensorOptimizer::new(model, ExhaustiveSolver)
    }

    fn seeded() -> AnnealingConfig {
        AnnealingConfig::default().with_iterations(200).with_seed(5)
    }

    #[test]
    fn test_no_solution_summary() {
        let opt = optimizer(4.0);
        assert_eq!(opt.solution_summary(), NO_SOLUTION);
        assert!(opt.objective_value().is_none());
        assert!(opt.coverage_gaps().is_empty());
    }

    #[test]
    fn test_linear_programming_summary() {
        let mut opt = optimizer(4.0);
        opt.solve_linear_programming().unwrap();
        assert_eq!(
            opt.solution_summary(),
            "Objective value: 10\n\
             Sensor 0: active at times [0, 1, 2, 3]\n\
             Sensor 1: active at times [0, 1]\n\
             Sensor 2: active at times [0, 1, 2, 3]\n"
        );
        assert_eq!(opt.solution().unwrap().method, SolveMethod::LinearProgramming);
    }

    #[test]
    fn test_summary_idempotent() {
        let mut opt = optimizer(3.0);
        opt.solve_simulated_annealing(seeded()).unwrap();
        assert_eq!(opt.solution_summary(), opt.solution_summary());
    }

    #[test]
    fn test_infeasible_keeps_previous_solution() {
        let mut opt = optimizer(3.0);
        opt.solve_simulated_annealing(seeded()).unwrap();
        let before = opt.solution().cloned();

        let err = opt.solve_linear_programming().unwrap_err();
        assert_eq!(err, CoverageError::Infeasible);
        assert!(err.is_recoverable());
        assert_eq!(opt.solution().cloned(), before);
    }

    #[test]
    fn test_annealing_replaces_exact() {
        let mut opt = optimizer(4.0);
        opt.solve_linear_programming().unwrap();
        let exact = opt.objective_value().unwrap();

        opt.solve_simulated_annealing(seeded()).unwrap();
        let held = opt.solution().unwrap();
        assert_eq!(held.method, SolveMethod::SimulatedAnnealing);
        assert!(held.objective_value <= exact);
    }

    #[test]
    fn test_annealing_audit_reports_time_gaps() {
        // Maximal schedule: zone 1 has no eligible sensor at t = 3.
        let mut opt = optimizer(3.0);
        opt.solve_simulated_annealing(seeded()).unwrap();
        assert_eq!(opt.objective_value(), Some(9.0));
        assert_eq!(opt.coverage_gaps(), vec![(1, 3)]);
    }

    #[test]
    fn test_invalid_annealing_config() {
        let mut opt = optimizer(4.0);
        let err = opt
            .solve_simulated_annealing(AnnealingConfig::default().with_initial_temperature(0.0))
            .unwrap_err();
        assert!(!err.is_recoverable());
        assert!(opt.solution().is_none());
    }

    #[test]
    fn test_empty_zone_exact_vs_heuristic() {
        let model = ProblemModel::new(
            vec![Sensor::new(0, 2.0, [0]), Sensor::new(1, 3.0, [0, 1])],
            3,
        )
        .unwrap();
        let mut opt = SensorOptimizer::new(model, ExhaustiveSolver);
        assert_eq!(
            opt.solve_linear_programming().unwrap_err(),
            CoverageError::Infeasible
        );

        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let schedule = opt
            .solve_simulated_annealing_with_rng(AnnealingConfig::default(), &mut rng)
            .unwrap();
        let active = schedule.total_active_slots() as f64;
        assert_eq!(opt.objective_value(), Some(active - COVERAGE_PENALTY));
    }
}
