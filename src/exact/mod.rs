//! Exact coverage scheduling via binary programming.
//!
//! # Formulation
//!
//! One binary variable `x[s, t]` per sensor `s` and eligible slot `t`.
//!
//! - maximize `sum(x[s, t])`
//! - for each zone `z` and `t < horizon`:
//!   `sum(x[s, t] for s covering z with t eligible) >= 1`
//! - for each sensor `s`: `sum(x[s, t]) <= battery_duration(s)`
//!
//! A (zone, time) pair nobody can cover yields an empty coverage row, which
//! makes the program infeasible; it is kept, never dropped.
//!
//! Solving is delegated to an injected [`MilpSolver`].

use tracing::{debug, warn};

use crate::error::CoverageError;
use crate::milp::{
    MilpModel, MilpSolution, MilpSolver, Relation, Sense, SolverConfig, SolverStatus, VarId,
};
use crate::model::{ProblemModel, Schedule, SensorId, Slot};

/// Schedule and objective value produced by [`ExactCoverageSolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExactSolution {
    pub schedule: Schedule,
    /// Objective reported by the backend.
    pub objective_value: f64,
    /// Backend solve time in milliseconds.
    pub solve_time_ms: u64,
}

/// The covering program together with the variable of each (sensor, slot).
#[derive(Debug, Clone)]
pub struct CoverageFormulation {
    pub program: MilpModel,
    /// `(sensor, slot, variable)` for every decision variable.
    pub decisions: Vec<(SensorId, Slot, VarId)>,
}

impl CoverageFormulation {
    /// Builds the covering program for `model`.
    pub fn build(model: &ProblemModel) -> Self {
        let mut program = MilpModel::new("sensor_coverage");
        let mut decisions = Vec::with_capacity(model.total_eligible_slots());
        // per sensor position: slot -> var
        let mut by_sensor: Vec<Vec<VarId>> = Vec::with_capacity(model.sensors().len());

        for sensor in model.sensors() {
            let vars: Vec<VarId> = sensor
                .eligible_slots()
                .map(|t| {
                    let var = program.add_binary(format!("x_{}_{}", sensor.id, t));
                    decisions.push((sensor.id, t, var));
                    var
                })
                .collect();
            by_sensor.push(vars);
        }

        program.set_objective(
            Sense::Maximize,
            decisions.iter().map(|&(_, _, v)| (v, 1.0)).collect(),
        );

        for zone in model.zones() {
            for t in 0..model.horizon() {
                let terms: Vec<(VarId, f64)> = model
                    .sensors()
                    .iter()
                    .zip(&by_sensor)
                    .filter(|(sensor, _)| sensor.can_cover_zone(zone.id()))
                    .filter_map(|(_, vars)| vars.get(t).map(|&v| (v, 1.0)))
                    .collect();
                program.add_constraint(
                    format!("cover_{}_{}", zone.id(), t),
                    terms,
                    Relation::GreaterEq,
                    1.0,
                );
            }
        }

        for (sensor, vars) in model.sensors().iter().zip(&by_sensor) {
            program.add_constraint(
                format!("battery_{}", sensor.id),
                vars.iter().map(|&v| (v, 1.0)).collect(),
                Relation::LessEq,
                sensor.battery_duration,
            );
        }

        Self { program, decisions }
    }

    /// Reads back the active slots of every sensor from `solution`.
    pub fn schedule(&self, model: &ProblemModel, solution: &MilpSolution) -> Schedule {
        let mut schedule = Schedule::new();
        for sensor in model.sensors() {
            schedule.set(sensor.id, Vec::new());
        }
        let mut active: Vec<(SensorId, Slot)> = self
            .decisions
            .iter()
            .filter(|&&(_, _, v)| solution.value(v))
            .map(|&(s, t, _)| (s, t))
            .collect();
        active.sort_unstable();
        for chunk in active.chunk_by(|a, b| a.0 == b.0) {
            schedule.set(chunk[0].0, chunk.iter().map(|&(_, t)| t).collect());
        }
        schedule
    }
}

/// Solves the covering program with an injected backend.
///
/// Fails with [`CoverageError::Infeasible`] when some zone has a time step
/// no eligible covering sensor can fill.
///
/// # Examples
///
/// ```
/// use u_coverage::exact::ExactCoverageSolver;
/// use u_coverage::milp::ExhaustiveSolver;
/// use u_coverage::model::{ProblemModel, Sensor};
///
/// let model = ProblemModel::new(
///     vec![Sensor::new(0, 2.0, [0]), Sensor::new(1, 2.0, [0, 1])],
///     2,
/// )
/// .unwrap();
///
/// let solved = ExactCoverageSolver::new(ExhaustiveSolver).solve(&model).unwrap();
/// assert_eq!(solved.objective_value, 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExactCoverageSolver<S> {
    backend: S,
    config: SolverConfig,
}

impl<S: MilpSolver> ExactCoverageSolver<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds, solves and reads back the covering program.
    pub fn solve(&self, model: &ProblemModel) -> Result<ExactSolution, CoverageError> {
        let formulation = CoverageFormulation::build(model);
        debug!(
            variables = formulation.program.var_count(),
            constraints = formulation.program.constraint_count(),
            horizon = model.horizon(),
            "built coverage program"
        );

        let solution = self.backend.solve(&formulation.program, &self.config);
        match solution.status {
            SolverStatus::Optimal | SolverStatus::Feasible => {}
            SolverStatus::Infeasible => {
                warn!("coverage program is infeasible");
                return Err(CoverageError::Infeasible);
            }
            SolverStatus::Timeout => {
                warn!(elapsed_ms = solution.solve_time_ms, "solver timed out");
                return Err(CoverageError::SolverTimeout {
                    elapsed_ms: solution.solve_time_ms,
                });
            }
            status => {
                let reason = solution
                    .message
                    .unwrap_or_else(|| format!("backend returned {status:?}"));
                warn!(%reason, "solver failed");
                return Err(CoverageError::SolverUnavailable(reason));
            }
        }

        let objective_value = solution.objective_value.ok_or_else(|| {
            CoverageError::SolverUnavailable("backend reported no objective value".into())
        })?;
        let schedule = formulation.schedule(model, &solution);
        debug!(
            objective = objective_value,
            solve_time_ms = solution.solve_time_ms,
            "coverage program solved"
        );

        Ok(ExactSolution {
            schedule,
            objective_value,
            solve_time_ms: solution.solve_time_ms,
        })
    }
}
