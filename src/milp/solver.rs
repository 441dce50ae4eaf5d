//! MILP solver interface and a brute-force implementation.

use std::time::Instant;

use super::model::{MilpModel, Sense, VarId};

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible assignment exists.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// Model is invalid, malformed or outside what the backend handles.
    ModelInvalid,
    /// Solver exceeded time limit.
    Timeout,
    /// No solution found for unknown reasons.
    Unknown,
}

/// Solution from a MILP solver.
#[derive(Debug, Clone)]
pub struct MilpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective function value, when a solution was found.
    pub objective_value: Option<f64>,
    /// Assignment of each variable, indexed by [`VarId`].
    pub values: Vec<bool>,
    /// Solve time in milliseconds.
    pub solve_time_ms: u64,
    /// Backend diagnostic, if any.
    pub message: Option<String>,
}

impl MilpSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            solve_time_ms: 0,
            message: None,
        }
    }

    /// Attaches a diagnostic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Value of `var`; `false` for unknown variables.
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(var.0).copied().unwrap_or(false)
    }
}

/// Solver configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds. Backends that cannot be
    /// interrupted ignore it.
    pub time_limit_ms: u64,
    /// Largest model [`ExhaustiveSolver`] accepts.
    pub max_exhaustive_variables: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
            max_exhaustive_variables: 24,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_max_exhaustive_variables(mut self, n: usize) -> Self {
        self.max_exhaustive_variables = n;
        self
    }
}

/// Trait for integer-programming backends.
///
/// Implementors solve a [`MilpModel`] and report the assignment of every
/// variable, or a status explaining why none was produced. Wrap external
/// engines (CBC, HiGHS, ...) or provide deterministic stubs for tests.
pub trait MilpSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &MilpModel, config: &SolverConfig) -> MilpSolution;
}

impl<S: MilpSolver + ?Sized> MilpSolver for &S {
    fn solve(&self, model: &MilpModel, config: &SolverConfig) -> MilpSolution {
        (**self).solve(model, config)
    }
}

/// Enumerates every 0/1 assignment.
///
/// Exact and fully deterministic, but exponential: models with more than
/// [`SolverConfig::max_exhaustive_variables`] variables are rejected with
/// [`SolverStatus::ModelInvalid`]. Ties keep the assignment enumerated
/// first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSolver;

impl ExhaustiveSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MilpSolver for ExhaustiveSolver {
    fn solve(&self, model: &MilpModel, config: &SolverConfig) -> MilpSolution {
        if let Err(msg) = model.validate() {
            return MilpSolution::empty(SolverStatus::ModelInvalid).with_message(msg);
        }
        let n = model.var_count();
        if n > config.max_exhaustive_variables.min(63) {
            return MilpSolution::empty(SolverStatus::ModelInvalid).with_message(format!(
                "{n} variables exceed the exhaustive limit of {}",
                config.max_exhaustive_variables
            ));
        }
        if model.constraints.iter().any(|c| c.is_trivially_violated()) {
            return MilpSolution::empty(SolverStatus::Infeasible);
        }

        let start = Instant::now();
        let mut best: Option<(u64, f64)> = None;

        for mask in 0..(1u64 << n) {
            if mask % 4096 == 0 {
                let elapsed = start.elapsed().as_millis() as u64;
                if elapsed > config.time_limit_ms {
                    let mut timed_out = MilpSolution::empty(SolverStatus::Timeout);
                    timed_out.solve_time_ms = elapsed;
                    return timed_out;
                }
            }

            let assigned = move |v: VarId| (mask >> v.0) & 1 == 1;
            if !model.constraints.iter().all(|c| c.holds(c.lhs(assigned))) {
                continue;
            }

            let value = model
                .objective
                .as_ref()
                .map_or(0.0, |obj| obj.value(assigned));
            let better = match (best, model.objective.as_ref().map(|o| o.sense)) {
                (None, _) => true,
                (Some((_, b)), Some(Sense::Minimize)) => value < b - 1e-9,
                (Some((_, b)), _) => value > b + 1e-9,
            };
            if better {
                best = Some((mask, value));
            }
        }

        let solve_time_ms = start.elapsed().as_millis() as u64;
        match best {
            Some((mask, value)) => MilpSolution {
                status: SolverStatus::Optimal,
                objective_value: Some(value),
                values: (0..n).map(|i| (mask >> i) & 1 == 1).collect(),
                solve_time_ms,
                message: None,
            },
            None => {
                let mut infeasible = MilpSolution::empty(SolverStatus::Infeasible);
                infeasible.solve_time_ms = solve_time_ms;
                infeasible
            }
        }
    }
}
