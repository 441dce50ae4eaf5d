//! `good_lp` backend using the pure-Rust `microlp` branch-and-bound engine.

use std::time::Instant;

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};

use super::model::{MilpModel, Relation, Sense, VarId};
use super::solver::{MilpSolution, MilpSolver, SolverConfig, SolverStatus};

/// Solves binary programs through `good_lp`.
///
/// `microlp` cannot be interrupted, so [`SolverConfig::time_limit_ms`] is
/// not enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MilpSolver for GoodLpSolver {
    fn solve(&self, model: &MilpModel, _config: &SolverConfig) -> MilpSolution {
        if let Err(msg) = model.validate() {
            return MilpSolution::empty(SolverStatus::ModelInvalid).with_message(msg);
        }
        if model.constraints.iter().any(|c| c.is_trivially_violated()) {
            return MilpSolution::empty(SolverStatus::Infeasible);
        }

        let start = Instant::now();

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .vars
            .iter()
            .map(|v| vars.add(variable().binary().name(v.name.clone())))
            .collect();

        let linear = |terms: &[(VarId, f64)]| -> Expression {
            let mut expr = Expression::from(0.0);
            for &(var, coef) in terms {
                expr += coef * handles[var.0];
            }
            expr
        };

        let unsolved = match &model.objective {
            Some(obj) if obj.sense == Sense::Minimize => vars.minimise(linear(&obj.terms)),
            Some(obj) => vars.maximise(linear(&obj.terms)),
            None => vars.maximise(Expression::from(0.0)),
        };
        let mut problem = unsolved.using(microlp);

        for c in model.constraints.iter().filter(|c| !c.terms.is_empty()) {
            let lhs = linear(&c.terms);
            problem = problem.with(match c.relation {
                Relation::LessEq => constraint::leq(lhs, c.rhs),
                Relation::GreaterEq => constraint::geq(lhs, c.rhs),
                Relation::Equal => constraint::eq(lhs, c.rhs),
            });
        }

        let outcome = problem.solve();
        let solve_time_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(solved) => {
                let values: Vec<bool> = handles.iter().map(|&h| solved.value(h) > 0.5).collect();
                let objective_value = model
                    .objective
                    .as_ref()
                    .map_or(0.0, |obj| obj.value(|v| values[v.0]));
                MilpSolution {
                    status: SolverStatus::Optimal,
                    objective_value: Some(objective_value),
                    values,
                    solve_time_ms,
                    message: None,
                }
            }
            Err(err) => {
                let status = match err {
                    ResolutionError::Infeasible => SolverStatus::Infeasible,
                    ResolutionError::Unbounded => SolverStatus::Unbounded,
                    _ => SolverStatus::Unknown,
                };
                let mut failed = MilpSolution::empty(status).with_message(err.to_string());
                failed.solve_time_ms = solve_time_ms;
                failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_good_lp_knapsack() {
        let mut model = MilpModel::new("knapsack");
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        let c = model.add_binary("c");
        model.add_constraint(
            "weight",
            vec![(a, 3.0), (b, 2.0), (c, 2.0)],
            Relation::LessEq,
            4.0,
        );
        model.set_objective(Sense::Maximize, vec![(a, 5.0), (b, 3.0), (c, 3.0)]);

        let solution = GoodLpSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Optimal);
        assert_eq!(solution.objective_value, Some(6.0));
        assert!(!solution.value(a));
    }

    #[test]
    fn test_good_lp_infeasible() {
        let mut model = MilpModel::new("impossible");
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        model.add_constraint("both", vec![(a, 1.0), (b, 1.0)], Relation::GreaterEq, 3.0);
        model.set_objective(Sense::Maximize, vec![(a, 1.0), (b, 1.0)]);

        let solution = GoodLpSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_good_lp_empty_constraint() {
        let mut model = MilpModel::new("empty");
        let a = model.add_binary("a");
        model.add_constraint("nobody", vec![], Relation::GreaterEq, 1.0);
        model.set_objective(Sense::Maximize, vec![(a, 1.0)]);

        let solution = GoodLpSolver::new().solve(&model, &SolverConfig::default());
        assert_eq!(solution.status, SolverStatus::Infeasible);
    }
}
