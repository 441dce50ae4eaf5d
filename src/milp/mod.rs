//! Binary integer programming layer.
//!
//! Provides a solver-agnostic model for binary programs and the
//! [`MilpSolver`] capability the exact coverage formulation delegates to.
//!
//! # Key Components
//!
//! - **Model**: [`MilpModel`] — binary variables, linear constraints, objective
//! - **Solver**: [`MilpSolver`] trait — interface for backend implementations
//! - **Backends**: [`ExhaustiveSolver`] (deterministic enumeration for small
//!   models) and `GoodLpSolver` (feature `microlp`)
//!
//! # Design
//!
//! This module does not implement simplex or branch-and-bound itself.
//! Consumers depend on the trait only, so any conforming backend can be
//! injected, including test stubs.

mod model;
mod solver;

#[cfg(feature = "microlp")]
mod good_lp_backend;

pub use model::{BinaryVar, LinearConstraint, MilpModel, Objective, Relation, Sense, VarId};
pub use solver::{ExhaustiveSolver, MilpSolution, MilpSolver, SolverConfig, SolverStatus};

#[cfg(feature = "microlp")]
pub use good_lp_backend::GoodLpSolver;
