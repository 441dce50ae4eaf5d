//! Sensor activation scheduling under zone-coverage constraints.
//!
//! Schedules discrete activation slots for a fleet of battery-limited
//! sensors so that monitored zones stay covered while total active
//! sensor-time is maximized. Two solving methods are provided:
//!
//! - **Exact**: [`exact::ExactCoverageSolver`] builds a binary covering
//!   program (one variable per sensor and eligible slot, coverage of every
//!   zone at every time step, battery budgets) and delegates it to an
//!   injected [`milp::MilpSolver`] backend.
//! - **Simulated Annealing**: [`sa::HeuristicScheduler`] searches schedules
//!   stochastically, scored by [`evaluate::SolutionEvaluator`] with a fixed
//!   penalty per zone lacking any active sensor.
//!
//! [`optimizer::SensorOptimizer`] ties a [`model::ProblemModel`] to both
//! methods and holds the latest result.
//!
//! # Coverage semantics
//!
//! The two methods do not agree on what "covered" means. The exact solver
//! requires coverage at every time step and may fail with
//! [`CoverageError::Infeasible`]; annealing only asks for some active sensor
//! per zone at any time and never fails on a valid model. Annealing output
//! is not validated against the per-time-step rule; see
//! [`evaluate::time_coverage_gaps`].
//!
//! # Features
//!
//! - `microlp` (default): `GoodLpSolver` backend via `good_lp`
//! - `parallel`: multi-start annealing on rayon
//! - `serde`: serialization of the data model, schedules and configs

pub mod error;
pub mod evaluate;
pub mod exact;
pub mod milp;
pub mod model;
pub mod optimizer;
pub mod sa;

pub use error::{CoverageError, ModelError};
