//! Simulated annealing scheduler.
//!
//! A single-solution trajectory search over [`Schedule`](crate::model::Schedule)s
//! that needs no external solver. Acceptance is Metropolis-style, measured
//! against the best score found so far, with geometric cooling over a fixed
//! iteration budget.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;

pub use config::AnnealingConfig;
pub use runner::{AnnealingResult, HeuristicScheduler};
