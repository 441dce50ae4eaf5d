//! Error types for model construction and solving.

use thiserror::Error;

use crate::model::{SensorId, ZoneId};

/// Reasons a [`ProblemModel`](crate::model::ProblemModel) cannot be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// No sensors were supplied.
    #[error("sensor fleet is empty")]
    EmptyFleet,

    /// The zone count is zero.
    #[error("zone count must be positive")]
    NoZones,

    /// Two sensors share the same id.
    #[error("duplicate sensor id: {0}")]
    DuplicateSensorId(SensorId),

    /// A battery duration is zero, negative or not finite.
    #[error("sensor {sensor} has non-positive battery duration {battery}")]
    NonPositiveBattery { sensor: SensorId, battery: f64 },

    /// A sensor references a zone id outside `[0, zone_count)`.
    #[error("sensor {sensor} references zone {zone}, but only {zone_count} zones exist")]
    UnknownZone {
        sensor: SensorId,
        zone: ZoneId,
        zone_count: usize,
    },

    /// A display name was given for a zone id outside `[0, zone_count)`.
    #[error("cannot name zone {zone}: only {zone_count} zones exist")]
    UnknownZoneName { zone: ZoneId, zone_count: usize },
}

/// Errors surfaced by the solvers and the optimizer facade.
///
/// The exact solver can fail with [`CoverageError::Infeasible`]; the
/// annealing path never does, it reports weak coverage only through the
/// penalty in its score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverageError {
    /// The sensors or zones are malformed.
    #[error("invalid model: {0}")]
    InvalidModel(#[from] ModelError),

    /// A solver configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No assignment satisfies every coverage and battery constraint.
    #[error("no schedule satisfies every zone at every time step")]
    Infeasible,

    /// The integer-programming backend could not produce a result.
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),

    /// The integer-programming backend hit its time limit.
    #[error("solver timed out after {elapsed_ms} ms")]
    SolverTimeout { elapsed_ms: u64 },
}

impl CoverageError {
    /// Whether the caller can reasonably fall back to the heuristic path.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidModel(_) | Self::InvalidConfig(_))
    }
}
