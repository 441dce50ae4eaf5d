//! Problem data model.
//!
//! - [`Sensor`]: a battery-limited unit covering a fixed set of zones
//! - [`Zone`]: a monitored area with its derived covering-sensor set
//! - [`ProblemModel`]: the immutable fleet, zones and discrete horizon
//! - [`Schedule`]: active time slots per sensor, produced by a solver
//!
//! Zones hold sensor ids only. The `covered_by` view is recomputed from the
//! sensors' coverage sets when the model is built and never edited after.

mod problem;
mod schedule;
mod sensor;

pub use problem::ProblemModel;
pub use schedule::Schedule;
pub use sensor::{Sensor, Zone};

/// Sensor identifier.
pub type SensorId = usize;

/// Zone identifier, in `[0, zone_count)`.
pub type ZoneId = usize;

/// Discrete time slot index.
pub type Slot = usize;
