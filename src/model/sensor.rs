//! Sensor and zone types.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use super::{SensorId, Slot, ZoneId};

/// A battery-limited sensor.
///
/// # Examples
///
/// ```
/// use u_coverage::model::Sensor;
///
/// let s = Sensor::new(0, 3.5, [0, 2]);
/// assert_eq!(s.eligible_slots(), 0..3);
/// assert!(s.can_cover_zone(2));
/// assert!(!s.can_cover_zone(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sensor {
    /// Unique id within a model.
    pub id: SensorId,
    /// Maximum number of time units the sensor may be active.
    pub battery_duration: f64,
    /// Zones this sensor covers while active.
    pub coverage_zones: BTreeSet<ZoneId>,
}

impl Sensor {
    /// Creates a sensor.
    pub fn new(
        id: SensorId,
        battery_duration: f64,
        coverage_zones: impl IntoIterator<Item = ZoneId>,
    ) -> Self {
        Self {
            id,
            battery_duration,
            coverage_zones: coverage_zones.into_iter().collect(),
        }
    }

    /// Whether this sensor covers `zone` when active.
    pub fn can_cover_zone(&self, zone: ZoneId) -> bool {
        self.coverage_zones.contains(&zone)
    }

    /// Number of zones this sensor can cover.
    pub fn coverage_count(&self) -> usize {
        self.coverage_zones.len()
    }

    /// Slots `[0, floor(battery_duration))` at which the sensor may be active.
    pub fn eligible_slots(&self) -> Range<Slot> {
        0..self.slot_count()
    }

    /// Number of eligible slots.
    pub fn slot_count(&self) -> usize {
        if self.battery_duration.is_finite() && self.battery_duration > 0.0 {
            self.battery_duration.floor() as usize
        } else {
            0
        }
    }

    /// Whether `slot` lies in the eligible range.
    pub fn is_eligible(&self, slot: Slot) -> bool {
        slot < self.slot_count()
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sensor {} (battery: {}, zones: {:?})",
            self.id, self.battery_duration, self.coverage_zones
        )
    }
}

/// A monitored zone.
///
/// `covered_by` is derived by [`ProblemModel`](super::ProblemModel) and is
/// only readable from outside the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Zone {
    id: ZoneId,
    name: Option<String>,
    covered_by: Vec<SensorId>,
}

impl Zone {
    pub(crate) fn new(id: ZoneId, covered_by: Vec<SensorId>) -> Self {
        Self {
            id,
            name: None,
            covered_by,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Ids of the sensors covering this zone, ascending.
    pub fn covered_by(&self) -> &[SensorId] {
        &self.covered_by
    }
}
