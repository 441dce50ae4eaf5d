//! Immutable problem description.

use std::collections::HashMap;

use super::sensor::{Sensor, Zone};
use super::{SensorId, ZoneId};
use crate::error::ModelError;

/// Sensors, zones and the derived discrete horizon.
///
/// Built once per optimization run and read-only afterwards, so a single
/// model can be shared by concurrent solver runs.
///
/// # Examples
///
/// ```
/// use u_coverage::model::{ProblemModel, Sensor};
///
/// let model = ProblemModel::new(
///     vec![
///         Sensor::new(0, 3.0, [0, 1]),
///         Sensor::new(1, 2.0, [1, 2]),
///         Sensor::new(2, 4.0, [0, 2]),
///     ],
///     3,
/// )
/// .unwrap();
///
/// assert_eq!(model.horizon(), 4);
/// assert_eq!(model.zone(1).unwrap().covered_by(), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemModel {
    sensors: Vec<Sensor>,
    index: HashMap<SensorId, usize>,
    zones: Vec<Zone>,
    horizon: usize,
}

impl ProblemModel {
    /// Validates the fleet and derives the zone view and horizon.
    pub fn new(sensors: Vec<Sensor>, zone_count: usize) -> Result<Self, ModelError> {
        if sensors.is_empty() {
            return Err(ModelError::EmptyFleet);
        }
        if zone_count == 0 {
            return Err(ModelError::NoZones);
        }

        let mut index = HashMap::with_capacity(sensors.len());
        for (pos, sensor) in sensors.iter().enumerate() {
            if index.insert(sensor.id, pos).is_some() {
                return Err(ModelError::DuplicateSensorId(sensor.id));
            }
            if !(sensor.battery_duration.is_finite() && sensor.battery_duration > 0.0) {
                return Err(ModelError::NonPositiveBattery {
                    sensor: sensor.id,
                    battery: sensor.battery_duration,
                });
            }
            if let Some(&zone) = sensor.coverage_zones.iter().find(|&&z| z >= zone_count) {
                return Err(ModelError::UnknownZone {
                    sensor: sensor.id,
                    zone,
                    zone_count,
                });
            }
        }

        let zones = derive_zones(&sensors, zone_count);
        let horizon = sensors.iter().map(Sensor::slot_count).max().unwrap_or(0);

        Ok(Self {
            sensors,
            index,
            zones,
            horizon,
        })
    }

    /// Attaches display names to zones.
    pub fn with_zone_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = (ZoneId, S)>,
    ) -> Result<Self, ModelError> {
        let zone_count = self.zones.len();
        for (zone, name) in names {
            let target = self
                .zones
                .get_mut(zone)
                .ok_or(ModelError::UnknownZoneName { zone, zone_count })?;
            target.set_name(name.into());
        }
        Ok(self)
    }

    /// All sensors, in construction order.
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Looks up a sensor by id.
    pub fn sensor(&self, id: SensorId) -> Option<&Sensor> {
        self.index.get(&id).map(|&pos| &self.sensors[pos])
    }

    /// All zones, indexed by zone id.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id)
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// `floor(max(battery_duration))`: time steps in the exact formulation.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Sum of eligible slots over the fleet, an upper bound on any score.
    pub fn total_eligible_slots(&self) -> usize {
        self.sensors.iter().map(Sensor::slot_count).sum()
    }
}

fn derive_zones(sensors: &[Sensor], zone_count: usize) -> Vec<Zone> {
    let mut covered_by: Vec<Vec<SensorId>> = vec![Vec::new(); zone_count];
    for sensor in sensors {
        for &zone in &sensor.coverage_zones {
            covered_by[zone].push(sensor.id);
        }
    }
    covered_by
        .into_iter()
        .enumerate()
        .map(|(id, mut ids)| {
            ids.sort_unstable();
            Zone::new(id, ids)
        })
        .collect()
}
