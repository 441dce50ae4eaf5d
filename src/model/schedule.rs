//! Sensor activation schedules.

use std::collections::BTreeMap;

use super::{ProblemModel, SensorId, Slot};

/// Active time slots per sensor.
///
/// Slots are kept ascending and duplicate-free. Solvers build a fresh
/// schedule per call; the model never mutates one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    slots: BTreeMap<SensorId, Vec<Slot>>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sensor active at all of its eligible slots.
    pub fn maximal(model: &ProblemModel) -> Self {
        let slots = model
            .sensors()
            .iter()
            .map(|s| (s.id, s.eligible_slots().collect()))
            .collect();
        Self { slots }
    }

    /// Replaces the active slots of `sensor`, sorting and deduplicating them.
    pub fn set(&mut self, sensor: SensorId, mut slots: Vec<Slot>) {
        slots.sort_unstable();
        slots.dedup();
        self.slots.insert(sensor, slots);
    }

    /// Active slots of `sensor`; empty when the sensor has no entry.
    pub fn slots(&self, sensor: SensorId) -> &[Slot] {
        self.slots.get(&sensor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `sensor` has at least one active slot.
    pub fn is_active(&self, sensor: SensorId) -> bool {
        !self.slots(sensor).is_empty()
    }

    /// Whether `sensor` is active at `slot`.
    pub fn is_active_at(&self, sensor: SensorId, slot: Slot) -> bool {
        self.slots(sensor).binary_search(&slot).is_ok()
    }

    /// Entries in ascending sensor id order.
    pub fn iter(&self) -> impl Iterator<Item = (SensorId, &[Slot])> {
        self.slots.iter().map(|(&id, slots)| (id, slots.as_slice()))
    }

    /// Number of sensors with an entry.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total active sensor-time.
    pub fn total_active_slots(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Whether every entry belongs to a known sensor, stays in its eligible
    /// range and uses no more slots than its battery allows.
    pub fn respects_budget(&self, model: &ProblemModel) -> bool {
        self.slots.iter().all(|(&id, slots)| {
            model.sensor(id).is_some_and(|sensor| {
                slots.len() as f64 <= sensor.battery_duration
                    && slots.iter().all(|&t| sensor.is_eligible(t))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sensor;

    fn model() -> ProblemModel {
        ProblemModel::new(
            vec![Sensor::new(0, 3.0, [0]), Sensor::new(1, 2.5, [0])],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_set_sorts_and_dedups() {
        let mut s = Schedule::new();
        s.set(3, vec![4, 1, 4, 0]);
        assert_eq!(s.slots(3), &[0, 1, 4]);
        assert!(s.is_active_at(3, 4));
        assert!(!s.is_active_at(3, 2));
        assert_eq!(s.slots(9), &[] as &[Slot]);
    }

    #[test]
    fn test_maximal() {
        let s = Schedule::maximal(&model());
        assert_eq!(s.slots(0), &[0, 1, 2]);
        assert_eq!(s.slots(1), &[0, 1]);
        assert_eq!(s.total_active_slots(), 5);
        assert!(s.respects_budget(&model()));
    }

    #[test]
    fn test_respects_budget() {
        let model = model();
        let mut s = Schedule::new();
        s.set(1, vec![0, 1]);
        assert!(s.respects_budget(&model));

        s.set(1, vec![2]);
        assert!(!s.respects_budget(&model), "slot 2 is outside floor(2.5)");

        let mut unknown = Schedule::new();
        unknown.set(5, vec![0]);
        assert!(!unknown.respects_budget(&model));
    }

    #[test]
    fn test_iter_in_id_order() {
        let mut s = Schedule::new();
        s.set(2, vec![1]);
        s.set(0, vec![]);
        let ids: Vec<SensorId> = s.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert!(!s.is_active(0));
        assert!(s.is_active(2));
    }
}
