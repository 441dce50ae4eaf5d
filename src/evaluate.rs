//! Schedule scoring and coverage audits.
//!
//! Two coverage notions coexist in this crate:
//!
//! - [`SolutionEvaluator`] asks only whether each zone has *some* covering
//!   sensor with at least one active slot, at any time.
//! - [`time_coverage_gaps`] checks every zone at every time step of the
//!   horizon, the rule the exact solver enforces.
//!
//! Annealing schedules are scored with the first notion only, so they can
//! contain per-time-step gaps that the second one reports.

use crate::model::{ProblemModel, Schedule, Slot, ZoneId};

/// Score deducted for each zone without an active covering sensor.
pub const COVERAGE_PENALTY: f64 = 1000.0;

/// Scores schedules against a model.
///
/// Score = total active slots − [`COVERAGE_PENALTY`] × uncovered zones.
///
/// # Examples
///
/// ```
/// use u_coverage::evaluate::SolutionEvaluator;
/// use u_coverage::model::{ProblemModel, Schedule, Sensor};
///
/// let model = ProblemModel::new(vec![Sensor::new(0, 2.0, [0])], 2).unwrap();
/// let score = SolutionEvaluator::new(&model).evaluate(&Schedule::maximal(&model));
/// assert_eq!(score, 2.0 - 1000.0); // zone 1 has no sensor at all
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolutionEvaluator<'a> {
    model: &'a ProblemModel,
}

impl<'a> SolutionEvaluator<'a> {
    pub fn new(model: &'a ProblemModel) -> Self {
        Self { model }
    }

    /// Computes the score of `schedule`. Higher is better.
    pub fn evaluate(&self, schedule: &Schedule) -> f64 {
        let total = schedule.total_active_slots() as f64;
        let uncovered = self.uncovered_zones(schedule).len() as f64;
        total - COVERAGE_PENALTY * uncovered
    }

    /// Zones where no covering sensor is active at any slot.
    pub fn uncovered_zones(&self, schedule: &Schedule) -> Vec<ZoneId> {
        self.model
            .zones()
            .iter()
            .filter(|zone| !zone.covered_by().iter().any(|&s| schedule.is_active(s)))
            .map(|zone| zone.id())
            .collect()
    }
}

/// Lists every `(zone, t)` with `t < horizon` where no covering sensor is
/// active at `t`.
///
/// Empty for any schedule returned by the exact solver.
pub fn time_coverage_gaps(model: &ProblemModel, schedule: &Schedule) -> Vec<(ZoneId, Slot)> {
    let mut gaps = Vec::new();
    for zone in model.zones() {
        for t in 0..model.horizon() {
            let covered = zone
                .covered_by()
                .iter()
                .any(|&s| schedule.is_active_at(s, t));
            if !covered {
                gaps.push((zone.id(), t));
            }
        }
    }
    gaps
}
