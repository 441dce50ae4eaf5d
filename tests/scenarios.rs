//! End-to-end scenarios through the optimizer facade.

use u_coverage::evaluate::{SolutionEvaluator, COVERAGE_PENALTY};
use u_coverage::milp::ExhaustiveSolver;
use u_coverage::model::{ProblemModel, Schedule, Sensor};
use u_coverage::optimizer::{SensorOptimizer, SolveMethod, NO_SOLUTION};
use u_coverage::sa::AnnealingConfig;
use u_coverage::CoverageError;

fn three_sensors(s0_battery: f64) -> ProblemModel {
    ProblemModel::new(
        vec![
            Sensor::new(0, s0_battery, [0, 1]),
            Sensor::new(1, 2.0, [1, 2]),
            Sensor::new(2, 4.0, [0, 2]),
        ],
        3,
    )
    .unwrap()
}

/// Four sensors over five zones; zone 1 at t = 5 has no eligible sensor.
fn demo_fleet() -> ProblemModel {
    ProblemModel::new(
        vec![
            Sensor::new(0, 5.0, [0, 1, 2]),
            Sensor::new(1, 4.0, [1, 2, 3]),
            Sensor::new(2, 6.0, [0, 3, 4]),
            Sensor::new(3, 3.0, [2, 4]),
        ],
        5,
    )
    .unwrap()
    .with_zone_names([(0, "Zone 1"), (1, "Zone 2"), (2, "Zone 3"), (3, "Zone 4"), (4, "Zone 5")])
    .unwrap()
}

fn annealing(seed: u64) -> AnnealingConfig {
    AnnealingConfig::default().with_seed(seed)
}

#[test]
fn three_sensor_fleet_exact_requires_every_time_step() {
    // Horizon is 4, but the sensors covering zone 1 only reach t = 2.
    let mut optimizer = SensorOptimizer::new(three_sensors(3.0), ExhaustiveSolver);
    assert_eq!(optimizer.model().horizon(), 4);
    assert_eq!(
        optimizer.solve_linear_programming().unwrap_err(),
        CoverageError::Infeasible
    );
    assert_eq!(optimizer.solution_summary(), NO_SOLUTION);

    // The heuristic still produces a schedule covering every zone at some time.
    let schedule = optimizer.solve_simulated_annealing(annealing(1)).unwrap().clone();
    let model = optimizer.model();
    assert!(SolutionEvaluator::new(model).uncovered_zones(&schedule).is_empty());
    assert!(schedule.respects_budget(model));
}

#[test]
fn extended_three_sensor_fleet_is_fully_covered() {
    let mut optimizer = SensorOptimizer::new(three_sensors(4.0), ExhaustiveSolver);
    optimizer.solve_linear_programming().unwrap();

    let objective = optimizer.objective_value().unwrap();
    assert!(objective >= 5.0);
    assert_eq!(objective, 10.0);
    assert!(optimizer.coverage_gaps().is_empty());

    let exact = objective;
    optimizer.solve_simulated_annealing(annealing(3)).unwrap();
    assert!(optimizer.objective_value().unwrap() <= exact);
}

#[test]
fn empty_zone_penalized_exactly_once() {
    let model = ProblemModel::new(
        vec![Sensor::new(0, 3.0, [0, 1]), Sensor::new(1, 2.0, [1])],
        3,
    )
    .unwrap();
    assert!(model.zone(2).unwrap().covered_by().is_empty());

    let mut optimizer = SensorOptimizer::new(model, ExhaustiveSolver);
    assert_eq!(
        optimizer.solve_linear_programming().unwrap_err(),
        CoverageError::Infeasible
    );

    for seed in [1, 2, 3] {
        let schedule = optimizer.solve_simulated_annealing(annealing(seed)).unwrap().clone();
        let score = optimizer.objective_value().unwrap();
        let uncovered = SolutionEvaluator::new(optimizer.model()).uncovered_zones(&schedule);
        assert!(uncovered.contains(&2));
        assert_eq!(
            score,
            schedule.total_active_slots() as f64 - COVERAGE_PENALTY * uncovered.len() as f64
        );
    }

    // Zone 2 costs the penalty even when every sensor is fully active.
    let full = Schedule::maximal(optimizer.model());
    assert_eq!(
        SolutionEvaluator::new(optimizer.model()).evaluate(&full),
        5.0 - COVERAGE_PENALTY
    );
}

#[test]
fn demo_fleet_round_trip() {
    let mut optimizer = SensorOptimizer::new(demo_fleet(), ExhaustiveSolver);
    assert_eq!(optimizer.model().zone(3).unwrap().name(), Some("Zone 4"));
    assert_eq!(optimizer.model().zone(1).unwrap().covered_by(), &[0, 1]);

    assert_eq!(
        optimizer.solve_linear_programming().unwrap_err(),
        CoverageError::Infeasible
    );

    optimizer.solve_simulated_annealing(annealing(42)).unwrap();
    let held = optimizer.solution().unwrap();
    assert_eq!(held.method, SolveMethod::SimulatedAnnealing);
    assert_eq!(held.objective_value, 18.0);

    let summary = optimizer.solution_summary();
    assert_eq!(summary, optimizer.solution_summary());
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "Objective value: 18");
    assert_eq!(lines[1], "Sensor 0: active at times [0, 1, 2, 3, 4]");
    assert_eq!(lines[4], "Sensor 3: active at times [0, 1, 2]");
    assert_eq!(lines.len(), 5);
}

#[cfg(feature = "microlp")]
#[test]
fn default_backend_solves_feasible_fleet() {
    let mut optimizer = SensorOptimizer::with_default_backend(three_sensors(4.0));
    optimizer.solve_linear_programming().unwrap();
    assert!((optimizer.objective_value().unwrap() - 10.0).abs() < 1e-6);
    assert!(optimizer.coverage_gaps().is_empty());
}
