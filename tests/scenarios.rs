use u_fleet::distance::DistanceMatrix;
use u_fleet::error::{FleetError, MatrixError};
use u_fleet::models::{Fleet, RoutingProblem};
use u_fleet::solver::{RoutingSolver, SolverConfig};
use u_fleet::RoutingError;

/// Depot 0, A = 1, B = 2, C = 3.
fn three_stops(num_vehicles: usize, max_distance: u64) -> RoutingProblem {
    RoutingProblem::from_rows(
        &[
            vec![0, 10, 20, 15],
            vec![10, 0, 12, 8],
            vec![20, 12, 0, 9],
            vec![15, 8, 9, 0],
        ],
        Fleet::new(num_vehicles, max_distance),
    )
    .expect("valid")
}

fn line(n: usize, num_vehicles: usize, max_distance: u64) -> RoutingProblem {
    let rows: Vec<Vec<i64>> = (0..n as i64)
        .map(|i| (0..n as i64).map(|j| (i - j).abs()).collect())
        .collect();
    RoutingProblem::from_rows(&rows, Fleet::new(num_vehicles, max_distance)).expect("valid")
}

#[test]
fn test_single_vehicle_single_node() {
    let problem =
        RoutingProblem::from_rows(&[vec![0, 7], vec![5, 0]], Fleet::new(1, 12)).expect("valid");
    let report = RoutingSolver::default().solve(&problem).expect("feasible");
    assert_eq!(report.routes().len(), 1);
    assert_eq!(report.routes()[0].nodes, vec![0, 1, 0]);
    assert_eq!(report.routes()[0].distance, 12);
    assert_eq!(report.max_route_distance(), 12);
}

#[test]
fn test_cap_below_round_trip_names_node() {
    let problem =
        RoutingProblem::from_rows(&[vec![0, 7], vec![5, 0]], Fleet::new(3, 11)).expect("valid");
    match RoutingSolver::default().solve(&problem) {
        Err(RoutingError::PartialAssignment { unassigned }) => assert_eq!(unassigned, vec![1]),
        other => panic!("expected partial assignment, got {other:?}"),
    }
}

#[test]
fn test_three_stops_two_vehicles() {
    let problem = three_stops(2, 40);
    let report = RoutingSolver::default().solve(&problem).expect("feasible");

    assert_eq!(report.routes().len(), 2);
    assert!(report.routes().iter().all(|r| r.distance <= 40));
    let mut visited: Vec<usize> = report.routes().iter().flat_map(|r| r.stops()).copied().collect();
    visited.sort_unstable();
    assert_eq!(visited, vec![1, 2, 3]);
    // B alone costs 40, so {A, C} + {B} is the only partition under the cap.
    assert_eq!(report.total_distance(), 73);
    assert_eq!(report.max_route_distance(), 40);
}

#[test]
fn test_three_stops_relaxed_cap_balances() {
    let problem = three_stops(2, 100);
    let report = RoutingSolver::default().solve(&problem).expect("feasible");
    assert!(report.routes().iter().all(|r| r.distance <= 100));
    // A lone B route (40) is a lower bound on the span.
    assert_eq!(report.max_route_distance(), 40);
}

#[test]
fn test_more_vehicles_than_nodes() {
    let problem = line(3, 5, 100);
    let report = RoutingSolver::default().solve(&problem).expect("feasible");
    assert_eq!(report.routes().len(), 5);
    assert!(report.used_vehicles().count() <= 2);
    let served: usize = report.routes().iter().map(|r| r.stops().len()).sum();
    assert_eq!(served, 2);
    for (k, route) in report.routes().iter().enumerate() {
        assert_eq!(route.vehicle_id, k);
        if route.is_empty() {
            assert_eq!(route.nodes, vec![0, 0]);
            assert_eq!(route.distance, 0);
        }
    }
}

#[test]
fn test_depot_only() {
    let problem = RoutingProblem::from_rows(&[vec![0]], Fleet::new(2, 10)).expect("valid");
    let report = RoutingSolver::default().solve(&problem).expect("feasible");
    assert_eq!(report.total_distance(), 0);
    assert_eq!(report.used_vehicles().count(), 0);
}

#[test]
fn test_non_zero_depot() {
    let rows: Vec<Vec<i64>> = (0..4i64)
        .map(|i| (0..4i64).map(|j| (i - j).abs()).collect())
        .collect();
    let problem = RoutingProblem::from_rows(&rows, Fleet::new(1, 100).with_depot(3)).expect("valid");
    let report = RoutingSolver::default().solve(&problem).expect("feasible");
    let route = &report.routes()[0];
    assert_eq!(route.nodes.first(), Some(&3));
    assert_eq!(route.nodes.last(), Some(&3));
    assert_eq!(route.distance, 6);
}

#[test]
fn test_solve_is_deterministic() {
    let problem = line(8, 3, 20);
    let solver = RoutingSolver::new(SolverConfig::default().with_span_weight(10));
    let first = solver.solve_with_stats(&problem).expect("feasible");
    for _ in 0..3 {
        assert_eq!(solver.solve_with_stats(&problem).expect("feasible"), first);
    }
}

#[test]
fn test_invalid_inputs() {
    assert!(matches!(
        RoutingProblem::from_rows(&[vec![0, 1], vec![1]], Fleet::new(1, 10)),
        Err(RoutingError::InvalidMatrix(MatrixError::NotSquare { row: 1, .. }))
    ));
    assert!(matches!(
        RoutingProblem::from_rows(&[vec![0, 1], vec![-3, 0]], Fleet::new(1, 10)),
        Err(RoutingError::InvalidMatrix(MatrixError::NegativeEntry { row: 1, col: 0, value: -3 }))
    ));
    assert!(matches!(
        RoutingProblem::from_rows(&[vec![0, 1], vec![1, 0]], Fleet::new(0, 10)),
        Err(RoutingError::InvalidFleet(FleetError::NoVehicles))
    ));
}

#[test]
fn test_partial_assignment_is_recoverable_with_larger_cap() {
    let problem = three_stops(2, 39);
    let err = RoutingSolver::default().solve(&problem).unwrap_err();
    assert!(err.is_recoverable());

    let relaxed = three_stops(2, 40);
    assert!(RoutingSolver::default().solve(&relaxed).is_ok());
}

#[test]
fn test_oversized_distances_rejected() {
    let huge = i64::MAX;
    let rows = [vec![0, huge, huge], vec![huge, 0, huge], vec![huge, huge, 0]];
    match RoutingProblem::from_rows(&rows, Fleet::new(1, u64::MAX)) {
        Err(RoutingError::InvalidMatrix(MatrixError::EntryTooLarge { row: 0, col: 1, limit, .. })) => {
            assert_eq!(limit, DistanceMatrix::max_entry(3));
        }
        other => panic!("expected an oversized entry error, got {other:?}"),
    }
}

#[test]
fn test_largest_accepted_distances_solve() {
    let limit = DistanceMatrix::max_entry(3);
    let at_limit = limit as i64;
    let rows = [
        vec![0, at_limit, at_limit],
        vec![at_limit, 0, at_limit],
        vec![at_limit, at_limit, 0],
    ];
    for num_vehicles in [1, 2] {
        let problem =
            RoutingProblem::from_rows(&rows, Fleet::new(num_vehicles, u64::MAX)).expect("valid");
        let report = RoutingSolver::default().solve(&problem).expect("feasible");
        let served: usize = report.routes().iter().map(|r| r.stops().len()).sum();
        assert_eq!(served, 2);
        assert!(report.total_distance() <= 4 * limit);
        assert_eq!(report.objective(100), u64::MAX);
    }
}
