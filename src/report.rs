//! Final, validated view of a solution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::evaluation::RouteEvaluator;
use crate::models::{RoutingProblem, Solution};

/// One vehicle's route as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteReport {
    pub vehicle_id: usize,
    /// Visited nodes, starting and ending at the depot.
    pub nodes: Vec<usize>,
    pub distance: u64,
}

impl RouteReport {
    /// Returns `true` if the vehicle never leaves the depot.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 2
    }

    /// Visited nodes without the depot at either end.
    pub fn stops(&self) -> &[usize] {
        match self.nodes.len() {
            0..=2 => &[],
            n => &self.nodes[1..n - 1],
        }
    }
}

/// Immutable routing result: one route per vehicle plus summary distances.
///
/// The `Display` impl prints a plain-text summary:
///
/// ```text
/// Route for vehicle 0:
///  0 ->  1 ->  3 -> 0
/// Distance of the route: 33m
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingReport {
    routes: Vec<RouteReport>,
    total_distance: u64,
    max_route_distance: u64,
}

impl RoutingReport {
    /// Routes in vehicle order.
    pub fn routes(&self) -> &[RouteReport] {
        &self.routes
    }

    pub fn total_distance(&self) -> u64 {
        self.total_distance
    }

    /// Longest single route distance (the span).
    pub fn max_route_distance(&self) -> u64 {
        self.max_route_distance
    }

    /// Routes that leave the depot.
    pub fn used_vehicles(&self) -> impl Iterator<Item = &RouteReport> {
        self.routes.iter().filter(|r| !r.is_empty())
    }

    /// `total + weight * span` for this result.
    pub fn objective(&self, weight: u64) -> u64 {
        self.total_distance
            .saturating_add(weight.saturating_mul(self.max_route_distance))
    }
}

impl fmt::Display for RoutingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for route in &self.routes {
            writeln!(f, "Route for vehicle {}:", route.vehicle_id)?;
            if let Some((last, rest)) = route.nodes.split_last() {
                for node in rest {
                    write!(f, " {node} -> ")?;
                }
                writeln!(f, "{last}")?;
            }
            writeln!(f, "Distance of the route: {}m", route.distance)?;
            writeln!(f)?;
        }
        write!(
            f,
            "Maximum of the route distances: {}m",
            self.max_route_distance
        )
    }
}

/// Validates a finished solution and freezes it into a report.
///
/// Fails with `InfeasibleSolution` if any invariant is broken: a route over
/// the cap, a missing or duplicated node, a wrong route count. Any such
/// failure points at a solver defect, not at the input.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Fleet, RoutingProblem};
/// use u_fleet::constructive::cheapest_arc;
/// use u_fleet::report::report_solution;
///
/// let problem = RoutingProblem::from_rows(
///     &[vec![0, 4, 6], vec![4, 0, 3], vec![6, 3, 0]],
///     Fleet::new(2, 20),
/// )
/// .expect("valid problem");
///
/// let report = report_solution(&problem, cheapest_arc(&problem).expect("feasible"))
///     .expect("feasible");
/// assert_eq!(report.routes()[0].nodes, vec![0, 1, 0]);
/// assert_eq!(report.max_route_distance(), 12);
/// ```
pub fn report_solution(problem: &RoutingProblem, solution: Solution) -> Result<RoutingReport> {
    let violations = RouteEvaluator::new(problem).evaluate_solution(&solution);
    if !violations.is_empty() {
        tracing::error!(?violations, "solution breaks routing invariants");
        return Err(RoutingError::InfeasibleSolution { violations });
    }

    let depot = problem.depot();
    let routes: Vec<RouteReport> = solution
        .routes()
        .iter()
        .map(|route| {
            let mut nodes = Vec::with_capacity(route.len() + 2);
            nodes.push(depot);
            nodes.extend_from_slice(route.nodes());
            nodes.push(depot);
            RouteReport {
                vehicle_id: route.vehicle_id(),
                nodes,
                distance: route.total_distance(),
            }
        })
        .collect();

    Ok(RoutingReport {
        total_distance: routes.iter().map(|r| r.distance).sum(),
        max_route_distance: routes.iter().map(|r| r.distance).max().unwrap_or(0),
        routes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Fleet, Route, ViolationType};

    fn problem() -> RoutingProblem {
        RoutingProblem::from_rows(
            &[
                vec![0, 10, 20, 15],
                vec![10, 0, 12, 8],
                vec![20, 12, 0, 9],
                vec![15, 8, 9, 0],
            ],
            Fleet::new(3, 40),
        )
        .expect("valid")
    }

    fn feasible() -> Solution {
        Solution::from_routes(vec![
            Route::with_nodes(0, vec![1, 3], 33),
            Route::with_nodes(1, vec![2], 40),
            Route::new(2),
        ])
    }

    #[test]
    fn test_report_routes() {
        let report = report_solution(&problem(), feasible()).expect("feasible");
        assert_eq!(report.routes().len(), 3);
        assert_eq!(report.routes()[0].nodes, vec![0, 1, 3, 0]);
        assert_eq!(report.routes()[0].stops(), &[1, 3]);
        assert_eq!(report.routes()[1].distance, 40);
        assert_eq!(report.routes()[2].nodes, vec![0, 0]);
        assert!(report.routes()[2].is_empty());
        assert_eq!(report.total_distance(), 73);
        assert_eq!(report.max_route_distance(), 40);
        assert_eq!(report.used_vehicles().count(), 2);
        assert_eq!(report.objective(100), 4_073);
    }

    #[test]
    fn test_report_rejects_over_cap() {
        let sol = Solution::from_routes(vec![
            Route::with_nodes(0, vec![1, 2, 3], 46),
            Route::new(1),
            Route::new(2),
        ]);
        let err = report_solution(&problem(), sol).unwrap_err();
        match err {
            RoutingError::InfeasibleSolution { violations } => {
                assert!(violations
                    .iter()
                    .any(|v| matches!(v.kind, ViolationType::MaxDistanceExceeded { .. })));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_report_rejects_missing_node() {
        let sol = Solution::from_routes(vec![
            Route::with_nodes(0, vec![1, 3], 33),
            Route::new(1),
            Route::new(2),
        ]);
        let err = report_solution(&problem(), sol).unwrap_err();
        assert!(matches!(err, RoutingError::InfeasibleSolution { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_display_summary() {
        let report = report_solution(&problem(), feasible()).expect("feasible");
        let text = report.to_string();
        assert!(text.starts_with("Route for vehicle 0:\n 0 ->  1 ->  3 -> 0\nDistance of the route: 33m\n"));
        assert!(text.contains("Route for vehicle 2:\n 0 -> 0\nDistance of the route: 0m\n"));
        assert!(text.ends_with("Maximum of the route distances: 40m"));
    }

    #[test]
    fn test_serialize_report() {
        let report = report_solution(&problem(), feasible()).expect("feasible");
        let json = serde_json::to_value(&report).expect("serializes");
        assert_eq!(json["max_route_distance"], 40);
        assert_eq!(json["routes"][1]["nodes"], serde_json::json!([0, 2, 0]));
        let back: RoutingReport = serde_json::from_value(json).expect("deserializes");
        assert_eq!(back, report);
    }
}
