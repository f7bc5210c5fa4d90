//! Sequential nearest-neighbor constructive heuristic.
//!
//! Builds routes one vehicle at a time: starting from the depot, always
//! visit the nearest unvisited node that still allows a return within the
//! distance cap. When no node fits, move on to the next vehicle.
//!
//! # Complexity
//!
//! O(n²) where n = number of nodes.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for VRP. Filling vehicles one
//! after another tends to use fewer, longer routes than the round-robin
//! variant, which makes it the better choice under tight caps.

use std::collections::BTreeSet;

use super::cheapest_arc::{extend_cheapest, finish};
use crate::error::Result;
use crate::models::{RoutingProblem, Solution};

/// Constructs a solution with the sequential nearest-neighbor heuristic.
///
/// Vehicle `k + 1` only starts once vehicle `k` cannot accept any remaining
/// node. Ties resolve to the lowest node index.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Fleet, RoutingProblem};
/// use u_fleet::constructive::nearest_neighbor;
///
/// let problem = RoutingProblem::from_rows(
///     &[
///         vec![0, 1, 2, 3],
///         vec![1, 0, 1, 2],
///         vec![2, 1, 0, 1],
///         vec![3, 2, 1, 0],
///     ],
///     Fleet::new(2, 100),
/// )
/// .expect("valid problem");
///
/// let solution = nearest_neighbor(&problem).expect("feasible");
/// assert_eq!(solution.routes()[0].nodes(), &[1, 2, 3]);
/// assert!(solution.routes()[1].is_empty());
/// ```
pub fn nearest_neighbor(problem: &RoutingProblem) -> Result<Solution> {
    let mut unassigned: BTreeSet<usize> = problem.customers().collect();
    let mut solution = Solution::empty(problem.num_vehicles());

    for route in solution.routes_mut() {
        while let Some(node) = extend_cheapest(problem, route, &unassigned) {
            unassigned.remove(&node);
        }
        if unassigned.is_empty() {
            break;
        }
    }

    finish(solution, unassigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoutingError;
    use crate::models::Fleet;

    fn line(num_vehicles: usize, max_distance: u64) -> RoutingProblem {
        let rows: Vec<Vec<i64>> = (0..4i64)
            .map(|i| (0..4i64).map(|j| (i - j).abs()).collect())
            .collect();
        RoutingProblem::from_rows(&rows, Fleet::new(num_vehicles, max_distance)).expect("valid")
    }

    #[test]
    fn test_nn_all_on_one_route() {
        let problem = line(1, 100);
        let sol = nearest_neighbor(&problem).expect("feasible");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.num_served(), 3);
        // Distance: 0→1 + 1→2 + 2→3 + 3→0 = 1 + 1 + 1 + 3 = 6
        assert_eq!(sol.routes()[0].nodes(), &[1, 2, 3]);
        assert_eq!(sol.routes()[0].total_distance(), 6);
    }

    #[test]
    fn test_nn_split_routes() {
        let problem = line(2, 6);
        let sol = nearest_neighbor(&problem).expect("feasible");
        assert_eq!(sol.routes()[0].nodes(), &[1, 2, 3]);
        assert!(sol.routes()[1].is_empty());
        // Cap 4: first route takes 1, 2 (0→1→2→0 = 4), nobody can reach 3.
        let err = nearest_neighbor(&line(2, 4)).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::PartialAssignment { ref unassigned } if unassigned == &vec![3]
        ));
    }

    #[test]
    fn test_nn_insufficient_vehicles() {
        let problem = line(1, 2);
        let err = nearest_neighbor(&problem).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::PartialAssignment { ref unassigned } if unassigned == &vec![2, 3]
        ));
    }

    #[test]
    fn test_nn_empty() {
        let problem = RoutingProblem::from_rows(&[vec![0]], Fleet::new(1, 10)).expect("valid");
        let sol = nearest_neighbor(&problem).expect("feasible");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.num_served(), 0);
    }

    #[test]
    fn test_nn_chooses_nearest() {
        let problem = RoutingProblem::from_rows(
            &[vec![0, 10, 1], vec![10, 0, 9], vec![1, 9, 0]],
            Fleet::new(1, 100),
        )
        .expect("valid");
        let sol = nearest_neighbor(&problem).expect("feasible");
        // Should pick node 2 first (distance 1) then 1 (distance 9)
        assert_eq!(sol.routes()[0].nodes(), &[2, 1]);
    }

    #[test]
    fn test_nn_fills_before_opening() {
        // Node 2 only fits alone; nodes 1 and 3 share a route.
        let problem = RoutingProblem::from_rows(
            &[
                vec![0, 10, 20, 15],
                vec![10, 0, 12, 8],
                vec![20, 12, 0, 9],
                vec![15, 8, 9, 0],
            ],
            Fleet::new(2, 40),
        )
        .expect("valid");
        let sol = nearest_neighbor(&problem).expect("feasible");
        assert_eq!(sol.routes()[0].nodes(), &[1, 3]);
        assert_eq!(sol.routes()[0].total_distance(), 33);
        assert_eq!(sol.routes()[1].nodes(), &[2]);
        assert_eq!(sol.routes()[1].total_distance(), 40);
    }
}
