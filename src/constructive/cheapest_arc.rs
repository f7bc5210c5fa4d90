//! Round-robin path-cheapest-arc construction.
//!
//! Vehicles take turns extending their own path. On each turn a vehicle
//! appends the unassigned node reached by its cheapest outgoing arc, as long
//! as it can still return to the depot within the distance cap. A vehicle
//! that cannot accept any remaining node is closed for the rest of the
//! construction; the set of candidates only shrinks, so it would never
//! accept one later.
//!
//! # Complexity
//!
//! O(n²) where n = number of nodes.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Result, RoutingError};
use crate::evaluation::RouteEvaluator;
use crate::models::{Route, RoutingProblem, Solution};

/// Constructs a solution by round-robin cheapest-arc extension.
///
/// Ties on arc cost resolve to the lowest node index. Fails with
/// `PartialAssignment` listing every node no vehicle could take.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Fleet, RoutingProblem};
/// use u_fleet::constructive::cheapest_arc;
///
/// let problem = RoutingProblem::from_rows(
///     &[
///         vec![0, 1, 2, 3],
///         vec![1, 0, 1, 2],
///         vec![2, 1, 0, 1],
///         vec![3, 2, 1, 0],
///     ],
///     Fleet::new(1, 100),
/// )
/// .expect("valid problem");
///
/// let solution = cheapest_arc(&problem).expect("feasible");
/// assert_eq!(solution.routes()[0].nodes(), &[1, 2, 3]);
/// assert_eq!(solution.routes()[0].total_distance(), 6);
/// ```
pub fn cheapest_arc(problem: &RoutingProblem) -> Result<Solution> {
    let mut unassigned: BTreeSet<usize> = problem.customers().collect();
    let mut solution = Solution::empty(problem.num_vehicles());
    let mut open = vec![true; problem.num_vehicles()];

    while !unassigned.is_empty() && open.iter().any(|&o| o) {
        for (vehicle, route) in solution.routes_mut().iter_mut().enumerate() {
            if !open[vehicle] {
                continue;
            }
            let Some(node) = extend_cheapest(problem, route, &unassigned) else {
                debug!(vehicle, "vehicle closed, no node fits under the cap");
                open[vehicle] = false;
                continue;
            };
            unassigned.remove(&node);
            if unassigned.is_empty() {
                break;
            }
        }
    }

    finish(solution, unassigned)
}

/// Appends the cheapest feasible unassigned node to `route`.
///
/// Returns the appended node, or `None` if every candidate would push the
/// route over the cap.
pub(crate) fn extend_cheapest(
    problem: &RoutingProblem,
    route: &mut Route,
    unassigned: &BTreeSet<usize>,
) -> Option<usize> {
    let depot = problem.depot();
    let last = route.last_or(depot);
    // Distance travelled so far, without the return leg.
    let outbound = if route.is_empty() {
        0
    } else {
        route.total_distance() - problem.distance(last, depot)
    };

    let closed = |c: usize| outbound + problem.distance(last, c) + problem.distance(c, depot);

    let evaluator = RouteEvaluator::new(problem);
    let feasible: Vec<usize> = unassigned
        .iter()
        .copied()
        .filter(|&c| evaluator.within_cap(closed(c)))
        .collect();
    let node = problem.distances().nearest_neighbor(last, &feasible)?;
    let distance = closed(node);

    route.push(node);
    route.set_total_distance(distance);
    Some(node)
}

/// Turns a finished construction into a solution or a partial-assignment error.
pub(crate) fn finish(solution: Solution, unassigned: BTreeSet<usize>) -> Result<Solution> {
    if unassigned.is_empty() {
        Ok(solution)
    } else {
        Err(RoutingError::PartialAssignment {
            unassigned: unassigned.into_iter().collect(),
        })
    }
}
