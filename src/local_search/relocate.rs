//! Node relocation between and within routes.
//!
//! # Algorithm
//!
//! Removes a node from its route and reinserts it at another position,
//! either in a different route or elsewhere in the same route. Both route
//! distances are priced from the arcs around the removal and insertion
//! points:
//!
//! ```text
//! removal   = d(prev, next) - d(prev, c) - d(c, next)
//! insertion = d(prev, c) + d(c, next) - d(prev, next)
//! ```
//!
//! # Complexity
//!
//! O(n²) candidate moves per scan where n = number of nodes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::models::{RoutingProblem, Solution};

/// Move the node at `from_route[from_pos]` to `to_route[to_pos]`.
///
/// `to_pos` indexes the destination after the node has been removed, which
/// only matters when both routes are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelocateMove {
    pub from_route: usize,
    pub from_pos: usize,
    pub to_route: usize,
    pub to_pos: usize,
}

impl RelocateMove {
    /// Returns `true` if the node stays in its own route.
    pub fn is_intra_route(&self) -> bool {
        self.from_route == self.to_route
    }

    pub(crate) fn apply(&self, solution: &mut Solution) {
        let routes = solution.routes_mut();
        let node = routes[self.from_route].nodes_mut().remove(self.from_pos);
        routes[self.to_route].nodes_mut().insert(self.to_pos, node);
    }
}

/// Distance of a route after removing the node at `pos`.
pub(crate) fn removal_distance(
    problem: &RoutingProblem,
    nodes: &[usize],
    distance: u64,
    pos: usize,
) -> u64 {
    if nodes.len() == 1 {
        return 0;
    }
    let depot = problem.depot();
    let node = nodes[pos];
    let prev = if pos == 0 { depot } else { nodes[pos - 1] };
    let next = nodes.get(pos + 1).copied().unwrap_or(depot);

    // Old: prev → node → next
    // New: prev → next
    distance + problem.distance(prev, next)
        - problem.distance(prev, node)
        - problem.distance(node, next)
}

/// Distance of a route after inserting `node` before position `pos`.
pub(crate) fn insertion_distance(
    problem: &RoutingProblem,
    nodes: &[usize],
    distance: u64,
    pos: usize,
    node: usize,
) -> u64 {
    let depot = problem.depot();
    if nodes.is_empty() {
        return problem.distance(depot, node) + problem.distance(node, depot);
    }
    let prev = if pos == 0 { depot } else { nodes[pos - 1] };
    let next = nodes.get(pos).copied().unwrap_or(depot);

    // Old: prev → next
    // New: prev → node → next
    distance + problem.distance(prev, node) + problem.distance(node, next)
        - problem.distance(prev, next)
}
