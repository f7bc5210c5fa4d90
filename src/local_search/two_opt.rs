//! Intra-route 2-opt segment reversal.
//!
//! # Algorithm
//!
//! Reversing the visits `route[i..=j]` replaces the arcs entering and leaving
//! the segment and flips the direction of every arc inside it. Because the
//! matrix may be asymmetric, the reversed interior is priced with prefix sums
//! of the backward arc costs, so each candidate costs O(1):
//!
//! ```text
//! new = fwd[..i] + d(prev, r[j]) + bwd(r[i..=j]) + d(r[i], next) + fwd[j+1..]
//! ```
//!
//! A reversal is only worth applying when `new` is strictly smaller than the
//! current route distance and stays within the cap.
//!
//! [`LocalSearch`](super::LocalSearch) prices reversals through `PathCosts`
//! directly, since it ranks them by the weighted objective. [`two_opt_improve`]
//! is a standalone helper that optimizes a single route by distance alone.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::iter;

use crate::models::RoutingProblem;

/// Reverse the visits at positions `i..=j` of one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TwoOptMove {
    /// Route index.
    pub route: usize,
    /// First reversed position.
    pub i: usize,
    /// Last reversed position.
    pub j: usize,
}

impl TwoOptMove {
    pub(crate) fn apply(&self, nodes: &mut [usize]) {
        nodes[self.i..=self.j].reverse();
    }
}

/// Prefix sums of arc costs along `depot → nodes… → depot`, in both directions.
pub(crate) struct PathCosts {
    path: Vec<usize>,
    forward: Vec<u64>,
    backward: Vec<u64>,
}

impl PathCosts {
    pub(crate) fn new(problem: &RoutingProblem, nodes: &[usize]) -> Self {
        let depot = problem.depot();
        let path: Vec<usize> = iter::once(depot)
            .chain(nodes.iter().copied())
            .chain(iter::once(depot))
            .collect();
        let mut forward = vec![0; path.len()];
        let mut backward = vec![0; path.len()];
        for k in 1..path.len() {
            forward[k] = forward[k - 1] + problem.distance(path[k - 1], path[k]);
            backward[k] = backward[k - 1] + problem.distance(path[k], path[k - 1]);
        }
        Self {
            path,
            forward,
            backward,
        }
    }

    /// Route distance after reversing node positions `i..=j` (`i < j`).
    pub(crate) fn reversed(&self, problem: &RoutingProblem, i: usize, j: usize) -> u64 {
        // Positions in `path` are shifted by the leading depot.
        let (a, b) = (i + 1, j + 1);
        let end = self.path.len() - 1;
        self.forward[a - 1]
            + problem.distance(self.path[a - 1], self.path[b])
            + (self.backward[b] - self.backward[a])
            + problem.distance(self.path[a], self.path[b + 1])
            + (self.forward[end] - self.forward[b + 1])
    }
}

/// Applies 2-opt to a single node sequence until no reversal shortens it.
///
/// Returns the improved sequence and its distance. Uses best-improvement
/// within the route; reversals that would exceed the cap are skipped.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Fleet, RoutingProblem};
/// use u_fleet::local_search::two_opt_improve;
///
/// let rows: Vec<Vec<i64>> = (0..4i64)
///     .map(|i| (0..4i64).map(|j| (i - j).abs()).collect())
///     .collect();
/// let problem = RoutingProblem::from_rows(&rows, Fleet::new(1, 100)).expect("valid");
///
/// // Suboptimal order: 0→2→1→3→0 = 2 + 1 + 2 + 3 = 8
/// let (improved, dist) = two_opt_improve(&problem, &[2, 1, 3]);
/// assert_eq!(dist, 6);
/// assert_eq!(improved, vec![1, 2, 3]);
/// ```
pub fn two_opt_improve(problem: &RoutingProblem, nodes: &[usize]) -> (Vec<usize>, u64) {
    let mut current = nodes.to_vec();
    let mut distance = problem.route_distance(&current);

    while let Some((mv, improved)) = best_reversal(problem, 0, &current, distance) {
        mv.apply(&mut current);
        distance = improved;
    }
    (current, distance)
}

/// Best strictly improving, cap-respecting reversal of one route.
///
/// Ties resolve to the lowest `i`, then the lowest `j`.
pub(crate) fn best_reversal(
    problem: &RoutingProblem,
    route: usize,
    nodes: &[usize],
    distance: u64,
) -> Option<(TwoOptMove, u64)> {
    if nodes.len() < 2 {
        return None;
    }
    let costs = PathCosts::new(problem, nodes);
    let mut best: Option<(TwoOptMove, u64)> = None;
    for i in 0..nodes.len() - 1 {
        for j in i + 1..nodes.len() {
            let candidate = costs.reversed(problem, i, j);
            if candidate >= distance || candidate > problem.max_distance() {
                continue;
            }
            if best.is_none_or(|(_, d)| candidate < d) {
                best = Some((TwoOptMove { route, i, j }, candidate));
            }
        }
    }
    best
}
