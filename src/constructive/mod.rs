//! Constructive heuristics for building initial feasible solutions.
//!
//! - [`cheapest_arc`] — Round-robin path-cheapest-arc extension, O(n²)
//! - [`nearest_neighbor`] — Sequential vehicle-by-vehicle nearest neighbor, O(n²)

mod cheapest_arc;
mod nearest_neighbor;

pub use cheapest_arc::cheapest_arc;
pub use nearest_neighbor::nearest_neighbor;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::models::{RoutingProblem, Solution};

/// Heuristic used to build the first feasible solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Vehicles take turns appending their cheapest reachable node.
    #[default]
    RoundRobinCheapestArc,
    /// Each vehicle is filled completely before the next one starts.
    SequentialNearestNeighbor,
}

impl FirstSolutionStrategy {
    /// All strategies, in the order they are tried as fallbacks.
    pub const ALL: [FirstSolutionStrategy; 2] = [
        FirstSolutionStrategy::RoundRobinCheapestArc,
        FirstSolutionStrategy::SequentialNearestNeighbor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FirstSolutionStrategy::RoundRobinCheapestArc => "round_robin_cheapest_arc",
            FirstSolutionStrategy::SequentialNearestNeighbor => "sequential_nearest_neighbor",
        }
    }
}

/// Builds an initial solution with the given strategy.
#[instrument(skip(problem), level = "debug")]
pub fn construct(problem: &RoutingProblem, strategy: FirstSolutionStrategy) -> Result<Solution> {
    debug!(
        nodes = problem.num_nodes(),
        vehicles = problem.num_vehicles(),
        "start construction heuristic"
    );
    let solution = match strategy {
        FirstSolutionStrategy::RoundRobinCheapestArc => cheapest_arc(problem)?,
        FirstSolutionStrategy::SequentialNearestNeighbor => nearest_neighbor(problem)?,
    };
    debug!(
        total = solution.total_distance(),
        span = solution.span(),
        used = solution.num_used(),
        "construction finished"
    );
    Ok(solution)
}
