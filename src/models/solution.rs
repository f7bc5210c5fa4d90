//! Solution and violation types.

use super::Route;

/// A type of invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Route distance exceeds the fleet's cap.
    MaxDistanceExceeded {
        /// Route index.
        route_index: usize,
        /// Actual distance.
        distance: u64,
        /// Maximum allowed distance.
        max_distance: u64,
    },
    /// A node that must be visited appears in no route.
    NodeMissing {
        /// Node index.
        node: usize,
    },
    /// A node appears more than once across all routes.
    NodeDuplicated {
        /// Node index.
        node: usize,
        /// Number of occurrences.
        count: usize,
    },
    /// A route visits the depot or a node outside the matrix.
    InvalidNode {
        /// Route index.
        route_index: usize,
        /// Offending node index.
        node: usize,
    },
    /// The number of routes differs from the fleet size.
    RouteCountMismatch {
        /// Routes in the solution.
        routes: usize,
        /// Vehicles in the fleet.
        vehicles: usize,
    },
    /// A route's recorded distance disagrees with the matrix.
    DistanceMismatch {
        /// Route index.
        route_index: usize,
        /// Distance stored on the route.
        recorded: u64,
        /// Distance recomputed from the matrix.
        actual: u64,
    },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete assignment of nodes to vehicle routes.
///
/// Holds one route per vehicle, indexed by vehicle id.
///
/// # Examples
///
/// ```
/// use u_fleet::models::Solution;
///
/// let sol = Solution::empty(3);
/// assert_eq!(sol.num_routes(), 3);
/// assert_eq!(sol.span(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates a solution with `num_vehicles` empty routes.
    pub fn empty(num_vehicles: usize) -> Self {
        Self {
            routes: (0..num_vehicles).map(Route::new).collect(),
        }
    }

    /// Creates a solution from explicit routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Returns the routes in vehicle order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns a mutable reference to the routes.
    pub fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Returns the number of routes (one per vehicle).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> u64 {
        self.routes
            .iter()
            .map(Route::total_distance)
            .fold(0, u64::saturating_add)
    }

    /// Longest single route distance.
    pub fn span(&self) -> u64 {
        self.routes
            .iter()
            .map(Route::total_distance)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Number of routes that leave the depot.
    pub fn num_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }
}
