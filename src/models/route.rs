//! Route type.

/// An ordered sequence of node visits assigned to a single vehicle.
///
/// A route starts and ends at the depot; the depot is not stored in `nodes`.
///
/// # Examples
///
/// ```
/// use u_fleet::models::Route;
///
/// let mut route = Route::new(0);
/// route.push(3);
/// route.push(1);
/// assert_eq!(route.nodes(), &[3, 1]);
/// assert_eq!(route.vehicle_id(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    vehicle_id: usize,
    nodes: Vec<usize>,
    total_distance: u64,
}

impl Route {
    /// Creates an empty route (depot → depot) for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            nodes: Vec::new(),
            total_distance: 0,
        }
    }

    /// Creates a route from an explicit node sequence and its distance.
    pub fn with_nodes(vehicle_id: usize, nodes: Vec<usize>, total_distance: u64) -> Self {
        Self {
            vehicle_id,
            nodes,
            total_distance,
        }
    }

    /// Appends a node to the end of this route.
    pub fn push(&mut self, node: usize) {
        self.nodes.push(node);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Visited nodes in order, excluding the depot.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<usize> {
        &mut self.nodes
    }

    /// Last visited node, or `depot` for an empty route.
    pub fn last_or(&self, depot: usize) -> usize {
        self.nodes.last().copied().unwrap_or(depot)
    }

    /// Returns the number of visits (excluding depot).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the vehicle never leaves the depot.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total distance of this route (maintained by the solver).
    pub fn total_distance(&self) -> u64 {
        self.total_distance
    }

    pub fn set_total_distance(&mut self, d: u64) {
        self.total_distance = d;
    }
}
