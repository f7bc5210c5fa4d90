//! Fleet parameters shared by every vehicle.

use serde::{Deserialize, Serialize};

/// A homogeneous fleet of vehicles starting and ending at one depot.
///
/// Vehicles are logical slots `0..num_vehicles`; each may travel at most
/// `max_distance` on its route. An unused vehicle travels zero.
///
/// # Examples
///
/// ```
/// use u_fleet::models::Fleet;
///
/// let fleet = Fleet::new(4, 3_000).with_depot(0);
/// assert_eq!(fleet.num_vehicles(), 4);
/// assert_eq!(fleet.max_distance(), 3_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    num_vehicles: usize,
    depot: usize,
    max_distance: u64,
}

impl Fleet {
    /// Creates a fleet of `num_vehicles` with the given per-route cap.
    ///
    /// Default depot: 0.
    pub fn new(num_vehicles: usize, max_distance: u64) -> Self {
        Self {
            num_vehicles,
            depot: 0,
            max_distance,
        }
    }

    /// Sets the depot node.
    pub fn with_depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    /// Number of vehicles (routes) in every solution.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Node every route starts and ends at.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Maximum distance a single route may cover.
    pub fn max_distance(&self) -> u64 {
        self.max_distance
    }
}
