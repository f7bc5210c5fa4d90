//! Validated routing problem.

use super::Fleet;
use crate::distance::DistanceMatrix;
use crate::error::{FleetError, Result};

/// An immutable fleet routing problem: a cost matrix plus fleet parameters.
///
/// Construction validates the inputs; afterwards the problem is read-only
/// and can be shared between independent solves.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Fleet, RoutingProblem};
///
/// let problem = RoutingProblem::from_rows(
///     &[vec![0, 10, 20], vec![10, 0, 12], vec![20, 12, 0]],
///     Fleet::new(2, 40),
/// )
/// .expect("valid problem");
/// assert_eq!(problem.num_nodes(), 3);
/// assert_eq!(problem.customers().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    distances: DistanceMatrix,
    fleet: Fleet,
}

impl RoutingProblem {
    /// Creates a problem, failing with `InvalidFleet` on an empty fleet or
    /// an out-of-range depot.
    pub fn new(distances: DistanceMatrix, fleet: Fleet) -> Result<Self> {
        if fleet.num_vehicles() < 1 {
            return Err(FleetError::NoVehicles.into());
        }
        if fleet.depot() >= distances.size() {
            return Err(FleetError::DepotOutOfRange {
                depot: fleet.depot(),
                nodes: distances.size(),
            }
            .into());
        }
        Ok(Self { distances, fleet })
    }

    /// Validates raw matrix rows and fleet parameters in one step.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R], fleet: Fleet) -> Result<Self> {
        let distances = DistanceMatrix::from_rows(rows)?;
        Self::new(distances, fleet)
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    /// Number of nodes that must be visited (all but the depot).
    pub fn num_customers(&self) -> usize {
        self.num_nodes() - 1
    }

    /// Non-depot node indices in ascending order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        let depot = self.depot();
        (0..self.num_nodes()).filter(move |&n| n != depot)
    }

    /// Travel cost from `from` to `to`.
    pub fn distance(&self, from: usize, to: usize) -> u64 {
        self.distances.get(from, to)
    }

    /// The underlying cost matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn depot(&self) -> usize {
        self.fleet.depot()
    }

    pub fn num_vehicles(&self) -> usize {
        self.fleet.num_vehicles()
    }

    pub fn max_distance(&self) -> u64 {
        self.fleet.max_distance()
    }

    /// Distance of the route `depot → nodes… → depot`.
    pub fn route_distance(&self, nodes: &[usize]) -> u64 {
        self.distances.tour_length(self.depot(), nodes)
    }
}
