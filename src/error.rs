//! Error types for problem validation and solving.

use thiserror::Error;

use crate::models::Violation;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Reasons a distance matrix is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("negative distance {value} at ({row}, {col})")]
    NegativeEntry { row: usize, col: usize, value: i64 },

    #[error("{len} entries cannot form a {size}x{size} matrix")]
    SizeMismatch { len: usize, size: usize },

    #[error("distance {value} at ({row}, {col}) exceeds the limit {limit} for this matrix size")]
    EntryTooLarge {
        row: usize,
        col: usize,
        value: u64,
        limit: u64,
    },
}

/// Reasons fleet parameters are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    #[error("fleet needs at least one vehicle")]
    NoVehicles,

    #[error("depot {depot} is out of range for {nodes} nodes")]
    DepotOutOfRange { depot: usize, nodes: usize },
}

/// Errors produced by the routing core.
///
/// `InvalidMatrix` and `InvalidFleet` are input errors. `PartialAssignment`
/// is recoverable by relaxing the distance cap or adding vehicles.
/// `InfeasibleSolution` means a produced solution broke an invariant.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(#[from] MatrixError),

    #[error("invalid fleet: {0}")]
    InvalidFleet(#[from] FleetError),

    #[error("could not assign nodes {unassigned:?} under the current distance cap")]
    PartialAssignment { unassigned: Vec<usize> },

    #[error("solution violates {} constraint(s): {violations:?}", violations.len())]
    InfeasibleSolution { violations: Vec<Violation> },

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoutingError {
    /// Returns `true` if the caller can retry with relaxed fleet parameters.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RoutingError::PartialAssignment { .. })
    }
}
