//! Domain model types for fleet routing problems.
//!
//! Provides the core abstractions: a fleet with a shared depot and
//! per-route distance cap, a validated problem tying the fleet to a cost
//! matrix, routes as ordered node sequences, and solutions holding one
//! route per vehicle.

mod fleet;
mod problem;
mod route;
mod solution;

pub use fleet::Fleet;
pub use problem::RoutingProblem;
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
