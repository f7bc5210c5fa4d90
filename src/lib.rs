//! # u-fleet
//!
//! Distance-capped fleet routing over a static distance matrix: every
//! vehicle leaves from and returns to a shared depot, every node is visited
//! exactly once, and no route may exceed the per-vehicle distance cap. The
//! solver minimizes `total distance + weight * longest route`.
//!
//! ## Modules
//!
//! - [`distance`] — Non-negative integer distance matrix
//! - [`models`] — Fleet, validated problem, routes and solutions
//! - [`evaluation`] — Route distances, the weighted objective, invariant checks
//! - [`constructive`] — First-solution heuristics (round-robin cheapest arc, sequential nearest neighbor)
//! - [`local_search`] — Steepest descent over 2-opt and relocate
//! - [`report`] — Validated, immutable routing result
//! - [`solver`] — Configurable end-to-end pipeline
//! - `json` — JSON problem input and report output (feature `json`)
//!
//! ## Example
//!
//! ```
//! use u_fleet::models::{Fleet, RoutingProblem};
//! use u_fleet::solver::RoutingSolver;
//!
//! let problem = RoutingProblem::from_rows(
//!     &[vec![0, 5, 5], vec![5, 0, 2], vec![5, 2, 0]],
//!     Fleet::new(2, 100),
//! )
//! .expect("valid problem");
//!
//! let report = RoutingSolver::default().solve(&problem).expect("feasible");
//! assert_eq!(report.routes().len(), 2);
//! println!("{report}");
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
#[cfg(feature = "json")]
pub mod json;
pub mod local_search;
pub mod models;
pub mod report;
pub mod solver;

pub use error::{Result, RoutingError};
