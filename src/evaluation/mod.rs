//! Solution evaluation: route distances, the weighted objective, and
//! invariant checking.

mod evaluator;

pub use evaluator::{Objective, RouteEvaluator};
