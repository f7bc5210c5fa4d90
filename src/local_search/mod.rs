//! Local search for improving feasible solutions.
//!
//! - [`two_opt_improve`] — Intra-route 2-opt segment reversal
//! - [`RelocateMove`] — Node relocation between or within routes
//! - [`LocalSearch`] — Steepest descent over both neighborhoods on
//!   `total + weight * span`, bounded by a [`SearchBudget`]

mod improver;
mod relocate;
mod two_opt;

pub use improver::{
    LocalSearch, Move, ScoredMove, SearchBudget, SearchResult, Termination, ITERATIONS_PER_NODE,
};
pub use relocate::RelocateMove;
pub use two_opt::{two_opt_improve, TwoOptMove};
