//! Distance matrices.
//!
//! Provides the dense integer cost matrix consumed by every solver stage.

mod matrix;

pub use matrix::DistanceMatrix;
