//! Pairwise distances.
//!
//! Provides a dense Euclidean distance matrix built once per run.

mod matrix;

pub use matrix::DistanceMatrix;
