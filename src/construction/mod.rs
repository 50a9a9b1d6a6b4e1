//! Insertion-based tour construction.
//!
//! - [`CheapestInsertion`] — globally cheapest (vertex, position) each step, O(n³)
//! - [`FarthestInsertion`] — farthest vertex (max over tour), then cheapest position, O(n³)
//! - [`ParallelReducer`] / [`Scan`] — sequential or fork-join selection scan
//! - [`TourBuilder`] — seeds the tour and applies insertions until complete
//!
//! Both selectors share [`best_position`] and the candidate combiners, so the
//! sequential and parallel scans pick identical insertions.

mod builder;
mod candidate;
mod cheapest;
mod farthest;
mod parallel;
mod selector;

pub use builder::{build_tour, BuildState, TourBuilder};
pub use candidate::{FarthestScore, InsertionCandidate};
pub use cheapest::CheapestInsertion;
pub use farthest::FarthestInsertion;
pub use parallel::{ParallelReducer, Scan};
pub use selector::{best_position, InsertionSelector, Strategy};
