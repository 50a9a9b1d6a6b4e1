//! Tour evaluation: closed-cycle length and permutation validity.

mod evaluator;

pub use evaluator::{tour_length, validate_tour, TourViolation};
