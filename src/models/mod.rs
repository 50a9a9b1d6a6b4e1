//! Domain model types for tour construction.
//!
//! Points and point sets, the mutable partial tour that every insertion
//! step grows, and the finished tour handed to the writer.

mod point;
mod tour;

pub use point::{Point, PointSet};
pub use tour::{Tour, TourState};
