//! # u-insertion
//!
//! Euclidean TSP tour construction with insertion heuristics: cheapest
//! insertion and farthest insertion, with an optional fork-join selection
//! scan that picks exactly the same insertions as the sequential one.
//!
//! ## Modules
//!
//! - [`models`] — Points, point sets, partial and finished tours
//! - [`distance`] — Dense Euclidean distance matrix
//! - [`construction`] — Insertion selectors, parallel scan, tour builder
//! - [`evaluation`] — Closed-tour length and permutation checks
//! - [`io`] — Coordinate loader, tour writer, JSON report
//! - [`config`] — Run options and command-line parsing
//! - [`logging`] — `env_logger` setup for the binary
//!
//! ## Example
//!
//! ```
//! use u_insertion::config::BuildOptions;
//! use u_insertion::models::PointSet;
//!
//! let points = PointSet::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
//! let tour = u_insertion::solve(&points, &BuildOptions::default()).unwrap();
//! assert_eq!(tour.closed_sequence(), vec![0, 3, 2, 1, 0]);
//! ```

pub mod config;
pub mod construction;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod logging;
pub mod models;

pub use error::{Error, Result};

use config::BuildOptions;
use construction::build_tour;
use distance::DistanceMatrix;
use models::{PointSet, Tour};

/// Builds a tour over `points` with the strategy and scan mode in `options`.
pub fn solve(points: &PointSet, options: &BuildOptions) -> Result<Tour> {
    let distances = DistanceMatrix::from_points(points)?;
    let scan = options.scan()?;
    build_tour(&distances, options.strategy, &scan)
}
