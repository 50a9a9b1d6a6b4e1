//! Cheapest-insertion selection.
//!
//! # Algorithm
//!
//! Start from the single-vertex tour `[0]`. Each step, for every unvisited
//! vertex `i` and every tour edge `(a, b)`, compute
//!
//! ```text
//! increase = d(a, i) + d(i, b) - d(a, b)
//! ```
//!
//! and insert the pair with the smallest increase. Ties go to the lowest
//! vertex, then the lowest edge index.
//!
//! # Complexity
//!
//! O(unvisited × tour) per step, O(n³) for a full build.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use crate::distance::DistanceMatrix;
use crate::models::TourState;

use super::candidate::InsertionCandidate;
use super::parallel::Scan;
use super::selector::{best_position, InsertionSelector};

/// Cheapest-insertion selector.
///
/// # Examples
///
/// ```
/// use u_insertion::construction::{CheapestInsertion, InsertionSelector, Scan};
/// use u_insertion::distance::DistanceMatrix;
/// use u_insertion::models::{PointSet, TourState};
///
/// let ps = PointSet::from_coords(&[(0.0, 0.0), (5.0, 0.0), (1.0, 0.0)]).unwrap();
/// let dm = DistanceMatrix::from_points(&ps).unwrap();
/// let state = TourState::seeded(3, &CheapestInsertion.seed(&dm)).unwrap();
///
/// let next = CheapestInsertion.select(&state, &dm, &Scan::Sequential).unwrap();
/// assert_eq!(next.vertex, 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestInsertion;

impl InsertionSelector for CheapestInsertion {
    fn name(&self) -> &'static str {
        "cheapest"
    }

    fn seed(&self, distances: &DistanceMatrix) -> Vec<usize> {
        if distances.size() == 0 {
            Vec::new()
        } else {
            vec![0]
        }
    }

    fn select(
        &self,
        state: &TourState,
        distances: &DistanceMatrix,
        scan: &Scan,
    ) -> Option<InsertionCandidate> {
        scan.best(
            state.unvisited(),
            |vertex| best_position(state, distances, vertex),
            InsertionCandidate::cheaper,
        )
    }
}
