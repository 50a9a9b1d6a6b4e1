//! Farthest-insertion selection.
//!
//! # Algorithm
//!
//! Start from `[0, f]` where `f` is the vertex farthest from vertex 0.
//! Each step:
//!
//! 1. Score every unvisited vertex by its **largest** distance to any tour
//!    vertex and pick the highest score (lowest vertex on ties).
//! 2. Insert it on the tour edge with the smallest increase, scanned the
//!    same way as cheapest insertion.
//!
//! Step 1 is a max-over-tour rule, not the textbook max-min rule (farthest
//! by distance to the *nearest* tour vertex). Output compatibility depends
//! on keeping it.
//!
//! # Complexity
//!
//! O(unvisited × tour) for the scoring scan plus O(tour) for placement per
//! step, O(n³) overall.

use crate::distance::DistanceMatrix;
use crate::models::TourState;

use super::candidate::{FarthestScore, InsertionCandidate};
use super::parallel::Scan;
use super::selector::{best_position, InsertionSelector};

/// Farthest-insertion selector.
///
/// # Examples
///
/// ```
/// use u_insertion::construction::{FarthestInsertion, InsertionSelector};
/// use u_insertion::distance::DistanceMatrix;
/// use u_insertion::models::PointSet;
///
/// let ps = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]).unwrap();
/// let dm = DistanceMatrix::from_points(&ps).unwrap();
/// assert_eq!(FarthestInsertion.seed(&dm), vec![0, 3]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FarthestInsertion;

impl FarthestInsertion {
    /// Picks the unvisited vertex with the largest distance to some tour vertex.
    pub fn farthest_vertex(
        state: &TourState,
        distances: &DistanceMatrix,
        scan: &Scan,
    ) -> Option<FarthestScore> {
        scan.best(
            state.unvisited(),
            |vertex| {
                let row = distances.row(vertex);
                let distance = state
                    .sequence()
                    .iter()
                    .map(|&t| row[t])
                    .fold(0.0, f64::max);
                Some(FarthestScore { vertex, distance })
            },
            FarthestScore::farther,
        )
    }
}

impl InsertionSelector for FarthestInsertion {
    fn name(&self) -> &'static str {
        "farthest"
    }

    fn seed(&self, distances: &DistanceMatrix) -> Vec<usize> {
        match distances.size() {
            0 => Vec::new(),
            _ => match distances.farthest_from(0) {
                Some(f) => vec![0, f],
                None => vec![0],
            },
        }
    }

    fn select(
        &self,
        state: &TourState,
        distances: &DistanceMatrix,
        scan: &Scan,
    ) -> Option<InsertionCandidate> {
        let target = Self::farthest_vertex(state, distances, scan)?;
        best_position(state, distances, target.vertex)
    }
}
