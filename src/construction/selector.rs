//! Insertion selector abstraction and strategy configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::models::TourState;

use super::candidate::InsertionCandidate;
use super::cheapest::CheapestInsertion;
use super::farthest::FarthestInsertion;
use super::parallel::Scan;

/// Chooses the initial tour and, each iteration, the next insertion.
///
/// Implementations are pure: they read the tour and the matrix and never
/// mutate either. The builder applies the returned candidate.
pub trait InsertionSelector: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Vertices of the starting tour, in order. Empty only for `n == 0`.
    fn seed(&self, distances: &DistanceMatrix) -> Vec<usize>;

    /// The next insertion, or `None` if no unvisited vertex remains.
    fn select(
        &self,
        state: &TourState,
        distances: &DistanceMatrix,
        scan: &Scan,
    ) -> Option<InsertionCandidate>;
}

/// Cheapest position to insert `vertex` into the current tour.
///
/// Scans every tour edge `(sequence[j], sequence[j + 1])`, including the
/// closing edge, and keeps the first edge with the minimal increase.
/// Returns `None` for an empty tour.
pub fn best_position(
    state: &TourState,
    distances: &DistanceMatrix,
    vertex: usize,
) -> Option<InsertionCandidate> {
    let mut best: Option<InsertionCandidate> = None;
    for position in 0..state.len() {
        let (current, next) = state.edge(position);
        let cost = distances.get(current, vertex) + distances.get(vertex, next)
            - distances.get(current, next);
        if best.is_none_or(|b| cost < b.cost) {
            best = Some(InsertionCandidate {
                vertex,
                position,
                cost,
            });
        }
    }
    best
}

/// Which insertion heuristic drives the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Globally cheapest (vertex, position) pair each step.
    #[default]
    Cheapest,
    /// Farthest vertex first, then its cheapest position.
    Farthest,
}

impl Strategy {
    /// The selector implementing this strategy.
    pub fn selector(self) -> &'static dyn InsertionSelector {
        match self {
            Self::Cheapest => &CheapestInsertion,
            Self::Farthest => &FarthestInsertion,
        }
    }

    pub fn name(self) -> &'static str {
        self.selector().name()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cheapest" | "c" => Ok(Self::Cheapest),
            "farthest" | "f" => Ok(Self::Farthest),
            other => Err(Error::invalid_input(format!(
                "unknown strategy {other:?} (expected cheapest or farthest)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointSet;

    fn line() -> DistanceMatrix {
        let ps = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])
            .expect("finite");
        DistanceMatrix::from_points(&ps).expect("alloc")
    }

    #[test]
    fn test_best_position_between_neighbors() {
        let dm = line();
        let state = TourState::seeded(4, &[0, 1, 3]).expect("seed");
        let c = best_position(&state, &dm, 2).expect("non-empty tour");
        assert_eq!(c.position, 1); // between 1 and 3
        assert!(c.cost.abs() < 1e-12);
    }

    #[test]
    fn test_best_position_single_vertex_tour() {
        let dm = line();
        let state = TourState::seeded(4, &[0]).expect("seed");
        let c = best_position(&state, &dm, 3).expect("non-empty tour");
        assert_eq!(c.position, 0);
        assert!((c.cost - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_position_first_of_ties() {
        let dm = line();
        // Both edges of [0, 3] cost 0 for vertex 1.
        let state = TourState::seeded(4, &[0, 3]).expect("seed");
        let c = best_position(&state, &dm, 1).expect("non-empty tour");
        assert_eq!(c.position, 0);
    }

    #[test]
    fn test_best_position_empty_tour() {
        let dm = DistanceMatrix::from_data(0, Vec::new()).expect("empty");
        let state = TourState::seeded(0, &[]).expect("seed");
        assert!(best_position(&state, &dm, 0).is_none());
    }

    #[test]
    fn test_strategy_parse_and_display() {
        assert_eq!("cheapest".parse::<Strategy>().ok(), Some(Strategy::Cheapest));
        assert_eq!(" Farthest ".parse::<Strategy>().ok(), Some(Strategy::Farthest));
        assert!("nearest".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Farthest.to_string(), "farthest");
        assert_eq!(Strategy::default(), Strategy::Cheapest);
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&Strategy::Farthest).expect("serialize");
        assert_eq!(json, "\"farthest\"");
        let back: Strategy = serde_json::from_str("\"cheapest\"").expect("deserialize");
        assert_eq!(back, Strategy::Cheapest);
    }
}
