//! Selection candidates and the combiners that order them.
//!
//! Both the sequential scan and every parallel chunk fold with these
//! combiners, and the final cross-chunk reduction uses them again. The
//! orderings are total over distinct candidates, so the winner does not
//! depend on how the unvisited vertices were partitioned.

use std::cmp::Ordering;

/// Inserting `vertex` immediately after `sequence[position]` lengthens the
/// closed tour by `cost`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertionCandidate {
    /// Vertex to insert.
    pub vertex: usize,
    /// Index in the tour sequence after which the vertex goes.
    pub position: usize,
    /// Marginal tour length `d(a, v) + d(v, b) - d(a, b)`.
    pub cost: f64,
}

impl InsertionCandidate {
    /// Lexicographic order on `(cost, vertex, position)`.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.cost
            .partial_cmp(&other.cost)
            .unwrap_or(Ordering::Equal)
            .then(self.vertex.cmp(&other.vertex))
            .then(self.position.cmp(&other.position))
    }

    /// Keeps the cheaper candidate; on equal cost the lower vertex, then
    /// the lower position.
    pub fn cheaper(a: Self, b: Self) -> Self {
        if b.cmp_key(&a) == Ordering::Less {
            b
        } else {
            a
        }
    }
}

/// Farthest-insertion score of an unvisited vertex: its largest distance
/// to any vertex already in the tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FarthestScore {
    pub vertex: usize,
    pub distance: f64,
}

impl FarthestScore {
    /// Keeps the larger distance; on equal distance the lower vertex.
    pub fn farther(a: Self, b: Self) -> Self {
        let by_distance = b
            .distance
            .partial_cmp(&a.distance)
            .unwrap_or(Ordering::Equal);
        match by_distance.then(a.vertex.cmp(&b.vertex)) {
            Ordering::Greater => b,
            _ => a,
        }
    }
}
