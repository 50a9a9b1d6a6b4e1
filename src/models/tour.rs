//! Partial tour state and finished tours.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A partially built closed tour over vertices `0..n`.
///
/// `sequence` lists the visited vertices in tour order; the last vertex
/// connects back to the first. Unvisited vertices are kept in ascending
/// order so selection scans see a deterministic candidate order.
///
/// # Examples
///
/// ```
/// use u_insertion::models::TourState;
///
/// let mut state = TourState::seeded(4, &[0]).unwrap();
/// state.insert_after(0, 2).unwrap();
/// assert_eq!(state.sequence(), &[0, 2]);
/// assert_eq!(state.unvisited(), &[1, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct TourState {
    sequence: Vec<usize>,
    visited: Vec<bool>,
    unvisited: Vec<usize>,
}

impl TourState {
    /// Creates a tour over `n` vertices containing exactly `seed`, in order.
    ///
    /// Fails if `seed` is empty while `n > 0`, repeats a vertex, or names
    /// a vertex outside `0..n`.
    pub fn seeded(n: usize, seed: &[usize]) -> Result<Self> {
        if n > 0 && seed.is_empty() {
            return Err(Error::invalid_input("tour seed must contain a vertex"));
        }

        let mut sequence = Vec::new();
        sequence
            .try_reserve_exact(n)
            .map_err(|_| Error::allocation("tour sequence", n))?;
        let mut visited = Vec::new();
        visited
            .try_reserve_exact(n)
            .map_err(|_| Error::allocation("visited set", n))?;
        visited.resize(n, false);

        for &v in seed {
            if v >= n {
                return Err(Error::invalid_input(format!(
                    "seed vertex {v} out of range for {n} points"
                )));
            }
            if visited[v] {
                return Err(Error::invalid_input(format!("seed vertex {v} repeated")));
            }
            visited[v] = true;
            sequence.push(v);
        }

        let unvisited = (0..n).filter(|&v| !visited[v]).collect();
        Ok(Self {
            sequence,
            visited,
            unvisited,
        })
    }

    /// Total number of vertices the tour must eventually cover.
    pub fn num_vertices(&self) -> usize {
        self.visited.len()
    }

    /// Number of vertices currently in the tour.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if no vertex has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns `true` once every vertex is in the tour.
    pub fn is_complete(&self) -> bool {
        self.sequence.len() == self.visited.len()
    }

    /// Vertices in visiting order.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Vertices not yet in the tour, ascending.
    pub fn unvisited(&self) -> &[usize] {
        &self.unvisited
    }

    /// Returns `true` if `vertex` is already in the tour.
    pub fn is_visited(&self, vertex: usize) -> bool {
        self.visited.get(vertex).copied().unwrap_or(false)
    }

    /// Endpoints of the tour edge leaving `sequence[position]`.
    ///
    /// The last position wraps to the closing edge back to `sequence[0]`.
    pub fn edge(&self, position: usize) -> (usize, usize) {
        let m = self.sequence.len();
        (self.sequence[position], self.sequence[(position + 1) % m])
    }

    /// Splices `vertex` into the tour immediately after `sequence[position]`.
    pub fn insert_after(&mut self, position: usize, vertex: usize) -> Result<()> {
        if position >= self.sequence.len() {
            return Err(Error::invariant(format!(
                "insert position {position} outside tour of length {}",
                self.sequence.len()
            )));
        }
        let slot = self
            .unvisited
            .binary_search(&vertex)
            .map_err(|_| Error::invariant(format!("vertex {vertex} is not unvisited")))?;

        self.unvisited.remove(slot);
        self.visited[vertex] = true;
        self.sequence.insert(position + 1, vertex);
        Ok(())
    }

    /// Consumes the state, returning the visiting order.
    pub fn into_sequence(self) -> Vec<usize> {
        self.sequence
    }
}

/// A finished tour and its closed-cycle length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    sequence: Vec<usize>,
    total_cost: f64,
    iterations: usize,
}

impl Tour {
    /// Creates a tour from its visiting order and total cost.
    pub fn new(sequence: Vec<usize>, total_cost: f64, iterations: usize) -> Self {
        Self {
            sequence,
            total_cost,
            iterations,
        }
    }

    /// The empty tour over zero points.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0, 0)
    }

    /// Vertices in visiting order (the return to `sequence[0]` is implicit).
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Closed-tour length, including the return edge.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of insertion steps performed after seeding.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of vertices in the tour.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` for the tour over zero points.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Visiting order with the start vertex repeated at the end.
    pub fn closed_sequence(&self) -> Vec<usize> {
        let mut closed = self.sequence.clone();
        if let Some(&first) = self.sequence.first() {
            closed.push(first);
        }
        closed
    }
}
