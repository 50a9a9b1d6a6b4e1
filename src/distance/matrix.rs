//! Dense distance matrix.

use crate::error::{Error, Result};
use crate::models::PointSet;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once from a [`PointSet`] and read-only afterwards, so it can be
/// shared by reference across parallel scan workers.
///
/// # Examples
///
/// ```
/// use u_insertion::models::PointSet;
/// use u_insertion::distance::DistanceMatrix;
///
/// let points = PointSet::from_coords(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]).unwrap();
/// let dm = DistanceMatrix::from_points(&points).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix of a point set.
    ///
    /// Fails with [`Error::Allocation`] if the `n × n` buffer cannot be
    /// reserved, and with [`Error::InvalidInput`] if two points are too far
    /// apart for their distance to be a finite `f64`.
    pub fn from_points(points: &PointSet) -> Result<Self> {
        let n = points.len();
        let len = n
            .checked_mul(n)
            .ok_or_else(|| Error::allocation("distance matrix", usize::MAX))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::allocation("distance matrix", len))?;
        data.resize(len, 0.0);

        let pts = points.points();
        for i in 0..n {
            for j in (i + 1)..n {
                let d = pts[i].distance_to(&pts[j]);
                if !d.is_finite() {
                    return Err(Error::invalid_input(format!(
                        "distance between points {i} and {j} overflows"
                    )));
                }
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        log::debug!("distance matrix: n={n} cells={len}");
        Ok(Self { data, size: n })
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if size.checked_mul(size) != Some(data.len()) {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance between vertices `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Row of distances from `from` to every vertex.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Number of vertices in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the vertex farthest from `from`, excluding `from` itself.
    ///
    /// Ties go to the lowest index. Returns `None` for matrices with fewer
    /// than two vertices.
    pub fn farthest_from(&self, from: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &d) in self.row(from).iter().enumerate() {
            if i == from {
                continue;
            }
            if best.is_none_or(|(_, bd)| d > bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }
}
