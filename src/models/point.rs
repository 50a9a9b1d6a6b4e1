//! Planar points and point sets.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A location in the Euclidean plane.
///
/// # Examples
///
/// ```
/// use u_insertion::models::Point;
///
/// let a = Point::new(0.0, 0.0).unwrap();
/// let b = Point::new(3.0, 4.0).unwrap();
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point.
    ///
    /// Returns `None` if either coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(Self { x, y })
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An ordered, immutable collection of points.
///
/// A point's index in the set is its vertex identity everywhere else in
/// the crate (distance matrix rows, tour entries, output indices).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Wraps an already validated list of points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Builds a point set from raw `(x, y)` pairs.
    ///
    /// Fails on the first non-finite coordinate.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        let mut points = Vec::with_capacity(coords.len());
        for (i, &(x, y)) in coords.iter().enumerate() {
            let p = Point::new(x, y).ok_or_else(|| {
                Error::invalid_input(format!("point {i} has non-finite coordinates ({x}, {y})"))
            })?;
            points.push(p);
        }
        Ok(Self { points })
    }

    /// Generates `n` points uniformly distributed in `[0, width) × [0, height)`.
    ///
    /// A non-positive extent collapses that axis to `0.0`.
    pub fn random<R: Rng>(n: usize, width: f64, height: f64, rng: &mut R) -> Self {
        let mut axis = |extent: f64| {
            if extent > 0.0 {
                rng.random_range(0.0..extent)
            } else {
                0.0
            }
        };
        let points = (0..n)
            .map(|_| {
                let x = axis(width);
                let y = axis(height);
                Point { x, y }
            })
            .collect();
        Self { points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at vertex index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn get(&self, i: usize) -> Point {
        self.points[i]
    }

    /// All points in index order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}
