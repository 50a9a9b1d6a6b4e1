//! Closed-tour length and permutation checks.

use crate::distance::DistanceMatrix;

/// A way in which a vertex sequence fails to be a tour over `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourViolation {
    /// Entry at `position` names a vertex outside `0..n`.
    OutOfRange {
        /// Index in the sequence.
        position: usize,
        /// Offending vertex.
        vertex: usize,
    },
    /// Vertex appears more than once.
    Duplicate {
        /// Repeated vertex.
        vertex: usize,
    },
    /// Vertex never appears.
    Missing {
        /// Absent vertex.
        vertex: usize,
    },
}

/// Length of the closed tour `sequence[0] → … → sequence[m-1] → sequence[0]`.
///
/// Zero for tours of fewer than two vertices.
///
/// # Examples
///
/// ```
/// use u_insertion::models::PointSet;
/// use u_insertion::distance::DistanceMatrix;
/// use u_insertion::evaluation::tour_length;
///
/// let ps = PointSet::from_coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]).unwrap();
/// let dm = DistanceMatrix::from_points(&ps).unwrap();
/// assert!((tour_length(&[0, 1, 2], &dm) - 12.0).abs() < 1e-10);
/// ```
pub fn tour_length(sequence: &[usize], distances: &DistanceMatrix) -> f64 {
    if sequence.len() < 2 {
        return 0.0;
    }
    let open: f64 = sequence
        .windows(2)
        .map(|w| distances.get(w[0], w[1]))
        .sum();
    open + distances.get(sequence[sequence.len() - 1], sequence[0])
}

/// Checks that `sequence` is a permutation of `0..n`.
///
/// Returns every violation found; an empty list means the tour is valid.
pub fn validate_tour(sequence: &[usize], n: usize) -> Vec<TourViolation> {
    let mut violations = Vec::new();
    let mut seen = vec![false; n];

    for (position, &vertex) in sequence.iter().enumerate() {
        match seen.get_mut(vertex) {
            None => violations.push(TourViolation::OutOfRange { position, vertex }),
            Some(true) => violations.push(TourViolation::Duplicate { vertex }),
            Some(flag) => *flag = true,
        }
    }

    for (vertex, &present) in seen.iter().enumerate() {
        if !present {
            violations.push(TourViolation::Missing { vertex });
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointSet;

    fn square() -> DistanceMatrix {
        let ps = PointSet::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
            .expect("finite");
        DistanceMatrix::from_points(&ps).expect("alloc")
    }

    #[test]
    fn test_tour_length_perimeter() {
        let dm = square();
        assert!((tour_length(&[0, 1, 2, 3], &dm) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_tour_length_crossing_is_longer() {
        let dm = square();
        assert!(tour_length(&[0, 2, 1, 3], &dm) > 4.0 + 0.5);
    }

    #[test]
    fn test_tour_length_degenerate() {
        let dm = square();
        assert_eq!(tour_length(&[], &dm), 0.0);
        assert_eq!(tour_length(&[2], &dm), 0.0);
        assert!((tour_length(&[0, 2], &dm) - 2.0 * 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_validate_ok() {
        assert!(validate_tour(&[2, 0, 1], 3).is_empty());
        assert!(validate_tour(&[], 0).is_empty());
    }

    #[test]
    fn test_validate_reports_all() {
        let v = validate_tour(&[0, 0, 5], 3);
        assert_eq!(
            v,
            vec![
                TourViolation::Duplicate { vertex: 0 },
                TourViolation::OutOfRange {
                    position: 2,
                    vertex: 5
                },
                TourViolation::Missing { vertex: 1 },
                TourViolation::Missing { vertex: 2 },
            ]
        );
    }
}
