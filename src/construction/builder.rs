//! Tour builder: seeds a tour and grows it one insertion at a time.

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};
use crate::evaluation::tour_length;
use crate::models::{Tour, TourState};

use super::parallel::Scan;
use super::selector::{InsertionSelector, Strategy};

/// Lifecycle of a [`TourBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Unvisited vertices remain.
    Building,
    /// Every vertex is in the tour.
    Complete,
}

/// Drives an insertion strategy over a distance matrix.
///
/// Selection may fan out over a thread pool; the insertion itself and the
/// cost bookkeeping always happen on the calling thread.
///
/// # Examples
///
/// ```
/// use u_insertion::construction::{Scan, Strategy, TourBuilder};
/// use u_insertion::distance::DistanceMatrix;
/// use u_insertion::models::PointSet;
///
/// let ps = PointSet::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
/// let dm = DistanceMatrix::from_points(&ps).unwrap();
/// let scan = Scan::Sequential;
///
/// let tour = TourBuilder::new(&dm, Strategy::Cheapest, &scan).unwrap().finish().unwrap();
/// assert_eq!(tour.sequence(), &[0, 3, 2, 1]);
/// assert!((tour.total_cost() - 4.0).abs() < 1e-9);
/// ```
pub struct TourBuilder<'a> {
    distances: &'a DistanceMatrix,
    selector: &'a dyn InsertionSelector,
    scan: &'a Scan,
    state: TourState,
    total_cost: f64,
    iterations: usize,
}

impl<'a> TourBuilder<'a> {
    /// Seeds a tour with the strategy's initial vertices.
    ///
    /// The starting cost is the closed length of the seed, so `total_cost`
    /// always equals the length of the current closed tour.
    pub fn new(distances: &'a DistanceMatrix, strategy: Strategy, scan: &'a Scan) -> Result<Self> {
        Self::with_selector(distances, strategy.selector(), scan)
    }

    /// Seeds a tour from an arbitrary selector.
    pub fn with_selector(
        distances: &'a DistanceMatrix,
        selector: &'a dyn InsertionSelector,
        scan: &'a Scan,
    ) -> Result<Self> {
        let seed = selector.seed(distances);
        let state = TourState::seeded(distances.size(), &seed)?;
        let total_cost = tour_length(&seed, distances);
        log::debug!(
            "builder: strategy={} n={} seed={seed:?} parallel={}",
            selector.name(),
            distances.size(),
            scan.is_parallel()
        );
        Ok(Self {
            distances,
            selector,
            scan,
            state,
            total_cost,
            iterations: 0,
        })
    }

    /// Current partial tour.
    pub fn state(&self) -> &TourState {
        &self.state
    }

    /// Length of the current closed tour.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Insertion steps performed so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn build_state(&self) -> BuildState {
        if self.state.is_complete() {
            BuildState::Complete
        } else {
            BuildState::Building
        }
    }

    /// Performs one insertion. A no-op once the tour is complete.
    pub fn step(&mut self) -> Result<BuildState> {
        if self.state.is_complete() {
            return Ok(BuildState::Complete);
        }

        let candidate = self
            .selector
            .select(&self.state, self.distances, self.scan)
            .ok_or_else(|| {
                Error::invariant(format!(
                    "no insertion candidate with {} of {} vertices placed",
                    self.state.len(),
                    self.state.num_vertices()
                ))
            })?;

        self.state.insert_after(candidate.position, candidate.vertex)?;
        self.total_cost += candidate.cost;
        self.iterations += 1;
        log::trace!(
            "insert v={} after={} delta={:.6} len={}",
            candidate.vertex,
            candidate.position,
            candidate.cost,
            self.state.len()
        );

        Ok(self.build_state())
    }

    /// Runs to completion and returns the finished tour.
    pub fn finish(mut self) -> Result<Tour> {
        while self.step()? == BuildState::Building {}

        if !self.total_cost.is_finite() {
            return Err(Error::invariant(format!(
                "tour cost is not finite ({}) after {} insertions",
                self.total_cost, self.iterations
            )));
        }
        debug_assert!(
            (self.total_cost - tour_length(self.state.sequence(), self.distances)).abs()
                <= 1e-6 * self.total_cost.max(1.0),
            "accumulated cost drifted from the closed tour length"
        );

        let total_cost = self.total_cost.max(0.0);
        log::debug!(
            "builder: complete n={} iterations={} cost={total_cost:.6}",
            self.state.len(),
            self.iterations
        );
        Ok(Tour::new(
            self.state.into_sequence(),
            total_cost,
            self.iterations,
        ))
    }
}

/// Builds a complete tour in one call.
pub fn build_tour(distances: &DistanceMatrix, strategy: Strategy, scan: &Scan) -> Result<Tour> {
    TourBuilder::new(distances, strategy, scan)?.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{InsertionCandidate, ParallelReducer, Strategy};
    use crate::evaluation::validate_tour;
    use crate::models::PointSet;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn matrix(coords: &[(f64, f64)]) -> DistanceMatrix {
        let ps = PointSet::from_coords(coords).expect("finite");
        DistanceMatrix::from_points(&ps).expect("alloc")
    }

    fn random_matrix(n: usize, seed: u64) -> DistanceMatrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let ps = PointSet::random(n, 100.0, 100.0, &mut rng);
        DistanceMatrix::from_points(&ps).expect("alloc")
    }

    /// Integer grid points produce many exactly-equal insertion costs.
    fn grid_matrix(side: usize) -> DistanceMatrix {
        let coords: Vec<(f64, f64)> = (0..side * side)
            .map(|i| ((i % side) as f64, (i / side) as f64))
            .collect();
        matrix(&coords)
    }

    fn square() -> DistanceMatrix {
        matrix(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    #[test]
    fn test_unit_square_cheapest() {
        let tour = build_tour(&square(), Strategy::Cheapest, &Scan::Sequential).expect("tour");
        let seq = tour.sequence().to_vec();
        assert!(
            seq == vec![0, 1, 2, 3] || seq == vec![0, 3, 2, 1],
            "crossing tour {seq:?}"
        );
        assert!((tour.total_cost() - 4.0).abs() < 1e-9);
        assert_eq!(tour.iterations(), 3);
    }

    #[test]
    fn test_collinear_farthest() {
        let dm = matrix(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let builder = TourBuilder::new(&dm, Strategy::Farthest, &Scan::Sequential).expect("seed");
        assert_eq!(builder.state().sequence(), &[0, 3]);
        assert!((builder.total_cost() - 6.0).abs() < 1e-12);

        let tour = builder.finish().expect("tour");
        assert_eq!(tour.sequence(), &[0, 1, 2, 3]);
        assert!((tour.total_cost() - 6.0).abs() < 1e-9);
        assert_eq!(tour.iterations(), 2);
    }

    #[test]
    fn test_single_point() {
        let dm = matrix(&[(4.0, 2.0)]);
        for strategy in [Strategy::Cheapest, Strategy::Farthest] {
            let tour = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            assert_eq!(tour.sequence(), &[0]);
            assert_eq!(tour.total_cost(), 0.0);
            assert_eq!(tour.iterations(), 0);
        }
    }

    #[test]
    fn test_empty_instance() {
        let dm = matrix(&[]);
        for strategy in [Strategy::Cheapest, Strategy::Farthest] {
            let tour = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            assert!(tour.is_empty());
            assert_eq!(tour.total_cost(), 0.0);
        }
    }

    #[test]
    fn test_two_points() {
        let dm = matrix(&[(0.0, 0.0), (3.0, 4.0)]);
        let c = build_tour(&dm, Strategy::Cheapest, &Scan::Sequential).expect("tour");
        let f = build_tour(&dm, Strategy::Farthest, &Scan::Sequential).expect("tour");
        assert_eq!(c.sequence(), &[0, 1]);
        assert_eq!(f.sequence(), &[0, 1]);
        assert!((c.total_cost() - 10.0).abs() < 1e-12);
        assert!((f.total_cost() - 10.0).abs() < 1e-12);
        assert_eq!(c.iterations(), 1);
        assert_eq!(f.iterations(), 0);
    }

    #[test]
    fn test_huge_coordinates_keep_finite_cost() {
        let dm = matrix(&[(0.0, 0.0), (1e200, 0.0), (0.0, 1e200)]);
        for strategy in [Strategy::Cheapest, Strategy::Farthest] {
            let tour = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            assert!(validate_tour(tour.sequence(), 3).is_empty());
            let expected = (2.0 + 2f64.sqrt()) * 1e200;
            assert!(tour.total_cost().is_finite());
            assert!((tour.total_cost() / expected - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_finite_cost_is_an_error() {
        let inf = f64::INFINITY;
        let dm = DistanceMatrix::from_data(3, vec![0.0, inf, 1.0, inf, 0.0, 1.0, 1.0, 1.0, 0.0])
            .expect("3x3");
        let err = build_tour(&dm, Strategy::Farthest, &Scan::Sequential).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)), "{err}");
    }

    /// Seeds normally but never offers a candidate.
    struct Exhausted;

    impl InsertionSelector for Exhausted {
        fn name(&self) -> &'static str {
            "exhausted"
        }

        fn seed(&self, distances: &DistanceMatrix) -> Vec<usize> {
            Strategy::Cheapest.selector().seed(distances)
        }

        fn select(&self, _: &TourState, _: &DistanceMatrix, _: &Scan) -> Option<InsertionCandidate> {
            None
        }
    }

    #[test]
    fn test_missing_candidate_is_fatal() {
        let dm = square();
        let scan = Scan::Sequential;
        let mut b = TourBuilder::with_selector(&dm, &Exhausted, &scan).expect("seed");
        assert_eq!(b.build_state(), BuildState::Building);
        match b.step() {
            Err(Error::InvariantViolation(msg)) => assert!(msg.contains("1 of 4"), "{msg}"),
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
        assert_eq!(b.state().sequence(), &[0]);
        assert_eq!(b.iterations(), 0);

        let err = TourBuilder::with_selector(&dm, &Exhausted, &scan)
            .expect("seed")
            .finish()
            .unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn test_monotonic_growth() {
        let dm = random_matrix(25, 3);
        for (strategy, seed_len) in [(Strategy::Cheapest, 1), (Strategy::Farthest, 2)] {
            let mut b = TourBuilder::new(&dm, strategy, &Scan::Sequential).expect("seed");
            assert_eq!(b.state().len(), seed_len);
            let mut expected = seed_len;
            while b.build_state() == BuildState::Building {
                let prev_cost = b.total_cost();
                b.step().expect("step");
                expected += 1;
                assert_eq!(b.state().len(), expected);
                assert!(b.total_cost() >= prev_cost - 1e-9);
            }
            assert_eq!(b.iterations(), 25 - seed_len);
            assert_eq!(b.step().expect("no-op"), BuildState::Complete);
            assert_eq!(b.iterations(), 25 - seed_len);
        }
    }

    #[test]
    fn test_cost_matches_tour_length() {
        let dm = random_matrix(40, 11);
        for strategy in [Strategy::Cheapest, Strategy::Farthest] {
            let tour = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            let recomputed = tour_length(tour.sequence(), &dm);
            assert!((tour.total_cost() - recomputed).abs() < 1e-6);
        }
    }

    #[test]
    fn test_deterministic() {
        let dm = random_matrix(30, 5);
        for strategy in [Strategy::Cheapest, Strategy::Farthest] {
            let a = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            let b = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_parallel_matches_sequential_on_grid_ties() {
        let dm = grid_matrix(5);
        for strategy in [Strategy::Cheapest, Strategy::Farthest] {
            let expected = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            for (workers, chunks) in [(1, 1), (2, 0), (3, 5), (4, 25), (4, 40)] {
                let scan = Scan::Parallel(
                    ParallelReducer::new(workers)
                        .expect("pool")
                        .with_chunks(chunks),
                );
                let got = build_tour(&dm, strategy, &scan).expect("tour");
                assert_eq!(got, expected, "{strategy} workers={workers} chunks={chunks}");
            }
        }
    }

    #[test]
    fn test_parallel_selects_same_candidate_each_step() {
        let dm = random_matrix(30, 99);
        let seq = Scan::Sequential;
        let par = Scan::Parallel(ParallelReducer::new(3).expect("pool").with_chunks(7));
        for strategy in [Strategy::Cheapest, Strategy::Farthest] {
            let mut a = TourBuilder::new(&dm, strategy, &seq).expect("seed");
            let mut b = TourBuilder::new(&dm, strategy, &par).expect("seed");
            while a.build_state() == BuildState::Building {
                a.step().expect("step");
                b.step().expect("step");
                assert_eq!(a.state().sequence(), b.state().sequence());
                assert_eq!(a.total_cost(), b.total_cost());
            }
            assert_eq!(b.build_state(), BuildState::Complete);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_tour_is_permutation(n in 0usize..40, seed in any::<u64>(), farthest in any::<bool>()) {
            let dm = random_matrix(n, seed);
            let strategy = if farthest { Strategy::Farthest } else { Strategy::Cheapest };
            let tour = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            prop_assert!(validate_tour(tour.sequence(), n).is_empty());
            prop_assert!(tour.total_cost() >= 0.0);
            if n >= 2 {
                prop_assert!(tour.total_cost() > 0.0);
                let seed_len = if farthest { 2 } else { 1 };
                prop_assert_eq!(tour.iterations(), n - seed_len);
            } else {
                prop_assert_eq!(tour.total_cost(), 0.0);
            }
        }

        #[test]
        fn prop_parallel_equals_sequential(
            n in 1usize..35,
            seed in any::<u64>(),
            workers in 1usize..6,
            chunks in 0usize..12,
            farthest in any::<bool>(),
        ) {
            let dm = random_matrix(n, seed);
            let strategy = if farthest { Strategy::Farthest } else { Strategy::Cheapest };
            let scan = Scan::Parallel(ParallelReducer::new(workers).expect("pool").with_chunks(chunks));
            let expected = build_tour(&dm, strategy, &Scan::Sequential).expect("tour");
            let got = build_tour(&dm, strategy, &scan).expect("tour");
            prop_assert_eq!(got, expected);
        }
    }
}
