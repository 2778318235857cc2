//! Best-improvement hill climbing driver.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::config::{Evaluation, HillClimbConfig};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::evaluation::TourEvaluator;
use crate::local_search::{best_swap_move, best_swap_move_par};
use crate::models::{OptimizationResult, Route};

/// Runs best-improvement swap hill climbing to a local optimum.
///
/// Starts from a random permutation and repeatedly moves to the best
/// strictly shorter swap neighbor. Stops as soon as no neighbor is
/// strictly shorter. Each accepted move strictly shortens the tour, so the
/// run always terminates.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::hill_climb::{HillClimbConfig, HillClimber};
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0, 10, 15, 20],
///     vec![10, 0, 35, 25],
///     vec![15, 35, 0, 30],
///     vec![20, 25, 30, 0],
/// ]).unwrap();
///
/// let climber = HillClimber::new(HillClimbConfig::default().with_seed(42));
/// let result = climber.solve(&dm).unwrap();
/// assert_eq!(result.length(), 80.0);
/// assert!(result.route().is_permutation());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimber {
    config: HillClimbConfig,
}

impl HillClimber {
    /// Creates a climber with the given configuration.
    pub fn new(config: HillClimbConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HillClimbConfig {
        &self.config
    }

    /// Solves using an RNG built from the configured seed, or from OS
    /// entropy when no seed is set.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidDimension`] if the matrix has fewer than two cities.
    pub fn solve(&self, distances: &DistanceMatrix) -> Result<OptimizationResult> {
        check_dimension(distances)?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.solve_with_rng(distances, &mut rng)
    }

    /// Solves using the caller's RNG for the initial tour.
    ///
    /// The configured seed is ignored. On error no randomness is consumed.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidDimension`] if the matrix has fewer than two cities.
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &self,
        distances: &DistanceMatrix,
        rng: &mut R,
    ) -> Result<OptimizationResult> {
        check_dimension(distances)?;
        let start = Instant::now();
        let route = Route::random(distances.size(), rng);
        Ok(self.climb(distances, route, start))
    }

    /// Solves starting from the given route instead of a random one.
    ///
    /// # Errors
    ///
    /// - [`TourError::InvalidDimension`] if the matrix has fewer than two cities.
    /// - [`TourError::InvalidRoute`] if `route` is not a permutation of the
    ///   matrix's cities.
    pub fn solve_from(
        &self,
        distances: &DistanceMatrix,
        route: Route,
    ) -> Result<OptimizationResult> {
        check_dimension(distances)?;
        if route.len() != distances.size() || !route.is_permutation() {
            return Err(TourError::InvalidRoute {
                cities: distances.size(),
            });
        }
        Ok(self.climb(distances, route, Instant::now()))
    }

    fn evaluator<'a>(&self, distances: &'a DistanceMatrix) -> TourEvaluator<'a> {
        match self.config.evaluation {
            Evaluation::Auto => TourEvaluator::new(distances),
            Evaluation::Full => TourEvaluator::full(distances),
        }
    }

    fn climb(
        &self,
        distances: &DistanceMatrix,
        mut route: Route,
        start: Instant,
    ) -> OptimizationResult {
        let evaluator = self.evaluator(distances);
        let mut current = evaluator.length(route.cities());

        info!(
            event = "solve_start",
            cities = distances.size(),
            initial_length = current,
            delta_scoring = evaluator.uses_delta(),
            parallel = self.config.parallel,
        );

        let mut iterations = 0usize;
        loop {
            let best = if self.config.parallel {
                best_swap_move_par(route.cities(), current, &evaluator)
            } else {
                best_swap_move(route.cities(), current, &evaluator)
            };
            let Some(mv) = best else {
                break;
            };

            trace!(i = mv.i, j = mv.j, length = mv.length, "accepted swap");
            route.swap(mv.i, mv.j);
            debug_assert!(route.is_permutation(), "swap produced a malformed route");
            current = evaluator.length(route.cities());
            debug_assert_eq!(current, mv.length);
            iterations += 1;
            debug!(event = "step", iteration = iterations, length = current);
        }

        let elapsed = start.elapsed();
        info!(
            event = "solve_end",
            length = current,
            iterations,
            duration_ms = elapsed.as_millis() as u64,
        );

        OptimizationResult::new(route, current, iterations, elapsed)
    }
}

/// Runs hill climbing with default settings and the caller's RNG.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::hill_climb::hill_climb;
///
/// let dm = DistanceMatrix::from_rows(&[vec![0, 3], vec![4, 0]]).unwrap();
/// let result = hill_climb(&dm, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert_eq!(result.length(), 7.0);
/// assert_eq!(result.iterations(), 0);
/// ```
pub fn hill_climb<R: Rng + ?Sized>(
    distances: &DistanceMatrix,
    rng: &mut R,
) -> Result<OptimizationResult> {
    HillClimber::default().solve_with_rng(distances, rng)
}

/// Runs hill climbing with default settings from a given starting route.
pub fn hill_climb_from(distances: &DistanceMatrix, route: Route) -> Result<OptimizationResult> {
    HillClimber::default().solve_from(distances, route)
}

fn check_dimension(distances: &DistanceMatrix) -> Result<()> {
    let n = distances.size();
    if n < 2 {
        return Err(TourError::InvalidDimension { rows: n, cols: n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::route_length;
    use crate::local_search::best_swap_neighbor;

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .expect("valid")
    }

    fn all_permutations(n: usize) -> Vec<Vec<usize>> {
        if n == 0 {
            return vec![Vec::new()];
        }
        let mut out = Vec::new();
        for perm in all_permutations(n - 1) {
            for pos in 0..=perm.len() {
                let mut p = perm.clone();
                p.insert(pos, n - 1);
                out.push(p);
            }
        }
        out
    }

    #[test]
    fn test_four_cities_reach_80_from_every_start() {
        let dm = sample();
        for start in all_permutations(4) {
            let result = hill_climb_from(&dm, Route::new(start.clone())).expect("valid");
            assert_eq!(result.length(), 80.0, "start {start:?}");
            assert!(result.iterations() < 10);
            assert_eq!(route_length(result.route().cities(), &dm), 80.0);
        }
    }

    #[test]
    fn test_two_cities_trivial() {
        let dm = DistanceMatrix::from_rows(&[vec![0, 4], vec![6, 0]]).expect("valid");
        for seed in 0..5 {
            let result = hill_climb(&dm, &mut StdRng::seed_from_u64(seed)).expect("valid");
            assert_eq!(result.iterations(), 0);
            assert_eq!(result.length(), 10.0);
            assert!(result.route().is_permutation());
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0, 1, 9, 4, 7, 3, 8],
            vec![8, 0, 2, 6, 3, 5, 1],
            vec![5, 7, 0, 1, 9, 2, 4],
            vec![2, 4, 8, 0, 6, 7, 3],
            vec![3, 9, 5, 2, 0, 4, 6],
            vec![6, 2, 3, 8, 1, 0, 5],
            vec![7, 5, 4, 3, 2, 9, 0],
        ])
        .expect("valid");
        let climber = HillClimber::new(HillClimbConfig::default().with_seed(99));
        let a = climber.solve(&dm).expect("valid");
        let b = climber.solve(&dm).expect("valid");
        assert_eq!(a.route(), b.route());
        assert_eq!(a.length(), b.length());
        assert_eq!(a.iterations(), b.iterations());
    }

    #[test]
    fn test_strategies_agree() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0, 12, 7, 30, 14, 9],
            vec![11, 0, 21, 5, 18, 3],
            vec![6, 25, 0, 16, 4, 22],
            vec![28, 4, 15, 0, 10, 13],
            vec![13, 19, 5, 9, 0, 17],
            vec![8, 2, 20, 14, 16, 0],
        ])
        .expect("valid");
        let base = HillClimbConfig::default().with_seed(5);
        let reference = HillClimber::new(base.clone().with_evaluation(Evaluation::Full))
            .solve(&dm)
            .expect("valid");
        for config in [
            base.clone(),
            base.clone().with_parallel(true),
            base.with_evaluation(Evaluation::Full).with_parallel(true),
        ] {
            let result = HillClimber::new(config).solve(&dm).expect("valid");
            assert_eq!(result.route(), reference.route());
            assert_eq!(result.length(), reference.length());
            assert_eq!(result.iterations(), reference.iterations());
        }
    }

    #[test]
    fn test_result_is_local_optimum() {
        let dm = sample();
        let result = HillClimber::new(HillClimbConfig::default().with_seed(11))
            .solve(&dm)
            .expect("valid");
        let (again, len) = best_swap_neighbor(result.route(), &dm);
        assert_eq!(&again, result.route());
        assert_eq!(len, result.length());
    }

    #[test]
    fn test_never_worse_than_start() {
        let dm = DistanceMatrix::from_rows(&[
            vec![0.0, 2.5, 9.1, 4.2],
            vec![2.5, 0.0, 3.3, 6.4],
            vec![9.1, 3.3, 0.0, 1.7],
            vec![4.2, 6.4, 1.7, 0.0],
        ])
        .expect("valid");
        for start in all_permutations(4) {
            let initial = route_length(&start, &dm);
            let result = hill_climb_from(&dm, Route::new(start)).expect("valid");
            assert!(result.length() <= initial);
        }
    }

    #[test]
    fn test_too_small_consumes_no_randomness() {
        let dm = DistanceMatrix::new(1);
        let mut rng = StdRng::seed_from_u64(17);
        let err = hill_climb(&dm, &mut rng).unwrap_err();
        assert_eq!(err, TourError::InvalidDimension { rows: 1, cols: 1 });
        let mut fresh = StdRng::seed_from_u64(17);
        assert_eq!(rng.random::<u64>(), fresh.random::<u64>());
    }

    #[test]
    fn test_non_square_fails_before_solving() {
        let mut rng = StdRng::seed_from_u64(17);
        let err = DistanceMatrix::from_rows(&[vec![0, 1, 2], vec![1, 0, 2]])
            .and_then(|dm| hill_climb(&dm, &mut rng))
            .unwrap_err();
        assert_eq!(err, TourError::InvalidDimension { rows: 2, cols: 3 });
        let mut fresh = StdRng::seed_from_u64(17);
        assert_eq!(rng.random::<u64>(), fresh.random::<u64>());
    }

    #[test]
    fn test_solve_from_rejects_bad_route() {
        let dm = sample();
        for bad in [vec![0, 1, 2], vec![0, 1, 1, 2], vec![0, 1, 2, 4]] {
            let err = hill_climb_from(&dm, Route::new(bad)).unwrap_err();
            assert_eq!(err, TourError::InvalidRoute { cities: 4 });
        }
    }
}
