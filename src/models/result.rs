//! Optimization result type.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Route;

/// The outcome of one hill-climbing run.
///
/// Holds the locally optimal route, its cyclic length, the number of
/// improving iterations taken, and the wall-clock time of the search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::models::{OptimizationResult, Route};
///
/// let result = OptimizationResult::new(
///     Route::new(vec![0, 1]),
///     12.0,
///     0,
///     Duration::from_millis(3),
/// );
/// assert_eq!(result.length(), 12.0);
/// assert!((result.elapsed_secs() - 0.003).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    route: Route,
    length: f64,
    iterations: usize,
    elapsed: Duration,
}

impl OptimizationResult {
    /// Creates a result.
    pub fn new(route: Route, length: f64, iterations: usize, elapsed: Duration) -> Self {
        Self {
            route,
            length,
            iterations,
            elapsed,
        }
    }

    /// The terminal route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Consumes the result, returning the route.
    pub fn into_route(self) -> Route {
        self.route
    }

    /// Cyclic length of [`route`](Self::route).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of improving moves accepted before convergence.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Wall-clock time of the search.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Wall-clock time of the search in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let r = OptimizationResult::new(Route::new(vec![1, 0, 2]), 9.5, 3, Duration::ZERO);
        assert_eq!(r.route().cities(), &[1, 0, 2]);
        assert_eq!(r.length(), 9.5);
        assert_eq!(r.iterations(), 3);
        assert_eq!(r.elapsed_secs(), 0.0);
        assert_eq!(r.into_route(), Route::new(vec![1, 0, 2]));
    }
}
