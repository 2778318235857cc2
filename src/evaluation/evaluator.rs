//! Tour length evaluation.

use crate::distance::DistanceMatrix;

/// Computes the cyclic length of a tour: `route[0] → … → route[n-1] → route[0]`.
///
/// The route must be a permutation of the matrix's city indices; that is
/// the caller's responsibility and is only checked in debug builds.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::route_length;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0, 10, 15, 20],
///     vec![10, 0, 35, 25],
///     vec![15, 35, 0, 30],
///     vec![20, 25, 30, 0],
/// ]).unwrap();
/// assert_eq!(route_length(&[0, 1, 3, 2], &dm), 80.0);
/// ```
pub fn route_length(route: &[usize], distances: &DistanceMatrix) -> f64 {
    debug_assert_eq!(route.len(), distances.size(), "route/matrix size mismatch");
    if route.is_empty() {
        return 0.0;
    }
    let mut length = 0.0;
    for i in 0..route.len() - 1 {
        length += distances.get(route[i], route[i + 1]);
    }
    length += distances.get(route[route.len() - 1], route[0]);
    length
}

/// Change in cyclic length from exchanging the cities at positions `i` and `j`.
///
/// Only the edges entering and leaving the two positions change, so at most
/// four edges are compared. Adjacent positions (including the wrap-around
/// pair `0, n-1`) share an edge, which is counted once.
///
/// # Panics
///
/// Panics if `i` or `j` is out of bounds.
pub fn swap_delta(route: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = route.len();
    let city_after_swap = |p: usize| {
        if p == i {
            route[j]
        } else if p == j {
            route[i]
        } else {
            route[p]
        }
    };

    // Edge k runs from position k to position k+1 (mod n).
    let mut edges = [(i + n - 1) % n, i, (j + n - 1) % n, j];
    edges.sort_unstable();

    let mut delta = 0.0;
    let mut last = usize::MAX;
    for &k in &edges {
        if k == last {
            continue;
        }
        last = k;
        let next = (k + 1) % n;
        delta += distances.get(city_after_swap(k), city_after_swap(next));
        delta -= distances.get(route[k], route[next]);
    }
    delta
}

/// Scores swap candidates against a fixed distance matrix.
///
/// Two strategies produce the same numbers: recomputing the whole tour for
/// each candidate, or adding [`swap_delta`] to the current length. The
/// delta form is only exact when every partial sum is exactly
/// representable, so [`TourEvaluator::new`] enables it only for matrices
/// where [`DistanceMatrix::is_integral`] holds.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::TourEvaluator;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0, 10, 15, 20],
///     vec![10, 0, 35, 25],
///     vec![15, 35, 0, 30],
///     vec![20, 25, 30, 0],
/// ]).unwrap();
/// let evaluator = TourEvaluator::new(&dm);
/// let route = [0, 2, 1, 3];
/// let current = evaluator.length(&route);
/// assert_eq!(current, 95.0);
/// // swapping positions 1 and 2 gives [0, 1, 2, 3]
/// assert_eq!(evaluator.swap_length(&route, current, 1, 2), 95.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourEvaluator<'a> {
    distances: &'a DistanceMatrix,
    use_delta: bool,
}

impl<'a> TourEvaluator<'a> {
    /// Creates an evaluator that uses delta scoring whenever it is exact.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self {
            distances,
            use_delta: distances.is_integral(),
        }
    }

    /// Creates an evaluator that always recomputes full tour lengths.
    pub fn full(distances: &'a DistanceMatrix) -> Self {
        Self {
            distances,
            use_delta: false,
        }
    }

    /// The matrix being evaluated against.
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    /// Returns `true` if candidates are scored incrementally.
    pub fn uses_delta(&self) -> bool {
        self.use_delta
    }

    /// Cyclic length of `route`.
    pub fn length(&self, route: &[usize]) -> f64 {
        route_length(route, self.distances)
    }

    /// Length of `route` with positions `i` and `j` exchanged.
    ///
    /// `current` must be the length of `route` as returned by
    /// [`length`](Self::length).
    pub fn swap_length(&self, route: &[usize], current: f64, i: usize, j: usize) -> f64 {
        if self.use_delta {
            current + swap_delta(route, self.distances, i, j)
        } else {
            let mut candidate = route.to_vec();
            candidate.swap(i, j);
            route_length(&candidate, self.distances)
        }
    }
}
