//! Cyclic tour type.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ordered sequence of city indices forming a closed tour.
///
/// After the last city the tour returns to the first. A valid route over
/// `n` cities is a permutation of `0..n`. Rotations and reflections of a
/// route are distinct values; nothing here canonicalizes them.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Route;
///
/// let route = Route::new(vec![2, 0, 1]);
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.cities(), &[2, 0, 1]);
/// assert!(route.is_permutation());
/// assert_eq!(route.swapped(0, 2).cities(), &[1, 0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    cities: Vec<usize>,
}

impl Route {
    /// Wraps a city sequence.
    ///
    /// The sequence is not checked; see [`Route::is_permutation`].
    pub fn new(cities: Vec<usize>) -> Self {
        Self { cities }
    }

    /// The identity tour `0, 1, …, n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            cities: (0..n).collect(),
        }
    }

    /// A uniformly random permutation of `0..n`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut route = Self::identity(n);
        route.cities.shuffle(rng);
        route
    }

    /// Returns the cities in visit order.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Consumes the route, returning the city sequence.
    pub fn into_cities(self) -> Vec<usize> {
        self.cities
    }

    /// Number of cities on the tour.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the route visits no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Returns a copy with the cities at positions `i` and `j` exchanged.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swapped(&self, i: usize, j: usize) -> Self {
        let mut cities = self.cities.clone();
        cities.swap(i, j);
        Self { cities }
    }

    /// Exchanges the cities at positions `i` and `j` in place.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.cities.swap(i, j);
    }

    /// Returns the same cycle started `k` positions later.
    pub fn rotated(&self, k: usize) -> Self {
        let mut cities = self.cities.clone();
        if !cities.is_empty() {
            let k = k % cities.len();
            cities.rotate_left(k);
        }
        Self { cities }
    }

    /// Returns the cycle traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut cities = self.cities.clone();
        cities.reverse();
        Self { cities }
    }

    /// Returns `true` if the route contains each of `0..len` exactly once.
    pub fn is_permutation(&self) -> bool {
        let n = self.cities.len();
        let mut seen = vec![false; n];
        for &c in &self.cities {
            if c >= n || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        true
    }
}

impl From<Vec<usize>> for Route {
    fn from(cities: Vec<usize>) -> Self {
        Self::new(cities)
    }
}

impl AsRef<[usize]> for Route {
    fn as_ref(&self) -> &[usize] {
        &self.cities
    }
}
