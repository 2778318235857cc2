//! Storage records for matrices and results.
//!
//! A matrix is stored as its city count plus a comma-joined, row-major list
//! of distances. A result is stored as a comma-joined list of 0-based city
//! indices, the route length, and the time taken in seconds. Records are
//! keyed by opaque auto-increment ids, one sequence per table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::{OptimizationResult, Route};

/// A stored distance matrix.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::persistence::MatrixRecord;
///
/// let dm = DistanceMatrix::from_rows(&[vec![0, 5], vec![7, 0]]).unwrap();
/// let record = MatrixRecord::from_matrix(&dm);
/// assert_eq!(record.city_count, 2);
/// assert_eq!(record.distances, "0,5,7,0");
/// assert_eq!(record.to_matrix().unwrap(), dm);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRecord {
    /// Number of cities (rows).
    pub city_count: usize,
    /// Row-major distances, comma-joined.
    pub distances: String,
}

impl MatrixRecord {
    /// Flattens a matrix row by row.
    pub fn from_matrix(distances: &DistanceMatrix) -> Self {
        Self {
            city_count: distances.size(),
            distances: join(distances.as_slice()),
        }
    }

    /// Rebuilds the n×n matrix, cutting the list into rows of `city_count`.
    ///
    /// # Errors
    ///
    /// - [`TourError::CorruptRecord`] if a value does not parse.
    /// - [`TourError::CityCountMismatch`] if the list length is not
    ///   `city_count²`.
    /// - Any validation error of [`DistanceMatrix::from_data`].
    pub fn to_matrix(&self) -> Result<DistanceMatrix> {
        let data = self
            .distances
            .split(',')
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|_| TourError::CorruptRecord(format!("bad distance {v:?}")))
            })
            .collect::<Result<Vec<f64>>>()?;
        DistanceMatrix::from_data(self.city_count, data)
    }
}

/// A stored optimization result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// 0-based city indices, comma-joined.
    pub best_route: String,
    /// Length of the route.
    pub shortest_path_length: f64,
    /// Search time in seconds.
    pub time_taken: f64,
}

impl ResultRecord {
    /// Captures a result.
    pub fn from_result(result: &OptimizationResult) -> Self {
        Self {
            best_route: result
                .route()
                .cities()
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(","),
            shortest_path_length: result.length(),
            time_taken: result.elapsed_secs(),
        }
    }

    /// Decodes the stored route.
    ///
    /// # Errors
    ///
    /// [`TourError::CorruptRecord`] if an index does not parse or the
    /// indices are not a permutation.
    pub fn route(&self) -> Result<Route> {
        let cities = self
            .best_route
            .split(',')
            .map(|c| {
                c.trim()
                    .parse::<usize>()
                    .map_err(|_| TourError::CorruptRecord(format!("bad city index {c:?}")))
            })
            .collect::<Result<Vec<usize>>>()?;
        let route = Route::new(cities);
        if !route.is_permutation() {
            return Err(TourError::CorruptRecord(format!(
                "route {:?} is not a permutation",
                self.best_route
            )));
        }
        Ok(route)
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Storage for matrices and results keyed by opaque ids.
pub trait RecordStore {
    /// Stores a matrix, returning its id.
    fn save_matrix(&mut self, distances: &DistanceMatrix) -> Result<u64>;

    /// Loads the matrix stored under `id`.
    ///
    /// # Errors
    ///
    /// [`TourError::RecordNotFound`] if nothing is stored under `id`.
    fn fetch_matrix(&self, id: u64) -> Result<DistanceMatrix>;

    /// Stores a result, returning its id.
    fn save_result(&mut self, result: &OptimizationResult) -> Result<u64>;

    /// Loads the result stored under `id`.
    fn fetch_result(&self, id: u64) -> Result<ResultRecord>;

    /// All stored results in id order.
    fn results(&self) -> Vec<(u64, ResultRecord)>;
}

/// An in-memory [`RecordStore`] that can be snapshotted to JSON.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::persistence::{MemoryStore, RecordStore};
///
/// let mut store = MemoryStore::new();
/// let dm = DistanceMatrix::from_rows(&[vec![0, 5], vec![7, 0]]).unwrap();
/// let id = store.save_matrix(&dm).unwrap();
/// assert_eq!(id, 1);
/// assert_eq!(store.fetch_matrix(id).unwrap(), dm);
/// assert!(store.fetch_matrix(2).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    matrices: BTreeMap<u64, MatrixRecord>,
    results: BTreeMap<u64, ResultRecord>,
    next_matrix_id: u64,
    next_result_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the whole store to JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TourError::CorruptRecord(e.to_string()))
    }

    /// Restores a store from [`to_json_string`](Self::to_json_string) output.
    ///
    /// # Errors
    ///
    /// [`TourError::CorruptRecord`] if the JSON does not decode, or if an id
    /// counter is behind a stored key (the next save would overwrite it).
    pub fn from_json_str(s: &str) -> Result<Self> {
        let store: Self =
            serde_json::from_str(s).map_err(|e| TourError::CorruptRecord(e.to_string()))?;
        check_counter("matrix", store.next_matrix_id, store.matrices.keys().next_back())?;
        check_counter("result", store.next_result_id, store.results.keys().next_back())?;
        Ok(store)
    }
}

fn check_counter(kind: &str, next_id: u64, last_key: Option<&u64>) -> Result<()> {
    match last_key {
        Some(&key) if key > next_id => Err(TourError::CorruptRecord(format!(
            "{kind} id counter {next_id} is behind stored id {key}"
        ))),
        _ => Ok(()),
    }
}

impl RecordStore for MemoryStore {
    fn save_matrix(&mut self, distances: &DistanceMatrix) -> Result<u64> {
        self.next_matrix_id += 1;
        let id = self.next_matrix_id;
        self.matrices.insert(id, MatrixRecord::from_matrix(distances));
        debug!(event = "matrix_saved", id, cities = distances.size());
        Ok(id)
    }

    fn fetch_matrix(&self, id: u64) -> Result<DistanceMatrix> {
        self.matrices
            .get(&id)
            .ok_or(TourError::RecordNotFound(id))?
            .to_matrix()
    }

    fn save_result(&mut self, result: &OptimizationResult) -> Result<u64> {
        self.next_result_id += 1;
        let id = self.next_result_id;
        self.results.insert(id, ResultRecord::from_result(result));
        debug!(event = "result_saved", id, length = result.length());
        Ok(id)
    }

    fn fetch_result(&self, id: u64) -> Result<ResultRecord> {
        self.results
            .get(&id)
            .cloned()
            .ok_or(TourError::RecordNotFound(id))
    }

    fn results(&self) -> Vec<(u64, ResultRecord)> {
        self.results
            .iter()
            .map(|(&id, r)| (id, r.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn asymmetric() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[vec![0, 1, 2], vec![3, 0, 4], vec![5, 6, 0]]).expect("valid")
    }

    #[test]
    fn test_matrix_record_row_major() {
        let record = MatrixRecord::from_matrix(&asymmetric());
        assert_eq!(record.city_count, 3);
        assert_eq!(record.distances, "0,1,2,3,0,4,5,6,0");
        let back = record.to_matrix().expect("valid");
        assert_eq!(back.get(1, 2), 4.0);
        assert_eq!(back.get(2, 1), 6.0);
        assert_eq!(back, asymmetric());
    }

    #[test]
    fn test_matrix_record_fractional() {
        let dm = DistanceMatrix::from_rows(&[vec![0.0, 2.5], vec![0.1, 0.0]]).expect("valid");
        let back = MatrixRecord::from_matrix(&dm).to_matrix().expect("valid");
        assert_eq!(back, dm);
    }

    #[test]
    fn test_matrix_record_wrong_count() {
        let record = MatrixRecord {
            city_count: 3,
            distances: "0,1,1,0".into(),
        };
        assert_eq!(
            record.to_matrix().unwrap_err(),
            TourError::CityCountMismatch {
                expected: 9,
                found: 4
            }
        );
    }

    #[test]
    fn test_matrix_record_corrupt() {
        let record = MatrixRecord {
            city_count: 2,
            distances: "0,x,1,0".into(),
        };
        assert!(matches!(
            record.to_matrix().unwrap_err(),
            TourError::CorruptRecord(_)
        ));
    }

    #[test]
    fn test_result_record() {
        let result = OptimizationResult::new(
            Route::new(vec![2, 0, 1]),
            7.0,
            2,
            Duration::from_millis(250),
        );
        let record = ResultRecord::from_result(&result);
        assert_eq!(record.best_route, "2,0,1");
        assert_eq!(record.shortest_path_length, 7.0);
        assert_eq!(record.time_taken, 0.25);
        assert_eq!(record.route().expect("valid"), Route::new(vec![2, 0, 1]));
    }

    #[test]
    fn test_result_record_not_permutation() {
        let record = ResultRecord {
            best_route: "0,0,1".into(),
            shortest_path_length: 1.0,
            time_taken: 0.0,
        };
        assert!(record.route().is_err());
    }

    #[test]
    fn test_memory_store_ids_and_listing() {
        let mut store = MemoryStore::new();
        assert_eq!(store.save_matrix(&asymmetric()).expect("saved"), 1);
        assert_eq!(store.save_matrix(&asymmetric()).expect("saved"), 2);

        let r = OptimizationResult::new(Route::new(vec![0, 1, 2]), 7.0, 0, Duration::ZERO);
        assert_eq!(store.save_result(&r).expect("saved"), 1);
        assert_eq!(store.save_result(&r).expect("saved"), 2);

        let listed = store.results();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].0, 1);
        assert_eq!(listed[1].1.best_route, "0,1,2");
        assert_eq!(store.fetch_result(3).unwrap_err(), TourError::RecordNotFound(3));
    }

    #[test]
    fn test_memory_store_json_snapshot() {
        let mut store = MemoryStore::new();
        store.save_matrix(&asymmetric()).expect("saved");
        let json = store.to_json_string().expect("serialize");
        let restored = MemoryStore::from_json_str(&json).expect("parse");
        assert_eq!(restored, store);
        assert_eq!(restored.fetch_matrix(1).expect("found"), asymmetric());
    }

    #[test]
    fn test_memory_store_snapshot_with_stale_counter() {
        let mut store = MemoryStore::new();
        store.save_matrix(&asymmetric()).expect("saved");
        store.save_matrix(&asymmetric()).expect("saved");
        let json = store
            .to_json_string()
            .expect("serialize")
            .replace("\"next_matrix_id\":2", "\"next_matrix_id\":1");
        assert!(matches!(
            MemoryStore::from_json_str(&json).unwrap_err(),
            TourError::CorruptRecord(_)
        ));
    }

    #[test]
    fn test_memory_store_restored_saves_do_not_overwrite() {
        let mut store = MemoryStore::new();
        let r = OptimizationResult::new(Route::new(vec![0, 1, 2]), 7.0, 0, Duration::ZERO);
        store.save_result(&r).expect("saved");
        let json = store.to_json_string().expect("serialize");

        let mut restored = MemoryStore::from_json_str(&json).expect("parse");
        let other = OptimizationResult::new(Route::new(vec![2, 1, 0]), 9.0, 1, Duration::ZERO);
        assert_eq!(restored.save_result(&other).expect("saved"), 2);
        assert_eq!(restored.fetch_result(1).expect("found").best_route, "0,1,2");
        assert_eq!(restored.fetch_result(2).expect("found").best_route, "2,1,0");
    }
}
