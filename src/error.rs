//! Error types.

use thiserror::Error;

/// Errors reported by matrix construction, the optimizer, and the I/O adapters.
///
/// Every variant is terminal for the call that produced it: nothing is
/// retried, and no partially computed route is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourError {
    /// The matrix is not square or has fewer than two cities.
    ///
    /// `cols` is the length of the first row whose length differs from
    /// `rows` (or the common row length when only `rows` is too small).
    #[error("invalid matrix dimension: {rows} rows, row of length {cols} (need a square matrix with at least 2 cities)")]
    InvalidDimension {
        /// Number of rows supplied.
        rows: usize,
        /// Offending row length.
        cols: usize,
    },

    /// A cell holds a negative cost.
    #[error("negative distance {value} from city {from} to city {to}")]
    NegativeDistance {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
        /// The offending value.
        value: f64,
    },

    /// A cell holds NaN or an infinity.
    #[error("non-finite distance from city {from} to city {to}")]
    NonFiniteDistance {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
    },

    /// A caller-supplied starting route is not a permutation of the cities.
    #[error("starting route is not a permutation of 0..{cities}")]
    InvalidRoute {
        /// Number of cities in the matrix.
        cities: usize,
    },

    /// A user-entered row could not be parsed.
    #[error("invalid input in row {row}: {reason}")]
    MalformedRow {
        /// 1-based row number, as shown to the user.
        row: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A stored or entered city count disagrees with the data.
    #[error("expected {expected} values, found {found}")]
    CityCountMismatch {
        /// Count implied by the city count.
        expected: usize,
        /// Count actually present.
        found: usize,
    },

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// No record exists under the given id.
    #[error("no record found with id {0}")]
    RecordNotFound(u64),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TourError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_dimension() {
        let e = TourError::InvalidDimension { rows: 3, cols: 2 };
        let msg = e.to_string();
        assert!(msg.contains("3 rows"));
        assert!(msg.contains("at least 2 cities"));
    }

    #[test]
    fn test_display_malformed_row() {
        let e = TourError::MalformedRow {
            row: 2,
            reason: "expected 3 values".into(),
        };
        assert_eq!(e.to_string(), "invalid input in row 2: expected 3 values");
    }
}
