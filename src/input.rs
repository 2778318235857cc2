//! Parsing of user-entered distance rows.
//!
//! Rows are whitespace-separated non-negative integers, one row per city.
//! Everything is validated here, so the optimizer only ever sees complete,
//! well-formed matrices.

use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};

/// Parses one row of `city_count` distances.
///
/// `row` is the 1-based row number used in error messages.
///
/// # Errors
///
/// [`TourError::MalformedRow`] if a token is not a non-negative integer or
/// the row does not hold exactly `city_count` values.
///
/// # Examples
///
/// ```
/// use u_tsp::input::parse_row;
///
/// assert_eq!(parse_row("0 10  15", 3, 1).unwrap(), vec![0, 10, 15]);
/// assert!(parse_row("0 ten 15", 3, 1).is_err());
/// assert!(parse_row("0 10", 3, 1).is_err());
/// ```
pub fn parse_row(line: &str, city_count: usize, row: usize) -> Result<Vec<u32>> {
    let values = line
        .split_whitespace()
        .map(|token| parse_distance(token, row))
        .collect::<Result<Vec<u32>>>()?;

    if values.len() != city_count {
        return Err(TourError::MalformedRow {
            row,
            reason: format!("expected {city_count} values, found {}", values.len()),
        });
    }
    Ok(values)
}

fn parse_distance(token: &str, row: usize) -> Result<u32> {
    if let Some(magnitude) = token.strip_prefix('-') {
        if magnitude.parse::<u32>().is_ok() {
            return Err(TourError::MalformedRow {
                row,
                reason: format!("negative distance {token}"),
            });
        }
    }
    token.parse::<u32>().map_err(|_| TourError::MalformedRow {
        row,
        reason: format!("{token:?} is not a non-negative integer"),
    })
}

/// Parses a full matrix: `city_count` non-empty lines of `city_count` values.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// - [`TourError::CityCountMismatch`] if the number of rows differs from
///   `city_count`.
/// - [`TourError::MalformedRow`] for the first bad row.
/// - [`TourError::InvalidDimension`] if `city_count < 2`.
///
/// # Examples
///
/// ```
/// use u_tsp::input::parse_matrix;
///
/// let dm = parse_matrix(2, "0 5\n7 0\n").unwrap();
/// assert_eq!(dm.get(1, 0), 7.0);
/// ```
pub fn parse_matrix(city_count: usize, text: &str) -> Result<DistanceMatrix> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() != city_count {
        return Err(TourError::CityCountMismatch {
            expected: city_count,
            found: lines.len(),
        });
    }

    let rows = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| parse_row(line, city_count, idx + 1))
        .collect::<Result<Vec<_>>>()?;
    DistanceMatrix::from_rows(&rows)
}
