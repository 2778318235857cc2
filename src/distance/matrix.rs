//! Dense distance matrix.

use crate::error::{Result, TourError};

/// Largest integer below which every f64 sum of integers is exact.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

/// A dense n×n distance matrix stored in row-major order.
///
/// Entry `(i, j)` is the cost of travelling directly from city `i` to city
/// `j`. The matrix is read exactly as given: `(i, j)` and `(j, i)` may
/// differ. Every constructor that accepts caller data validates it, so a
/// `DistanceMatrix` never holds a negative or non-finite cost.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0, 10, 15],
///     vec![10, 0, 35],
///     vec![15, 35, 0],
/// ]).unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 2), 15.0);
/// assert!(dm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
    integral: bool,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    ///
    /// The optimizer rejects matrices with fewer than two cities, so a
    /// matrix built this way must be grown to `size >= 2` to be solvable.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
            integral: true,
        }
    }

    /// Creates a distance matrix from a grid of rows.
    ///
    /// # Errors
    ///
    /// - [`TourError::InvalidDimension`] if fewer than two rows are given or
    ///   any row length differs from the number of rows.
    /// - [`TourError::NegativeDistance`] / [`TourError::NonFiniteDistance`]
    ///   for an invalid cell.
    pub fn from_rows<T>(rows: &[Vec<T>]) -> Result<Self>
    where
        T: Copy + Into<f64>,
    {
        let n = rows.len();
        if n < 2 {
            return Err(TourError::InvalidDimension {
                rows: n,
                cols: rows.first().map_or(0, Vec::len),
            });
        }
        if let Some(row) = rows.iter().find(|r| r.len() != n) {
            return Err(TourError::InvalidDimension {
                rows: n,
                cols: row.len(),
            });
        }

        let data: Vec<f64> = rows
            .iter()
            .flat_map(|row| row.iter().map(|&v| Into::<f64>::into(v)))
            .collect();
        Self::from_data(n, data)
    }

    /// Creates a distance matrix from a row-major flattened grid.
    ///
    /// # Errors
    ///
    /// - [`TourError::InvalidDimension`] if `size < 2`.
    /// - [`TourError::CityCountMismatch`] if `data.len() != size * size`.
    /// - [`TourError::NegativeDistance`] / [`TourError::NonFiniteDistance`]
    ///   for an invalid cell.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if size < 2 {
            return Err(TourError::InvalidDimension {
                rows: size,
                cols: size,
            });
        }
        if data.len() != size * size {
            return Err(TourError::CityCountMismatch {
                expected: size * size,
                found: data.len(),
            });
        }
        for (idx, &value) in data.iter().enumerate() {
            check_cell(idx / size, idx % size, value)?;
        }
        let integral = is_exact_integral(&data, size);
        Ok(Self {
            data,
            size,
            integral,
        })
    }

    /// Returns the distance from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from city `from` to city `to`.
    ///
    /// # Errors
    ///
    /// Rejects negative and non-finite values, leaving the matrix unchanged.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) -> Result<()> {
        check_cell(from, to, distance)?;
        self.data[from * self.size + to] = distance;
        if !is_exact_cell(distance, self.size) {
            self.integral = false;
        } else if !self.integral {
            // The overwritten cell may have been the only inexact one.
            self.integral = is_exact_integral(&self.data, self.size);
        }
        Ok(())
    }

    /// Number of cities in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major view of every cell.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns row `from` (the costs of leaving city `from`).
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Copies the matrix out as a grid of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every cell is a whole number small enough that any
    /// tour length, and any difference of tour lengths, is computed exactly
    /// in `f64` regardless of summation order.
    pub fn is_integral(&self) -> bool {
        self.integral
    }
}

fn check_cell(from: usize, to: usize, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(TourError::NonFiniteDistance { from, to });
    }
    if value < 0.0 {
        return Err(TourError::NegativeDistance { from, to, value });
    }
    Ok(())
}

impl PartialEq for DistanceMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.data == other.data
    }
}

/// A tour sums `size` cells, so every cell times `size` must stay below 2^53.
fn is_exact_cell(value: f64, size: usize) -> bool {
    value.fract() == 0.0 && value * (size as f64) < EXACT_INTEGER_LIMIT
}

fn is_exact_integral(data: &[f64], size: usize) -> bool {
    data.iter().all(|&v| is_exact_cell(v, size))
}
