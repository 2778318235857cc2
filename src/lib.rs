//! # u-tsp
//!
//! Traveling salesman tours from an explicit distance matrix, improved by
//! best-improvement hill climbing over the pairwise swap neighborhood.
//!
//! ## Modules
//!
//! - [`distance`] — Validated dense distance matrix
//! - [`models`] — Domain model types (Route, OptimizationResult)
//! - [`evaluation`] — Cyclic tour length and swap deltas
//! - [`local_search`] — Best-improvement swap neighborhood
//! - [`hill_climb`] — Convergence driver and its configuration
//! - [`input`] — Parsing user-entered distance rows
//! - [`report`] — Human-readable result rendering
//! - [`persistence`] — Storage records for matrices and results
//!
//! ## Example
//!
//! ```
//! use u_tsp::distance::DistanceMatrix;
//! use u_tsp::hill_climb::{HillClimbConfig, HillClimber};
//!
//! let dm = DistanceMatrix::from_rows(&[
//!     vec![0, 10, 15, 20],
//!     vec![10, 0, 35, 25],
//!     vec![15, 35, 0, 30],
//!     vec![20, 25, 30, 0],
//! ]).unwrap();
//! let result = HillClimber::new(HillClimbConfig::default().with_seed(1))
//!     .solve(&dm)
//!     .unwrap();
//! assert_eq!(result.length(), 80.0);
//! ```

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod hill_climb;
pub mod input;
pub mod local_search;
pub mod models;
pub mod persistence;
pub mod report;

pub use error::{Result, TourError};
