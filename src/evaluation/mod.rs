//! Tour length evaluation.
//!
//! - [`route_length`] — full O(n) cyclic length
//! - [`swap_delta`] — O(1) length change of a position swap
//! - [`TourEvaluator`] — picks whichever of the two is exact for a matrix

mod evaluator;

pub use evaluator::{route_length, swap_delta, TourEvaluator};
