//! Domain model types for tour problems.
//!
//! A [`Route`] is a cyclic permutation of city indices; an
//! [`OptimizationResult`] is what one hill-climbing run hands back.

mod result;
mod route;

pub use result::OptimizationResult;
pub use route::Route;
