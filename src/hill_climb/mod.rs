//! Hill climbing over the swap neighborhood.
//!
//! Repeatedly applies the best strictly-improving pairwise swap until the
//! tour is a local optimum.
//!
//! - [`HillClimber`] — configured driver
//! - [`hill_climb`] / [`hill_climb_from`] — default-configured shortcuts
//!
//! # Reference
//!
//! Russell, S. & Norvig, P. (2010). *Artificial Intelligence: A Modern
//! Approach*, 3rd ed., §4.1.1 "Hill-climbing search".

mod config;
mod runner;

pub use config::{Evaluation, HillClimbConfig};
pub use runner::{hill_climb, hill_climb_from, HillClimber};
