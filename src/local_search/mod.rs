//! Local search operators for improving tours.
//!
//! - [`best_swap_neighbor`] — best-improvement pairwise position swap
//! - [`best_swap_move`] — best strictly-improving [`SwapMove`] of a tour
//! - [`best_swap_move_par`] — the same scan on the rayon pool

mod swap;

pub use swap::{best_swap_move, best_swap_move_par, best_swap_neighbor, SwapMove};
