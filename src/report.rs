//! Human-readable rendering of results.
//!
//! Cities are shown 1-indexed; the route order is never changed.

use std::fmt;

use crate::models::{OptimizationResult, Route};

/// Renders a route as a 1-indexed path, e.g. `"1 -> 2 -> 4 -> 3"`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Route;
/// use u_tsp::report::format_route;
///
/// assert_eq!(format_route(&Route::new(vec![0, 1, 3, 2])), "1 -> 2 -> 4 -> 3");
/// ```
pub fn format_route(route: &Route) -> String {
    route
        .cities()
        .iter()
        .map(|c| (c + 1).to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_route(self))
    }
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Best Route: {}", self.route())?;
        writeln!(f, "Shortest Path Length: {}", self.length())?;
        write!(f, "Time Taken: {:.4} seconds", self.elapsed_secs())
    }
}
