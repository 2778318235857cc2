//! Hill climbing configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TourError};

/// How swap candidates are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// O(1) delta scoring when the matrix allows exact arithmetic,
    /// full recomputation otherwise.
    #[default]
    Auto,
    /// Always recompute the full tour length of every candidate.
    Full,
}

/// Configuration parameters for the hill climber.
///
/// # Examples
///
/// ```
/// use u_tsp::hill_climb::{Evaluation, HillClimbConfig};
///
/// let config = HillClimbConfig::default()
///     .with_seed(42)
///     .with_parallel(true)
///     .with_evaluation(Evaluation::Full);
/// assert_eq!(config.seed, Some(42));
/// assert!(config.parallel);
///
/// let parsed = HillClimbConfig::from_json_str(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(parsed.seed, Some(7));
/// assert_eq!(parsed.evaluation, Evaluation::Auto);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbConfig {
    /// Random seed for the initial tour (None for OS entropy).
    pub seed: Option<u64>,
    /// Candidate scoring strategy.
    pub evaluation: Evaluation,
    /// Scan the swap neighborhood on the rayon pool.
    pub parallel: bool,
}

impl HillClimbConfig {
    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the candidate scoring strategy.
    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Enables or disables the parallel neighborhood scan.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::Config`] for malformed JSON or unknown values.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| TourError::Config(e.to_string()))
    }

    /// Serializes this configuration to JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| TourError::Config(e.to_string()))
    }
}
