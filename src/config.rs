//! Configuration structures for evaluation
//!
//! This module provides the settings that control how metrics treat edge
//! cases: what accuracy returns for zero samples and how strictly a
//! probability matrix is checked.

use std::fs;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::utils::matrix::Matrix;
use crate::utils::metrics;

/// Default row-sum tolerance for probability matrices.
pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 1e-6;

/// What accuracy returns when both label vectors are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// Fail with `NumericDegenerate`.
    #[default]
    Error,
    /// Return `f64::NAN`.
    Nan,
    /// Return `0.0`.
    Zero,
}

/// Evaluation configuration.
///
/// Every field is optional in JSON:
///
/// - **empty_accuracy**: `"error"` (default), `"nan"` or `"zero"`
/// - **probability_tolerance**: allowed `|row_sum - 1|`, default `1e-6`
///
/// # Example
///
/// ```json
/// {
///   "empty_accuracy": "nan",
///   "probability_tolerance": 1e-9
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub empty_accuracy: EmptyPolicy,

    #[serde(default = "default_probability_tolerance")]
    pub probability_tolerance: f64,
}

fn default_probability_tolerance() -> f64 {
    DEFAULT_PROBABILITY_TOLERANCE
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            empty_accuracy: EmptyPolicy::default(),
            probability_tolerance: DEFAULT_PROBABILITY_TOLERANCE,
        }
    }
}

impl MetricsConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: MetricsConfig = serde_json::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Accuracy using the configured empty-input policy.
    pub fn accuracy<T: PartialEq>(&self, y_true: &[T], y_pred: &[T]) -> Result<f64> {
        metrics::accuracy_with_policy(y_true, y_pred, self.empty_accuracy)
    }

    /// Probability check using the configured tolerance.
    pub fn validate_probabilities(&self, probs: &Matrix) -> Result<()> {
        metrics::validate_probabilities(probs, self.probability_tolerance)
    }
}

/// Loads an evaluation configuration from a JSON file.
///
/// Reads the file at `path` and deserializes its JSON contents into a `MetricsConfig`.
///
/// # Returns
///
/// `Ok(MetricsConfig)` on success; `Io` if the file cannot be read, `Json` if
/// the JSON is invalid, `InvalidConfig` if a value is out of range.
///
/// # Examples
///
/// ```no_run
/// use cnn_eval_utils::config::load_config;
///
/// let cfg = load_config("config/eval_strict.json").unwrap();
/// assert_eq!(cfg.empty_accuracy, cnn_eval_utils::EmptyPolicy::Error);
/// ```
pub fn load_config(path: &str) -> Result<MetricsConfig> {
    debug!(path, "loading metrics config");
    let contents = fs::read_to_string(path)?;
    let config = MetricsConfig::from_json_str(&contents)?;
    info!(
        path,
        empty_accuracy = ?config.empty_accuracy,
        probability_tolerance = config.probability_tolerance,
        "loaded metrics config"
    );
    Ok(config)
}

fn validate_config(config: &MetricsConfig) -> Result<()> {
    let tolerance = config.probability_tolerance;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "probability_tolerance must be finite and positive, got {tolerance}"
        )));
    }
    Ok(())
}
