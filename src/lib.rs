//! CNN evaluation utilities
//!
//! This library provides the numeric helpers used when evaluating a
//! classification network: accuracy over label vectors and a row-wise,
//! numerically stable softmax over score matrices.
//!
//! # Modules
//!
//! - `utils`: Matrix container, activation functions (softmax, argmax) and metrics (accuracy)
//! - `config`: Evaluation configuration (empty-input policy, probability tolerance)
//! - `error`: Error type shared by every fallible operation

pub mod config;
pub mod error;
pub mod utils;

pub use config::{load_config, EmptyPolicy, MetricsConfig};
pub use error::{Error, Result};
pub use utils::activations::{argmax_rows, softmax, softmax_rows};
pub use utils::matrix::Matrix;
pub use utils::metrics::{
    accuracy, accuracy_from_scores, accuracy_with_policy, validate_probabilities,
};
