//! Classification metrics.

use tracing::{debug, warn};

use crate::config::EmptyPolicy;
use crate::error::{Error, Result};
use crate::utils::activations::argmax_rows;
use crate::utils::matrix::Matrix;

/// Fraction of positions where `y_pred` equals `y_true`.
///
/// Both inputs hold class labels directly, not one-hot rows. Empty inputs fail
/// with `NumericDegenerate`; use [`accuracy_with_policy`] to map them to NaN or
/// zero instead.
///
/// # Errors
///
/// - `InvalidInput` if the lengths differ
/// - `NumericDegenerate` if both are empty
///
/// # Example
///
/// ```
/// use cnn_eval_utils::accuracy;
///
/// let acc = accuracy(&[1, 2, 2], &[1, 2, 3]).unwrap();
/// assert!((acc - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn accuracy<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    accuracy_with_policy(y_true, y_pred, EmptyPolicy::Error)
}

/// [`accuracy`] with an explicit rule for zero-length inputs.
pub fn accuracy_with_policy<T: PartialEq>(
    y_true: &[T],
    y_pred: &[T],
    policy: EmptyPolicy,
) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(Error::invalid_input(format!(
            "y_true has {} labels but y_pred has {}",
            y_true.len(),
            y_pred.len()
        )));
    }

    if y_true.is_empty() {
        return match policy {
            EmptyPolicy::Error => Err(Error::NumericDegenerate(
                "accuracy of zero samples is undefined".to_string(),
            )),
            EmptyPolicy::Nan => {
                warn!("accuracy of zero samples, returning NaN");
                Ok(f64::NAN)
            }
            EmptyPolicy::Zero => {
                warn!("accuracy of zero samples, returning 0.0");
                Ok(0.0)
            }
        };
    }

    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();
    let acc = correct as f64 / y_true.len() as f64;
    debug!(samples = y_true.len(), correct, accuracy = acc, "accuracy");
    Ok(acc)
}

/// Accuracy of the row-wise argmax of `scores` against `y_true`.
///
/// `scores` may be raw logits or softmax probabilities; the argmax is the same.
///
/// # Errors
///
/// `InvalidInput` if `scores.rows() != y_true.len()`, plus the errors of
/// [`accuracy`].
pub fn accuracy_from_scores(scores: &Matrix, y_true: &[usize]) -> Result<f64> {
    if scores.rows() != y_true.len() {
        return Err(Error::invalid_input(format!(
            "scores have {} rows but y_true has {} labels",
            scores.rows(),
            y_true.len()
        )));
    }
    let y_pred = argmax_rows(scores);
    accuracy(y_true, &y_pred)
}

/// Check that every row of `probs` is a discrete probability distribution.
///
/// Entries must lie in `[0, 1]` and each row must sum to `1.0` within
/// `tolerance`.
///
/// # Errors
///
/// - `InvalidConfig` if `tolerance` is not finite and positive
/// - `InvalidInput` naming the first offending row
pub fn validate_probabilities(probs: &Matrix, tolerance: f64) -> Result<()> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(Error::InvalidConfig(format!(
            "tolerance must be finite and positive, got {tolerance}"
        )));
    }

    for (index, row) in probs.iter_rows().enumerate() {
        if let Some(&bad) = row.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(Error::invalid_input(format!(
                "row {index} has entry {bad} outside [0, 1]"
            )));
        }
        let sum: f64 = row.iter().sum();
        if (sum - 1.0).abs() > tolerance {
            return Err(Error::invalid_input(format!(
                "row {index} sums to {sum}, expected 1 within {tolerance}"
            )));
        }
    }
    Ok(())
}
