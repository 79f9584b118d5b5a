//! Output-layer activation functions
//!
//! This module provides the functions that turn raw class scores into
//! probabilities and predictions:
//! - Softmax over a [`Matrix`] (allocating) or a flat row-major buffer (in-place)
//! - Row-wise argmax for predicted class indices

use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::matrix::Matrix;

/// Softmax activation applied row-wise, returning a new probability matrix.
///
/// Each row is transformed independently:
/// `softmax(row)_i = exp(row_i - max(row)) / sum_j exp(row_j - max(row))`.
/// Subtracting the row maximum keeps every exponent argument `<= 0`, so large
/// scores cannot overflow and the result is unchanged.
///
/// Shape validity (at least one column) is guaranteed by [`Matrix`], so this
/// cannot fail. Non-finite scores are not rejected and propagate as NaN.
///
/// # Example
///
/// ```
/// use cnn_eval_utils::{softmax, Matrix};
///
/// let scores = Matrix::from_rows(&[[0.0, 0.0]]).unwrap();
/// let probs = softmax(&scores);
/// assert_eq!(probs.row(0), &[0.5, 0.5]);
/// ```
pub fn softmax(x: &Matrix) -> Matrix {
    let mut out = x.clone();
    let cols = out.cols();
    for row in out.as_mut_slice().chunks_exact_mut(cols) {
        softmax_row(row);
    }
    debug!(rows = x.rows(), cols, "softmax");
    out
}

/// Softmax activation applied in-place to a flat row-major buffer.
///
/// # Arguments
/// * `outputs` - Flat array containing row-major matrix data
/// * `rows` - Number of rows in the matrix
/// * `cols` - Number of columns in the matrix
///
/// # Errors
///
/// `InvalidInput` if `cols == 0` or `outputs.len() != rows * cols`. The buffer
/// is left untouched on error.
pub fn softmax_rows(outputs: &mut [f64], rows: usize, cols: usize) -> Result<()> {
    if cols == 0 {
        return Err(Error::invalid_input("softmax needs at least one column"));
    }
    if rows.checked_mul(cols) != Some(outputs.len()) {
        return Err(Error::invalid_input(format!(
            "outputs length {} does not match shape ({rows}, {cols})",
            outputs.len()
        )));
    }

    for row in outputs.chunks_exact_mut(cols) {
        softmax_row(row);
    }
    Ok(())
}

fn softmax_row(row: &mut [f64]) {
    let mut max_value = row[0];
    for &value in row.iter().skip(1) {
        if value > max_value {
            max_value = value;
        }
    }

    let mut sum = 0.0f64;
    for value in row.iter_mut() {
        *value = (*value - max_value).exp();
        sum += *value;
    }

    // sum >= 1.0 here: the max element contributes exp(0).
    for value in row.iter_mut() {
        *value /= sum;
    }
}

/// Index of the largest entry in each row.
///
/// Ties go to the lowest index. A NaN entry is never preferred over a number,
/// and a row of only NaN yields index 0.
pub fn argmax_rows(x: &Matrix) -> Vec<usize> {
    x.iter_rows()
        .map(|row| {
            let mut best = row[0];
            let mut arg = 0usize;
            for (j, &v) in row.iter().enumerate().skip(1) {
                if v > best || (best.is_nan() && !v.is_nan()) {
                    best = v;
                    arg = j;
                }
            }
            arg
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn matrix(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_softmax_single_row_sum() {
        let probs = softmax(&matrix(&[&[1.0, 2.0, 3.0]]));
        let sum: f64 = probs.row(0).iter().sum();
        assert!((sum - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_softmax_uniform_input() {
        let probs = softmax(&matrix(&[&[5.0, 5.0, 5.0]]));
        for &val in probs.row(0) {
            assert!((val - 1.0 / 3.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_softmax_single_column_is_one() {
        let probs = softmax(&matrix(&[&[-3.0], &[0.0], &[1e300]]));
        assert!(probs.as_slice().iter().all(|&p| p == 1.0));
    }

    #[test]
    fn test_softmax_numerical_stability() {
        let probs = softmax(&matrix(&[&[1000.0, 1001.0, 1002.0]]));
        let sum: f64 = probs.row(0).iter().sum();
        assert!((sum - 1.0).abs() < EPSILON);
        assert!(!probs.as_slice().iter().any(|x| x.is_nan() || x.is_infinite()));
    }

    #[test]
    fn test_softmax_does_not_modify_input() {
        let scores = matrix(&[&[1.0, 2.0]]);
        let _ = softmax(&scores);
        assert_eq!(scores.row(0), &[1.0, 2.0]);
    }

    #[test]
    fn test_softmax_rows_in_place() {
        let mut data = vec![0.0, 0.0, 1.0, 1.0];
        softmax_rows(&mut data, 2, 2).unwrap();
        assert_eq!(data, vec![0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_softmax_rows_zero_columns() {
        let mut data: Vec<f64> = vec![];
        assert!(matches!(
            softmax_rows(&mut data, 3, 0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_softmax_rows_length_mismatch_leaves_buffer() {
        let mut data = vec![1.0, 2.0, 3.0];
        assert!(softmax_rows(&mut data, 2, 2).is_err());
        assert_eq!(data, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_argmax_first_max_wins() {
        let preds = argmax_rows(&matrix(&[&[1.0, 3.0, 3.0], &[7.0, 2.0, 7.0]]));
        assert_eq!(preds, vec![1, 0]);
    }

    #[test]
    fn test_argmax_skips_nan() {
        let preds = argmax_rows(&matrix(&[&[f64::NAN, -1.0, -2.0]]));
        assert_eq!(preds, vec![1]);
    }
}
