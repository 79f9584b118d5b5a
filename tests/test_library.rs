//! Tests for the cnn_eval_utils public API as a whole
//!
//! This file tests the library the way an evaluation loop uses it:
//! - logits -> softmax -> validation -> accuracy
//! - re-exports at the crate root
//! - calling the helpers from several threads at once

use approx::assert_relative_eq;
use cnn_eval_utils::utils::activations::argmax_rows;
use cnn_eval_utils::{accuracy, softmax, Matrix, MetricsConfig};
use std::thread;

// ============================================================================
// Evaluation Pipeline Tests
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_evaluate_batch() {
        let logits = Matrix::from_rows(&[
            [8.1, -2.0, 0.3, 1.1],
            [0.0, 0.2, 5.5, -3.0],
            [-1.0, 4.0, 3.9, 0.0],
            [2.0, 2.5, 2.4, 2.49],
            [-50.0, -49.0, -51.0, -60.0],
        ])
        .unwrap();
        let labels = [0usize, 2, 2, 1, 1];

        let config = MetricsConfig::default();
        let probs = softmax(&logits);
        config.validate_probabilities(&probs).unwrap();

        let preds = argmax_rows(&probs);
        assert_eq!(preds, vec![0, 2, 1, 1, 1]);
        assert_relative_eq!(config.accuracy(&labels, &preds).unwrap(), 0.8);
    }

    #[test]
    fn test_flat_logits_from_forward_pass() {
        // Row-major output of a 3-sample, 2-class dense layer.
        let logits = vec![0.2, 1.4, 3.0, -3.0, 0.0, 0.0];
        let probs = softmax(&Matrix::new(logits, 3, 2).unwrap());

        assert!(probs.get(0, 1).unwrap() > 0.5);
        assert!(probs.get(1, 0).unwrap() > 0.99);
        assert_eq!(probs.row(2), &[0.5, 0.5]);
    }
}

// ============================================================================
// Concurrency Tests
// ============================================================================

mod concurrency_tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Matrix>();
        assert_send_sync::<MetricsConfig>();
        assert_send_sync::<cnn_eval_utils::Error>();
    }

    #[test]
    fn test_parallel_calls_agree() {
        let scores = Matrix::from_rows(&[[1.0, 2.0, 3.0], [3.0, 2.0, 1.0]]).unwrap();
        let expected = softmax(&scores);

        thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        let probs = softmax(&scores);
                        let acc = accuracy(&[2usize, 0], &argmax_rows(&probs)).unwrap();
                        (probs, acc)
                    })
                })
                .collect();

            for handle in handles {
                let (probs, acc) = handle.join().unwrap();
                assert_eq!(probs, expected);
                assert_eq!(acc, 1.0);
            }
        });
    }
}
