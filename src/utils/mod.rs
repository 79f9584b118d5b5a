//! Shared numeric utilities for model evaluation
//!
//! This module provides the matrix container, output activations (softmax,
//! argmax) and classification metrics used after a forward pass.

pub mod activations;
pub mod matrix;
pub mod metrics;
