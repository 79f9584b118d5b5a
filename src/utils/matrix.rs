//! Row-major matrix container for score and probability matrices.
//!
//! Shapes are checked once at construction so that the numeric routines in
//! [`activations`](super::activations) and [`metrics`](super::metrics) can
//! walk rows with `chunks_exact` without re-validating.

use crate::error::{Error, Result};

/// Dense `(rows, cols)` matrix of `f64` stored in row-major order.
///
/// Invariants: `cols >= 1` and `data.len() == rows * cols`. A matrix with zero
/// rows is allowed as long as the column count is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Wrap row-major `data` as a `(rows, cols)` matrix.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `cols == 0` or `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if cols == 0 {
            return Err(Error::invalid_input("matrix must have at least one column"));
        }
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            Error::invalid_input(format!("matrix shape ({rows}, {cols}) overflows usize"))
        })?;
        if data.len() != expected {
            return Err(Error::invalid_input(format!(
                "matrix data has {} elements, shape ({rows}, {cols}) needs {expected}",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from a list of rows, e.g. `&[vec![1.0, 2.0], vec![3.0, 4.0]]`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the list is empty (the column count is unknown), if the
    /// first row is empty, or if the rows do not all have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| Error::invalid_input("cannot infer column count from zero rows"))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(Error::invalid_input("matrix must have at least one column"));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::invalid_input(format!(
                    "row {index} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Borrow row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.rows()`, like slice indexing.
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }
}
