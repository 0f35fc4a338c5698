use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A dimension mismatch between a matrix (or vector) and what consumes it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{context}: expected {expected:?}, found {found:?}")]
pub struct ShapeMismatch {
    pub context: String,
    pub expected: (usize, usize),
    pub found: (usize, usize),
}

impl ShapeMismatch {
    #[must_use]
    pub fn new<S: Into<String>>(context: S, expected: (usize, usize), found: (usize, usize)) -> Self {
        Self {
            context: context.into(),
            expected,
            found,
        }
    }
}

/// Dense row-major matrix of `f64` weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = ShapeMismatch;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        Matrix::new(repr.rows, repr.cols, repr.values)
    }
}

impl Matrix {
    /// Builds a matrix from row-major values.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, ShapeMismatch> {
        if values.len() != rows * cols {
            return Err(ShapeMismatch::new(
                "matrix values",
                (rows, cols),
                (values.len(), 1),
            ));
        }
        Ok(Self { rows, cols, values })
    }

    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                values.push(f(i, j));
            }
        }
        Self { rows, cols, values }
    }

    /// Builds a matrix from nested rows; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ShapeMismatch> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(ShapeMismatch::new(
                    format!("matrix row {i}"),
                    (1, n_cols),
                    (1, row.len()),
                ));
            }
            values.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            values,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics
        self.values.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
