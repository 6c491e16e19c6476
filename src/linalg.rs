//! Small dense matrix kernel for closed-form regression
//!
//! Row-major `f64` storage. Sizes here are tiny (the normal-equation system
//! is 6×6), so clarity wins over blocking or SIMD.

use crate::error::{AnalysisError, Result};
use std::ops::{Index, IndexMut};

/// Dense row-major matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Pivots at or below this fraction of the largest input entry count as zero
///
/// Elimination leaves rounding residue (around `1e-13` of the entry scale)
/// where an exactly singular system would have a zero pivot.
pub const RELATIVE_PIVOT_TOLERANCE: f64 = 1e-10;

/// Result of a Gauss-Jordan inversion
#[derive(Debug, Clone, PartialEq)]
pub struct Inversion {
    pub inverse: Matrix,
    /// Pivot columns whose (numerically) zero pivot was replaced by epsilon
    ///
    /// Non-empty means the inverse is approximate (singular or collinear input).
    pub substituted_pivots: Vec<usize>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from row vectors
    ///
    /// # Errors
    /// Returns error if rows have differing lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n = rows.len();
        let mut data = Vec::with_capacity(n * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(AnalysisError::Dimension(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n,
            cols,
            data,
        })
    }

    /// Single-column matrix
    pub fn column(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Column values, top to bottom
    pub fn col_values(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self[(i, j)]).collect()
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }

    /// Matrix product `self · other`
    ///
    /// # Errors
    /// Returns error if inner dimensions differ.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(AnalysisError::Dimension(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut c = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let aik = self[(i, k)];
                for j in 0..other.cols {
                    c[(i, j)] += aik * other[(k, j)];
                }
            }
        }
        Ok(c)
    }

    /// Invert by Gauss-Jordan elimination with partial pivoting
    ///
    /// For each column the row with the largest absolute value at or below
    /// the diagonal becomes the pivot row (first such row on ties). A pivot
    /// whose magnitude is within [`RELATIVE_PIVOT_TOLERANCE`] of the largest
    /// entry of `self` is replaced by `pivot_epsilon` and its column
    /// recorded in [`Inversion::substituted_pivots`].
    ///
    /// # Errors
    /// Returns error if the matrix is not square.
    pub fn invert(&self, pivot_epsilon: f64) -> Result<Inversion> {
        if self.rows != self.cols {
            return Err(AnalysisError::Dimension(format!(
                "cannot invert non-square {}x{} matrix",
                self.rows, self.cols
            )));
        }

        let n = self.rows;
        let scale = self.max_abs();
        let tolerance = scale * RELATIVE_PIVOT_TOLERANCE;
        let mut m = self.clone();
        let mut inv = Self::identity(n);
        let mut substituted_pivots = Vec::new();

        for i in 0..n {
            let mut p = i;
            for r in (i + 1)..n {
                if m[(r, i)].abs() > m[(p, i)].abs() {
                    p = r;
                }
            }
            if p != i {
                m.swap_rows(i, p);
                inv.swap_rows(i, p);
            }

            let mut pivot = m[(i, i)];
            if pivot.abs() <= tolerance {
                tracing::warn!(column = i, pivot, pivot_epsilon, "zero pivot replaced by epsilon");
                substituted_pivots.push(i);
                pivot = pivot_epsilon;
            }

            let inv_pivot = 1.0 / pivot;
            for j in 0..n {
                m[(i, j)] *= inv_pivot;
                inv[(i, j)] *= inv_pivot;
            }

            for r in 0..n {
                if r == i {
                    continue;
                }
                let f = m[(r, i)];
                if f == 0.0 {
                    continue;
                }
                for j in 0..n {
                    m[(r, j)] -= f * m[(i, j)];
                    inv[(r, j)] -= f * inv[(i, j)];
                }
            }
        }

        Ok(Inversion {
            inverse: inv,
            substituted_pivots,
        })
    }

    /// Largest absolute entry (0 for an empty matrix)
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}
