//! Dense matrices of exact symbolic scalars.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HsymError};
use crate::expr::Expr;

/// Immutable row-major matrix of [`Expr`] entries.
///
/// Every operation returns a new matrix; entries are never modified in place
/// once the matrix has been constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct SymMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<Expr>,
}

#[derive(Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    entries: Vec<Expr>,
}

impl TryFrom<MatrixRepr> for SymMatrix {
    type Error = HsymError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        if repr.rows.checked_mul(repr.cols) != Some(repr.entries.len()) {
            return Err(HsymError::Shape(
                ErrorInfo::new("entry-count", "entry count does not match the declared shape")
                    .with_context("shape", format!("{}x{}", repr.rows, repr.cols))
                    .with_context("entries", repr.entries.len()),
            ));
        }
        Ok(Self {
            rows: repr.rows,
            cols: repr.cols,
            entries: repr.entries,
        })
    }
}

impl SymMatrix {
    /// Builds a matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Expr) -> Self {
        let mut entries = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                entries.push(f(row, col));
            }
        }
        Self {
            rows,
            cols,
            entries,
        }
    }

    /// The `rows x cols` zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| Expr::zero())
    }

    /// The `dim x dim` identity matrix.
    pub fn identity(dim: usize) -> Self {
        Self::from_fn(dim, dim, |row, col| {
            if row == col {
                Expr::one()
            } else {
                Expr::zero()
            }
        })
    }

    /// Square matrix with the given diagonal and zeros elsewhere.
    pub fn from_diagonal(diagonal: impl IntoIterator<Item = Expr>) -> Self {
        let diagonal: Vec<Expr> = diagonal.into_iter().collect();
        let dim = diagonal.len();
        Self::from_fn(dim, dim, |row, col| {
            if row == col {
                diagonal[row].clone()
            } else {
                Expr::zero()
            }
        })
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<Expr>>) -> Result<Self, HsymError> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut entries = Vec::with_capacity(row_count * cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(HsymError::Shape(
                    ErrorInfo::new("ragged-rows", "all rows must have the same length")
                        .with_context("row", idx)
                        .with_context("expected", cols)
                        .with_context("found", row.len()),
                ));
            }
            entries.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            entries,
        })
    }

    /// Builds an integer matrix from nested rows.
    pub fn from_i64_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, HsymError> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.as_ref().iter().copied().map(Expr::int).collect())
                .collect(),
        )
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns `true` when the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Entry at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Expr> {
        if row < self.rows && col < self.cols {
            self.entries.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Row-major view of all entries.
    pub fn entries(&self) -> &[Expr] {
        &self.entries
    }

    /// Applies `f` to every entry.
    pub fn map(&self, f: impl FnMut(&Expr) -> Expr) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            entries: self.entries.iter().map(f).collect(),
        }
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |row, col| self[(col, row)].clone())
    }

    /// Entrywise complex conjugate.
    pub fn conjugate(&self) -> Self {
        self.map(Expr::conj)
    }

    /// Conjugate transpose `A†`.
    pub fn adjoint(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |row, col| self[(col, row)].conj())
    }

    /// Matrix product `self · rhs`.
    pub fn matmul(&self, rhs: &SymMatrix) -> Result<Self, HsymError> {
        if self.cols != rhs.rows {
            return Err(HsymError::shape_mismatch("matmul", self.shape(), rhs.shape()));
        }
        Ok(Self::from_fn(self.rows, rhs.cols, |row, col| {
            (0..self.cols)
                .map(|k| &self[(row, k)] * &rhs[(k, col)])
                .sum()
        }))
    }

    /// Entrywise sum.
    pub fn checked_add(&self, rhs: &SymMatrix) -> Result<Self, HsymError> {
        self.zip_with(rhs, "add", |lhs, rhs| lhs + rhs)
    }

    /// Entrywise difference.
    pub fn checked_sub(&self, rhs: &SymMatrix) -> Result<Self, HsymError> {
        self.zip_with(rhs, "sub", |lhs, rhs| lhs - rhs)
    }

    fn zip_with(
        &self,
        rhs: &SymMatrix,
        op: &str,
        f: impl Fn(&Expr, &Expr) -> Expr,
    ) -> Result<Self, HsymError> {
        if self.shape() != rhs.shape() {
            return Err(HsymError::shape_mismatch(op, self.shape(), rhs.shape()));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            entries: self
                .entries
                .iter()
                .zip(&rhs.entries)
                .map(|(lhs, rhs)| f(lhs, rhs))
                .collect(),
        })
    }

    /// Multiplies every entry by `factor`.
    pub fn scale(&self, factor: &Expr) -> Self {
        self.map(|entry| factor * entry)
    }

    /// Sum of the diagonal entries of a square matrix.
    pub fn trace(&self) -> Result<Expr, HsymError> {
        if !self.is_square() {
            return Err(HsymError::Shape(
                ErrorInfo::new("not-square", "trace requires a square matrix")
                    .with_context("shape", format!("{}x{}", self.rows, self.cols)),
            ));
        }
        Ok((0..self.rows).map(|idx| &self[(idx, idx)]).sum())
    }

    /// Returns `true` if the matrix equals its conjugate transpose.
    pub fn is_hermitian(&self) -> bool {
        self.is_square() && *self == self.adjoint()
    }

    /// Returns `true` if every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(Expr::is_zero)
    }

    /// First `(row, col)` at which the two matrices differ. Matrices of
    /// different shape are reported as differing at `(0, 0)`.
    pub fn first_difference(&self, other: &SymMatrix) -> Option<(usize, usize)> {
        if self.shape() != other.shape() {
            return Some((0, 0));
        }
        self.entries
            .iter()
            .zip(&other.entries)
            .position(|(lhs, rhs)| lhs != rhs)
            .map(|idx| (idx / self.cols, idx % self.cols))
    }
}

impl Index<(usize, usize)> for SymMatrix {
    type Output = Expr;

    fn index(&self, (row, col): (usize, usize)) -> &Expr {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.entries[row * self.cols + col]
    }
}

impl fmt::Display for SymMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self[(row, col)])?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
