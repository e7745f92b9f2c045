use std::ops::Deref;

use hsym_core::{ErrorInfo, Expr, HsymError, SymMatrix};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::opts::VerifyOpts;
use crate::orthogonal::check_orthogonal;

/// Orthogonal (not normalised) basis of the Hermitian `dim x dim` matrices.
///
/// The element order is part of the contract: first the `dim` diagonal units,
/// then for every pair `i < j` the real off-diagonal element followed by the
/// imaginary one. Deserialised bases are re-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BasisRepr")]
pub struct HermitianBasis {
    dim: usize,
    elements: Vec<SymMatrix>,
}

#[derive(Deserialize)]
struct BasisRepr {
    dim: usize,
    elements: Vec<SymMatrix>,
}

impl TryFrom<BasisRepr> for HermitianBasis {
    type Error = HsymError;

    fn try_from(repr: BasisRepr) -> Result<Self, Self::Error> {
        check_size(repr.dim, repr.elements.len())?;
        let well_formed =
            |element: &SymMatrix| element.shape() == (repr.dim, repr.dim) && element.is_hermitian();
        if let Some(idx) = repr.elements.iter().position(|element| !well_formed(element)) {
            return Err(HsymError::Consistency(
                ErrorInfo::new("non-hermitian-element", "basis element is not a Hermitian matrix")
                    .with_context("index", idx)
                    .with_context("dim", repr.dim),
            ));
        }
        check_orthogonal(&repr.elements)?;
        Ok(Self {
            dim: repr.dim,
            elements: repr.elements,
        })
    }
}

impl HermitianBasis {
    /// Matrix dimension of the basis elements.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Basis elements in canonical order.
    pub fn as_slice(&self) -> &[SymMatrix] {
        &self.elements
    }

    /// Consumes the basis, returning its elements.
    pub fn into_inner(self) -> Vec<SymMatrix> {
        self.elements
    }

    /// Short labels for the elements, in basis order: `d{i}` for diagonal
    /// units, `re{i}_{j}` and `im{i}_{j}` for the off-diagonal pairs.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = (0..self.dim).map(|i| format!("d{i}")).collect();
        for i in 0..self.dim {
            for j in (i + 1)..self.dim {
                labels.push(format!("re{i}_{j}"));
                labels.push(format!("im{i}_{j}"));
            }
        }
        labels
    }
}

impl Deref for HermitianBasis {
    type Target = [SymMatrix];

    fn deref(&self) -> &[SymMatrix] {
        &self.elements
    }
}

impl AsRef<[SymMatrix]> for HermitianBasis {
    fn as_ref(&self) -> &[SymMatrix] {
        &self.elements
    }
}

impl<'a> IntoIterator for &'a HermitianBasis {
    type Item = &'a SymMatrix;
    type IntoIter = std::slice::Iter<'a, SymMatrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

fn check_size(dim: usize, len: usize) -> Result<(), HsymError> {
    if dim.checked_mul(dim) != Some(len) {
        return Err(HsymError::Consistency(
            ErrorInfo::new("basis-size", "basis must contain dim^2 elements")
                .with_context("dim", dim)
                .with_context("len", len),
        ));
    }
    Ok(())
}

/// Matrix with the listed entries set and zeros elsewhere.
fn sparse(dim: usize, entries: &[((usize, usize), Expr)]) -> SymMatrix {
    SymMatrix::from_fn(dim, dim, |row, col| {
        entries
            .iter()
            .find(|(pos, _)| *pos == (row, col))
            .map_or_else(Expr::zero, |(_, value)| value.clone())
    })
}

/// Builds the canonical orthogonal basis of Hermitian `dim x dim` matrices
/// with full verification.
pub fn hermitian_basis(dim: usize) -> Result<HermitianBasis, HsymError> {
    hermitian_basis_with(dim, &VerifyOpts::default())
}

/// Builds the canonical orthogonal basis of Hermitian `dim x dim` matrices.
///
/// The basis has `dim²` elements. Diagonal elements have self product 1 and
/// off-diagonal elements self product 2.
pub fn hermitian_basis_with(dim: usize, opts: &VerifyOpts) -> Result<HermitianBasis, HsymError> {
    if dim == 0 {
        return Err(HsymError::Shape(
            ErrorInfo::new("zero-dimension", "basis dimension must be positive")
                .with_hint("pass dim >= 1"),
        ));
    }
    let mut elements = Vec::with_capacity(dim * dim);
    for i in 0..dim {
        elements.push(sparse(dim, &[((i, i), Expr::one())]));
    }
    for i in 0..dim {
        for j in (i + 1)..dim {
            elements.push(sparse(dim, &[((i, j), Expr::one()), ((j, i), Expr::one())]));
            elements.push(sparse(dim, &[((i, j), -Expr::i()), ((j, i), Expr::i())]));
        }
    }

    check_size(dim, elements.len())?;
    if opts.orthogonality {
        check_orthogonal(&elements)?;
    }
    debug!("built hermitian basis: dim={dim}, size={}", elements.len());
    Ok(HermitianBasis { dim, elements })
}
