use hsym_core::{ErrorInfo, Expr, HsymError, SymMatrix};
use log::debug;

use crate::frobenius::frobenius_product;
use crate::opts::VerifyOpts;
use crate::orthogonal::check_orthogonal;

/// Weighted sum `Σ coords[k] · basis[k]`, starting from the zero matrix of
/// the given shape.
pub fn recombine(
    coords: &[Expr],
    basis: &[SymMatrix],
    shape: (usize, usize),
) -> Result<SymMatrix, HsymError> {
    if coords.len() != basis.len() {
        return Err(HsymError::Shape(
            ErrorInfo::new("coordinate-count", "one coordinate is required per basis element")
                .with_context("coords", coords.len())
                .with_context("basis", basis.len()),
        ));
    }
    coords
        .iter()
        .zip(basis)
        .try_fold(SymMatrix::zeros(shape.0, shape.1), |acc, (coord, element)| {
            acc.checked_add(&element.scale(coord))
        })
}

/// Coordinates of `matrix` with respect to the orthogonal `basis`, with every
/// check enabled.
pub fn hermitian_to_vector(matrix: &SymMatrix, basis: &[SymMatrix]) -> Result<Vec<Expr>, HsymError> {
    hermitian_to_vector_with(matrix, basis, &VerifyOpts::default())
}

/// Coordinates of `matrix` with respect to the orthogonal `basis`.
///
/// Coordinate `k` is `<matrix, b_k> / <b_k, b_k>`; the basis need not be
/// normalised. With the default options the basis is checked for
/// orthogonality first and the coordinates must reconstruct `matrix` exactly.
pub fn hermitian_to_vector_with(
    matrix: &SymMatrix,
    basis: &[SymMatrix],
    opts: &VerifyOpts,
) -> Result<Vec<Expr>, HsymError> {
    if opts.orthogonality {
        check_orthogonal(basis)?;
    }
    let coords = basis
        .iter()
        .map(|element| {
            let projection = frobenius_product(matrix, element)?;
            projection.checked_div(&frobenius_product(element, element)?)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if opts.reconstruction {
        let rebuilt = recombine(&coords, basis, matrix.shape())?;
        if let Some((row, col)) = rebuilt.first_difference(matrix) {
            return Err(HsymError::Consistency(
                ErrorInfo::new(
                    "reconstruction-mismatch",
                    "coordinates do not reconstruct the input matrix",
                )
                .with_context("row", row)
                .with_context("col", col)
                .with_context("expected", &matrix[(row, col)])
                .with_context("found", &rebuilt[(row, col)])
                .with_hint("the basis does not span the space containing the matrix"),
            ));
        }
    }
    debug!(
        "vectorized {}x{} matrix against {} basis elements",
        matrix.rows(),
        matrix.cols(),
        basis.len()
    );
    Ok(coords)
}
