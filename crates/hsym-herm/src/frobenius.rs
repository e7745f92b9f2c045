use hsym_core::{Expr, HsymError, SymMatrix};

/// Frobenius inner product `<A, B> = Tr(A† B)`.
///
/// Evaluated as `Σ conj(A[r, c]) · B[r, c]`, which equals the trace without
/// forming the product matrix. The result is in canonical form, so it can be
/// compared against zero directly.
pub fn frobenius_product(a: &SymMatrix, b: &SymMatrix) -> Result<Expr, HsymError> {
    if a.shape() != b.shape() {
        return Err(HsymError::shape_mismatch(
            "frobenius_product",
            a.shape(),
            b.shape(),
        ));
    }
    Ok(a.entries()
        .iter()
        .zip(b.entries())
        .map(|(lhs, rhs)| lhs.conj() * rhs)
        .sum())
}
