use hsym_core::{ErrorInfo, HsymError, SymMatrix};

/// A linear action on matrices, such as a symmetry operation acting on a
/// Hamiltonian.
pub trait MatrixOperator: Send + Sync {
    /// Applies the operator to `matrix`, returning a new matrix.
    fn apply(&self, matrix: &SymMatrix) -> Result<SymMatrix, HsymError>;
}

impl<F> MatrixOperator for F
where
    F: Fn(&SymMatrix) -> Result<SymMatrix, HsymError> + Send + Sync,
{
    fn apply(&self, matrix: &SymMatrix) -> Result<SymMatrix, HsymError> {
        self(matrix)
    }
}

/// The action `M ↦ D · conj?(M · D†)` of a representation matrix `D`.
///
/// Without conjugation this is the congruence `D M D†`; with conjugation it
/// describes antiunitary operations such as time reversal. `D` and `D†` are
/// fixed at construction. Unitarity of `D` is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjugationOperator {
    repr: SymMatrix,
    repr_adjoint: SymMatrix,
    complex_conjugate: bool,
}

impl ConjugationOperator {
    /// The representation matrix `D`.
    pub fn repr(&self) -> &SymMatrix {
        &self.repr
    }

    /// Whether the product is complex conjugated before the final multiplication.
    pub fn complex_conjugate(&self) -> bool {
        self.complex_conjugate
    }

    /// Borrows the operator as a plain function.
    pub fn as_fn(&self) -> impl Fn(&SymMatrix) -> Result<SymMatrix, HsymError> + '_ {
        move |matrix: &SymMatrix| self.apply(matrix)
    }
}

impl MatrixOperator for ConjugationOperator {
    fn apply(&self, matrix: &SymMatrix) -> Result<SymMatrix, HsymError> {
        let product = matrix.matmul(&self.repr_adjoint)?;
        let product = if self.complex_conjugate {
            product.conjugate()
        } else {
            product
        };
        self.repr.matmul(&product)
    }
}

/// Lifts the representation matrix `repr` to an operator on matrices.
pub fn repr_to_matrix_operator(
    repr: SymMatrix,
    complex_conjugate: bool,
) -> Result<ConjugationOperator, HsymError> {
    if !repr.is_square() {
        return Err(HsymError::Shape(
            ErrorInfo::new("not-square", "representation matrix must be square")
                .with_context("shape", format!("{}x{}", repr.rows(), repr.cols())),
        ));
    }
    let repr_adjoint = repr.adjoint();
    Ok(ConjugationOperator {
        repr,
        repr_adjoint,
        complex_conjugate,
    })
}
