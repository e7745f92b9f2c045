#![deny(missing_docs)]
#![doc = "Coordinates of Hermitian matrices in an orthogonal Frobenius basis, and \
symmetry operators lifted to act on those matrices."]

mod basis;
mod frobenius;
mod hash;
mod operator;
mod opts;
mod orthogonal;
#[path = "serde.rs"]
mod serde_io;
mod vectorize;

pub use basis::{hermitian_basis, hermitian_basis_with, HermitianBasis};
pub use frobenius::frobenius_product;
pub use hash::stable_hash_string;
pub use operator::{repr_to_matrix_operator, ConjugationOperator, MatrixOperator};
pub use opts::VerifyOpts;
pub use orthogonal::check_orthogonal;
pub use serde_io::{from_json_slice, to_canonical_json_bytes};
pub use vectorize::{hermitian_to_vector, hermitian_to_vector_with, recombine};

pub use hsym_core::{Expr, HsymError, SymMatrix};
