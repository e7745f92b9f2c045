#![deny(missing_docs)]
#![doc = "Exact symbolic scalars, matrices and the shared error surface for HSYM."]

pub mod errors;
pub mod expr;
pub mod matrix;

pub use errors::{ErrorInfo, HsymError};
pub use expr::{Coeff, Expr, Monomial};
pub use matrix::SymMatrix;
