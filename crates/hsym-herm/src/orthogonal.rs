use hsym_core::{ErrorInfo, HsymError, SymMatrix};
use log::trace;

use crate::frobenius::frobenius_product;

fn pair_info(code: &str, message: &str, i: usize, j: usize) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("i", i)
        .with_context("j", j)
}

/// Checks that `basis` is orthogonal under the Frobenius product.
///
/// Every element must have a non-zero self product and every pair of distinct
/// elements a zero product. The first violation is reported with its index
/// pair.
pub fn check_orthogonal(basis: &[SymMatrix]) -> Result<(), HsymError> {
    for (i, bi) in basis.iter().enumerate() {
        for (j, bj) in basis.iter().enumerate() {
            let product = frobenius_product(bi, bj)?;
            trace!("<b{i}, b{j}> = {product}");
            if i == j && product.is_zero() {
                return Err(HsymError::Consistency(pair_info(
                    "zero-self-product",
                    "basis element has vanishing norm",
                    i,
                    j,
                )));
            }
            if i != j && !product.is_zero() {
                return Err(HsymError::Consistency(
                    pair_info("non-orthogonal-pair", "basis elements are not orthogonal", i, j)
                        .with_context("product", product),
                ));
            }
        }
    }
    Ok(())
}
