use hsym_core::errors::{ErrorInfo, HsymError};
use hsym_core::{Expr, SymMatrix};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("i", 0)
        .with_context("j", 1)
}

#[test]
fn consistency_error_surface() {
    let err = HsymError::Consistency(sample_info("non-orthogonal-pair", "pair not orthogonal"));
    assert_eq!(err.code(), "non-orthogonal-pair");
    assert_eq!(err.info().context.get("j").map(String::as_str), Some("1"));
}

#[test]
fn display_lists_context_and_hint() {
    let err = HsymError::Shape(sample_info("shape-mismatch", "bad shapes").with_hint("check dims"));
    assert_eq!(
        err.to_string(),
        "shape error: bad shapes (code: shape-mismatch) | context: [i=0, j=1] | hint: check dims"
    );
}

#[test]
fn matmul_reports_mismatched_shapes() {
    let a = SymMatrix::zeros(2, 3);
    let b = SymMatrix::zeros(2, 3);
    let err = a.matmul(&b).expect_err("shape mismatch");
    assert!(matches!(err, HsymError::Shape(_)));
    assert_eq!(err.info().context["lhs"], "2x3");
    assert_eq!(err.info().context["rhs"], "2x3");
}

#[test]
fn zero_denominator_is_rejected() {
    let err = Expr::rational(1, 0).expect_err("zero denominator");
    assert_eq!(err.code(), "zero-denominator");
}

#[test]
fn errors_round_trip_json() {
    let err = HsymError::Expr(sample_info("division-by-zero", "divisor is zero"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"Expr\""));
    let decoded: HsymError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
