use hsym_herm::{
    hermitian_basis, hermitian_to_vector, hermitian_to_vector_with, recombine, Expr, HsymError,
    SymMatrix, VerifyOpts,
};
use proptest::prelude::*;

fn sym(name: &str) -> Expr {
    Expr::symbol(name)
}

fn two_by_two(m01: Expr) -> SymMatrix {
    SymMatrix::from_rows(vec![
        vec![Expr::int(2), m01.clone()],
        vec![m01.conj(), Expr::int(3)],
    ])
    .expect("matrix")
}

#[test]
fn diagonal_entries_map_directly_and_off_diagonal_splits() {
    let basis = hermitian_basis(2).expect("basis");

    let m = two_by_two(Expr::complex(1, -1));
    let coords = hermitian_to_vector(&m, &basis).expect("coords");
    assert_eq!(coords, vec![Expr::int(2), Expr::int(3), Expr::int(1), Expr::int(1)]);

    let m = two_by_two(Expr::complex(1, 1));
    let coords = hermitian_to_vector(&m, &basis).expect("coords");
    assert_eq!(coords, vec![Expr::int(2), Expr::int(3), Expr::int(1), Expr::int(-1)]);
}

#[test]
fn symbolic_hermitian_matrix_round_trips() {
    let basis = hermitian_basis(2).expect("basis");
    let m = SymMatrix::from_rows(vec![
        vec![sym("a"), sym("b") + Expr::i() * sym("c")],
        vec![sym("b") - Expr::i() * sym("c"), sym("d")],
    ])
    .expect("matrix");
    let coords = hermitian_to_vector(&m, &basis).expect("coords");
    assert_eq!(coords, vec![sym("a"), sym("d"), sym("b"), -sym("c")]);
    assert_eq!(recombine(&coords, &basis, m.shape()).expect("recombine"), m);
}

#[test]
fn rational_coordinates_are_exact() {
    let basis = hermitian_basis(2).expect("basis");
    let half = Expr::rational(1, 2).expect("half");
    let m = SymMatrix::from_rows(vec![
        vec![half.clone(), half.clone()],
        vec![half.clone(), Expr::zero()],
    ])
    .expect("matrix");
    let coords = hermitian_to_vector(&m, &basis).expect("coords");
    assert_eq!(coords, vec![half.clone(), Expr::zero(), half, Expr::zero()]);
}

#[test]
fn duplicate_elements_are_rejected() {
    let e00 = SymMatrix::from_i64_rows(&[[1, 0], [0, 0]]).expect("e00");
    let basis = vec![e00.clone(), e00.clone()];
    let err = hermitian_to_vector(&e00, &basis).expect_err("not orthogonal");
    assert!(matches!(err, HsymError::Consistency(_)));
    assert_eq!(err.code(), "non-orthogonal-pair");
    assert_eq!(err.info().context["i"], "0");
    assert_eq!(err.info().context["j"], "1");
}

#[test]
fn zero_element_is_rejected() {
    let basis = vec![SymMatrix::identity(2), SymMatrix::zeros(2, 2)];
    let err = hermitian_to_vector(&SymMatrix::identity(2), &basis).expect_err("zero norm");
    assert_eq!(err.code(), "zero-self-product");
}

#[test]
fn incomplete_basis_fails_reconstruction() {
    let basis = hermitian_basis(2).expect("basis");
    let partial = &basis[..3];
    let m = two_by_two(Expr::complex(0, 1));
    let err = hermitian_to_vector(&m, partial).expect_err("missing sigma y");
    assert_eq!(err.code(), "reconstruction-mismatch");
    assert_eq!(err.info().context["row"], "0");
    assert_eq!(err.info().context["col"], "1");
}

#[test]
fn trusted_options_skip_checks() {
    let basis = hermitian_basis(2).expect("basis");
    let partial = &basis[..3];
    let m = two_by_two(Expr::complex(0, 1));
    let coords = hermitian_to_vector_with(&m, partial, &VerifyOpts::trusted()).expect("coords");
    assert_eq!(coords, vec![Expr::int(2), Expr::int(3), Expr::zero()]);
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: VerifyOpts = serde_json::from_str(r#"{"reconstruction": false}"#).expect("opts");
    assert!(opts.orthogonality);
    assert!(!opts.reconstruction);
    assert_eq!(serde_json::from_str::<VerifyOpts>("{}").expect("opts"), VerifyOpts::default());
}

#[test]
fn mismatched_matrix_shape_fails() {
    let basis = hermitian_basis(2).expect("basis");
    let err = hermitian_to_vector(&SymMatrix::identity(3), &basis).expect_err("shape");
    assert!(matches!(err, HsymError::Shape(_)));
}

#[test]
fn recombine_requires_one_coordinate_per_element() {
    let basis = hermitian_basis(2).expect("basis");
    let err = recombine(&[Expr::one()], &basis, (2, 2)).expect_err("count");
    assert_eq!(err.code(), "coordinate-count");
}

fn hermitian(dim: usize) -> impl Strategy<Value = SymMatrix> {
    proptest::collection::vec((-9i64..=9, -9i64..=9), dim * dim).prop_map(move |raw| {
        SymMatrix::from_fn(dim, dim, |row, col| {
            let (re, im) = raw[row.min(col) * dim + row.max(col)];
            match row.cmp(&col) {
                std::cmp::Ordering::Equal => Expr::int(re),
                std::cmp::Ordering::Less => Expr::complex(re, im),
                std::cmp::Ordering::Greater => Expr::complex(re, -im),
            }
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn round_trip_reproduces_matrix(m in (1usize..=3).prop_flat_map(hermitian)) {
        prop_assert!(m.is_hermitian());
        let basis = hermitian_basis(m.rows()).unwrap();
        let coords = hermitian_to_vector(&m, &basis).unwrap();
        prop_assert_eq!(coords.len(), basis.len());
        prop_assert!(coords.iter().all(Expr::is_real));
        prop_assert_eq!(recombine(&coords, &basis, m.shape()).unwrap(), m);
    }
}
