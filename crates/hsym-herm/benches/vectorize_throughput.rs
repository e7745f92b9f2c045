use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hsym_herm::{
    hermitian_basis, hermitian_basis_with, hermitian_to_vector, hermitian_to_vector_with, Expr,
    SymMatrix, VerifyOpts,
};

fn sample_hermitian(dim: usize) -> SymMatrix {
    SymMatrix::from_fn(dim, dim, |row, col| {
        let base = (row * dim + col) as i64;
        match row.cmp(&col) {
            std::cmp::Ordering::Equal => Expr::symbol(format!("h{row}")),
            std::cmp::Ordering::Less => Expr::complex(base, base + 1),
            std::cmp::Ordering::Greater => {
                let mirrored = (col * dim + row) as i64;
                Expr::complex(mirrored, -(mirrored + 1))
            }
        }
    })
}

fn bench_basis(c: &mut Criterion) {
    let mut group = c.benchmark_group("hermitian_basis");
    for dim in [2usize, 3, 4] {
        group.bench_with_input(BenchmarkId::new("checked", dim), &dim, |b, &dim| {
            b.iter(|| hermitian_basis(dim).expect("basis"));
        });
        group.bench_with_input(BenchmarkId::new("trusted", dim), &dim, |b, &dim| {
            b.iter(|| hermitian_basis_with(dim, &VerifyOpts::trusted()).expect("basis"));
        });
    }
    group.finish();
}

fn bench_vectorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("hermitian_to_vector");
    for dim in [2usize, 3, 4] {
        let basis = hermitian_basis(dim).expect("basis");
        let matrix = sample_hermitian(dim);
        group.bench_with_input(BenchmarkId::new("checked", dim), &dim, |b, _| {
            b.iter(|| hermitian_to_vector(&matrix, &basis).expect("coords"));
        });
        group.bench_with_input(BenchmarkId::new("trusted", dim), &dim, |b, _| {
            b.iter(|| {
                hermitian_to_vector_with(&matrix, &basis, &VerifyOpts::trusted()).expect("coords")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_basis, bench_vectorize);
criterion_main!(benches);
