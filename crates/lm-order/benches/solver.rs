use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lm_order::{build_cost_matrix, AssignmentSolver, HungarianSolver, ReadingOrder, SentinelCosts};
use lm_types::Baseline;

/// `n` fragments of a wavy line, stored in reverse reading order.
fn fragments(n: usize) -> Vec<Baseline> {
    (0..n)
        .rev()
        .map(|i| {
            let x = i as f64 * 40.0;
            let y = 100.0 + (i as f64 * 0.7).sin() * 6.0;
            Baseline::from_coords(&[(x, y), (x + 15.0, y + 1.0), (x + 30.0, y)])
        })
        .collect()
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("hungarian");
    for n in [4usize, 16, 32, 64] {
        let matrix = build_cost_matrix(&fragments(n), &SentinelCosts::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, m| {
            b.iter(|| HungarianSolver.solve(black_box(m)).unwrap())
        });
    }
    group.finish();
}

fn bench_reading_order(c: &mut Criterion) {
    let engine = ReadingOrder::new(SentinelCosts::default());
    let lines = fragments(24);
    c.bench_function("reading_order_24", |b| {
        b.iter(|| engine.order(black_box(&lines)).unwrap())
    });
}

criterion_group!(benches, bench_solver, bench_reading_order);
criterion_main!(benches);
