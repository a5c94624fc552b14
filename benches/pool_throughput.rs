use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use thread_pool::Pool;

fn submit_and_join_n(pool: &Pool, n: u64) -> u64 {
    let handles: Vec<_> = (0..n)
        .map(|i| pool.submit(move || i.wrapping_mul(i)))
        .map(|result| result.expect("pool accepts work during the benchmark"))
        .collect();

    handles.into_iter().map(|h| h.join().unwrap()).sum()
}

fn throughput_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_submit_join");

    for &worker_count in &[1usize, 2, 4, 8] {
        let pool = Pool::new(worker_count).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(worker_count),
            &worker_count,
            |b, _| {
                b.iter(|| black_box(submit_and_join_n(&pool, 1_000)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, throughput_benchmark);
criterion_main!(benches);
