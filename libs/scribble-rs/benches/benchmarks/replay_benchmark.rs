use criterion::{black_box, criterion_group, BenchmarkId, Criterion, Throughput};
use scribble_rs::codec::quantize;
use scribble_rs::render::rasterizer;
use test_utils::{doodle, SIZE};

fn replay_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    for copies in [1usize, 4, 16] {
        let strokes: Vec<_> = (0..copies).flat_map(|_| doodle()).collect();

        group.throughput(Throughput::Elements(strokes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(strokes.len()), &strokes, |b, strokes| {
            b.iter(|| rasterizer::replay(black_box(strokes), None, SIZE).unwrap())
        });
    }
    group.finish();

    let pixmap = rasterizer::replay(&doodle(), None, SIZE).unwrap();
    c.bench_function("quantize", |b| b.iter(|| quantize::threshold(black_box(&pixmap))));
}

fn benchmark_config() -> Criterion {
    Criterion::default().sample_size(10)
}

criterion_group! {
    name = benches;
    config = benchmark_config();
    targets = replay_benchmark
}
