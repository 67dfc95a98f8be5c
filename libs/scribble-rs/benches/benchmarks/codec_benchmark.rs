use criterion::{black_box, criterion_group, BenchmarkId, Criterion, Throughput};
use scribble_rs::codec::{self, quantize, rank, rle};
use scribble_rs::render::rasterizer;
use test_utils::{checkerboard, doodle, SIZE};

fn codec_benchmark(c: &mut Criterion) {
    let art = quantize::threshold(&rasterizer::replay(&doodle(), None, SIZE).unwrap());
    let noise = checkerboard(SIZE, SIZE, 1);

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements((SIZE * SIZE) as u64));
    for (name, bitmap) in [("line_art", &art), ("checkerboard", &noise)] {
        group.bench_with_input(BenchmarkId::new("compress", name), bitmap, |b, bitmap| {
            b.iter(|| codec::compress(black_box(bitmap)))
        });

        let image = codec::compress(bitmap);
        group.bench_with_input(BenchmarkId::new("decompress", name), &image, |b, image| {
            b.iter(|| codec::decompress(black_box(image), SIZE, SIZE).unwrap())
        });
    }
    group.finish();

    let runs = rle::encode(&art);
    c.bench_function("rank_encode_line_art", |b| b.iter(|| rank::encode(black_box(&runs))));
}

fn benchmark_config() -> Criterion {
    Criterion::default().sample_size(20)
}

criterion_group! {
    name = benches;
    config = benchmark_config();
    targets = codec_benchmark
}
