use criterion::criterion_main;

mod benchmarks {
    pub mod codec_benchmark;
    pub mod replay_benchmark;
}

criterion_main! {
    benchmarks::codec_benchmark::benches,
    benchmarks::replay_benchmark::benches,
}
