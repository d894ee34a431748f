use criterion::criterion_main;


mod async_ops;

criterion_main!(
    core::core_benches,
    pipeline::pipeline_benches,
    retry::retry_benches,
    async_ops::async_ops_benches,
);
