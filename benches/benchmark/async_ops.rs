use crate::common::configure_criterion;
use criterion::{criterion_group, Criterion};

#[cfg(feature = "async")]
use crate::common::fetch_user;
#[cfg(feature = "async")]
use outcome_rail::prelude_async::*;
#[cfg(feature = "async")]
use tokio::runtime::Runtime;

#[cfg(feature = "async")]
pub fn bench_async_boundary(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("async/guard");

    group.bench_function("success_path", |b| {
        b.iter(|| rt.block_on(async { std::hint::black_box(guard_async(async { fetch_user(1) }).await) }))
    });

    group.bench_function("error_path", |b| {
        b.iter(|| rt.block_on(async { std::hint::black_box(guard_async(async { fetch_user(100) }).await) }))
    });

    group.finish();
}

#[cfg(feature = "async")]
pub fn bench_async_retry(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("async/retry");

    group.bench_function("exhausted", |b| {
        b.iter(|| {
            rt.block_on(async {
                let rail = retry_async(3, || async { fetch_user(100) }).await;
                std::hint::black_box(rail.finish())
            })
        })
    });

    group.finish();
}

#[cfg(feature = "async")]
criterion_group! {
    name = async_ops_benches;
    config = configure_criterion();
    targets = bench_async_boundary, bench_async_retry,
}

#[cfg(not(feature = "async"))]
criterion_group! {
    name = async_ops_benches;
    config = configure_criterion();
    targets = dummy
}

#[cfg(not(feature = "async"))]
fn dummy(_c: &mut Criterion) {}
