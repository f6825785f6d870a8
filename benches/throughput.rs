//! Throughput Benchmark for visitor-counter
//!
//! Measures the in-memory counter table and the full handler path
//! (add, then encode the response envelope).

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lambda_runtime::Context;
use serde_json::Value;
use std::sync::Arc;
use visitor_counter::handler::{CounterHandler, ResponseEnvelope};
use visitor_counter::store::MemoryStore;

/// Benchmark atomic adds on one record and spread across many
fn bench_add(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::new());

    let mut group = c.benchmark_group("add");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_single_record", |b| {
        b.iter(|| {
            black_box(store.add_to("visitors", "visitors", 1).ok());
        });
    });

    group.bench_function("add_many_records", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("page:{}", i % 1000);
            black_box(store.add_to(&key, "visitors", 1).ok());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark contended adds from several threads
fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    group.throughput(Throughput::Elements(4 * 1000));

    group.bench_function("add_4_threads", |b| {
        b.iter(|| {
            let store = Arc::new(MemoryStore::new());
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let store = Arc::clone(&store);
                    std::thread::spawn(move || {
                        for _ in 0..1000 {
                            black_box(store.add_to("visitors", "visitors", 1).ok());
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

/// Benchmark the handler end to end against the memory store
fn bench_handler(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let handler = CounterHandler::new(MemoryStore::new());
    let context = Context::default();

    let mut group = c.benchmark_group("handler");
    group.throughput(Throughput::Elements(1));

    group.bench_function("handle", |b| {
        b.iter(|| {
            let response = runtime.block_on(handler.handle(&Value::Null, &context));
            black_box(response.ok());
        });
    });

    group.bench_function("encode_envelope", |b| {
        let mut i = 0i64;
        b.iter(|| {
            black_box(ResponseEnvelope::visitors(i).ok());
            i += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_add, bench_concurrent, bench_handler);
criterion_main!(benches);
