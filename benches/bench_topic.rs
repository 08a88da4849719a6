//! Criterion benchmark for `Topic::publish`/`read`/`read_multiple`.
//!
//! Run: cargo bench --bench bench_topic

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reqbus::Topic;

#[derive(Clone, Copy, Default)]
struct Slot32 {
    data: [u8; 32],
}

fn bench_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish");
    group.throughput(Throughput::Elements(1));

    let topic: Topic<Slot32, 1024, 8> = Topic::new();
    group.bench_function(BenchmarkId::new("publish", "depth=1024"), |b| {
        b.iter(|| topic.publish(black_box(Slot32::default())));
    });

    group.finish();
}

fn bench_publish_then_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_then_read");
    group.throughput(Throughput::Elements(1));

    let topic: Topic<Slot32, 1024, 8> = Topic::new();
    let token = topic.subscribe().unwrap();
    group.bench_function(BenchmarkId::new("round_trip", "depth=1024"), |b| {
        b.iter(|| {
            topic.publish(black_box(Slot32::default()));
            black_box(topic.read(token));
        });
    });

    group.finish();
}

fn bench_read_multiple(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_multiple");

    for &batch in &[8usize, 64, 256] {
        group.throughput(Throughput::Elements(batch as u64));
        let topic: Topic<Slot32, 1024, 8> = Topic::new();
        let token = topic.subscribe().unwrap();
        let mut out = vec![Slot32::default(); batch];

        group.bench_with_input(BenchmarkId::new("batch", batch), &batch, |b, &batch| {
            b.iter(|| {
                for _ in 0..batch {
                    topic.publish(Slot32::default());
                }
                black_box(topic.read_multiple(token, &mut out[..batch]));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_publish, bench_publish_then_read, bench_read_multiple);
criterion_main!(benches);
