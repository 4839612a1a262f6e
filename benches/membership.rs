//! Benchmarks for membership query performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use netfence::{Entry, EntrySet, MembershipIndex};

/// Generate a set with the requested number of /24 networks.
fn generate_set(cidr_count: usize) -> EntrySet {
    let mut set = EntrySet::new("bench");
    for i in 0..cidr_count {
        let token = format!("10.{}.{}.0/24", (i >> 8) & 0xff, i & 0xff);
        set.push(Entry::parse(&token, "bench", i as u32 + 1).unwrap());
    }
    set
}

/// Generate query addresses, roughly half hits and half misses.
fn generate_queries(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                format!("10.0.{}.1", i & 0xff)
            } else {
                format!("203.0.113.{}", i & 0xff)
            }
        })
        .collect()
}

fn bench_covers(c: &mut Criterion) {
    let mut group = c.benchmark_group("covers");

    for size in [100, 1_000, 10_000] {
        let sets = vec![generate_set(size)];
        let index = MembershipIndex::build(&sets);
        let queries = generate_queries(256);

        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &queries, |b, queries| {
            b.iter(|| {
                for query in queries {
                    black_box(index.covers(query).unwrap());
                }
            })
        });
    }

    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let sets = vec![generate_set(10_000)];
    c.bench_function("index_build_10k", |b| {
        b.iter(|| black_box(MembershipIndex::build(&sets).len()))
    });
}

criterion_group!(benches, bench_covers, bench_index_build);
criterion_main!(benches);
