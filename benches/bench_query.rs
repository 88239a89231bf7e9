use shared::*;

use criterion::{black_box, criterion_group, Criterion};
use rbush::{Flatbush, RBush};
use tracing::info;

fn bench_query_rbush(_c: &mut Criterion) {
    info!("Setting up bench_query_rbush");
    let items = generate_rectangles(BENCH_NUM_INSERT);
    let mut tree = RBush::<usize>::with_max_entries(BENCH_MAX_ENTRIES).unwrap();
    tree.load(items);

    let mut cc = configure_criterion();
    cc.bench_function("query_rbush", |b| {
        b.iter(|| black_box(tree.query(&BENCH_QUERY_WINDOW)))
    });
}

fn bench_query_flatbush(_c: &mut Criterion) {
    info!("Setting up bench_query_flatbush");
    let items = generate_rectangles(BENCH_NUM_INSERT);
    let mut tree = Flatbush::<usize>::with_node_size(BENCH_NUM_INSERT, BENCH_NODE_SIZE).unwrap();
    for (bounds, item) in items {
        tree.insert(bounds, item).unwrap();
    }
    tree.build().unwrap();

    let mut cc = configure_criterion();
    cc.bench_function("query_flatbush", |b| {
        b.iter(|| black_box(tree.query(&BENCH_QUERY_WINDOW)))
    });
}

criterion_group!(benches, bench_query_rbush, bench_query_flatbush);
