//! Closure-walk benchmarks over chain and fan-out graph shapes.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tangle_core::graph::{DepGraph, descendants, render_all};

/// n0000 -> n0001 -> ... -> n(len-1): worst-case walk depth.
fn chain_graph(len: usize) -> DepGraph {
    let mut graph = DepGraph::new();
    let names: Vec<String> = (0..len).map(|i| format!("n{i:04}")).collect();
    for pair in names.windows(2) {
        graph
            .add_direct_dependency(&pair[0], [pair[1].as_str()])
            .expect("chain is acyclic");
    }
    graph
}

/// One root over `width` mid nodes, each over `width` shared leaves:
/// exercises the dedup path.
fn fanout_graph(width: usize) -> DepGraph {
    let mut graph = DepGraph::new();
    let leaves: Vec<String> = (0..width).map(|i| format!("leaf{i:03}")).collect();
    for m in 0..width {
        let mid = format!("mid{m:03}");
        graph
            .add_direct_dependency(&mid, leaves.iter().map(String::as_str))
            .expect("fanout is acyclic");
        graph
            .add_direct_dependency("root", [mid.as_str()])
            .expect("fanout is acyclic");
    }
    graph
}

fn bench_closure(c: &mut Criterion) {
    let chain = chain_graph(1000);
    c.bench_function("descendants/chain_1000", |b| {
        b.iter(|| descendants(black_box(&chain), "n0000"));
    });

    let fan = fanout_graph(50);
    c.bench_function("descendants/fanout_50x50", |b| {
        b.iter(|| descendants(black_box(&fan), "root"));
    });

    c.bench_function("render_all/fanout_50x50", |b| {
        b.iter(|| render_all(black_box(&fan)));
    });
}

criterion_group!(benches, bench_closure);
criterion_main!(benches);
