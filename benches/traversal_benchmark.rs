use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frontier_race::{Discipline, Graph, TraversalEngine};

/// Complete tree with `fanout` children per node and `depth` levels.
fn tree(fanout: usize, depth: u32) -> Graph {
    let total: usize = (0..depth).map(|d| fanout.pow(d)).sum();
    let mut b = Graph::builder();
    for u in 0..total {
        let first = u * fanout + 1;
        let children = (first..first + fanout)
            .filter(|&v| v < total)
            .map(|v| format!("n{v}"));
        b = b.edges(format!("n{u}"), children);
    }
    b.build_open()
}

fn bench_full_traversal(c: &mut Criterion) {
    let graph = tree(4, 7);
    let last = format!("n{}", graph.node_count() - 1);

    for d in Discipline::ALL {
        c.bench_function(&format!("{}_to_last_leaf", d.label().to_lowercase()), |b| {
            b.iter(|| {
                let mut engine = TraversalEngine::new(&graph, "n0", last.as_str(), d);
                black_box(engine.run_to_completion().unwrap());
                black_box(engine.path().len())
            });
        });
    }
}

fn bench_snapshot_stream(c: &mut Criterion) {
    let graph = tree(3, 5);

    c.bench_function("bfs_snapshot_stream", |b| {
        b.iter(|| {
            let mut engine = TraversalEngine::new(&graph, "n0", "absent", Discipline::Fifo);
            let frames = engine.snapshots().unwrap().count();
            black_box(frames)
        });
    });
}

criterion_group!(benches, bench_full_traversal, bench_snapshot_stream);
criterion_main!(benches);
