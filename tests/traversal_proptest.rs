use std::collections::HashSet;

use frontier_race::{Discipline, EngineState, Graph, NodeId, Snapshot, TraversalEngine};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use proptest::prelude::*;

fn name(i: usize) -> String {
    format!("n{i}")
}

fn build(adj: &[Vec<usize>]) -> Graph {
    let mut b = Graph::builder();
    for (u, nbrs) in adj.iter().enumerate() {
        b = b.edges(name(u), nbrs.iter().map(|&v| name(v)));
    }
    b.build().unwrap()
}

fn reachable(adj: &[Vec<usize>], start: usize) -> HashSet<String> {
    let mut g = DiGraph::<(), ()>::new();
    let nodes: Vec<NodeIndex> = (0..adj.len()).map(|_| g.add_node(())).collect();
    for (u, nbrs) in adj.iter().enumerate() {
        for &v in nbrs {
            g.add_edge(nodes[u], nodes[v], ());
        }
    }
    let mut dfs = Dfs::new(&g, nodes[start]);
    let mut seen = HashSet::new();
    while let Some(nx) = dfs.next(&g) {
        seen.insert(name(nx.index()));
    }
    seen
}

fn graph_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..12).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(0..n, 0..5), n)
    })
}

fn discipline() -> impl Strategy<Value = Discipline> {
    prop_oneof![Just(Discipline::Fifo), Just(Discipline::Lifo)]
}

proptest! {
    #[test]
    fn traversal_invariants_hold(
        (adj, start, target) in graph_strategy().prop_flat_map(|adj| {
            let n = adj.len();
            (Just(adj), 0..n, 0..n + 1)
        }),
        d in discipline(),
    ) {
        let g = build(&adj);
        let target = if target == adj.len() { "absent".to_owned() } else { name(target) };
        let mut engine = TraversalEngine::new(&g, name(start), target.as_str(), d);

        let frames: Vec<Snapshot> = engine.snapshots().unwrap().map(Result::unwrap).collect();
        let state = engine.state();
        prop_assert!(state == EngineState::Succeeded || state == EngineState::Exhausted);

        let path: Vec<&str> = engine.path().iter().map(NodeId::as_str).collect();
        let unique: HashSet<&str> = path.iter().copied().collect();
        prop_assert_eq!(unique.len(), path.len(), "node processed twice");
        prop_assert!(path.len() <= adj.len());

        for f in &frames {
            let queued: HashSet<&NodeId> = f.frontier.iter().collect();
            prop_assert_eq!(queued.len(), f.frontier.len(), "duplicate frontier entry");
            for node in &f.frontier {
                prop_assert!(!f.visited.contains(node));
            }
        }

        let reach = reachable(&adj, start);
        let processed: HashSet<String> = path.iter().map(|s| (*s).to_owned()).collect();
        if state == EngineState::Succeeded {
            prop_assert_eq!(path.last().copied(), Some(target.as_str()));
            prop_assert!(processed.is_subset(&reach));
        } else {
            prop_assert_eq!(processed, reach);
        }
    }

    #[test]
    fn repeated_runs_are_identical(adj in graph_strategy(), d in discipline()) {
        let g = build(&adj);
        let target = name(adj.len() - 1);
        let collect = || -> Vec<Snapshot> {
            let mut e = TraversalEngine::new(&g, name(0), target.as_str(), d);
            e.snapshots().unwrap().map(Result::unwrap).collect()
        };
        prop_assert_eq!(collect(), collect());
    }
}
