//! The ten-node demonstration graph.

use crate::graph::Graph;

/// Builds the demonstration graph.
///
/// `S0` points at `S1..=S5`, `S1` points at `S6..=S9`, every other node is a
/// leaf. Edges are directed exactly as listed.
pub fn fixture() -> Graph {
    let mut builder = Graph::builder()
        .edges("S0", ["S1", "S2", "S3", "S4", "S5"])
        .edges("S1", ["S6", "S7", "S8", "S9"]);
    for leaf in ["S2", "S3", "S4", "S5", "S6", "S7", "S8", "S9"] {
        builder = builder.node(leaf);
    }
    // Every neighbor above is also listed as a node, so `build` cannot fail;
    // `fixture_shape` checks the graph is closed.
    builder.build_open()
}
