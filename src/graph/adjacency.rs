//! A frozen, insertion-ordered adjacency-list directed graph.
//!
//! The graph is built once through [`GraphBuilder`] and never mutated
//! afterwards, so both traversal loops can read it through a shared
//! `Arc<Graph>` without any locking.
//!
//! Neighbor order is the order edges were added. Traversals rely on it for
//! their tie-break order, so it is preserved exactly.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `neighbors` | \(O(1)\) expected | hash lookup, returns a borrowed slice |
//! | `contains` | \(O(1)\) expected | hash lookup |
//! | `all_nodes` | \(O(1)\) | borrowed slice in insertion order |
//! | `edge_count` | \(O(n)\) | sums adjacency list lengths |

use std::collections::HashMap;

use crate::error::{Result, TraversalError};
use crate::graph::NodeId;

/// An immutable directed graph over [`NodeId`]s.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    nodes: Vec<NodeId>,
}

impl Graph {
    /// Starts an empty builder.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Creates a graph from `(node, neighbors)` pairs, rejecting neighbors
    /// that are not themselves keys.
    ///
    /// # Errors
    /// Returns [`TraversalError::UnknownNode`] for the first dangling neighbor.
    pub fn from_adjacency<I, N, A>(lists: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, A)>,
        N: Into<NodeId>,
        A: IntoIterator,
        A::Item: Into<NodeId>,
    {
        let mut builder = GraphBuilder::default();
        for (node, neighbors) in lists {
            builder = builder.edges(node, neighbors);
        }
        builder.build()
    }

    /// Returns the out-neighbors of `node` in insertion order.
    ///
    /// # Errors
    /// Returns [`TraversalError::UnknownNode`] if `node` is not a key.
    pub fn neighbors(&self, node: &str) -> Result<&[NodeId]> {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .ok_or_else(|| TraversalError::UnknownNode(NodeId::new(node)))
    }

    /// Every node of the graph, in insertion order, each exactly once.
    pub fn all_nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Looks up the canonical id for `node`.
    pub fn node(&self, node: &str) -> Option<&NodeId> {
        self.adjacency.get_key_value(node).map(|(k, _)| k)
    }

    /// Returns `true` if `node` is a key of the graph.
    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns `true` if every neighbor is also a key.
    pub fn is_closed(&self) -> bool {
        self.dangling().is_none()
    }

    fn dangling(&self) -> Option<&NodeId> {
        self.nodes
            .iter()
            .flat_map(|n| self.adjacency[n].iter())
            .find(|v| !self.adjacency.contains_key(v.as_str()))
    }
}

/// Incremental builder for [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Adds `node` with no outgoing edges if it is not present yet.
    #[must_use]
    pub fn node(mut self, node: impl Into<NodeId>) -> Self {
        self.ensure(node.into());
        self
    }

    /// Appends the directed edge `from -> to`.
    ///
    /// Parallel edges are kept; traversals suppress the duplicate frontier
    /// entries they would cause.
    #[must_use]
    pub fn edge(mut self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        let from = from.into();
        self.ensure(from.clone());
        if let Some(list) = self.graph.adjacency.get_mut(&from) {
            list.push(to.into());
        }
        self
    }

    /// Appends `from -> to` for every `to`, in order.
    #[must_use]
    pub fn edges<I>(mut self, from: impl Into<NodeId>, to: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        let from = from.into();
        self.ensure(from.clone());
        for v in to {
            self = self.edge(from.clone(), v);
        }
        self
    }

    /// Freezes the graph, requiring every neighbor to be a key.
    ///
    /// # Errors
    /// Returns [`TraversalError::UnknownNode`] for the first dangling neighbor.
    pub fn build(self) -> Result<Graph> {
        if let Some(v) = self.graph.dangling() {
            return Err(TraversalError::UnknownNode(v.clone()));
        }
        Ok(self.graph)
    }

    /// Freezes the graph without checking for dangling neighbors.
    ///
    /// Traversals over such a graph fail with
    /// [`TraversalError::UnknownNode`] when they reach a dangling node.
    pub fn build_open(self) -> Graph {
        self.graph
    }

    fn ensure(&mut self, node: NodeId) {
        if !self.graph.adjacency.contains_key(&node) {
            self.graph.nodes.push(node.clone());
            self.graph.adjacency.insert(node, Vec::new());
        }
    }
}
