//! Discipline-aware frontier with duplicate suppression.

use std::collections::{HashSet, VecDeque};

use crate::graph::NodeId;
use crate::traversal::Discipline;

/// Nodes discovered but not yet processed.
///
/// A membership set mirrors the deque so `contains` is \(O(1)\) and a node is
/// never queued twice.
#[derive(Debug, Clone)]
pub struct Frontier {
    discipline: Discipline,
    items: VecDeque<NodeId>,
    members: HashSet<NodeId>,
}

impl Frontier {
    /// Creates an empty frontier.
    pub fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            items: VecDeque::new(),
            members: HashSet::new(),
        }
    }

    /// The removal policy of this frontier.
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Inserts `node` at the tail. Returns `false` if it was already queued.
    pub fn push(&mut self, node: NodeId) -> bool {
        if !self.members.insert(node.clone()) {
            return false;
        }
        self.items.push_back(node);
        true
    }

    /// Removes the next node: the head for FIFO, the tail for LIFO.
    pub fn pop(&mut self) -> Option<NodeId> {
        let node = match self.discipline {
            Discipline::Fifo => self.items.pop_front(),
            Discipline::Lifo => self.items.pop_back(),
        }?;
        self.members.remove(&node);
        Some(node)
    }

    /// Returns `true` if `node` is currently queued.
    pub fn contains(&self, node: &str) -> bool {
        self.members.contains(node)
    }

    /// Number of queued nodes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops every queued node.
    pub fn clear(&mut self) {
        self.items.clear();
        self.members.clear();
    }

    /// Queued nodes, oldest (queue head, stack bottom) first.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.items.iter()
    }

    /// Copies the queued nodes, oldest first.
    pub fn to_vec(&self) -> Vec<NodeId> {
        self.items.iter().cloned().collect()
    }
}
