//! Frontier removal policies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order in which a frontier hands out nodes.
///
/// Both disciplines insert at the tail; they differ only in which end they
/// remove from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    /// First in, first out: breadth-first search.
    #[serde(rename = "BFS")]
    Fifo,
    /// Last in, first out: depth-first search.
    #[serde(rename = "DFS")]
    Lifo,
}

impl Discipline {
    /// Both disciplines, in display order.
    pub const ALL: [Self; 2] = [Self::Fifo, Self::Lifo];

    /// Short algorithm label (`BFS` / `DFS`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fifo => "BFS",
            Self::Lifo => "DFS",
        }
    }

    /// What the frontier is called for this algorithm.
    pub const fn frontier_name(self) -> &'static str {
        match self {
            Self::Fifo => "queue",
            Self::Lifo => "stack",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
