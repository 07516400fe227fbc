//! Point-in-time copies of traversal state.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::graph::NodeId;
use crate::traversal::Discipline;

/// Where in the step cycle a snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing explored yet; used for the initial drawing.
    Initial,
    /// Frontier before the next node is removed.
    Pending,
    /// After the removed node was marked visited and appended to the path.
    Processed,
    /// After the processed node's neighbors were inserted.
    Expanded,
}

/// An owned copy of one engine's state.
///
/// Every field is a deep copy, so a renderer may hold on to a snapshot while
/// the engine keeps stepping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Algorithm that produced the snapshot.
    pub label: Discipline,
    /// Point in the step cycle.
    pub stage: Stage,
    /// Frontier contents, oldest first.
    pub frontier: Vec<NodeId>,
    /// Processed nodes.
    pub visited: BTreeSet<NodeId>,
    /// Processing order so far.
    pub path: Vec<NodeId>,
    /// Node processed in this step, if one was removed yet.
    pub current: Option<NodeId>,
}

impl Snapshot {
    /// The empty snapshot shown before a run starts.
    pub fn initial(label: Discipline) -> Self {
        Self {
            label,
            stage: Stage::Initial,
            frontier: Vec::new(),
            visited: BTreeSet::new(),
            path: Vec::new(),
            current: None,
        }
    }

    /// Caption for this snapshot, e.g. `BFS` or `DFS - Initial State`.
    pub fn caption(&self) -> String {
        match self.stage {
            Stage::Initial => format!("{} - Initial State", self.label),
            _ => self.label.label().to_owned(),
        }
    }

    /// Returns `true` if `node` has been processed.
    pub fn is_visited(&self, node: &str) -> bool {
        self.visited.contains(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_caption() {
        let s = Snapshot::initial(Discipline::Lifo);
        assert_eq!(s.caption(), "DFS - Initial State");
        assert!(s.frontier.is_empty() && s.path.is_empty() && s.current.is_none());
    }

    #[test]
    fn serializes_label_and_stage() {
        let mut s = Snapshot::initial(Discipline::Fifo);
        s.stage = Stage::Processed;
        s.path.push("S0".into());
        s.visited.insert("S0".into());
        s.current = Some("S0".into());

        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["label"], "BFS");
        assert_eq!(v["stage"], "processed");
        assert_eq!(v["path"], serde_json::json!(["S0"]));
        assert_eq!(v["current"], "S0");
    }
}
