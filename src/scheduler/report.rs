//! Per-loop and per-run results.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::error::TraversalError;
use crate::graph::NodeId;
use crate::traversal::Discipline;

/// How one traversal loop ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoopOutcome {
    /// The target was processed; `path` ends with it.
    Succeeded {
        /// Processing order up to and including the target.
        path: Vec<NodeId>,
    },
    /// The frontier emptied without reaching the target.
    Exhausted {
        /// Every node processed.
        path: Vec<NodeId>,
    },
    /// A newer run or an explicit cancel stopped the loop.
    Cancelled {
        /// Nodes processed before cancellation.
        path: Vec<NodeId>,
    },
    /// The loop stopped on an error.
    Failed {
        /// The error that ended the loop.
        #[serde(serialize_with = "display")]
        error: TraversalError,
    },
    /// The loop thread panicked (inside a renderer, typically).
    Panicked {
        /// Panic payload, if it was a string.
        message: String,
    },
}

/// Final report of one loop, handed to [`Renderer::complete`](crate::scheduler::Renderer::complete).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoopReport {
    /// Algorithm the loop ran.
    pub label: Discipline,
    /// How the loop ended.
    #[serde(flatten)]
    pub outcome: LoopOutcome,
    /// Wall-clock time from loop start to its terminal transition.
    #[serde(rename = "elapsed_secs", serialize_with = "secs")]
    pub elapsed: Duration,
    /// Number of nodes processed.
    pub steps: usize,
}

impl LoopReport {
    /// The success path, if the target was reached.
    pub fn path(&self) -> Option<&[NodeId]> {
        match &self.outcome {
            LoopOutcome::Succeeded { path } => Some(path.as_slice()),
            _ => None,
        }
    }

    /// Nodes processed, for every outcome that has them.
    pub fn processed(&self) -> &[NodeId] {
        match &self.outcome {
            LoopOutcome::Succeeded { path }
            | LoopOutcome::Exhausted { path }
            | LoopOutcome::Cancelled { path } => path.as_slice(),
            LoopOutcome::Failed { .. } | LoopOutcome::Panicked { .. } => &[],
        }
    }

    /// Returns `true` if the target was reached.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, LoopOutcome::Succeeded { .. })
    }
}

/// Reports of both loops of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Breadth-first loop.
    pub bfs: LoopReport,
    /// Depth-first loop.
    pub dfs: LoopReport,
}

impl RunReport {
    /// Report for `discipline`.
    pub fn get(&self, discipline: Discipline) -> &LoopReport {
        match discipline {
            Discipline::Fifo => &self.bfs,
            Discipline::Lifo => &self.dfs,
        }
    }
}

fn display<S: Serializer>(err: &TraversalError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}

fn secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_report_has_no_path() {
        let r = LoopReport {
            label: Discipline::Lifo,
            outcome: LoopOutcome::Failed {
                error: TraversalError::UnknownNode("ghost".into()),
            },
            elapsed: Duration::from_millis(1500),
            steps: 3,
        };
        assert!(r.path().is_none());
        assert!(r.processed().is_empty());

        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["label"], "DFS");
        assert_eq!(v["status"], "failed");
        assert_eq!(v["error"], "unknown node `ghost`");
        assert_eq!(v["elapsed_secs"], 1.5);
    }
}
