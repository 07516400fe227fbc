//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, TraversalError};
use crate::graph::{Graph, NodeId};
use crate::scheduler::Pace;

/// Inputs of one search: where to start, what to look for, how fast to go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Node both traversals start from. Must exist in the graph.
    pub start: NodeId,
    /// Node both traversals look for. May be absent from the graph, in which
    /// case both run to exhaustion.
    pub target: NodeId,
    /// Delay after every step, in seconds.
    #[serde(default)]
    pub pace: Pace,
}

impl SearchConfig {
    /// Creates a configuration.
    pub fn new(start: impl Into<NodeId>, target: impl Into<NodeId>, pace: Pace) -> Self {
        Self {
            start: start.into(),
            target: target.into(),
            pace,
        }
    }

    /// Checks the configuration against `graph`.
    ///
    /// # Errors
    /// - [`ConfigError::MissingNode`] if `start` is empty.
    /// - [`TraversalError::UnknownNode`] if `start` is not in the graph.
    pub fn validate(&self, graph: &Graph) -> Result<()> {
        if self.start.as_str().is_empty() {
            return Err(ConfigError::MissingNode("start").into());
        }
        if !graph.contains(self.start.as_str()) {
            return Err(TraversalError::UnknownNode(self.start.clone()));
        }
        Ok(())
    }
}
