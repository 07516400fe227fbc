//! The stepping traversal state machine.
//!
//! ```text
//!  Unstarted --initialize--> Stepping --step--> Stepping
//!                               |  \
//!                  target found |   \ frontier empty
//!                               v    v
//!                         Succeeded  Exhausted
//! ```
//!
//! A lookup failure while expanding a node moves the engine to `Failed`.
//! All three end states are terminal: `step` on them returns
//! [`TraversalError::InvalidState`] and leaves the engine untouched.
//! `initialize` may be called again from any state to restart from scratch.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use tracing::trace;

use crate::error::{Result, TraversalError};
use crate::graph::{Graph, NodeId};
use crate::traversal::{Discipline, Frontier, Snapshot, Stage};

/// Lifecycle of a [`TraversalEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EngineState {
    /// Created but not initialized.
    Unstarted,
    /// Initialized and not finished.
    Stepping,
    /// The target was processed.
    Succeeded,
    /// The frontier ran dry without reaching the target.
    Exhausted,
    /// Expansion hit a node missing from the graph.
    Failed,
}

impl EngineState {
    /// Returns `true` for states no further step can leave.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Exhausted | Self::Failed)
    }
}

/// Result of one [`TraversalEngine::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Snapshots taken during the step, in emission order.
    ///
    /// Empty when the step found the frontier exhausted; otherwise a
    /// `Pending` and a `Processed` snapshot, followed by an `Expanded` one
    /// unless the processed node was the target.
    pub snapshots: Vec<Snapshot>,
    /// `true` once the engine reached a terminal state.
    pub finished: bool,
}

/// One BFS or DFS traversal over a borrowed graph.
#[derive(Debug)]
pub struct TraversalEngine<'g> {
    graph: &'g Graph,
    start: NodeId,
    target: NodeId,
    state: EngineState,
    frontier: Frontier,
    visited: HashSet<NodeId>,
    path: Vec<NodeId>,
}

impl<'g> TraversalEngine<'g> {
    /// Creates an unstarted engine. `target` need not exist in the graph.
    pub fn new(
        graph: &'g Graph,
        start: impl Into<NodeId>,
        target: impl Into<NodeId>,
        discipline: Discipline,
    ) -> Self {
        Self {
            graph,
            start: start.into(),
            target: target.into(),
            state: EngineState::Unstarted,
            frontier: Frontier::new(discipline),
            visited: HashSet::new(),
            path: Vec::new(),
        }
    }

    /// Resets the frontier to `[start]` and clears visited nodes and path.
    ///
    /// # Errors
    /// Returns [`TraversalError::UnknownNode`] if `start` is not in the graph;
    /// the engine then stays in its previous state.
    pub fn initialize(&mut self) -> Result<()> {
        let start = self
            .graph
            .node(self.start.as_str())
            .cloned()
            .ok_or_else(|| TraversalError::UnknownNode(self.start.clone()))?;

        self.frontier.clear();
        self.frontier.push(start);
        self.visited.clear();
        self.path.clear();
        self.state = EngineState::Stepping;
        Ok(())
    }

    /// Processes one node.
    ///
    /// # Errors
    /// - [`TraversalError::InvalidState`] unless the engine is `Stepping`.
    /// - [`TraversalError::UnknownNode`] if the processed node has no
    ///   adjacency entry; the engine moves to `Failed`.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.state != EngineState::Stepping {
            return Err(TraversalError::InvalidState {
                state: self.state,
                operation: "step",
            });
        }

        let mut snapshots = Vec::with_capacity(3);
        if self.frontier.is_empty() {
            return Ok(self.finish(EngineState::Exhausted, snapshots));
        }
        snapshots.push(self.snapshot(Stage::Pending, None));

        let Some(current) = self.frontier.pop() else {
            return Ok(self.finish(EngineState::Exhausted, snapshots));
        };
        self.visited.insert(current.clone());
        self.path.push(current.clone());
        snapshots.push(self.snapshot(Stage::Processed, Some(&current)));

        trace!(
            label = %self.discipline(),
            current = %current,
            frontier = self.frontier.len(),
            "processed node"
        );

        if current == self.target {
            return Ok(self.finish(EngineState::Succeeded, snapshots));
        }

        let graph = self.graph;
        let neighbors = match graph.neighbors(current.as_str()) {
            Ok(neighbors) => neighbors,
            Err(err) => {
                self.state = EngineState::Failed;
                return Err(err);
            }
        };
        for next in neighbors {
            if !self.visited.contains(next) && !self.frontier.contains(next.as_str()) {
                self.frontier.push(next.clone());
            }
        }
        snapshots.push(self.snapshot(Stage::Expanded, Some(&current)));

        Ok(StepOutcome {
            snapshots,
            finished: false,
        })
    }

    /// Steps until a terminal state and returns it.
    ///
    /// Initializes the engine first if it is still `Unstarted`.
    ///
    /// # Errors
    /// Propagates the first error from [`initialize`](Self::initialize) or
    /// [`step`](Self::step).
    pub fn run_to_completion(&mut self) -> Result<EngineState> {
        if self.state == EngineState::Unstarted {
            self.initialize()?;
        }
        while !self.state.is_terminal() {
            self.step()?;
        }
        Ok(self.state)
    }

    /// Restarts the engine and returns a lazy sequence of every snapshot it
    /// emits until it finishes.
    ///
    /// # Errors
    /// Returns [`TraversalError::UnknownNode`] if `start` is not in the graph.
    pub fn snapshots(&mut self) -> Result<Snapshots<'_, 'g>> {
        self.initialize()?;
        Ok(Snapshots {
            engine: self,
            pending: VecDeque::new(),
            done: false,
        })
    }

    /// Copies the current state into a snapshot.
    pub fn snapshot(&self, stage: Stage, current: Option<&NodeId>) -> Snapshot {
        Snapshot {
            label: self.discipline(),
            stage,
            frontier: self.frontier.to_vec(),
            visited: self.visited.iter().cloned().collect(),
            path: self.path.clone(),
            current: current.cloned(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Frontier removal policy.
    pub fn discipline(&self) -> Discipline {
        self.frontier.discipline()
    }

    /// Processing order so far.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Live frontier.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Returns `true` if `node` has been processed.
    pub fn is_visited(&self, node: &str) -> bool {
        self.visited.contains(node)
    }

    /// Start node.
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    /// Target node.
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    fn finish(&mut self, state: EngineState, snapshots: Vec<Snapshot>) -> StepOutcome {
        self.state = state;
        StepOutcome {
            snapshots,
            finished: true,
        }
    }
}

/// Lazy snapshot sequence returned by [`TraversalEngine::snapshots`].
///
/// Yields at most one error, after which it is exhausted.
#[derive(Debug)]
pub struct Snapshots<'e, 'g> {
    engine: &'e mut TraversalEngine<'g>,
    pending: VecDeque<Snapshot>,
    done: bool,
}

impl Iterator for Snapshots<'_, '_> {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(snapshot) = self.pending.pop_front() {
                return Some(Ok(snapshot));
            }
            if self.done {
                return None;
            }
            match self.engine.step() {
                Ok(outcome) => {
                    self.done = outcome.finished;
                    self.pending.extend(outcome.snapshots);
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixture;

    fn names(nodes: &[NodeId]) -> Vec<&str> {
        nodes.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn step_before_initialize_is_rejected() {
        let g = fixture();
        let mut e = TraversalEngine::new(&g, "S0", "S9", Discipline::Fifo);
        assert_eq!(
            e.step(),
            Err(TraversalError::InvalidState {
                state: EngineState::Unstarted,
                operation: "step",
            })
        );
    }

    #[test]
    fn unknown_start_is_rejected() {
        let g = fixture();
        let mut e = TraversalEngine::new(&g, "nope", "S9", Discipline::Lifo);
        assert_eq!(
            e.initialize(),
            Err(TraversalError::UnknownNode(NodeId::from("nope")))
        );
        assert_eq!(e.state(), EngineState::Unstarted);
    }

    #[test]
    fn first_step_emits_three_stages() {
        let g = fixture();
        let mut e = TraversalEngine::new(&g, "S0", "S9", Discipline::Fifo);
        e.initialize().unwrap();

        let out = e.step().unwrap();
        assert!(!out.finished);
        let stages: Vec<Stage> = out.snapshots.iter().map(|s| s.stage).collect();
        assert_eq!(stages, [Stage::Pending, Stage::Processed, Stage::Expanded]);

        assert_eq!(names(&out.snapshots[0].frontier), ["S0"]);
        assert!(out.snapshots[1].frontier.is_empty());
        assert_eq!(names(&out.snapshots[1].path), ["S0"]);
        assert_eq!(
            names(&out.snapshots[2].frontier),
            ["S1", "S2", "S3", "S4", "S5"]
        );
    }

    #[test]
    fn terminal_engine_refuses_to_step() {
        let g = fixture();
        let mut e = TraversalEngine::new(&g, "S3", "S3", Discipline::Lifo);
        assert_eq!(e.run_to_completion().unwrap(), EngineState::Succeeded);
        assert_eq!(names(e.path()), ["S3"]);
        assert!(matches!(
            e.step(),
            Err(TraversalError::InvalidState {
                state: EngineState::Succeeded,
                ..
            })
        ));
        assert_eq!(names(e.path()), ["S3"]);
    }

    #[test]
    fn exhausting_step_emits_nothing() {
        let g = fixture();
        let mut e = TraversalEngine::new(&g, "S2", "S0", Discipline::Fifo);
        e.initialize().unwrap();
        assert!(!e.step().unwrap().finished);

        let last = e.step().unwrap();
        assert!(last.finished);
        assert!(last.snapshots.is_empty());
        assert_eq!(e.state(), EngineState::Exhausted);
    }

    #[test]
    fn snapshots_restart_from_scratch() {
        let g = fixture();
        let mut e = TraversalEngine::new(&g, "S0", "S5", Discipline::Lifo);
        let first: Vec<Snapshot> = e.snapshots().unwrap().map(Result::unwrap).collect();
        let second: Vec<Snapshot> = e.snapshots().unwrap().map(Result::unwrap).collect();
        assert_eq!(first, second);
        assert_eq!(names(&first.last().unwrap().path), ["S0", "S5"]);
    }

    #[test]
    fn dangling_neighbor_fails_the_engine() {
        let g = Graph::builder().edge("a", "ghost").build_open();
        let mut e = TraversalEngine::new(&g, "a", "zz", Discipline::Fifo);
        let items: Vec<Result<Snapshot>> = e.snapshots().unwrap().collect();

        assert_eq!(
            items.last(),
            Some(&Err(TraversalError::UnknownNode(NodeId::from("ghost"))))
        );
        assert_eq!(e.state(), EngineState::Failed);
    }
}
