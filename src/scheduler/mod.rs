//! Runs BFS and DFS side by side, one paced loop per algorithm.
//!
//! ```text
//! Scheduler::run(config)
//!   ├─ validate config            (errors returned synchronously)
//!   ├─ cancel + join previous run
//!   ├─ spawn both loop threads, parked (spawn errors returned, nothing rendered)
//!   ├─ Renderer::reset(BFS), Renderer::reset(DFS), then unpark
//!   ├─ thread "bfs-loop": initialize → [step → render → sleep(pace)]* → complete
//!   └─ thread "dfs-loop": initialize → [step → render → sleep(pace)]* → complete
//! ```
//!
//! The two loops share the `Arc<Graph>`, the renderer and a cancel token.
//! Everything else they touch is their own.

pub mod config;
pub mod pace;
pub mod renderer;
pub mod report;
pub mod run;

use std::sync::Arc;

use tracing::info;

pub use config::SearchConfig;
pub use pace::Pace;
pub use renderer::{NullRenderer, Renderer};
pub use report::{LoopOutcome, LoopReport, RunReport};
pub use run::RunHandle;

use crate::error::Result;
use crate::graph::Graph;
use crate::traversal::{Discipline, Snapshot};

/// Owns the graph and renderer and at most one active run.
pub struct Scheduler {
    graph: Arc<Graph>,
    renderer: Arc<dyn Renderer>,
    active: Option<RunHandle>,
}

impl Scheduler {
    /// Creates a scheduler with no active run.
    pub fn new(graph: Arc<Graph>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            graph,
            renderer,
            active: None,
        }
    }

    /// The shared graph.
    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// Renders the empty initial state of both algorithms.
    pub fn draw_initial(&self) {
        for discipline in Discipline::ALL {
            let snapshot = Snapshot::initial(discipline);
            self.renderer.render(&snapshot.caption(), &snapshot);
        }
    }

    /// Starts a run, cancelling and joining the previous one first.
    ///
    /// # Errors
    /// Configuration and start-node errors are returned before anything else
    /// happens; a previous run keeps going in that case.
    /// [`TraversalError::Spawn`](crate::error::TraversalError::Spawn) is
    /// returned before the renderer is reset, so a run that fails to spawn
    /// draws nothing.
    pub fn run(&mut self, config: SearchConfig) -> Result<()> {
        config.validate(&self.graph)?;

        if let Some(previous) = self.active.take() {
            let superseded = previous.config().clone();
            previous.cancel();
            let report = previous.join();
            info!(
                start = %superseded.start,
                target = %superseded.target,
                bfs_steps = report.bfs.steps,
                dfs_steps = report.dfs.steps,
                "previous run superseded"
            );
        }

        let handle = RunHandle::spawn(Arc::clone(&self.graph), Arc::clone(&self.renderer), config)?;
        for discipline in Discipline::ALL {
            self.renderer.reset(discipline);
        }
        handle.start();
        self.active = Some(handle);
        Ok(())
    }

    /// Starts a run from raw text input, as typed by a user.
    ///
    /// # Errors
    /// [`ConfigError::NotANumber`](crate::error::ConfigError::NotANumber) and
    /// friends for bad pace text, plus everything [`run`](Self::run) returns.
    pub fn start(&mut self, start: &str, target: &str, pace: &str) -> Result<()> {
        let pace: Pace = pace.parse()?;
        self.run(SearchConfig::new(start, target, pace))
    }

    /// Returns `true` while a run is active and at least one loop is going.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|run| !run.is_finished())
    }

    /// Waits for the active run to finish on its own.
    pub fn wait(&mut self) -> Option<RunReport> {
        self.active.take().map(RunHandle::join)
    }

    /// Cancels the active run and waits for both loops to stop.
    pub fn cancel(&mut self) -> Option<RunReport> {
        let run = self.active.take()?;
        run.cancel();
        Some(run.join())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        let _ = self.cancel();
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("nodes", &self.graph.node_count())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
