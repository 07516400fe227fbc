//! # `frontier_race` - BFS and DFS, side by side
//!
//! Runs breadth-first and depth-first search over the same graph at the same
//! time, each on its own thread, and streams their frontier, visited set and
//! processing order to a renderer one paced step at a time.
//!
//! ## Architecture
//!
//! 1. **Graph** ([`Graph`]): immutable, insertion-ordered adjacency lists.
//!    Shared across threads as `Arc<Graph>`, never locked.
//! 2. **Engine** ([`TraversalEngine`]): a state machine parameterized by a
//!    [`Discipline`] (FIFO for BFS, LIFO for DFS). Every step returns owned
//!    [`Snapshot`]s; engine internals never leave the engine.
//! 3. **Scheduler** ([`Scheduler`]): starts one loop thread per discipline,
//!    paces them with a shared delay, forwards snapshots to a [`Renderer`],
//!    and cancels the previous run before starting a new one.
//!
//! ### Step contract
//!
//! Each step removes one node from the frontier and emits up to three
//! snapshots: the frontier before removal (`Pending`), the state after the
//! node was processed (`Processed`) and, unless the node was the target, the
//! frontier after its neighbors were queued (`Expanded`).
//!
//! The recorded path is the processing order, not a parent-pointer path:
//! for the fixture graph, BFS from `S0` to `S9` processes all ten nodes
//! while DFS gets there in seven.
//!
//! ## Example
//!
//! ```rust
//! use frontier_race::{fixture, Discipline, EngineState, NodeId, TraversalEngine};
//!
//! let graph = fixture();
//! let mut dfs = TraversalEngine::new(&graph, "S0", "S9", Discipline::Lifo);
//! assert_eq!(dfs.run_to_completion().unwrap(), EngineState::Succeeded);
//!
//! let order: Vec<&str> = dfs.path().iter().map(NodeId::as_str).collect();
//! assert_eq!(order, ["S0", "S5", "S4", "S3", "S2", "S1", "S9"]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod error;
pub mod graph;
pub mod render;
pub mod scheduler;
pub mod traversal;

pub use concurrency::CancelToken;
pub use error::{ConfigError, Result, TraversalError};
pub use graph::{fixture, Graph, GraphBuilder, NodeId};
pub use render::{OutputFormat, RecordingRenderer, RenderEvent, TextRenderer};
pub use scheduler::{
    LoopOutcome, LoopReport, NullRenderer, Pace, Renderer, RunHandle, RunReport, Scheduler,
    SearchConfig,
};
pub use traversal::{
    Discipline, EngineState, Frontier, Snapshot, Snapshots, Stage, StepOutcome, TraversalEngine,
};
