//! Stepping BFS/DFS state machines that emit value snapshots.
//!
//! A [`TraversalEngine`] owns its frontier, visited set and path. Each call to
//! [`TraversalEngine::step`] processes exactly one node and returns the
//! [`Snapshot`]s taken along the way; nothing inside the engine is ever
//! shared with a renderer.

pub mod discipline;
pub mod engine;
pub mod frontier;
pub mod snapshot;

pub use discipline::Discipline;
pub use engine::{EngineState, Snapshots, StepOutcome, TraversalEngine};
pub use frontier::Frontier;
pub use snapshot::{Snapshot, Stage};
