//! Immutable adjacency graphs shared read-only by traversal loops.
//!
//! - `node`: the [`NodeId`] identifier type
//! - `adjacency`: the [`Graph`] itself and its [`GraphBuilder`]
//! - `fixture`: the ten-node graph used by the CLI and the tests

pub mod adjacency;
pub mod fixture;
pub mod node;

pub use adjacency::{Graph, GraphBuilder};
pub use fixture::fixture;
pub use node::NodeId;
