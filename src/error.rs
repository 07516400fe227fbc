//! Error types for traversal runs.
//!
//! Errors fall into three groups:
//!
//! | Variant | Raised by | Effect |
//! |---------|-----------|--------|
//! | [`TraversalError::UnknownNode`] | graph lookup, engine start, run validation | aborts the run (start) or ends one loop (mid-traversal) |
//! | [`TraversalError::InvalidConfig`] | pace / config validation | aborts the run before any loop starts |
//! | [`TraversalError::InvalidState`] | stepping an engine outside `Stepping` | returned to the caller, engine unchanged |
//! | [`TraversalError::Spawn`] | starting a loop thread | aborts the run, cancelling any loop already started |

use thiserror::Error;

use crate::graph::NodeId;
use crate::traversal::EngineState;

/// Convenience alias used throughout the crate.
pub type Result<T, E = TraversalError> = std::result::Result<T, E>;

/// Top-level error for graph lookups, engine stepping and run scheduling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraversalError {
    /// A node id was looked up that is not a key of the graph.
    #[error("unknown node `{0}`")]
    UnknownNode(NodeId),

    /// Run configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// An engine operation was attempted in a state that does not allow it.
    #[error("cannot {operation} an engine in state {state:?}")]
    InvalidState {
        /// State the engine was in.
        state: EngineState,
        /// Operation that was refused.
        operation: &'static str,
    },

    /// The OS refused to start a loop thread.
    #[error("failed to spawn {label} loop: {message}")]
    Spawn {
        /// Algorithm whose loop could not start.
        label: &'static str,
        /// Underlying I/O error text.
        message: String,
    },
}

/// Reasons a run configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Pace text did not parse as a number.
    #[error("pace `{0}` is not a number")]
    NotANumber(String),

    /// Pace was below zero.
    #[error("pace must be non-negative, got {0}")]
    Negative(f64),

    /// Pace was NaN or infinite.
    #[error("pace must be finite, got {0}")]
    NotFinite(f64),

    /// Pace does not fit in a `Duration`.
    #[error("pace {0} is too large")]
    TooLarge(f64),

    /// A required node field was empty.
    #[error("{0} node must not be empty")]
    MissingNode(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = TraversalError::UnknownNode(NodeId::from("S42"));
        assert_eq!(err.to_string(), "unknown node `S42`");

        let err: TraversalError = ConfigError::Negative(-0.5).into();
        assert!(matches!(err, TraversalError::InvalidConfig(_)));
        assert_eq!(
            err.to_string(),
            "invalid configuration: pace must be non-negative, got -0.5"
        );

        let err = TraversalError::InvalidState {
            state: EngineState::Succeeded,
            operation: "step",
        };
        assert_eq!(err.to_string(), "cannot step an engine in state Succeeded");
    }
}
