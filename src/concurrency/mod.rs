//! Concurrency helpers for traversal loops.
//!
//! Loops share nothing mutable except a [`CancelToken`], which the scheduler
//! trips when a newer run supersedes them.

pub mod cancel;

pub use cancel::CancelToken;
