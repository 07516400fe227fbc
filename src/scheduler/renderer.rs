//! The rendering seam.

use crate::scheduler::LoopReport;
use crate::traversal::{Discipline, Snapshot};

/// Consumer of traversal output.
///
/// Both loops of a run call into the same renderer from their own threads, so
/// implementations must be `Send + Sync` and serialize their own output.
/// Calls for one algorithm arrive strictly in order; calls for different
/// algorithms interleave arbitrarily.
pub trait Renderer: Send + Sync {
    /// Clears whatever a previous run left on display for `label`.
    ///
    /// Called for both algorithms before a run's loops start.
    fn reset(&self, label: Discipline) {
        let _ = label;
    }

    /// Draws one snapshot under `caption`.
    fn render(&self, caption: &str, snapshot: &Snapshot);

    /// Shows a loop's final result: elapsed time and path, or its error.
    ///
    /// Called exactly once per loop, after its last `render`.
    fn complete(&self, report: &LoopReport);
}

/// A renderer that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _caption: &str, _snapshot: &Snapshot) {}

    fn complete(&self, _report: &LoopReport) {}
}
