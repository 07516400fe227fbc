//! In-memory renderer.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::scheduler::{LoopReport, Renderer};
use crate::traversal::{Discipline, Snapshot};

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// [`Renderer::reset`].
    Reset(Discipline),
    /// [`Renderer::render`].
    Frame {
        /// Caption passed along with the snapshot.
        caption: String,
        /// The snapshot.
        snapshot: Snapshot,
    },
    /// [`Renderer::complete`].
    Complete(LoopReport),
}

impl RenderEvent {
    /// Algorithm the event belongs to.
    pub fn label(&self) -> Discipline {
        match self {
            Self::Reset(label) => *label,
            Self::Frame { snapshot, .. } => snapshot.label,
            Self::Complete(report) => report.label,
        }
    }
}

/// Records every renderer call in arrival order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies all events so far.
    pub fn events(&self) -> Vec<RenderEvent> {
        self.lock().clone()
    }

    /// Snapshots rendered for `label`, in order.
    pub fn frames(&self, label: Discipline) -> Vec<Snapshot> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Frame { snapshot, .. } if snapshot.label == label => {
                    Some(snapshot.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Completion reports, in arrival order.
    pub fn reports(&self) -> Vec<LoopReport> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Complete(report) => Some(report.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RenderEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Renderer for RecordingRenderer {
    fn reset(&self, label: Discipline) {
        self.lock().push(RenderEvent::Reset(label));
    }

    fn render(&self, caption: &str, snapshot: &Snapshot) {
        self.lock().push(RenderEvent::Frame {
            caption: caption.to_owned(),
            snapshot: snapshot.clone(),
        });
    }

    fn complete(&self, report: &LoopReport) {
        self.lock().push(RenderEvent::Complete(report.clone()));
    }
}
