//! Text and JSON-lines rendering.

use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use serde_json::json;
use tracing::warn;

use crate::graph::NodeId;
use crate::scheduler::{LoopOutcome, LoopReport, Renderer};
use crate::traversal::{Discipline, Snapshot, Stage};

/// Output flavour of a [`TextRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines such as `BFS queue : [S1, S2]`.
    #[default]
    Text,
    /// One JSON object per event.
    JsonLines,
}

/// Writes every event as lines to `W`.
///
/// Each call writes its lines under one lock, so output from the two loops
/// interleaves per event, never mid-line.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: Mutex<W>,
    nodes: Vec<NodeId>,
    format: OutputFormat,
}

impl<W: Write + Send> TextRenderer<W> {
    /// Creates a renderer drawing `nodes` (usually [`Graph::all_nodes`](crate::graph::Graph::all_nodes)).
    pub fn new(out: W, nodes: Vec<NodeId>, format: OutputFormat) -> Self {
        Self {
            out: Mutex::new(out),
            nodes,
            format,
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, lines: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.write_all(lines.as_bytes()).and_then(|()| out.flush()) {
            warn!(%err, "renderer write failed");
        }
    }

    /// Renders `nodes` with a `*` after every visited one.
    fn node_line(&self, snapshot: &Snapshot) -> String {
        let mut line = String::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(node.as_str());
            if snapshot.is_visited(node.as_str()) {
                line.push('*');
            }
        }
        line
    }
}

fn list(nodes: &[NodeId]) -> String {
    let mut s = String::from("[");
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(node.as_str());
    }
    s.push(']');
    s
}

fn frontier_line(label: Discipline, frontier: &[NodeId]) -> String {
    format!("{label} {} : {}\n", label.frontier_name(), list(frontier))
}

fn time_line(label: Discipline, secs: f64) -> String {
    format!("{label} Time: {secs:.2} seconds\n")
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn reset(&self, label: Discipline) {
        match self.format {
            OutputFormat::Text => {
                let mut lines = time_line(label, 0.0);
                lines.push_str(&frontier_line(label, &[]));
                let _ = writeln!(lines, "{label} path : []");
                self.emit(&lines);
            }
            OutputFormat::JsonLines => {
                self.emit(&format!("{}\n", json!({ "event": "reset", "label": label })));
            }
        }
    }

    fn render(&self, caption: &str, snapshot: &Snapshot) {
        match self.format {
            OutputFormat::Text => {
                let mut lines = String::new();
                match snapshot.stage {
                    Stage::Initial => {
                        let _ = writeln!(lines, "{caption} : {}", self.node_line(snapshot));
                    }
                    Stage::Pending | Stage::Expanded => {
                        lines.push_str(&frontier_line(snapshot.label, &snapshot.frontier));
                    }
                    Stage::Processed => {
                        lines.push_str(&frontier_line(snapshot.label, &snapshot.frontier));
                        let _ = writeln!(lines, "{caption} : {}", self.node_line(snapshot));
                    }
                }
                self.emit(&lines);
            }
            OutputFormat::JsonLines => {
                let event = json!({ "event": "frame", "caption": caption, "snapshot": snapshot });
                self.emit(&format!("{event}\n"));
            }
        }
    }

    fn complete(&self, report: &LoopReport) {
        match self.format {
            OutputFormat::Text => {
                let label = report.label;
                let mut lines = String::new();
                match &report.outcome {
                    LoopOutcome::Succeeded { path } => {
                        let _ = writeln!(lines, "{label} path : {}", list(path));
                    }
                    LoopOutcome::Exhausted { .. } => {
                        let _ = writeln!(lines, "{label} target not reachable");
                    }
                    LoopOutcome::Cancelled { .. } => {
                        let _ = writeln!(lines, "{label} cancelled after {} steps", report.steps);
                    }
                    LoopOutcome::Failed { error } => {
                        let _ = writeln!(lines, "{label} failed: {error}");
                    }
                    LoopOutcome::Panicked { message } => {
                        let _ = writeln!(lines, "{label} panicked: {message}");
                    }
                }
                lines.push_str(&time_line(label, report.elapsed.as_secs_f64()));
                self.emit(&lines);
            }
            OutputFormat::JsonLines => {
                let event = json!({ "event": "complete", "report": report });
                self.emit(&format!("{event}\n"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::time::Duration;

    fn nodes() -> Vec<NodeId> {
        ["S0", "S1", "S2"].into_iter().map(NodeId::from).collect()
    }

    fn text(r: TextRenderer<Vec<u8>>) -> String {
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn processed_frame_shows_frontier_and_visited_nodes() {
        let r = TextRenderer::new(Vec::new(), nodes(), OutputFormat::Text);
        let snapshot = Snapshot {
            label: Discipline::Fifo,
            stage: Stage::Processed,
            frontier: vec!["S2".into()],
            visited: BTreeSet::from(["S0".into(), "S1".into()]),
            path: vec!["S0".into(), "S1".into()],
            current: Some("S1".into()),
        };
        r.render(&snapshot.caption(), &snapshot);
        assert_eq!(text(r), "BFS queue : [S2]\nBFS : S0* S1* S2\n");
    }

    #[test]
    fn reset_and_complete_lines() {
        let r = TextRenderer::new(Vec::new(), nodes(), OutputFormat::Text);
        r.reset(Discipline::Lifo);
        r.complete(&LoopReport {
            label: Discipline::Lifo,
            outcome: LoopOutcome::Succeeded {
                path: vec!["S0".into(), "S2".into()],
            },
            elapsed: Duration::from_millis(1234),
            steps: 2,
        });
        assert_eq!(
            text(r),
            "DFS Time: 0.00 seconds\nDFS stack : []\nDFS path : []\n\
             DFS path : [S0, S2]\nDFS Time: 1.23 seconds\n"
        );
    }

    #[test]
    fn json_lines_are_one_object_each() {
        let r = TextRenderer::new(Vec::new(), nodes(), OutputFormat::JsonLines);
        let initial = Snapshot::initial(Discipline::Fifo);
        r.render(&initial.caption(), &initial);
        r.reset(Discipline::Fifo);

        let out = text(r);
        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["caption"], "BFS - Initial State");
        assert_eq!(events[0]["snapshot"]["stage"], "initial");
        assert_eq!(events[1]["event"], "reset");
    }
}
