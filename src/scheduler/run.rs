//! One run: a pair of paced traversal loops on their own threads.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::concurrency::CancelToken;
use crate::error::{Result, TraversalError};
use crate::graph::Graph;
use crate::scheduler::{LoopOutcome, LoopReport, Renderer, RunReport, SearchConfig};
use crate::traversal::{Discipline, EngineState, TraversalEngine};

/// Handle to the two loops of a spawned run.
///
/// Loops are parked until [`start`](Self::start) is called, so a caller can
/// prepare the renderer once both threads exist. A loop cancelled before it
/// was started returns without touching the renderer.
///
/// Dropping the handle detaches the loops; call [`cancel`](Self::cancel)
/// and [`join`](Self::join) to stop them deterministically.
#[derive(Debug)]
pub struct RunHandle {
    config: SearchConfig,
    token: CancelToken,
    started: Arc<AtomicBool>,
    bfs: JoinHandle<LoopReport>,
    dfs: JoinHandle<LoopReport>,
}

impl RunHandle {
    /// Spawns one parked loop per discipline.
    ///
    /// # Errors
    /// Returns [`TraversalError::Spawn`] if a thread cannot be started; a loop
    /// that did start is cancelled and joined first, without rendering.
    pub fn spawn(
        graph: Arc<Graph>,
        renderer: Arc<dyn Renderer>,
        config: SearchConfig,
    ) -> Result<Self> {
        let token = CancelToken::new();
        let started = Arc::new(AtomicBool::new(false));
        let gate = (&token, &started);
        let bfs = spawn_loop(Discipline::Fifo, &graph, &renderer, &config, gate)?;
        let dfs = match spawn_loop(Discipline::Lifo, &graph, &renderer, &config, gate) {
            Ok(dfs) => dfs,
            Err(err) => {
                token.cancel();
                bfs.thread().unpark();
                let _ = bfs.join();
                return Err(err);
            }
        };
        Ok(Self {
            config,
            token,
            started,
            bfs,
            dfs,
        })
    }

    /// Lets both loops begin stepping.
    pub fn start(&self) {
        self.started.store(true, Ordering::Release);
        self.bfs.thread().unpark();
        self.dfs.thread().unpark();
        info!(
            start = %self.config.start,
            target = %self.config.target,
            pace = %self.config.pace,
            "run started"
        );
    }

    /// Configuration the run was spawned with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Asks both loops to stop at their next step boundary.
    pub fn cancel(&self) {
        self.token.cancel();
        self.bfs.thread().unpark();
        self.dfs.thread().unpark();
    }

    /// Returns `true` once both loops have returned.
    pub fn is_finished(&self) -> bool {
        self.bfs.is_finished() && self.dfs.is_finished()
    }

    /// Waits for both loops and collects their reports.
    ///
    /// A loop that panicked is reported as [`LoopOutcome::Panicked`]; the
    /// other loop's report is unaffected.
    pub fn join(self) -> RunReport {
        RunReport {
            bfs: join_loop(Discipline::Fifo, self.bfs),
            dfs: join_loop(Discipline::Lifo, self.dfs),
        }
    }
}

fn spawn_loop(
    discipline: Discipline,
    graph: &Arc<Graph>,
    renderer: &Arc<dyn Renderer>,
    config: &SearchConfig,
    (token, started): (&CancelToken, &Arc<AtomicBool>),
) -> Result<JoinHandle<LoopReport>> {
    let graph = Arc::clone(graph);
    let renderer = Arc::clone(renderer);
    let config = config.clone();
    let token = token.clone();
    let started = Arc::clone(started);
    thread::Builder::new()
        .name(format!("{}-loop", discipline.label().to_lowercase()))
        .spawn(move || {
            while !started.load(Ordering::Acquire) {
                if token.is_cancelled() {
                    return LoopReport {
                        label: discipline,
                        outcome: LoopOutcome::Cancelled { path: Vec::new() },
                        elapsed: Duration::ZERO,
                        steps: 0,
                    };
                }
                thread::park();
            }
            drive(&graph, discipline, &config, &token, &*renderer)
        })
        .map_err(|err| TraversalError::Spawn {
            label: discipline.label(),
            message: err.to_string(),
        })
}

// Only reached when `Renderer::complete` itself panics; `drive` catches the rest.
fn join_loop(discipline: Discipline, handle: JoinHandle<LoopReport>) -> LoopReport {
    handle.join().unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(label = %discipline, %message, "loop panicked while completing");
        LoopReport {
            label: discipline,
            outcome: LoopOutcome::Panicked { message },
            elapsed: Duration::ZERO,
            steps: 0,
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("non-string panic payload")
    }
}

/// Body of one loop thread: `initialize`, then `step`, render, sleep until
/// the engine finishes or the token is cancelled.
///
/// Errors and renderer panics end the loop with a report carrying the time
/// and steps so far; [`Renderer::complete`] is called exactly once either way.
pub(crate) fn drive(
    graph: &Graph,
    discipline: Discipline,
    config: &SearchConfig,
    token: &CancelToken,
    renderer: &dyn Renderer,
) -> LoopReport {
    let began = Instant::now();
    let mut engine = TraversalEngine::new(
        graph,
        config.start.clone(),
        config.target.clone(),
        discipline,
    );
    let mut steps = 0;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        advance(&mut engine, config, token, renderer, &mut steps)
    }))
    .unwrap_or_else(|payload| {
        Ok(LoopOutcome::Panicked {
            message: panic_message(payload.as_ref()),
        })
    })
    .unwrap_or_else(|error| LoopOutcome::Failed { error });

    let report = LoopReport {
        label: discipline,
        outcome,
        elapsed: began.elapsed(),
        steps,
    };
    match &report.outcome {
        LoopOutcome::Failed { error } => {
            warn!(label = %discipline, %error, elapsed = ?report.elapsed, "loop failed");
        }
        LoopOutcome::Panicked { message } => {
            warn!(label = %discipline, %message, elapsed = ?report.elapsed, "loop panicked");
        }
        LoopOutcome::Cancelled { .. } => info!(label = %discipline, steps, "loop cancelled"),
        _ => info!(
            label = %discipline,
            steps,
            success = report.is_success(),
            elapsed = ?report.elapsed,
            "loop finished"
        ),
    }
    renderer.complete(&report);
    report
}

fn advance(
    engine: &mut TraversalEngine<'_>,
    config: &SearchConfig,
    token: &CancelToken,
    renderer: &dyn Renderer,
    steps: &mut usize,
) -> Result<LoopOutcome> {
    engine.initialize()?;
    loop {
        if token.is_cancelled() {
            return Ok(LoopOutcome::Cancelled {
                path: engine.path().to_vec(),
            });
        }

        let outcome = engine.step()?;
        if !outcome.snapshots.is_empty() {
            *steps += 1;
        }
        for snapshot in &outcome.snapshots {
            renderer.render(&snapshot.caption(), snapshot);
        }
        if outcome.finished {
            break;
        }

        debug!(label = %engine.discipline(), step = *steps, "sleeping");
        if !token.sleep(config.pace.duration()) {
            return Ok(LoopOutcome::Cancelled {
                path: engine.path().to_vec(),
            });
        }
    }

    let path = engine.path().to_vec();
    Ok(match engine.state() {
        EngineState::Succeeded => LoopOutcome::Succeeded { path },
        _ => LoopOutcome::Exhausted { path },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixture;
    use crate::render::RecordingRenderer;
    use crate::scheduler::Pace;

    #[test]
    fn cancelled_before_start_renders_nothing() {
        let recorder = Arc::new(RecordingRenderer::new());
        let run = RunHandle::spawn(
            Arc::new(fixture()),
            recorder.clone(),
            SearchConfig::new("S0", "S9", Pace::ZERO),
        )
        .unwrap();

        run.cancel();
        let report = run.join();
        for d in Discipline::ALL {
            assert_eq!(report.get(d).outcome, LoopOutcome::Cancelled { path: Vec::new() });
        }
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn loops_wait_for_start() {
        let recorder = Arc::new(RecordingRenderer::new());
        let run = RunHandle::spawn(
            Arc::new(fixture()),
            recorder.clone(),
            SearchConfig::new("S3", "S3", Pace::ZERO),
        )
        .unwrap();
        assert_eq!(run.config().start.as_str(), "S3");

        thread::sleep(Duration::from_millis(20));
        assert!(recorder.events().is_empty());

        run.start();
        let report = run.join();
        assert!(report.bfs.is_success() && report.dfs.is_success());
        assert_eq!(recorder.reports().len(), 2);
    }
}
