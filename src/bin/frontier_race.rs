use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use frontier_race::{
    fixture, LoopOutcome, OutputFormat, Pace, Scheduler, SearchConfig, TextRenderer,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "frontier-race")]
#[command(about = "Race BFS against DFS on the demo graph", long_about = None)]
struct Cli {
    /// Node both searches start from
    #[arg(long, default_value = "S0")]
    start: String,

    /// Node both searches look for
    #[arg(long, default_value = "S9")]
    target: String,

    /// Pause after every step, in seconds
    #[arg(long, default_value = "0.5")]
    pace: String,

    /// Read start, target and pace from a JSON file instead
    #[arg(long, conflicts_with_all = ["start", "target", "pace"])]
    config: Option<PathBuf>,

    /// Emit JSON lines instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_thread_names(true)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<SearchConfig>(&text)
                .with_context(|| format!("invalid config in {}", path.display()))?
        }
        None => {
            let pace: Pace = cli.pace.parse().context("invalid --pace")?;
            SearchConfig::new(cli.start.as_str(), cli.target.as_str(), pace)
        }
    };

    let graph = Arc::new(fixture());
    let format = if cli.json {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Text
    };
    let renderer = Arc::new(TextRenderer::new(io::stdout(), graph.all_nodes().to_vec(), format));

    let mut scheduler = Scheduler::new(Arc::clone(&graph), renderer);
    scheduler.draw_initial();
    scheduler.run(config).context("failed to start search")?;

    let Some(report) = scheduler.wait() else {
        return Ok(());
    };
    for loop_report in [&report.bfs, &report.dfs] {
        info!(
            label = %loop_report.label,
            steps = loop_report.steps,
            success = loop_report.is_success(),
            "done"
        );
    }
    if let LoopOutcome::Failed { error } = &report.bfs.outcome {
        anyhow::bail!("BFS failed: {error}");
    }
    if let LoopOutcome::Failed { error } = &report.dfs.outcome {
        anyhow::bail!("DFS failed: {error}");
    }
    Ok(())
}
