//! SPL-T runner (default binary).
//!
//! Replays a move list (or lets the automatic player loose) on a fresh board and
//! prints the result. Diagnostics go to stderr through `tracing`; set `RUST_LOG`
//! (e.g. `RUST_LOG=splt_core=debug`) to watch splits and point blocks.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use splt::config::{MoveSource, OutputFormat, RunConfig};
use splt::core::Board;
use splt::engine::{replay, Autoplayer, ReplayStep};
use splt::text_view::TextView;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = RunConfig::from_env()?
        .apply_args(std::env::args().skip(1))
        .context("invalid arguments")?;
    info!(?config, "starting run");

    let mut board = Board::with_config(config.board);
    info!(refill = board.config().refill.as_str(), "board ready");
    let steps = match &config.moves {
        MoveSource::List(moves) => replay(&mut board, moves),
        MoveSource::Auto { turns, seed } => {
            let played = Autoplayer::new(*seed).play(&mut board, *turns);
            info!(played, requested = turns, "autoplay finished");
            Vec::new()
        }
    };

    board
        .check_invariants()
        .context("board invariant violated")?;

    let snapshot = board.snapshot();
    match config.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        OutputFormat::Text => {
            for step in &steps {
                println!("{}", describe(step));
            }
            if !steps.is_empty() {
                println!();
            }
            let view = TextView::default();
            print!("{}", view.render(&snapshot));
            print!("{}", view.tile_list(&snapshot));
            if !board.has_legal_split() {
                println!("no legal split left");
            }
        }
    }
    Ok(())
}

fn describe(step: &ReplayStep) -> String {
    match &step.outcome {
        Ok(report) => format!(
            "split {} {} -> {} + {} ({})",
            step.tile_ref,
            report.parent,
            report.children[0],
            report.children[1],
            report.axis.as_str()
        ),
        Err(err) => {
            warn!(tile_ref = %step.tile_ref, code = err.code(), "move rejected");
            format!("move {} rejected: {}", step.tile_ref, err)
        }
    }
}
