//! Tessera command line scorer.
//!
//! Reads a board snapshot in JSON and prints the score breakdown for the
//! tile at a given coordinate.

use anyhow::Context;
use tessera_core::score_placement;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::ScorerConfig;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ScorerConfig::from_env_and_args(std::env::args().skip(1))?;
    let board = config.load_board()?;
    info!(
        path = %config.board_path.display(),
        tiles = board.len(),
        "Loaded board"
    );

    let score = score_placement(&board, config.at)
        .with_context(|| format!("cannot score tile at {}", config.at))?;
    info!(coord = %config.at, total = score.total, "Scored placement");

    println!("{}", serde_json::to_string_pretty(&score)?);
    Ok(())
}
