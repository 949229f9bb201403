#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the combat stage queue with a frame loop.

mod config;
mod session;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use combat_queue_content::Database;
use combat_queue_core::QueueConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Simulates a run of combat stages and prints every selected stage.
#[derive(Debug, Parser)]
#[command(name = "combat-queue", version)]
struct CliArgs {
    /// Content database listing the enemy definitions.
    #[arg(long, default_value = "assets/enemies.toml")]
    database: PathBuf,
    /// Optional queue tuning file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Player level used to unlock enemies.
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Seed for stage generation.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Simulated frame length in milliseconds.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
    /// Number of front stages to clear after the first selection.
    #[arg(long, default_value_t = 3)]
    clears: u32,
}

/// Entry point for the combat stage queue command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let database = Database::from_path(&args.database).with_context(|| {
        format!(
            "failed to load content database from {}",
            args.database.display()
        )
    })?;
    info!(
        enemies = database.enemies().len(),
        path = %args.database.display(),
        "content database loaded"
    );
    let queue_config = match &args.config {
        Some(path) => config::load(path)?,
        None => QueueConfig::default(),
    };

    let settings = session::Settings {
        level: args.level,
        seed: args.seed,
        frame: Duration::from_millis(args.frame_ms),
        clears: args.clears,
    };
    let selections = session::run(database, queue_config, settings)?;

    for (round, selection) in selections.iter().enumerate() {
        println!(
            "round {round}: stage {} selected after {} frames [{}]",
            selection.stage.get(),
            selection.frames,
            selection.enemies.join(", ")
        );
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,combat_queue=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
