use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use delve_core::{Item, RunOutcome, SimConfig, Simulation};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Run a headless simulation and print a summary", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Turns to fast-forward before stopping
    #[arg(short, long, default_value_t = 200)]
    turns: u64,
    /// TOML file overriding the default simulation config
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// Print the final board as ASCII
    #[arg(long)]
    ascii: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u64,
    level: u32,
    turn: u64,
    outcome: Option<RunOutcome>,
    enemies: usize,
    snapshot_hash: String,
    items: &'a [Item],
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SimConfig::default(),
    };
    let mut sim = Simulation::new(args.seed, config).context("Failed to build the first level")?;

    while sim.turn() < args.turns && sim.outcome().is_none() {
        sim.run_turn().with_context(|| format!("Turn {} failed", sim.turn()))?;
    }
    info!(turn = sim.turn(), level = sim.level(), "run stopped");

    let summary = RunSummary {
        seed: sim.seed(),
        level: sim.level(),
        turn: sim.turn(),
        outcome: sim.outcome(),
        enemies: sim.world().enemy_count(),
        snapshot_hash: format!("0x{:016x}", sim.snapshot_hash()),
        items: &sim.inventory().temp,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Seed: {}", summary.seed);
        println!("Level: {}", summary.level);
        println!("Turn: {}", summary.turn);
        println!("Outcome: {:?}", summary.outcome);
        println!("Enemies left: {}", summary.enemies);
        println!("Items looted: {}", summary.items.len());
        println!("Snapshot Hash: {}", summary.snapshot_hash);
    }
    if args.ascii {
        println!("{}", sim.board().render_ascii(Some(sim.player().pos())));
    }

    Ok(())
}
