use std::collections::HashSet;

use anyhow::{Result, bail, ensure};
use clap::Parser;
use delve_core::{CellTag, MovementMode, Pos, SimConfig, SimError, Simulation, TileKind};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to run
    #[arg(short, long, default_value_t = 16)]
    runs: u64,
    #[arg(short, long, default_value_t = 500)]
    turns: u64,
}

fn random_pos(rng: &mut ChaCha8Rng, sim: &Simulation) -> Pos {
    let width = sim.board().width() as u64 + 2;
    let height = sim.board().height() as u64 + 2;
    Pos { y: (rng.next_u64() % height) as i32 - 1, x: (rng.next_u64() % width) as i32 - 1 }
}

fn check_invariants(sim: &Simulation) -> Result<()> {
    let board = sim.board();
    let history_len = sim.config().history_len;
    let exits = board.cells().iter().filter(|cell| cell.tag == CellTag::Exit).count();
    ensure!(exits == 1, "expected exactly one exit, found {exits}");

    let mut occupied = HashSet::new();
    let actors = sim.world().enemies().map(|(_, enemy)| enemy).chain([sim.player()]);
    for actor in actors {
        let pos = actor.pos();
        ensure!(occupied.insert(pos), "two actors share {pos:?}");
        let on_floor = board.cell(pos).is_some_and(|cell| cell.tile == TileKind::Floor);
        ensure!(on_floor, "actor in wall at {pos:?}");
        ensure!(board.has_actor(pos), "actor at {pos:?} without occupancy flag");
        ensure!(actor.stats.hp <= actor.stats.max_hp, "hp above max at {pos:?}");
        ensure!(actor.last_cells().len() == history_len, "history length drifted at {pos:?}");
    }
    let flagged = board.cells().iter().filter(|cell| cell.has_actor).count();
    ensure!(flagged == occupied.len(), "{flagged} flagged cells for {} actors", occupied.len());
    Ok(())
}

/// Plays one run, switching to manual clicks now and then.
fn fuzz_run(seed: u64, turns: u64) -> Result<Simulation> {
    let mut sim = Simulation::new(seed, SimConfig::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0xF022);

    while sim.turn() < turns && sim.outcome().is_none() {
        if rng.next_u64() % 8 == 0 {
            sim.set_movement_mode(MovementMode::Manual);
            let target = random_pos(&mut rng, &sim);
            match sim.click_tile(target) {
                Ok(_) | Err(SimError::InvalidManualMove { .. }) => {}
                Err(err) => bail!("click on {target:?} failed: {err}"),
            }
            sim.set_movement_mode(MovementMode::Auto);
        } else {
            sim.run_turn()?;
        }
        check_invariants(&sim)?;
        debug!(seed, turn = sim.turn(), level = sim.level(), "checked");
    }
    Ok(sim)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    println!("Fuzzing {} runs from seed {} for up to {} turns...", args.runs, args.seed, args.turns);
    for seed in args.seed..args.seed.saturating_add(args.runs) {
        let sim = fuzz_run(seed, args.turns).map_err(|err| err.context(format!("seed {seed}")))?;
        println!(
            "seed {seed}: level {} turn {} outcome {:?}",
            sim.level(),
            sim.turn(),
            sim.outcome()
        );
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
