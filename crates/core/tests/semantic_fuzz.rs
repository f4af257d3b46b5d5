use delve_core::{MovementMode, Pos, SimConfig, SimError, Simulation};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn check_invariants(sim: &Simulation) -> Result<(), String> {
    let board = sim.board();
    let mut actors: Vec<Pos> = sim.world().enemies().map(|(_, enemy)| enemy.pos()).collect();
    actors.push(sim.player().pos());

    for (index, pos) in actors.iter().enumerate() {
        if !board.is_walkable(*pos) {
            return Err(format!("actor on non-floor cell {pos:?}"));
        }
        if actors[index + 1..].contains(pos) {
            return Err(format!("two actors share {pos:?}"));
        }
    }
    let flagged = board.cells().iter().filter(|cell| cell.has_actor).count();
    if flagged != actors.len() {
        return Err(format!("{flagged} cells flagged for {} actors", actors.len()));
    }
    if sim.player().last_cells().len() != sim.config().history_len {
        return Err("player history length drifted".to_string());
    }
    if board.exit_pos().is_none() {
        return Err("level lost its exit".to_string());
    }
    Ok(())
}

fn run_fuzz_simulation(seed: u64, click_seed: u64, max_turns: u32) -> Result<(), String> {
    let mut sim = Simulation::new(seed, SimConfig::default()).map_err(|err| err.to_string())?;
    let mut rng = ChaCha8Rng::seed_from_u64(click_seed);

    for turn in 0..max_turns {
        if turn % 7 == 3 {
            sim.set_movement_mode(MovementMode::Manual);
            let width = sim.board().width() as u64;
            let height = sim.board().height() as u64;
            let pos = Pos {
                y: (rng.next_u64() % height) as i32,
                x: (rng.next_u64() % width) as i32,
            };
            match sim.click_tile(pos) {
                Ok(_) | Err(SimError::InvalidManualMove { .. }) => {}
                Err(err) => return Err(format!("click on {pos:?} failed: {err}")),
            }
            sim.set_movement_mode(MovementMode::Auto);
        } else {
            sim.run_turn().map_err(|err| err.to_string())?;
        }
        check_invariants(&sim).map_err(|err| format!("turn {turn}: {err}"))?;
        if sim.outcome().is_some() {
            break;
        }
    }
    Ok(())
}

#[test]
fn test_semantic_fuzz_invariants_hold() {
    let mut runner = TestRunner::new(ProptestConfig { cases: 48, ..ProptestConfig::default() });
    runner
        .run(&(any::<u64>(), any::<u64>()), |(seed, click_seed)| {
            run_fuzz_simulation(seed, click_seed, 300).map_err(TestCaseError::fail)
        })
        .expect("simulation invariants should hold");
}
