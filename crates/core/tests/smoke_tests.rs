use delve_core::mapgen::{MapGenerator, count_floor_regions};
use delve_core::{
    AdvanceStopReason, Board, CellTag, GenerationConfig, LogEvent, SimConfig, SimError,
    Simulation,
};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

fn run_until_level(seed: u64, target: u32, max_turns: u32) -> Simulation {
    let mut sim = Simulation::new(seed, SimConfig::default()).expect("level builds");
    for _ in 0..max_turns {
        if sim.level() >= target || sim.outcome().is_some() {
            break;
        }
        sim.run_turn().expect("turn runs");
    }
    sim
}

#[test]
fn test_generated_levels_keep_one_region_and_one_exit() {
    for seed in 0..20 {
        let sim = Simulation::new(seed, SimConfig::default()).expect("level builds");
        let board = sim.board();
        let exits: Vec<_> =
            board.cells().iter().filter(|cell| cell.tag == CellTag::Exit).collect();
        assert_eq!(exits.len(), 1, "seed {seed}");
        assert!(exits[0].is_walkable(), "seed {seed}");
    }

    let generator = MapGenerator::new(9, GenerationConfig::default());
    for level in 1..=8 {
        let side = level as usize + 6;
        let proto = generator.generate(level, side, side, side * 2);
        assert_eq!(count_floor_regions(&proto), 1, "level {level}");
    }
}

#[test]
fn test_free_tiles_run_out_with_an_error() {
    let generator = MapGenerator::new(5, GenerationConfig::default());
    let mut board = Board::from_proto(&generator.generate(1, 7, 7, 8), 32.0);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    while board.free_tile_count() > 0 {
        let pos = board.random_free_tile(&mut rng).expect("free tile remains");
        assert!(!board.has_actor(pos));
        board.set_occupied(pos, true);
    }
    assert_eq!(board.random_free_tile(&mut rng), Err(SimError::NoFreeTile));
}

#[test]
fn test_runs_make_progress_or_end() {
    let mut progressed = 0;
    for seed in 0..8 {
        let sim = run_until_level(seed, 2, 400);
        if sim.level() >= 2 || sim.outcome().is_some() {
            progressed += 1;
        }
        for event in sim.log() {
            if let LogEvent::ItemLooted { level, .. } = event {
                assert!(*level >= 1 && *level <= sim.level());
            }
        }
    }
    assert!(progressed >= 5, "only {progressed} of 8 runs reached an exit or ended");
}

#[test]
fn test_finished_run_stays_finished() {
    let config = SimConfig { view_radius: 2, enemy_aggro_radius: 30, ..SimConfig::default() };
    for seed in 0..30 {
        let mut sim = Simulation::new(seed, config.clone()).expect("level builds");
        for _ in 0..2_000 {
            sim.run_turn().expect("turn runs");
            if sim.outcome().is_some() {
                break;
            }
        }
        let Some(outcome) = sim.outcome() else {
            continue;
        };
        let turn = sim.turn();
        let result = sim.advance(1_000_000).expect("advance");
        assert_eq!(result.stop_reason, AdvanceStopReason::Finished(outcome));
        assert_eq!(sim.turn(), turn);
        return;
    }
    panic!("no seed ended in defeat within the turn budget");
}
