use delve_core::{AdvanceStopReason, SimConfig, Simulation};

fn play(seed: u64, slices: &[u64]) -> (u64, u64, u32) {
    let mut sim = Simulation::new(seed, SimConfig::default()).expect("level builds");
    for &elapsed in slices {
        let result = sim.advance(elapsed).expect("advance");
        if matches!(result.stop_reason, AdvanceStopReason::Finished(_)) {
            break;
        }
    }
    (sim.snapshot_hash(), sim.turn(), sim.level())
}

#[test]
fn test_determinism_identical_seeds_produce_same_hash() {
    let slices = [250, 250, 1_000, 16, 16, 5_000, 733];
    assert_eq!(play(12_345, &slices), play(12_345, &slices));
}

#[test]
fn test_determinism_different_seeds_produce_different_hashes() {
    let slices = [2_000; 5];
    assert_ne!(
        play(123, &slices).0,
        play(456, &slices).0,
        "different seeds should produce different runs"
    );
}

#[test]
fn test_determinism_time_slicing_does_not_change_outcome() {
    let coarse = play(77, &[5_000]);
    let fine = play(77, &[500; 10]);
    assert_eq!(coarse.1, fine.1, "same elapsed time pays for the same number of turns");
    assert_eq!(coarse.0, fine.0);
}
