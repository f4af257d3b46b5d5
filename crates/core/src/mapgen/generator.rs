//! Level generation orchestration: carve, prune, and retry until the level has room.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::debug;

use crate::config::GenerationConfig;

use super::cave::generate_level;
use super::proto::ProtoBoard;
use super::regions::remove_disconnected_regions;
use super::seed::{attempt_seed, derive_level_seed};

pub struct MapGenerator {
    run_seed: u64,
    params: GenerationConfig,
}

impl MapGenerator {
    pub fn new(run_seed: u64, params: GenerationConfig) -> Self {
        Self { run_seed, params }
    }

    /// Produces a single connected floor region of at least `required_floor` cells.
    ///
    /// Each board size gets `attempts_per_size` tries before the board grows by two cells per
    /// side. Once `max_enlargements` is spent, the largest size falls back to an open room.
    pub fn generate(
        &self,
        level: u32,
        width: usize,
        height: usize,
        required_floor: usize,
    ) -> ProtoBoard {
        let level_seed = derive_level_seed(self.run_seed, level);
        let mut width = width.max(3);
        let mut height = height.max(3);

        for enlargement in 0..=self.params.max_enlargements {
            for attempt in 0..self.params.attempts_per_size {
                let mut rng =
                    ChaCha8Rng::seed_from_u64(attempt_seed(level_seed, enlargement, attempt));
                let board =
                    remove_disconnected_regions(generate_level(width, height, &mut rng, &self.params));
                let floor = board.floor_count();
                if floor >= required_floor.max(1) {
                    return board;
                }
                debug!(level, width, height, attempt, floor, required_floor, "rejected layout");
            }
            if enlargement < self.params.max_enlargements {
                width += 2;
                height += 2;
            }
        }

        debug!(level, width, height, "falling back to open room");
        ProtoBoard::open_room(width, height)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::mapgen::regions::count_floor_regions;

    #[test]
    fn same_inputs_produce_identical_levels() {
        let generator = MapGenerator::new(123_456, GenerationConfig::default());
        assert_eq!(generator.generate(2, 8, 8, 10), generator.generate(2, 8, 8, 10));
    }

    #[test]
    fn changing_level_changes_layout() {
        let generator = MapGenerator::new(123_456, GenerationConfig::default());
        assert_ne!(generator.generate(4, 12, 12, 10), generator.generate(5, 12, 12, 10));
    }

    #[test]
    fn impossible_fill_falls_back_to_enlarged_open_room() {
        let params = GenerationConfig {
            wall_fill_percent: 100,
            smoothing_passes: 0,
            attempts_per_size: 2,
            max_enlargements: 1,
        };
        let board = MapGenerator::new(1, params).generate(1, 7, 7, 8);
        assert_eq!(board, ProtoBoard::open_room(9, 9));
    }

    #[test]
    fn demanding_more_floor_than_fits_grows_the_board() {
        let params = GenerationConfig { wall_fill_percent: 0, ..GenerationConfig::default() };
        let board = MapGenerator::new(1, params).generate(1, 7, 7, 30);
        assert!(board.width > 7 && board.height > 7);
        assert!(board.floor_count() >= 30);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_levels_have_one_region_with_required_room(
            seed in any::<u64>(),
            level in 1_u32..=6,
        ) {
            let side = level as usize + 6;
            let required = level as usize * 2 + 6;
            let board = MapGenerator::new(seed, GenerationConfig::default())
                .generate(level, side, side, required);

            prop_assert_eq!(count_floor_regions(&board), 1);
            prop_assert!(board.floor_count() >= required);
            prop_assert!(board.width >= side && board.height >= side);
        }
    }
}
