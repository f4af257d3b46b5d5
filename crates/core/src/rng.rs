//! Small sampling helpers over the run's ChaCha stream.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

pub(crate) fn random_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

pub(crate) fn roll_percent(rng: &mut ChaCha8Rng, percent: u32) -> bool {
    (rng.next_u64() % 100) < u64::from(percent)
}

pub(crate) fn roll_die(rng: &mut ChaCha8Rng, sides: u32) -> i32 {
    1 + (rng.next_u64() % u64::from(sides.max(1))) as i32
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn random_index_stays_inside_requested_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for len in 1..50 {
            assert!(random_index(&mut rng, len) < len);
        }
    }

    #[test]
    fn percent_extremes_are_certain() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(!roll_percent(&mut rng, 0));
            assert!(roll_percent(&mut rng, 100));
        }
    }

    #[test]
    fn die_rolls_cover_one_through_sides() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            assert!((1..=6).contains(&roll_die(&mut rng, 6)));
        }
    }
}
