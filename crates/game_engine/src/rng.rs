use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded source for sleep bonuses so that sessions replay identically.
#[derive(Debug, Clone)]
pub struct SleepRng {
    seed: u64,
    rng: StdRng,
}

impl SleepRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn gen_range(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_sequence() {
        let mut a = SleepRng::new(9);
        let mut b = SleepRng::new(9);
        let left: Vec<u32> = (0..8).map(|_| a.gen_range(1..=100)).collect();
        let right: Vec<u32> = (0..8).map(|_| b.gen_range(1..=100)).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|v| (1..=100).contains(v)));
    }
}
