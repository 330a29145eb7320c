//! Uniform random draws for spawn parameters and per-tick jitter

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Random source owned by one simulation instance
#[derive(Debug, Clone)]
pub struct SketchRng {
    inner: Pcg32,
}

impl SketchRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Fresh generator seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    /// Uniform real in `[min, max)`; an empty range yields `min`
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.inner.random::<f32>()
    }

    /// Uniform real within a `(min, max)` pair
    pub fn in_range(&mut self, (min, max): (f32, f32)) -> f32 {
        self.uniform(min, max)
    }

    /// Uniform real in `[0, max)`
    pub fn below(&mut self, max: f32) -> f32 {
        self.uniform(0.0, max)
    }

    /// Uniform integer in `[min, max_exclusive)`; an empty range yields `min`
    pub fn int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.inner.random_range(min..max_exclusive)
    }

    /// True with probability `p`, from a uniform `[0, 1)` sample
    pub fn chance(&mut self, p: f32) -> bool {
        self.inner.random::<f32>() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        let mut rng = SketchRng::seeded(7);
        for _ in 0..1000 {
            let v = rng.uniform(-5.0, 5.0);
            assert!((-5.0..5.0).contains(&v));
            let i = rng.int(3, 8);
            assert!((3..8).contains(&i));
            assert!(rng.below(400.0) < 400.0);
        }
        assert_eq!(rng.uniform(2.0, 2.0), 2.0);
        assert_eq!(rng.int(4, 4), 4);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = SketchRng::seeded(1);
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
    }
}
