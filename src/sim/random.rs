//! Injectable randomness
//!
//! Everything gameplay-relevant (spawn positions, special scheduling, collapse
//! rolls) draws from a `RandomSource` owned by the simulation, so runs are
//! reproducible from a seed and tests can script exact sequences.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform samples in `[0, 1)`
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn unit(&mut self) -> f32;

    /// Uniform sample in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }

    /// Uniform index in `0..len` (returns 0 for an empty range)
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.unit() * len as f32) as usize).min(len - 1)
    }

    /// Uniform integer in `lo..=hi`
    fn between(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        lo + self.index((hi - lo + 1) as usize) as u32
    }
}

/// Seeded PCG generator, the default source for real sessions
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values are clamped into `[0, 1)`; an empty script always yields 0
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 0.999_999))
            .collect();
        Self { values, cursor: 0 }
    }

    /// A source that always returns the same sample
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_deterministic() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_unit_in_range() {
        let mut rng = SeededRng::new(7);
        for _ in 0..1000 {
            let v = rng.unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_between_inclusive() {
        let mut rng = SeededRng::new(3);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let v = rng.between(8, 12);
            assert!((8..=12).contains(&v));
            seen[(v - 8) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(rng.between(4, 4), 4);
    }

    #[test]
    fn test_scripted_cycles() {
        let mut rng = ScriptedRandom::new(vec![0.25, 0.75]);
        assert_eq!(rng.unit(), 0.25);
        assert_eq!(rng.unit(), 0.75);
        assert_eq!(rng.unit(), 0.25);
        // 1.0 is clamped below one so index() stays in bounds
        let mut top = ScriptedRandom::constant(1.0);
        assert_eq!(top.index(10), 9);
        assert_eq!(top.between(5, 8), 8);
    }
}
