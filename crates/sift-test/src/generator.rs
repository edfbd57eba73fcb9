//! Seeded sequence generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Value;

/// Generator configuration
#[derive(Clone, Debug)]
pub struct SequenceConfig {
    /// Elements per sequence
    pub len: usize,
    /// Distinct values drawn from
    pub distinct: usize,
    /// Probability that a generated value is a list (dynamic values only)
    pub list_prob: f64,
    /// Random seed
    pub seed: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        SequenceConfig {
            len: 1000,
            distinct: 100,
            list_prob: 0.1,
            seed: 42,
        }
    }
}

impl SequenceConfig {
    /// Short sequences for quick tests
    pub fn light() -> Self {
        SequenceConfig {
            len: 64,
            distinct: 8,
            list_prob: 0.1,
            seed: 42,
        }
    }

    /// Long sequences with many classes
    pub fn heavy() -> Self {
        SequenceConfig {
            len: 10_000,
            distinct: 1000,
            list_prob: 0.05,
            seed: 42,
        }
    }

    /// Almost every element repeats
    pub fn redundant() -> Self {
        SequenceConfig {
            len: 5000,
            distinct: 4,
            list_prob: 0.2,
            seed: 42,
        }
    }
}

/// Deterministic sequence generator
pub struct SequenceGenerator {
    config: SequenceConfig,
    rng: StdRng,
}

impl SequenceGenerator {
    pub fn new(config: SequenceConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        SequenceGenerator { config, rng }
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    fn pick(&mut self) -> usize {
        self.rng.gen_range(0..self.config.distinct.max(1))
    }

    /// Integers in `0..distinct`
    pub fn integers(&mut self) -> Vec<u32> {
        (0..self.config.len).map(|_| self.pick() as u32).collect()
    }

    /// Words drawn from `distinct` stems, with random letter case
    pub fn words(&mut self) -> Vec<String> {
        (0..self.config.len)
            .map(|_| {
                let stem = format!("word{}", self.pick());
                if self.rng.gen_bool(0.5) {
                    stem.to_uppercase()
                } else {
                    stem
                }
            })
            .collect()
    }

    /// Mixed ints, strings and short int lists
    pub fn values(&mut self) -> Vec<Value> {
        (0..self.config.len)
            .map(|_| {
                let n = self.pick() as i64;
                if self.rng.gen_bool(self.config.list_prob) {
                    Value::list([n % 3, n])
                } else if n % 2 == 0 {
                    Value::Int(n)
                } else {
                    Value::Str(format!("s{}", n))
                }
            })
            .collect()
    }
}
