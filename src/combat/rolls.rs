//! Percentile roll sources
//!
//! Hit and crit checks draw from a pluggable source so combat can be
//! replayed from a seed, or driven by forced rolls in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Source of d100 rolls
pub trait RollSource {
    /// Uniform roll in `[1, 100]`
    fn roll_percent(&mut self) -> u32;
}

/// Seeded ChaCha stream - the same seed always yields the same rolls
#[derive(Debug, Clone)]
pub struct SeededRolls {
    rng: ChaCha8Rng,
}

impl SeededRolls {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RollSource for SeededRolls {
    fn roll_percent(&mut self) -> u32 {
        self.rng.gen_range(1..=100)
    }
}

/// Replays a fixed sequence of rolls
///
/// Once exhausted it returns 100, which only succeeds against a 100% chance.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<u32>,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().map(|r| r.clamp(1, 100)).collect(),
        }
    }

    pub fn push(&mut self, roll: u32) {
        self.rolls.push_back(roll.clamp(1, 100));
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RollSource for ScriptedRolls {
    fn roll_percent(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(100)
    }
}

impl<R: RollSource + ?Sized> RollSource for Box<R> {
    fn roll_percent(&mut self) -> u32 {
        (**self).roll_percent()
    }
}
