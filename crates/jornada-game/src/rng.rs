//! Random sources for dice rolls and card picks.
//!
//! The engine never calls a global RNG. It owns a [`RandomSource`], so a
//! session can be replayed from a seed ([`GameRng`]) or driven through an
//! exact script in tests ([`ScriptedRandom`]).

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Where the engine gets its randomness.
pub trait RandomSource {
    /// A die roll, uniform in `1..=sides`. `sides` is at least 1.
    fn roll_die(&mut self, sides: u8) -> u8;

    /// An index uniform in `0..len`. `len` is at least 1. The deck reduces
    /// larger values mod `len`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Seeded, reproducible randomness.
///
/// The same seed always yields the same sequence of rolls and picks.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: StdRng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeds from the thread-local generator. The seed stays readable
    /// through [`GameRng::seed`] so a session can be reproduced.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn roll_die(&mut self, sides: u8) -> u8 {
        self.inner.random_range(1..=sides.max(1))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len.max(1))
    }
}

/// Replays fixed sequences of dice values and picks.
///
/// Dice values are clamped into `1..=sides`, picks are reduced mod `len`.
/// Once a queue runs dry it keeps answering `1` (dice) or `0` (picks).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    dice: VecDeque<u8>,
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dice(mut self, dice: impl IntoIterator<Item = u8>) -> Self {
        self.dice.extend(dice);
        self
    }

    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn push_die(&mut self, value: u8) {
        self.dice.push_back(value);
    }

    pub fn push_pick(&mut self, index: usize) {
        self.picks.push_back(index);
    }
}

impl RandomSource for ScriptedRandom {
    fn roll_die(&mut self, sides: u8) -> u8 {
        self.dice.pop_front().unwrap_or(1).clamp(1, sides.max(1))
    }

    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len.max(1)
    }
}
