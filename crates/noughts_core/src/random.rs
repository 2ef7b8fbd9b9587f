//! Injectable randomness for tie-breaking and difficulty mixing.

use std::collections::VecDeque;

/// Source of the random draws the move selector needs.
///
/// Every [`rand::Rng`] is a `RandomSource`, so callers pass a thread RNG in
/// play and a seeded or scripted source in tests.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// True with probability `p`.
    fn coin(&mut self, p: f64) -> bool;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.random_range(0..len)
    }

    fn coin(&mut self, p: f64) -> bool {
        self.random_bool(p.clamp(0.0, 1.0))
    }
}

/// Replays fixed answers, for exact tie-break assertions.
///
/// Picks are reduced modulo `len`; an exhausted script answers `0` and
/// `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    picks: VecDeque<usize>,
    coins: VecDeque<bool>,
}

impl ScriptedRandom {
    /// Creates a script from pick answers and coin answers.
    pub fn new(picks: impl IntoIterator<Item = usize>, coins: impl IntoIterator<Item = bool>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            coins: coins.into_iter().collect(),
        }
    }

    /// Answers not yet consumed (picks, coins).
    pub fn remaining(&self) -> (usize, usize) {
        (self.picks.len(), self.coins.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len.max(1)
    }

    fn coin(&mut self, _p: f64) -> bool {
        self.coins.pop_front().unwrap_or(false)
    }
}
