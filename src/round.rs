//! Random target times for the guessing game

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minutes a target can show; multiples of five keep the English phrasing natural
pub const MINUTE_STEPS: [u32; 12] = [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];

/// Target time for one round, in 24-hour form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub hour: u32,
    pub minute: u32,
}

impl Round {
    /// Hour as it appears on a 12-hour dial
    pub fn hour12(&self) -> u32 {
        crate::clock::to_hour12(self.hour)
    }
}

/// Source of target times
pub trait RoundGenerator {
    fn next_round(&mut self) -> Round;
}

/// Uniform rounds: hour in 0..24, minute from [`MINUTE_STEPS`]
pub struct RandomRounds<R: Rng> {
    rng: R,
}

impl RandomRounds<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl Default for RandomRounds<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomRounds<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RoundGenerator for RandomRounds<R> {
    fn next_round(&mut self) -> Round {
        let hour = self.rng.gen_range(0..24);
        let minute = *MINUTE_STEPS.choose(&mut self.rng).unwrap_or(&0);
        Round { hour, minute }
    }
}

/// Draw a single round from the thread-local RNG
pub fn random_round() -> Round {
    RandomRounds::new().next_round()
}
