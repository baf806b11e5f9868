use crate::rng::{self, SplitMix64};

/// Per-frame timing handed to every decision component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Frame counter, starting at 0 for the first update after initialisation.
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds,
            seed,
        }
    }

    pub fn rng_for_stream(&self, stream: u64) -> SplitMix64 {
        SplitMix64::new(rng::derive_seed(self.seed, stream))
    }
}
