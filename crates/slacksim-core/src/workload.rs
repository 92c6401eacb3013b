//! Response-time workload sources.
//!
//! Implementations of [`ResponseTimeSampler`] that feed the balancer:
//! a seeded uniform generator for synthetic runs and a recorded-sequence
//! replayer for regression scenarios. Randomness lives here, not in the
//! decision logic; the engine owns one sampler and every latency in a run
//! flows from it.

use crate::config::ConfigError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slacksim_balancer::ResponseTimeSampler;

/// Uniform response times in `[0, max_response_time_ms)` from a seeded
/// ChaCha8 stream. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct UniformLatencySampler {
    rng: ChaCha8Rng,
    max_response_time_ms: u64,
}

impl UniformLatencySampler {
    /// `max_response_time_ms` must be at least 1; the configuration layer
    /// enforces this before an engine is built.
    pub fn new(seed: u64, max_response_time_ms: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_response_time_ms,
        }
    }
}

impl ResponseTimeSampler for UniformLatencySampler {
    fn sample_ms(&mut self) -> u64 {
        self.rng.gen_range(0..self.max_response_time_ms)
    }
}

/// Replays a fixed latency sequence, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct RecordedLatencies {
    samples: Vec<u64>,
    cursor: usize,
}

impl RecordedLatencies {
    /// An empty sequence is rejected; cycling over nothing has no sensible
    /// next sample.
    pub fn new(samples: Vec<u64>) -> Result<Self, ConfigError> {
        if samples.is_empty() {
            return Err(ConfigError::Validation(
                "recorded latency sequence must not be empty".to_string(),
            ));
        }
        Ok(Self { samples, cursor: 0 })
    }

    /// Samples handed out so far.
    pub fn replayed(&self) -> usize {
        self.cursor
    }
}

impl ResponseTimeSampler for RecordedLatencies {
    fn sample_ms(&mut self) -> u64 {
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        sample
    }
}
