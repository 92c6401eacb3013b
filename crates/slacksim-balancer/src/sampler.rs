//! Response-time sampling trait.
//!
//! The balancer never generates latencies itself. Every observed response
//! time is pulled from a [`ResponseTimeSampler`] owned by the caller, which
//! keeps the decision logic deterministic under test: hand the balancer a
//! scripted sampler and every weight and energy value is reproducible.

/// Source of observed backend response times, in milliseconds.
///
/// Implementations may be random (a simulation workload) or scripted
/// (tests, replayed traces). Sampling is `&mut self` because most useful
/// implementations advance internal state per sample.
pub trait ResponseTimeSampler {
    /// Next observed response time in milliseconds.
    fn sample_ms(&mut self) -> u64;
}

/// Sampler that returns the same response time forever.
///
/// Handy for benchmarks and for pinning a pool into a known regime
/// (always-adhering or always-violating).
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler {
    response_time_ms: u64,
}

impl FixedSampler {
    pub fn new(response_time_ms: u64) -> Self {
        Self { response_time_ms }
    }
}

impl ResponseTimeSampler for FixedSampler {
    fn sample_ms(&mut self) -> u64 {
        self.response_time_ms
    }
}
