//! Weighted load-balancing decision logic for SlackSim.
//!
//! This crate holds the deterministic core of the simulator: per-backend
//! capacity state, slack-first selection, and the response-time-driven
//! weight optimization cycle. It performs no I/O and draws every observed
//! response time from a caller-supplied [`ResponseTimeSampler`], so the
//! same sampler script always produces the same pool state.
//!
//! * [`BackendState`]: weight, load, energy, and timing for one backend
//! * [`Balancer`]: pool ownership, selection, and optimization
//! * [`ResponseTimeSampler`]: injected source of observed latencies
//!
//! The driving simulation (workloads, config, reporting) lives in the
//! `slacksim-core` crate.

pub mod backend;
pub mod balancer;
pub mod error;
pub mod sampler;

pub use backend::{
    BackendSnapshot, BackendState, MIN_WEIGHT, RATED_ENERGY_PER_WEIGHT, SLA_THRESHOLD_MS,
};
pub use balancer::{Balancer, RESPONSE_TIME_CEILING_MS};
pub use error::BalancerError;
pub use sampler::{FixedSampler, ResponseTimeSampler};
