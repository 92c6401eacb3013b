//! Pool ownership, slack-first selection, and the weight optimization cycle.

use std::time::Instant;

use crate::backend::{BackendSnapshot, BackendState};
use crate::error::BalancerError;
use crate::sampler::ResponseTimeSampler;

/// Normalization ceiling for observed response times, in milliseconds.
///
/// A sample equal to the ceiling zeroes the energy estimate and halves the
/// weight; samples above it push the estimate negative. The ceiling is a
/// scale factor, not a clamp.
pub const RESPONSE_TIME_CEILING_MS: u64 = 300;

/// Weighted pool with slack-first selection.
///
/// Selection always picks the backend with the least remaining slack
/// (`weight - load`), breaking ties by pool order. Slack shrinks as load
/// accumulates, so between optimization cycles selection keeps returning
/// to the same tightest backend and drives its slack negative. The
/// periodic [`optimize_weights`](Balancer::optimize_weights) cycle is what
/// moves pressure elsewhere, by shrinking weights in proportion to
/// observed response times.
#[derive(Debug, Clone)]
pub struct Balancer {
    backends: Vec<BackendState>,
    optimization_cycles: u64,
}

impl Balancer {
    /// Build a balancer over an already-constructed pool.
    ///
    /// Backend names must be unique; selection results are reported by
    /// name, so duplicates would make them unattributable.
    pub fn new(backends: Vec<BackendState>) -> Result<Self, BalancerError> {
        for (i, backend) in backends.iter().enumerate() {
            if backends[..i].iter().any(|b| b.name() == backend.name()) {
                return Err(BalancerError::InvalidConfiguration(format!(
                    "duplicate backend name {:?}",
                    backend.name()
                )));
            }
        }
        Ok(Self {
            backends,
            optimization_cycles: 0,
        })
    }

    /// Build a pool directly from `(name, weight)` pairs, in order.
    pub fn from_weights<I, S>(pairs: I) -> Result<Self, BalancerError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let backends = pairs
            .into_iter()
            .map(|(name, weight)| BackendState::new(name, weight))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(backends)
    }

    pub fn backends(&self) -> &[BackendState] {
        &self.backends
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Completed optimization cycles since construction.
    pub fn optimization_cycles(&self) -> u64 {
        self.optimization_cycles
    }

    /// Pick the backend with the least slack and assign it one request.
    ///
    /// Ties go to the earliest backend in pool order. The returned
    /// reference already has the new request counted; callers add further
    /// load on top only for outcome escalation.
    pub fn select_backend(&mut self) -> Result<&mut BackendState, BalancerError> {
        let idx = self
            .backends
            .iter()
            .enumerate()
            .min_by_key(|(i, backend)| (backend.slack_time(), *i))
            .map(|(i, _)| i)
            .ok_or(BalancerError::EmptyPool)?;
        let chosen = &mut self.backends[idx];
        chosen.increase_load(1);
        Ok(chosen)
    }

    /// Run one optimization cycle over the whole pool.
    ///
    /// For each backend, in pool order, one response time is drawn from
    /// `sampler` and scaled against [`RESPONSE_TIME_CEILING_MS`]:
    ///
    /// * energy estimate becomes `rated * (1 - rt/ceiling)`, unclamped
    /// * weight becomes `floor(weight / (1 + rt/ceiling))`, floored at the
    ///   minimum weight
    ///
    /// Both derivations read the weight as it was when the backend's turn
    /// started. An empty pool draws no samples at all.
    pub fn optimize_weights(&mut self, sampler: &mut dyn ResponseTimeSampler) {
        for backend in &mut self.backends {
            let started = Instant::now();
            let response_time_ms = sampler.sample_ms();
            let scaled = response_time_ms as f64 / RESPONSE_TIME_CEILING_MS as f64;
            let energy = backend.rated_energy() * (1.0 - scaled);
            let shrunk = (backend.weight() as f64 / (1.0 + scaled)).floor() as i64;

            backend.update_response_time(response_time_ms);
            backend.update_energy_estimate(energy);
            backend.adjust_weight(shrunk);
            backend.record_optimization_time(started.elapsed().as_millis() as u64);
        }
        self.optimization_cycles += 1;
    }

    /// Snapshot every backend, in pool order.
    pub fn snapshots(&self) -> Vec<BackendSnapshot> {
        self.backends.iter().map(BackendState::snapshot).collect()
    }
}
