//! Per-backend capacity state and the fitness/energy model.
//!
//! Each [`BackendState`] tracks one backend's capacity weight, accumulated
//! load, and the response-time/energy estimates the optimization cycle
//! maintains. All functions here are pure arithmetic or plain field
//! mutation; no I/O, no clock access.

use crate::error::BalancerError;
use serde::{Deserialize, Serialize};

/// Response times at or below this many milliseconds adhere to the SLA.
pub const SLA_THRESHOLD_MS: u64 = 200;

/// Rated energy draw per unit of capacity weight.
pub const RATED_ENERGY_PER_WEIGHT: f64 = 10.0;

/// Floor applied by [`BackendState::adjust_weight`].
///
/// The optimization formula only ever shrinks weights, so without a floor
/// every weight would eventually decay to zero and take its rated energy
/// with it.
pub const MIN_WEIGHT: i64 = 1;

/// Capacity and accounting state for a single simulated backend.
///
/// Loads only ever grow within a run; over-saturation (load above weight)
/// is a valid signal, not an error, and shows up as negative slack.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendState {
    /// Stable identifier, unique within a pool.
    name: String,
    /// Capacity weight. Starts positive; never drops below [`MIN_WEIGHT`].
    weight: i64,
    /// Requests assigned so far (selection + outcome reporting).
    current_load: u64,
    /// Response time observed in the most recent optimization cycle.
    last_response_time_ms: u64,
    /// Modeled energy draw, recomputed from weight and response time each
    /// optimization cycle.
    energy_estimate: f64,
    /// Cumulative wall time spent optimizing this backend.
    time_consumed_ms: u64,
}

impl BackendState {
    /// Create a backend with its starting weight.
    ///
    /// The initial energy estimate is the rated draw (`weight * 10`), so a
    /// non-positive weight is rejected here; it would bake a zero or
    /// negative denominator into [`fitness`](Self::fitness) from the start.
    pub fn new(name: impl Into<String>, weight: i64) -> Result<Self, BalancerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BalancerError::InvalidConfiguration(
                "backend name must not be empty".to_string(),
            ));
        }
        if weight <= 0 {
            return Err(BalancerError::InvalidConfiguration(format!(
                "backend {:?} has non-positive weight {}",
                name, weight
            )));
        }
        Ok(Self {
            name,
            weight,
            current_load: 0,
            last_response_time_ms: 0,
            energy_estimate: weight as f64 * RATED_ENERGY_PER_WEIGHT,
            time_consumed_ms: 0,
        })
    }

    /// Backend identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current capacity weight.
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// Requests assigned to this backend so far.
    pub fn current_load(&self) -> u64 {
        self.current_load
    }

    /// Response time recorded by the most recent optimization cycle.
    pub fn last_response_time_ms(&self) -> u64 {
        self.last_response_time_ms
    }

    /// Current modeled energy draw.
    pub fn energy_estimate(&self) -> f64 {
        self.energy_estimate
    }

    /// Cumulative wall time spent in optimization work for this backend.
    pub fn time_consumed_ms(&self) -> u64 {
        self.time_consumed_ms
    }

    /// Rated (nameplate) energy draw: `weight * 10`.
    ///
    /// Depends on the weight alone, never on the mutable energy estimate.
    /// Reporting reads this; the optimization cycle uses it as the base for
    /// the per-cycle estimate.
    pub fn rated_energy(&self) -> f64 {
        self.weight as f64 * RATED_ENERGY_PER_WEIGHT
    }

    /// Add assigned work. No upper bound; saturation is representable.
    pub fn increase_load(&mut self, amount: u64) {
        self.current_load += amount;
    }

    /// Remaining spare capacity: `weight - current_load`.
    ///
    /// Negative once load exceeds weight: an overloaded backend, not an
    /// error.
    pub fn slack_time(&self) -> i64 {
        self.weight - self.current_load as i64
    }

    /// Spare capacity per unit of modeled energy.
    ///
    /// IEEE division: a zero energy estimate (possible after a ceiling
    /// response-time sample) yields an infinite or NaN fitness rather than
    /// a panic.
    pub fn fitness(&self) -> f64 {
        self.slack_time() as f64 / self.energy_estimate
    }

    /// Whether a response time adheres to the fixed 200ms SLA.
    pub fn meets_sla(&self, response_time_ms: u64) -> bool {
        response_time_ms <= SLA_THRESHOLD_MS
    }

    /// Set the capacity weight, clamped at [`MIN_WEIGHT`].
    pub fn adjust_weight(&mut self, new_weight: i64) {
        self.weight = new_weight.max(MIN_WEIGHT);
    }

    /// Overwrite the last observed response time.
    pub fn update_response_time(&mut self, response_time_ms: u64) {
        self.last_response_time_ms = response_time_ms;
    }

    /// Overwrite the modeled energy draw.
    ///
    /// No validation: zero and negative estimates are representable (a
    /// sample above the normalization ceiling produces one).
    pub fn update_energy_estimate(&mut self, energy: f64) {
        self.energy_estimate = energy;
    }

    /// Accumulate wall time spent optimizing this backend.
    pub fn record_optimization_time(&mut self, elapsed_ms: u64) {
        self.time_consumed_ms += elapsed_ms;
    }

    /// Read-only view for reporting.
    pub fn snapshot(&self) -> BackendSnapshot {
        BackendSnapshot {
            name: self.name.clone(),
            weight: self.weight,
            current_load: self.current_load,
            slack_time: self.slack_time(),
            fitness: self.fitness(),
            energy_estimate: self.energy_estimate,
            rated_energy: self.rated_energy(),
            last_response_time_ms: self.last_response_time_ms,
            time_consumed_ms: self.time_consumed_ms,
        }
    }
}

/// Plain serializable view of one backend, with the derived slack and
/// fitness values frozen at snapshot time. Snapshots feed reports only;
/// they never flow back into decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSnapshot {
    pub name: String,
    pub weight: i64,
    pub current_load: u64,
    pub slack_time: i64,
    pub fitness: f64,
    pub energy_estimate: f64,
    pub rated_energy: f64,
    pub last_response_time_ms: u64,
    pub time_consumed_ms: u64,
}
