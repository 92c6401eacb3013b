//! Request-driving simulation engine.
//!
//! The engine owns the balancer pool, a workload sampler, and the metrics
//! collector. Each step runs one full driver cycle: optimize the pool,
//! route one request, observe its response time, and report the outcome
//! back into the chosen backend's counters.

use crate::config::{ConfigError, SimConfig};
use crate::metrics::{MetricsCollector, RequestRecord, RunReport};
use slacksim_balancer::{Balancer, BalancerError, ResponseTimeSampler};
use std::time::Instant;
use thiserror::Error;

/// Driver-level failures.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("balancer error: {0}")]
    Balancer(#[from] BalancerError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// The request-driving simulation engine.
pub struct SimulationEngine {
    /// Backend pool under test.
    pub balancer: Balancer,
    /// Metrics collector.
    pub metrics: MetricsCollector,
    /// Requests driven so far.
    pub requests_driven: u64,
    /// Workload source. One stream feeds both optimization samples and the
    /// observed per-request response times.
    workload: Box<dyn ResponseTimeSampler>,
    /// Configuration.
    config: SimConfig,
}

impl SimulationEngine {
    /// Create a new engine from config and a workload sampler.
    pub fn new(config: SimConfig, workload: Box<dyn ResponseTimeSampler>) -> Result<Self, SimError> {
        let balancer = config.build_pool()?;
        Ok(Self {
            balancer,
            metrics: MetricsCollector::new(),
            requests_driven: 0,
            workload,
            config,
        })
    }

    /// Drive a single request through the pool.
    ///
    /// Cycle order: re-optimize every backend, select the target, observe
    /// the request's response time, then report the outcome. An adhered
    /// request costs the backend one unit of load on top of the
    /// selection's own increment; a violated one costs two.
    pub fn step(&mut self) -> Result<(), SimError> {
        self.balancer.optimize_weights(self.workload.as_mut());

        let request_id = self.requests_driven;
        let (backend, response_time_ms, sla_adhered, rated_energy) = {
            let chosen = self.balancer.select_backend()?;
            let response_time_ms = self.workload.sample_ms();
            let sla_adhered = chosen.meets_sla(response_time_ms);
            chosen.increase_load(if sla_adhered { 1 } else { 2 });
            (
                chosen.name().to_string(),
                response_time_ms,
                sla_adhered,
                chosen.rated_energy(),
            )
        };
        let backend_index = self
            .balancer
            .backends()
            .iter()
            .position(|b| b.name() == backend)
            .unwrap_or(0);

        self.metrics.record(RequestRecord {
            request_id,
            backend,
            backend_index,
            response_time_ms,
            sla_adhered,
            rated_energy,
        });
        self.requests_driven += 1;
        Ok(())
    }

    /// Drive the configured number of requests and aggregate the results.
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        let started = Instant::now();
        for _ in 0..self.config.simulation.requests {
            self.step()?;
        }
        let duration_ms = started.elapsed().as_millis() as u64;

        Ok(self.metrics.aggregate(
            &self.config.simulation.name,
            self.config.simulation.seed,
            duration_ms,
            self.balancer.snapshots(),
        ))
    }
}
