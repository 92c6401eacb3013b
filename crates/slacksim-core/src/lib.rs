//! SlackSim: deterministic simulator for weighted load balancing.
//!
//! This crate provides the driving machinery around the decision logic in
//! `slacksim-balancer`: TOML configuration, seeded workload samplers, the
//! request-driving engine, and metrics reporting. Every latency in a run
//! comes from one seeded sampler, so a (config, seed) pair fully
//! determines the routing decisions and the final pool state.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐     ┌───────────┐     ┌──────────────┐
//! │ Workload │────▶│  Engine   │────▶│   Metrics    │
//! │ (sampler)│     │ (driver)  │     │  Collection  │
//! └──────────┘     └─────┬─────┘     └──────────────┘
//!                        │
//!                ┌───────┴───────┐
//!                │   Balancer    │
//!                │ (selection +  │
//!                │ optimization) │
//!                └───────┬───────┘
//!                        │
//!          ┌─────────────┼─────────────┐
//!          ▼             ▼             ▼
//!    ┌──────────┐  ┌──────────┐  ┌──────────┐
//!    │ Backend 0│  │ Backend 1│  │ Backend N│
//!    │  weight  │  │  weight  │  │  weight  │
//!    │   load   │  │   load   │  │   load   │
//!    └──────────┘  └──────────┘  └──────────┘
//! ```

pub mod config;
pub mod engine;
pub mod metrics;
pub mod workload;

// Re-export key types for convenience.
pub use config::SimConfig;
pub use engine::{SimError, SimulationEngine};
pub use metrics::{MetricsCollector, RequestRecord, RunReport};
pub use workload::{RecordedLatencies, UniformLatencySampler};

/// Run a complete simulation, seeding the workload from the config.
pub fn run_simulation(config: SimConfig) -> Result<RunReport, SimError> {
    let workload = UniformLatencySampler::new(
        config.simulation.seed,
        config.workload.max_response_time_ms,
    );
    let mut engine = SimulationEngine::new(config, Box::new(workload))?;
    engine.run()
}

/// Run the same configuration across several seeds.
pub fn sweep_seeds(config: &SimConfig, seeds: &[u64]) -> Result<Vec<RunReport>, SimError> {
    seeds
        .iter()
        .map(|&seed| {
            let mut cfg = config.clone();
            cfg.simulation.seed = seed;
            run_simulation(cfg)
        })
        .collect()
}
