//! TOML configuration parsing for SlackSim.
//!
//! Defines the configuration schema for simulation runs: run parameters,
//! workload bounds, and the backend pool layout. Every field has a default;
//! an empty document parses to the classic three-backend demo run.

use serde::{Deserialize, Serialize};
use slacksim_balancer::{Balancer, BalancerError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub workload: WorkloadSection,
    #[serde(default)]
    pub pool: PoolSection,
}

/// General run parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Human-readable label for this run.
    #[serde(default = "default_run_name")]
    pub name: String,
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of simulated requests to drive through the pool.
    #[serde(default = "default_requests")]
    pub requests: u64,
}

fn default_run_name() -> String {
    "slacksim".to_string()
}

fn default_seed() -> u64 {
    42
}

fn default_requests() -> u64 {
    10
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            name: default_run_name(),
            seed: default_seed(),
            requests: default_requests(),
        }
    }
}

/// Synthetic workload parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadSection {
    /// Exclusive upper bound for sampled response times, in milliseconds.
    #[serde(default = "default_max_response_time")]
    pub max_response_time_ms: u64,
}

fn default_max_response_time() -> u64 {
    300
}

impl Default for WorkloadSection {
    fn default() -> Self {
        Self {
            max_response_time_ms: default_max_response_time(),
        }
    }
}

/// Backend pool layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSection {
    /// Ordered backend declarations. Pool order is selection tie-break
    /// order.
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendEntry>,
}

/// One backend declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendEntry {
    pub name: String,
    pub weight: i64,
}

fn default_backends() -> Vec<BackendEntry> {
    vec![
        BackendEntry {
            name: "backend-1".to_string(),
            weight: 3,
        },
        BackendEntry {
            name: "backend-2".to_string(),
            weight: 4,
        },
        BackendEntry {
            name: "backend-3".to_string(),
            weight: 7,
        },
    ]
}

impl Default for PoolSection {
    fn default() -> Self {
        Self {
            backends: default_backends(),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationSection::default(),
            workload: WorkloadSection::default(),
            pool: PoolSection::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.requests == 0 {
            return Err(ConfigError::Validation("requests must be > 0".to_string()));
        }
        if self.workload.max_response_time_ms == 0 {
            return Err(ConfigError::Validation(
                "max_response_time_ms must be > 0".to_string(),
            ));
        }
        if self.pool.backends.is_empty() {
            return Err(ConfigError::Validation(
                "pool must declare at least one backend".to_string(),
            ));
        }
        for entry in &self.pool.backends {
            if entry.name.is_empty() {
                return Err(ConfigError::Validation(
                    "backend name must not be empty".to_string(),
                ));
            }
            if entry.weight <= 0 {
                return Err(ConfigError::Validation(format!(
                    "backend {:?} has non-positive weight {}",
                    entry.name, entry.weight
                )));
            }
        }
        for (i, entry) in self.pool.backends.iter().enumerate() {
            if self.pool.backends[..i].iter().any(|e| e.name == entry.name) {
                return Err(ConfigError::Validation(format!(
                    "duplicate backend name {:?}",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    /// Build the balancer pool declared by this configuration.
    ///
    /// A validated config cannot fail here; the error path exists for
    /// callers that construct `SimConfig` values directly.
    pub fn build_pool(&self) -> Result<Balancer, BalancerError> {
        Balancer::from_weights(
            self.pool
                .backends
                .iter()
                .map(|entry| (entry.name.clone(), entry.weight)),
        )
    }
}
