//! Error types for pool construction and backend selection.

use thiserror::Error;

/// Errors surfaced by the balancer core.
///
/// Both variants are terminal for the operation that raised them: callers
/// are expected to fix the configuration or check the pool, not retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalancerError {
    /// A backend was declared with an unusable weight or a duplicate name.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Selection was attempted on a pool with zero backends.
    #[error("no backends in pool")]
    EmptyPool,
}
