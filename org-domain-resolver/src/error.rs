//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Resolver error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ResolveError {
    /// The host handed to the resolver is not usable
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A single probe did not produce an address.
    ///
    /// The polling engine retries these until the deadline and never returns
    /// one to its caller.
    #[error("Probe failed for {host}: {message}")]
    ProbeFailed { host: String, message: String },

    /// The deadline passed without a successful probe
    #[error("Timed out after {elapsed_ms}ms waiting for {host} to resolve: {last_error}")]
    Timeout {
        host: String,
        elapsed_ms: u64,
        last_error: String,
    },
}

impl ResolveError {
    /// Whether the failure is an ordinary outcome (slow DNS propagation, bad input)
    /// rather than a fault, used to pick the log level.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) | Self::Timeout { .. } => true,
            Self::ProbeFailed { .. } => false,
        }
    }
}

/// Resolver Result type alias
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
