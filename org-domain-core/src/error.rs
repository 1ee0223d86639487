//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export resolver error type
pub use org_domain_resolver::ResolveError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Input is not a URL with a host
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// Resolver error (timeouts, unusable hosts)
    #[error("{0}")]
    Resolve(#[from] ResolveError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, DNS not propagated yet), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MalformedUrl(_) => true,
            Self::Resolve(e) => e.is_expected(),
        }
    }

    /// Whether this is a resolution deadline being exceeded.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Resolve(ResolveError::Timeout { .. }))
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_expected() {
        let err = CoreError::from(ResolveError::Timeout {
            host: "acme.lightning.force.com".to_string(),
            elapsed_ms: 1_000,
            last_error: "NXDOMAIN".to_string(),
        });
        assert!(err.is_expected());
        assert!(err.is_timeout());
        assert!(err.to_string().contains("acme.lightning.force.com"));
    }

    #[test]
    fn stray_probe_failure_is_not_expected() {
        let err = CoreError::from(ResolveError::ProbeFailed {
            host: "acme.lightning.force.com".to_string(),
            message: "connection refused".to_string(),
        });
        assert!(!err.is_expected());
        assert!(!err.is_timeout());
    }

    #[test]
    fn malformed_url_is_expected() {
        assert!(CoreError::MalformedUrl("acme".to_string()).is_expected());
    }
}
