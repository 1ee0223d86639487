//! Public types consumed and returned by the resolver.

use std::time::Duration;

use serde::Serialize;

use crate::error::{ResolveError, ResolveResult};
use crate::services::validate_host;

/// Total wait used when a resolver is built without an explicit timeout.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry cadence used when a resolver is built without an explicit frequency.
pub const DEFAULT_POLL_FREQUENCY: Duration = Duration::from_secs(10);

/// Address reported for hosts that live on the developer's own machine.
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// One resolution call: which host, how long to keep trying, how often.
///
/// A zero `timeout` means resolution is not required at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    host: String,
    timeout: Duration,
    frequency: Duration,
}

impl ResolutionRequest {
    /// Build a request, normalising the host and rejecting a zero poll frequency.
    pub fn new(host: &str, timeout: Duration, frequency: Duration) -> ResolveResult<Self> {
        let host = validate_host(host)?;
        if frequency.is_zero() {
            return Err(ResolveError::ValidationError(
                "Poll frequency must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            host,
            timeout,
            frequency,
        })
    }

    /// Request with the standalone defaults (30s timeout, 10s frequency).
    pub fn with_defaults(host: &str) -> ResolveResult<Self> {
        Self::new(host, DEFAULT_RESOLVE_TIMEOUT, DEFAULT_POLL_FREQUENCY)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn frequency(&self) -> Duration {
        self.frequency
    }
}

/// Successful result of a resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "address", rename_all = "camelCase")]
pub enum Resolution {
    /// Nothing was probed: the host needs no propagation check or the timeout is zero.
    Skipped,
    /// The host resolved to this address.
    Resolved(String),
}

impl Resolution {
    /// The resolved address, if a probe ran.
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Skipped => None,
            Self::Resolved(address) => Some(address.as_str()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_frequency_rejected() {
        let result = ResolutionRequest::new("example.com", Duration::from_secs(5), Duration::ZERO);
        assert!(matches!(result, Err(ResolveError::ValidationError(_))));
    }

    #[test]
    fn zero_timeout_allowed() {
        let request =
            ResolutionRequest::new("example.com", Duration::ZERO, Duration::from_secs(1)).unwrap();
        assert!(request.timeout().is_zero());
    }

    #[test]
    fn defaults_poll_less_often_than_they_wait() {
        let request = ResolutionRequest::with_defaults("example.com").unwrap();
        assert_eq!(request.timeout(), DEFAULT_RESOLVE_TIMEOUT);
        assert_eq!(request.frequency(), DEFAULT_POLL_FREQUENCY);
        assert!(request.frequency() < request.timeout());
    }

    #[test]
    fn host_is_normalised() {
        let request = ResolutionRequest::with_defaults("  Acme.My.Salesforce.com ").unwrap();
        assert_eq!(request.host(), "acme.my.salesforce.com");
    }

    #[test]
    fn empty_host_rejected() {
        assert!(matches!(
            ResolutionRequest::with_defaults(""),
            Err(ResolveError::ValidationError(_))
        ));
    }

    #[test]
    fn resolution_address() {
        assert_eq!(Resolution::Skipped.address(), None);
        assert_eq!(
            Resolution::Resolved("10.0.0.1".to_string()).address(),
            Some("10.0.0.1")
        );
    }
}
