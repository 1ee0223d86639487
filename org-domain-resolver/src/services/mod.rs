//! Probing and polling services.

mod polling;
mod probe;
mod resolver;

pub use polling::DomainResolver;
pub use probe::{DnsHostProbe, HostProbe};

use crate::error::{ResolveError, ResolveResult};

/// Validate and normalise a host name or IP address.
///
/// Trims whitespace and IPv6 brackets, passes IP literals through unchanged,
/// converts internationalised names to ASCII via IDNA, and rejects empty or
/// overlong input.
pub fn validate_host(host: &str) -> ResolveResult<String> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ResolveError::ValidationError(
            "Host name is required".to_string(),
        ));
    }
    let unbracketed = host.trim_start_matches('[').trim_end_matches(']');
    if unbracketed.parse::<std::net::IpAddr>().is_ok() {
        return Ok(unbracketed.to_string());
    }
    let ascii_host = idna::domain_to_ascii(host)
        .map_err(|_| ResolveError::ValidationError(format!("Invalid host name: {host}")))?;
    if ascii_host.is_empty() {
        return Err(ResolveError::ValidationError(format!(
            "Invalid host name: {host}"
        )));
    }
    if ascii_host.len() > 253 {
        return Err(ResolveError::ValidationError(format!(
            "Host name exceeds maximum length of 253 characters (got {})",
            ascii_host.len()
        )));
    }
    Ok(ascii_host)
}
