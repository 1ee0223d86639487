//! Deadline-bounded polling until a host resolves.
//!
//! Policy near the deadline: the first probe runs immediately, later probes run
//! one poll interval apart. A wait that would cross the deadline is cut short to
//! end exactly on it, and no probe is started once the deadline has been
//! reached. A probe still in flight at the deadline is abandoned.
//!
//! The engine moves from idle to polling, then ends resolved or timed out.
//! Only the outcome is reported: an address, or [`ResolveError::Timeout`].

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep_until, timeout_at, Instant};

use super::probe::HostProbe;
use crate::error::{ResolveError, ResolveResult};
use crate::types::{Resolution, ResolutionRequest, LOOPBACK_ADDRESS};

/// Stand-in deadline for timeouts too large to add to an `Instant`, about 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Polls a [`HostProbe`] until the host resolves or the timeout elapses.
///
/// The resolver keeps no state between calls; every `resolve` starts its own
/// deadline clock, so concurrent calls for different hosts never interfere.
pub struct DomainResolver {
    request: ResolutionRequest,
    probe: Arc<dyn HostProbe>,
    loopback_markers: Vec<String>,
}

impl DomainResolver {
    #[must_use]
    pub fn new(request: ResolutionRequest, probe: Arc<dyn HostProbe>) -> Self {
        Self {
            request,
            probe,
            loopback_markers: Vec::new(),
        }
    }

    /// Hosts containing any of `markers` are answered with the loopback
    /// address instead of being probed.
    #[must_use]
    pub fn with_loopback_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.loopback_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn request(&self) -> &ResolutionRequest {
        &self.request
    }

    fn is_loopback_host(&self) -> bool {
        let host = self.request.host();
        self.loopback_markers
            .iter()
            .any(|marker| host.contains(marker.as_str()))
    }

    /// Wait for the host to resolve.
    ///
    /// Returns [`Resolution::Skipped`] without probing when the timeout is zero.
    /// Fails with [`ResolveError::Timeout`] carrying the elapsed time and the
    /// last probe error once the deadline passes.
    pub async fn resolve(&self) -> ResolveResult<Resolution> {
        let host = self.request.host();

        if self.request.timeout().is_zero() {
            log::debug!("Resolution of {host} not required (timeout is zero)");
            return Ok(Resolution::Skipped);
        }
        if self.is_loopback_host() {
            log::debug!("{host} is a local host, answering {LOOPBACK_ADDRESS}");
            return Ok(Resolution::Resolved(LOOPBACK_ADDRESS.to_string()));
        }

        let started = Instant::now();
        let deadline = started
            .checked_add(self.request.timeout())
            .unwrap_or_else(|| started + FAR_FUTURE);
        let mut attempts: u32 = 0;
        let mut last_error = String::from("no probe completed");

        while Instant::now() < deadline {
            attempts += 1;
            log::debug!("Attempting to resolve host {host} (attempt {attempts})");

            match timeout_at(deadline, self.probe.probe(host)).await {
                Ok(Ok(address)) => {
                    log::debug!("Successfully resolved host {host} to {address}");
                    return Ok(Resolution::Resolved(address));
                }
                Ok(Err(e)) => {
                    log::debug!("Could not resolve {host} yet: {e}");
                    last_error = match e {
                        ResolveError::ProbeFailed { message, .. } => message,
                        other => other.to_string(),
                    };
                }
                Err(_) => {
                    last_error = "probe still running at the deadline".to_string();
                    break;
                }
            }

            let next_probe = Instant::now() + self.request.frequency();
            sleep_until(next_probe.min(deadline)).await;
        }

        // u128 -> u64: a resolution wait never approaches u64::MAX milliseconds
        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = started.elapsed().as_millis() as u64;
        log::warn!(
            "Gave up on {host} after {elapsed_ms}ms and {attempts} attempt(s): {last_error}"
        );

        Err(ResolveError::Timeout {
            host: host.to_string(),
            elapsed_ms,
            last_error,
        })
    }

    /// CNAME chain of the host once it resolves.
    ///
    /// Any failure, including a timeout, yields an empty list.
    pub async fn cnames(&self) -> Vec<String> {
        let host = self.request.host();
        if let Err(e) = self.resolve().await {
            log::debug!("Skipping CNAME lookup for {host}: {e}");
            return Vec::new();
        }
        match self.probe.cnames(host).await {
            Ok(names) => names,
            Err(e) => {
                log::debug!("CNAME lookup for {host} failed: {e}");
                Vec::new()
            }
        }
    }
}
