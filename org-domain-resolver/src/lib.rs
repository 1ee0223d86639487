//! Bounded DNS polling for org domains
//!
//! A freshly created My Domain takes a while to propagate through DNS. This
//! crate waits for a host to become resolvable: it probes the host, retries at a
//! fixed cadence, and gives up at a wall-clock deadline measured on a monotonic
//! clock. Probes are pluggable through [`HostProbe`]; [`DnsHostProbe`] talks to
//! real DNS through Hickory.

mod error;
mod services;
mod types;

pub use error::{ResolveError, ResolveResult};
pub use services::{validate_host, DnsHostProbe, DomainResolver, HostProbe};
pub use types::{
    Resolution, ResolutionRequest, DEFAULT_POLL_FREQUENCY, DEFAULT_RESOLVE_TIMEOUT,
    LOOPBACK_ADDRESS,
};
