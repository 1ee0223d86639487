//! Single-shot host probes.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::{proto::rr::RecordType, TokioResolver};

use super::resolver::{build_resolver_for_ns, DEFAULT_RESOLVER, SYSTEM_DNS_LABEL};
use crate::error::{ResolveError, ResolveResult};

/// One attempt at resolving a host.
///
/// Implementations hold no per-host state; the polling engine may call them
/// any number of times and from concurrent tasks.
#[async_trait]
pub trait HostProbe: Send + Sync {
    /// Resolve `host` once, returning an address literal.
    ///
    /// A host that does not resolve *yet* is an `Err`, not a hang.
    async fn probe(&self, host: &str) -> ResolveResult<String>;

    /// Canonical names `host` points at, outermost first.
    async fn cnames(&self, host: &str) -> ResolveResult<Vec<String>>;
}

/// Probe backed by Hickory DNS.
pub struct DnsHostProbe {
    resolver: Option<TokioResolver>,
    label: String,
}

impl DnsHostProbe {
    /// Probe using the system resolver configuration.
    #[must_use]
    pub fn system() -> Self {
        Self {
            resolver: None,
            label: SYSTEM_DNS_LABEL.clone(),
        }
    }

    /// Probe that only asks `nameserver`.
    #[must_use]
    pub fn with_nameserver(nameserver: IpAddr) -> Self {
        Self {
            resolver: Some(build_resolver_for_ns(nameserver)),
            label: nameserver.to_string(),
        }
    }

    /// DNS servers this probe talks to.
    pub fn nameservers(&self) -> &str {
        &self.label
    }

    fn resolver(&self) -> &TokioResolver {
        self.resolver.as_ref().unwrap_or(&*DEFAULT_RESOLVER)
    }
}

impl Default for DnsHostProbe {
    fn default() -> Self {
        Self::system()
    }
}

#[async_trait]
impl HostProbe for DnsHostProbe {
    async fn probe(&self, host: &str) -> ResolveResult<String> {
        let response = self
            .resolver()
            .lookup_ip(host)
            .await
            .map_err(|e| ResolveError::ProbeFailed {
                host: host.to_string(),
                message: e.to_string(),
            })?;

        response
            .iter()
            .next()
            .map(|ip| ip.to_string())
            .ok_or_else(|| ResolveError::ProbeFailed {
                host: host.to_string(),
                message: format!("no address returned by {}", self.label),
            })
    }

    async fn cnames(&self, host: &str) -> ResolveResult<Vec<String>> {
        let response = self
            .resolver()
            .lookup(host, RecordType::CNAME)
            .await
            .map_err(|e| ResolveError::ProbeFailed {
                host: host.to_string(),
                message: e.to_string(),
            })?;

        Ok(response
            .record_iter()
            .filter_map(|record| record.data().as_cname())
            .map(|cname| cname.0.to_string().trim_end_matches('.').to_string())
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pinned_probe_reports_its_nameserver() {
        let probe = DnsHostProbe::with_nameserver("1.1.1.1".parse().unwrap());
        assert_eq!(probe.nameservers(), "1.1.1.1");
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn system_probe_resolves_real_host() {
        let address = DnsHostProbe::system()
            .probe("login.salesforce.com")
            .await
            .unwrap();
        assert!(address.parse::<IpAddr>().is_ok());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn system_probe_fails_for_unknown_host() {
        let result = DnsHostProbe::system()
            .probe("definitely-not-provisioned.invalid")
            .await;
        assert!(matches!(result, Err(ResolveError::ProbeFailed { .. })));
    }
}
