//! Waiting for My Domain hosts to become resolvable

use std::net::IpAddr;
use std::sync::Arc;

use org_domain_resolver::{DomainResolver, Resolution, ResolutionRequest};
use url::Host;

use crate::config::OrgDomainConfig;
use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{OrgUrl, LOCAL_URL_PARTS};

/// Decides whether an org host needs a DNS wait and runs it.
pub struct ResolutionGate {
    ctx: Arc<ServiceContext>,
}

impl ResolutionGate {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Wait until the Lightning domain of `url` resolves.
    ///
    /// Internal hosts and a zero timeout skip the wait. An IP literal host has
    /// no Lightning domain and is answered with its own address.
    pub async fn ensure_resolvable(
        &self,
        url: &OrgUrl,
        instance_hint: Option<&str>,
    ) -> CoreResult<Resolution> {
        let config = self.ctx.config();

        if url.is_internal_url() {
            log::debug!("Skipping DNS check for internal host {}", url.hostname());
            return Ok(Resolution::Skipped);
        }
        if config.domain_timeout.is_zero() {
            log::debug!("Skipping DNS check for {}: timeout is zero", url.hostname());
            return Ok(Resolution::Skipped);
        }
        if let Some(ip) = ip_literal(url) {
            log::debug!("{ip} is an IP address, nothing to propagate");
            return Ok(Resolution::Resolved(ip.to_string()));
        }
        if let Some(instance) = instance_hint {
            log::debug!("Checking {} on instance {instance}", url.hostname());
        }

        let lightning = url.lightning_url()?;
        let host = lightning.host_str().unwrap_or_default();
        log::info!(
            "Waiting up to {}s for {host} to resolve",
            config.domain_timeout.as_secs()
        );
        let resolution = self.resolver_for(host, &config)?.resolve().await?;
        Ok(resolution)
    }

    /// Resolve the host of `url` itself, internal or not.
    pub async fn lookup_origin(&self, url: &OrgUrl) -> CoreResult<Resolution> {
        let config = self.ctx.config();
        let resolution = self
            .resolver_for(url.hostname(), &config)?
            .resolve()
            .await?;
        Ok(resolution)
    }

    /// CNAME chain of the host of `url`; empty when it does not resolve in time.
    pub async fn cnames(&self, url: &OrgUrl) -> CoreResult<Vec<String>> {
        let config = self.ctx.config();
        Ok(self.resolver_for(url.hostname(), &config)?.cnames().await)
    }

    fn resolver_for(&self, host: &str, config: &OrgDomainConfig) -> CoreResult<DomainResolver> {
        let request = ResolutionRequest::new(host, config.domain_timeout, config.poll_frequency)?;
        Ok(
            DomainResolver::new(request, Arc::clone(&self.ctx.host_probe))
                .with_loopback_markers(LOCAL_URL_PARTS.iter().copied()),
        )
    }
}

fn ip_literal(url: &OrgUrl) -> Option<IpAddr> {
    match url.as_url().host()? {
        Host::Ipv4(ip) => Some(IpAddr::V4(ip)),
        Host::Ipv6(ip) => Some(IpAddr::V6(ip)),
        Host::Domain(_) => None,
    }
}
