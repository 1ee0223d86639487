//! Service layer

mod audience_service;
mod resolution_gate;

pub use audience_service::AudienceService;
pub use resolution_gate::ResolutionGate;

use std::sync::Arc;

use org_domain_resolver::{DnsHostProbe, HostProbe};

use crate::config::{EnvSource, OrgDomainConfig, ProcessEnv};
use crate::error::CoreResult;
use crate::traits::{InMemoryInsecureOriginRegistry, InsecureOriginRegistry};
use crate::types::OrgUrl;

/// Service context - holds all dependencies
///
/// The embedding application builds one context and shares it between services.
pub struct ServiceContext {
    /// Resolves hosts for the resolution gate
    pub host_probe: Arc<dyn HostProbe>,
    /// Origins already warned about for an insecure scheme
    pub origin_registry: Arc<dyn InsecureOriginRegistry>,
    /// Environment overrides, read on every call
    pub env: Arc<dyn EnvSource>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        host_probe: Arc<dyn HostProbe>,
        origin_registry: Arc<dyn InsecureOriginRegistry>,
        env: Arc<dyn EnvSource>,
    ) -> Self {
        Self {
            host_probe,
            origin_registry,
            env,
        }
    }

    /// Context backed by system DNS and the process environment.
    #[must_use]
    pub fn system() -> Self {
        Self::with_host_probe(Arc::new(DnsHostProbe::system()))
    }

    /// Context reading the process environment, resolving through `host_probe`.
    #[must_use]
    pub fn with_host_probe(host_probe: Arc<dyn HostProbe>) -> Self {
        Self::new(
            host_probe,
            Arc::new(InMemoryInsecureOriginRegistry::new()),
            Arc::new(ProcessEnv),
        )
    }

    /// Current configuration.
    pub fn config(&self) -> OrgDomainConfig {
        OrgDomainConfig::from_env(self.env.as_ref())
    }

    /// Parse an org URL through this context's insecure-origin registry.
    pub fn parse_url(&self, input: &str) -> CoreResult<OrgUrl> {
        OrgUrl::parse(input, self.origin_registry.as_ref())
    }
}
