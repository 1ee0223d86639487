//! Environment-driven configuration

use std::collections::HashMap;
use std::time::Duration;

/// Environment variables overriding the JWT audience URL, in precedence order.
pub const AUDIENCE_URL_ENV_VARS: [&str; 2] = ["SF_AUDIENCE_URL", "SFDX_AUDIENCE_URL"];

/// Environment variables overriding the domain resolution timeout (whole seconds),
/// in precedence order.
pub const DOMAIN_RETRY_ENV_VARS: [&str; 2] = ["SF_DOMAIN_RETRY", "SFDX_DOMAIN_RETRY"];

/// Resolution timeout when no override is configured.
pub const DEFAULT_DOMAIN_TIMEOUT_SECS: u64 = 240;

/// Poll cadence used by the resolution gate.
pub const GATE_POLL_FREQUENCY: Duration = Duration::from_secs(1);

/// Source of environment variables.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory environment, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Settings read from the environment at the time of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgDomainConfig {
    /// Audience URL forced by the environment; wins over every heuristic.
    pub audience_url_override: Option<String>,
    /// Total time allowed for a domain to resolve. Zero disables the wait.
    pub domain_timeout: Duration,
    /// Time between probes.
    pub poll_frequency: Duration,
}

impl Default for OrgDomainConfig {
    fn default() -> Self {
        Self {
            audience_url_override: None,
            domain_timeout: Duration::from_secs(DEFAULT_DOMAIN_TIMEOUT_SECS),
            poll_frequency: GATE_POLL_FREQUENCY,
        }
    }
}

impl OrgDomainConfig {
    pub fn from_env(env: &dyn EnvSource) -> Self {
        let audience_url_override =
            first_set(env, &AUDIENCE_URL_ENV_VARS).map(|(_, value)| value);

        let domain_timeout = match first_set(env, &DOMAIN_RETRY_ENV_VARS) {
            Some((key, raw)) => match raw.trim().parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    log::warn!(
                        "Ignoring {key}={raw}: expected whole seconds, using {DEFAULT_DOMAIN_TIMEOUT_SECS}"
                    );
                    Duration::from_secs(DEFAULT_DOMAIN_TIMEOUT_SECS)
                }
            },
            None => Duration::from_secs(DEFAULT_DOMAIN_TIMEOUT_SECS),
        };

        Self {
            audience_url_override,
            domain_timeout,
            poll_frequency: GATE_POLL_FREQUENCY,
        }
    }
}

/// First variable among `keys` with a value that is not blank.
fn first_set(env: &dyn EnvSource, keys: &[&'static str]) -> Option<(&'static str, String)> {
    keys.iter().find_map(|key| {
        env.var(key)
            .filter(|v| !v.trim().is_empty())
            .map(|v| (*key, v))
    })
}
