//! Parsed org URL and the host heuristics used to classify it

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{CoreError, CoreResult};
use crate::traits::InsecureOriginRegistry;

/// Production login host.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Sandbox login host.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";

/// Audience used by orgs on the reserved gs1 region.
pub const GS1_AUDIENCE_URL: &str = "https://gs1.salesforce.com";

/// Domain suffixes owned by Salesforce (leading dot included).
const SALESFORCE_DOMAIN_SUFFIXES: &[&str] = &[
    ".cloudforce.com",
    ".cloudforce.mil",
    ".content.force.com",
    ".crmforce.mil",
    ".database.com",
    ".force.com",
    ".force.mil",
    ".lightning.com",
    ".salesforce.com",
    ".salesforce.mil",
    ".salesforce-setup.com",
    ".salesforce-sites.com",
    ".sfcrmapps.cn",
    ".sfcrmproducts.cn",
    ".sfdcopens.com",
    ".visualforce.com",
];

/// Salesforce hosts allowed by exact match.
const SALESFORCE_HOSTS: &[&str] = &["developer.salesforce.com", "trailhead.salesforce.com"];

/// Origin fragments of hosts running on a developer machine.
pub const LOCAL_URL_PARTS: &[&str] = &["localhost.sfdcdev.", ".internal."];

/// Origin fragments of Salesforce-internal environments.
const INTERNAL_URL_PARTS: &[&str] = &[
    ".vpod.",
    "stm.salesforce.com",
    "stm.force.com",
    ".blitz.salesforce.com",
    ".stm.salesforce.ms",
    ".pc-rnd.force.com",
    ".pc-rnd.salesforce.com",
];

const INTERNAL_ORIGIN_PREFIX: &str = "https://gs1.";

const GOV_MY_DOMAIN_SUFFIX: &str = ".my.salesforce.mil";
const GOV_LIGHTNING_SUFFIX: &str = ".lightning.crmforce.mil";
const SANDBOX_MY_DOMAIN_SUFFIX: &str = ".sandbox.my.salesforce.com";
const SANDBOX_LIGHTNING_SUFFIX: &str = ".sandbox.lightning.force.com";
const LIGHTNING_SUFFIX: &str = ".lightning.force.com";

/// Origin shapes of known sandbox hosts.
static SANDBOX_ORIGIN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // enhanced domains
        r"(?i)sandbox\.my\.salesforce\.(com|mil)",
        // cs instances, with or without a My Domain
        r"(?i)cs[0-9]+(\.my|)\.salesforce\.com",
        // legacy My Domain sandboxes: <domain>--<sandbox>
        r"(?i)[a-z0-9-]+--[a-z0-9-]+\.(cs[0-9]+\.)?my\.salesforce\.com",
        // falcon sandboxes, e.g. usa2s.sfdc-xyz.salesforce.com
        r"(?i)[a-z]{3}[0-9]+s\.sfdc-.+\.salesforce\.com",
        r"(?i)[a-z]{3}[0-9]+s\.sfdc-.+\.force\.com",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Instance names of sandbox pods: `cs*` or trailing `s`.
static SANDBOX_INSTANCE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^cs|s$").ok());

static GS1_INSTANCE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^gs1").ok());

fn pattern_matches(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// An org URL with a host, immutable after parsing.
///
/// Classification predicates are recomputed from the host on every call; they
/// are total and never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgUrl {
    url: Url,
    origin: String,
}

impl OrgUrl {
    /// Parse `input`, warning once per origin (per registry) when the scheme is
    /// not `https`.
    pub fn parse(input: &str, registry: &dyn InsecureOriginRegistry) -> CoreResult<Self> {
        let url = Url::parse(input.trim())
            .map_err(|e| CoreError::MalformedUrl(format!("{input}: {e}")))?;
        Self::from_url(url, registry)
    }

    /// Wrap an already parsed URL. Fails when it has no host.
    pub fn from_url(url: Url, registry: &dyn InsecureOriginRegistry) -> CoreResult<Self> {
        if url.host_str().is_none_or(str::is_empty) {
            return Err(CoreError::MalformedUrl(format!("{url}: missing host")));
        }
        let origin = url.origin().ascii_serialization();
        if url.scheme() != "https" && registry.first_sighting(&origin) {
            log::warn!(
                "Using insecure protocol: {}: on url: {origin}",
                url.scheme()
            );
        }
        Ok(Self { url, origin })
    }

    /// Whether `input` parses as a URL, without side effects.
    pub fn is_valid_url(input: &str) -> bool {
        Url::parse(input.trim()).is_ok()
    }

    /// `scheme://host[:port]`
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Host belongs to a Salesforce-owned domain.
    pub fn is_salesforce_domain(&self) -> bool {
        let host = self.hostname();
        SALESFORCE_HOSTS.contains(&host)
            || SALESFORCE_DOMAIN_SUFFIXES
                .iter()
                .any(|suffix| host.ends_with(suffix))
    }

    /// Host runs on a developer machine.
    pub fn is_local_url(&self) -> bool {
        LOCAL_URL_PARTS
            .iter()
            .any(|part| self.origin.contains(part))
    }

    /// Host is a Salesforce-internal environment. Local hosts count as internal.
    pub fn is_internal_url(&self) -> bool {
        self.origin.starts_with(INTERNAL_ORIGIN_PREFIX)
            || self.is_local_url()
            || INTERNAL_URL_PARTS
                .iter()
                .any(|part| self.origin.contains(part))
    }

    /// Best-effort sandbox detection.
    ///
    /// A `false` is not proof of production: the host conventions overlap and
    /// new ones appear over time.
    pub fn is_sandbox_url(&self, instance_hint: Option<&str>) -> bool {
        instance_hint.is_some_and(|hint| pattern_matches(&SANDBOX_INSTANCE_PATTERN, hint))
            || SANDBOX_ORIGIN_PATTERNS
                .iter()
                .any(|re| re.is_match(&self.origin))
            || self.hostname() == "test.salesforce.com"
    }

    /// Host is already a Lightning Experience domain.
    pub fn is_lightning_domain(&self) -> bool {
        let host = self.hostname();
        host.ends_with(LIGHTNING_SUFFIX) || host.ends_with(GOV_LIGHTNING_SUFFIX)
    }

    /// Lightning Experience origin matching this My Domain origin.
    ///
    /// Expects a My Domain style host; for anything else the first host label
    /// is reused under `lightning.force.com`. The host must be a domain name: IP
    /// literals have no Lightning counterpart.
    pub fn to_lightning_domain(&self) -> String {
        if let Some(prefix) = self.origin.strip_suffix(GOV_MY_DOMAIN_SUFFIX) {
            return format!("{prefix}{GOV_LIGHTNING_SUFFIX}");
        }
        if let Some(prefix) = self.origin.strip_suffix(SANDBOX_MY_DOMAIN_SUFFIX) {
            return format!("{prefix}{SANDBOX_LIGHTNING_SUFFIX}");
        }
        let label = self.hostname().split('.').next().unwrap_or_default();
        format!("https://{label}{LIGHTNING_SUFFIX}")
    }

    /// [`to_lightning_domain`](Self::to_lightning_domain) parsed back into a URL.
    pub fn lightning_url(&self) -> CoreResult<Url> {
        let rewritten = self.to_lightning_domain();
        Url::parse(&rewritten).map_err(|e| CoreError::MalformedUrl(format!("{rewritten}: {e}")))
    }

    /// Audience to put in a JWT bearer assertion for this org.
    ///
    /// `audience_override` (from the environment) wins unconditionally when
    /// non-empty.
    pub fn jwt_audience_url(
        &self,
        instance_hint: Option<&str>,
        audience_override: Option<&str>,
    ) -> String {
        if let Some(audience) = audience_override.filter(|a| !a.is_empty()) {
            log::debug!("Audience URL overridden by environment: {audience}");
            return audience.to_string();
        }
        let gs1_instance = instance_hint.is_some_and(Self::is_gs1_instance);
        if gs1_instance || self.origin.contains("gs1.my.salesforce.com") {
            return GS1_AUDIENCE_URL.to_string();
        }
        PRODUCTION_LOGIN_URL.to_string()
    }

    /// Whether the instance hint names a gs1 pod.
    pub fn is_gs1_instance(instance_hint: &str) -> bool {
        pattern_matches(&GS1_INSTANCE_PATTERN, instance_hint)
    }
}

impl fmt::Display for OrgUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
