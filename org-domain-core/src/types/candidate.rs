//! Login/audience URL pairs tried during JWT authentication

use std::collections::HashSet;

use serde::Serialize;
use url::Url;

use crate::error::{CoreError, CoreResult};

fn origin_of(input: &str) -> CoreResult<String> {
    let url = Url::parse(input).map_err(|e| CoreError::MalformedUrl(format!("{input}: {e}")))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(CoreError::MalformedUrl(format!("{input}: missing host")));
    }
    Ok(url.origin().ascii_serialization())
}

/// A (login URL, audience URL) pair, kept as given.
///
/// Two candidates are the same candidate when their origins match, whatever
/// their paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceLoginCandidate {
    pub login_url: String,
    pub audience_url: String,
    #[serde(skip)]
    key: String,
}

impl AudienceLoginCandidate {
    pub fn new(login_url: &str, audience_url: &str) -> CoreResult<Self> {
        let key = format!("{}:{}", origin_of(login_url)?, origin_of(audience_url)?);
        Ok(Self {
            login_url: login_url.to_string(),
            audience_url: audience_url.to_string(),
            key,
        })
    }

    /// `"<login origin>:<audience origin>"`
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Both halves share the origin of the respective argument.
    pub fn is_between(&self, login_origin: &str, audience_origin: &str) -> bool {
        self.key.len() == login_origin.len() + 1 + audience_origin.len()
            && self.key.starts_with(login_origin)
            && self.key.ends_with(audience_origin)
    }
}

/// Candidates keyed by origin pair, in first-seen order.
#[derive(Debug, Default)]
pub struct CandidateSet {
    keys: HashSet<String>,
    candidates: Vec<AudienceLoginCandidate>,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `candidate` unless its key is already present. Returns whether it was added.
    pub fn insert(&mut self, candidate: AudienceLoginCandidate) -> bool {
        if !self.keys.insert(candidate.key.clone()) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_vec(self) -> Vec<AudienceLoginCandidate> {
        self.candidates
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_origins() {
        let candidate = AudienceLoginCandidate::new(
            "https://login.salesforce.com/services/oauth2/token",
            "https://Acme.my.salesforce.com:443/",
        )
        .unwrap();
        assert_eq!(
            candidate.key(),
            "https://login.salesforce.com:https://acme.my.salesforce.com"
        );
        assert_eq!(
            candidate.login_url,
            "https://login.salesforce.com/services/oauth2/token"
        );
    }

    #[test]
    fn malformed_rejected() {
        assert!(matches!(
            AudienceLoginCandidate::new("login", "https://login.salesforce.com"),
            Err(CoreError::MalformedUrl(_))
        ));
    }

    #[test]
    fn set_keeps_first_of_equal_origins() {
        let mut set = CandidateSet::new();
        assert!(set.insert(
            AudienceLoginCandidate::new("https://a.example.com/x", "https://b.example.com").unwrap()
        ));
        assert!(!set.insert(
            AudienceLoginCandidate::new("https://a.example.com/y", "https://b.example.com/z")
                .unwrap()
        ));
        assert!(set.insert(
            AudienceLoginCandidate::new("https://b.example.com", "https://a.example.com").unwrap()
        ));

        let candidates = set.into_vec();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].login_url, "https://a.example.com/x");
    }

    #[test]
    fn is_between() {
        let candidate =
            AudienceLoginCandidate::new("https://a.example.com", "https://b.example.com").unwrap();
        assert!(candidate.is_between("https://a.example.com", "https://b.example.com"));
        assert!(!candidate.is_between("https://b.example.com", "https://a.example.com"));
    }

    #[test]
    fn serializes_urls_only() {
        let candidate =
            AudienceLoginCandidate::new("https://a.example.com", "https://b.example.com").unwrap();
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "loginUrl": "https://a.example.com",
                "audienceUrl": "https://b.example.com"
            })
        );
    }
}
