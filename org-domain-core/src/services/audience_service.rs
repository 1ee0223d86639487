//! JWT audience selection

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{
    AudienceLoginCandidate, CandidateSet, OrgUrl, PRODUCTION_LOGIN_URL, SANDBOX_LOGIN_URL,
};

/// JWT audience service
pub struct AudienceService {
    ctx: Arc<ServiceContext>,
}

impl AudienceService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Audience for a JWT bearer assertion against `url`, honouring the
    /// environment override.
    pub fn jwt_audience_url(&self, url: &OrgUrl, instance_hint: Option<&str>) -> String {
        let config = self.ctx.config();
        url.jwt_audience_url(instance_hint, config.audience_url_override.as_deref())
    }

    /// Every (login, audience) pair worth trying, deduplicated by origin pair.
    ///
    /// Pairs mixing the production and sandbox login hosts are never produced.
    /// The order below is the order callers try them in.
    pub fn login_audience_candidates(
        audience_url: &str,
        login_url: &str,
    ) -> CoreResult<Vec<AudienceLoginCandidate>> {
        let pairs = [
            (login_url, login_url),
            (SANDBOX_LOGIN_URL, SANDBOX_LOGIN_URL),
            (PRODUCTION_LOGIN_URL, PRODUCTION_LOGIN_URL),
            (audience_url, audience_url),
            (login_url, audience_url),
            // non-standard sandbox hosts (gs0 and friends)
            (login_url, SANDBOX_LOGIN_URL),
            (login_url, PRODUCTION_LOGIN_URL),
            (SANDBOX_LOGIN_URL, login_url),
            (PRODUCTION_LOGIN_URL, login_url),
            (audience_url, PRODUCTION_LOGIN_URL),
            (audience_url, SANDBOX_LOGIN_URL),
        ];

        let mut set = CandidateSet::new();
        for (login, audience) in pairs {
            let candidate = AudienceLoginCandidate::new(login, audience)?;
            if candidate.is_between(PRODUCTION_LOGIN_URL, SANDBOX_LOGIN_URL)
                || candidate.is_between(SANDBOX_LOGIN_URL, PRODUCTION_LOGIN_URL)
            {
                continue;
            }
            set.insert(candidate);
        }
        log::debug!(
            "{} login/audience candidates for audience {audience_url} and login {login_url}",
            set.len()
        );
        Ok(set.into_vec())
    }
}
