//! 类型定义模块

mod candidate;
mod org_url;

pub use candidate::{AudienceLoginCandidate, CandidateSet};
pub use org_url::{
    OrgUrl, GS1_AUDIENCE_URL, LOCAL_URL_PARTS, PRODUCTION_LOGIN_URL, SANDBOX_LOGIN_URL,
};

// Re-export resolver 库的公共类型
pub use org_domain_resolver::{Resolution, ResolutionRequest};
