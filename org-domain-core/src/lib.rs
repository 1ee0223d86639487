//! Org Domain Core Library
//!
//! Business logic for working with Salesforce org URLs:
//! - URL classification (My Domain, sandbox, internal, local)
//! - JWT audience selection and login/audience candidate lists
//! - Resolution gate that waits for freshly created My Domain hosts
//!
//! Storage and environment access are abstracted through traits so that the
//! same services run inside a CLI, a server or a test harness.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{EnvSource, MapEnv, OrgDomainConfig, ProcessEnv};
pub use error::{CoreError, CoreResult};
pub use services::{AudienceService, ResolutionGate, ServiceContext};
pub use traits::{
    GroupStore, InMemoryGroupStore, InMemoryInsecureOriginRegistry, InsecureOriginRegistry,
};
pub use types::{AudienceLoginCandidate, OrgUrl, Resolution};
