//! Injected collaborators

mod group_store;
mod insecure_origin_registry;

pub use group_store::{GroupStore, InMemoryGroupStore, DEFAULT_GROUP};
pub use insecure_origin_registry::{InMemoryInsecureOriginRegistry, InsecureOriginRegistry};
