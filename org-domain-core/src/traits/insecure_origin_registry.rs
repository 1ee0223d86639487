//! Registry of origins already warned about for using an insecure scheme

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Remembers which origins have been reported as insecure.
///
/// Shared by every [`OrgUrl`](crate::types::OrgUrl) parsed through the same
/// context so each origin is reported once.
pub trait InsecureOriginRegistry: Send + Sync {
    /// Record `origin`; `true` only on the first sighting.
    fn first_sighting(&self, origin: &str) -> bool;
}

/// In-memory registry
///
/// Entries are never evicted. Clones share the same set.
#[derive(Clone, Default)]
pub struct InMemoryInsecureOriginRegistry {
    origins: Arc<Mutex<HashSet<String>>>,
}

impl InMemoryInsecureOriginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct origins seen so far
    pub fn len(&self) -> usize {
        self.origins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InsecureOriginRegistry for InMemoryInsecureOriginRegistry {
    fn first_sighting(&self, origin: &str) -> bool {
        // A panic while holding the lock cannot leave a HashSet half-inserted.
        self.origins
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(origin.to_string())
    }
}
