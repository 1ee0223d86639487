//! Grouped key-value store abstract Trait

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// Group used when the caller does not name one.
pub const DEFAULT_GROUP: &str = "default";

/// Key-value store partitioned into named groups (aliases, config entries).
///
/// Every `group` argument falls back to [`DEFAULT_GROUP`] when `None`.
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn get(&self, key: &str, group: Option<&str>) -> CoreResult<Option<Value>>;

    async fn set(&self, key: &str, value: Value, group: Option<&str>) -> CoreResult<()>;

    /// Returns whether the key existed.
    async fn remove(&self, key: &str, group: Option<&str>) -> CoreResult<bool>;

    /// All entries of a group; an unknown group is empty.
    async fn list(&self, group: Option<&str>) -> CoreResult<Map<String, Value>>;

    /// First key in the group whose value equals `value`.
    async fn find_key_by_value(&self, value: &Value, group: Option<&str>)
        -> CoreResult<Option<String>>;
}

/// In-memory store over a single JSON document `{ group: { key: value } }`.
#[derive(Clone, Default)]
pub struct InMemoryGroupStore {
    document: Arc<RwLock<Map<String, Value>>>,
}

impl InMemoryGroupStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from an existing document. Non-object groups are dropped.
    #[must_use]
    pub fn from_document(document: Map<String, Value>) -> Self {
        let document = document
            .into_iter()
            .filter(|(group, entries)| {
                let keep = entries.is_object();
                if !keep {
                    log::warn!("Dropping group {group}: expected an object");
                }
                keep
            })
            .collect();
        Self {
            document: Arc::new(RwLock::new(document)),
        }
    }

    /// Snapshot of the whole document.
    pub async fn to_document(&self) -> Value {
        Value::Object(self.document.read().await.clone())
    }
}

fn group_name(group: Option<&str>) -> &str {
    group.unwrap_or(DEFAULT_GROUP)
}

#[async_trait]
impl GroupStore for InMemoryGroupStore {
    async fn get(&self, key: &str, group: Option<&str>) -> CoreResult<Option<Value>> {
        Ok(self
            .document
            .read()
            .await
            .get(group_name(group))
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn set(&self, key: &str, value: Value, group: Option<&str>) -> CoreResult<()> {
        let mut document = self.document.write().await;
        let entries = document
            .entry(group_name(group).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(entries) = entries {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }

    async fn remove(&self, key: &str, group: Option<&str>) -> CoreResult<bool> {
        let mut document = self.document.write().await;
        Ok(document
            .get_mut(group_name(group))
            .and_then(Value::as_object_mut)
            .is_some_and(|entries| entries.remove(key).is_some()))
    }

    async fn list(&self, group: Option<&str>) -> CoreResult<Map<String, Value>> {
        Ok(self
            .document
            .read()
            .await
            .get(group_name(group))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_key_by_value(
        &self,
        value: &Value,
        group: Option<&str>,
    ) -> CoreResult<Option<String>> {
        Ok(self
            .document
            .read()
            .await
            .get(group_name(group))
            .and_then(Value::as_object)
            .and_then(|entries| {
                entries
                    .iter()
                    .find(|(_, candidate)| *candidate == value)
                    .map(|(key, _)| key.clone())
            }))
    }
}
