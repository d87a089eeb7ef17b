//! In-process hash store.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;

use super::store::HashStore;

/// Hash store kept in process memory.
///
/// Useful for tests and single-process deployments. Each key is locked
/// independently, so concurrent writers to one key are last-writer-wins.
#[derive(Debug, Default)]
pub struct MemoryHashStore {
    entries: DashMap<String, HashMap<String, String>>,
}

impl MemoryHashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns every field stored under `key`.
    pub fn fields(&self, key: &str) -> Option<HashMap<String, String>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl HashStore for MemoryHashStore {
    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(key)
            .and_then(|entry| entry.value().get(field).cloned()))
    }
}
