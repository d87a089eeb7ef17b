//! Poll cycle bookkeeping and artifact markers kept in a shared hash store.

mod keys;
mod memory;
mod store;
mod webdis;

pub use keys::{CacheKeys, ARTIFACT_REPO_NAME, POLLING_ID};
pub use memory::MemoryHashStore;
pub use store::HashStore;
pub use webdis::WebdisHashStore;

use std::sync::Arc;

use tracing::debug;

use crate::artifact::{CanonicalArtifact, RepositoryType};
use crate::config::{CacheConfig, SearchEndpointConfig};
use crate::error::{Error, Result};

/// Field holding the last completed poll cycle, in Unix milliseconds.
pub const POLL_STAMP: &str = "lastPollCycleTimestamp";

/// Field holding an artifact's resolvable URL.
pub const LOCATION: &str = "location";

/// Namespaced poll state on top of a [`HashStore`].
///
/// Every operation is exactly one store call. Store failures propagate as
/// [`Error::CacheUnavailable`]; treating an unreachable store as "never polled"
/// would re-announce artifacts downstream.
pub struct PollStateStore {
    store: Arc<dyn HashStore>,
    keys: CacheKeys,
}

impl PollStateStore {
    pub fn new(store: Arc<dyn HashStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            keys: CacheKeys::from_config(config),
        }
    }

    /// Creates a store backed by process memory.
    pub fn in_memory(config: &CacheConfig) -> Self {
        Self::new(Arc::new(MemoryHashStore::new()), config)
    }

    /// Creates a store backed by the configured webdis gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if `store_url` is missing or invalid.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(WebdisHashStore::from_config(config)?), config))
    }

    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    /// Records the completion time of a poll cycle for the search's partition.
    pub async fn set_last_poll_cycle_timestamp(
        &self,
        search: &SearchEndpointConfig,
        timestamp_millis: i64,
    ) -> Result<()> {
        let key = self.keys.polling_key(search);
        debug!(key = %key, timestamp = timestamp_millis, "Recording poll cycle");
        self.store
            .hset(&key, POLL_STAMP, &timestamp_millis.to_string())
            .await
    }

    /// Reads the last completed poll cycle for the search's partition.
    ///
    /// Returns `Ok(None)` if the partition has never been polled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the stored value is not an integer.
    pub async fn get_last_poll_cycle_timestamp(
        &self,
        search: &SearchEndpointConfig,
    ) -> Result<Option<i64>> {
        let key = self.keys.polling_key(search);
        match self.store.hget(&key, POLL_STAMP).await? {
            None => Ok(None),
            Some(value) => value
                .parse::<i64>()
                .map(Some)
                .map_err(|_| Error::CorruptState { key, value }),
        }
    }

    /// Writes the marker recording that `artifact` has been announced.
    ///
    /// Writing the same artifact twice leaves the store unchanged.
    pub async fn set_artifact_key(
        &self,
        artifact: &CanonicalArtifact,
        repo_type: RepositoryType,
    ) -> Result<()> {
        let key = self.keys.artifact_key(artifact, repo_type);
        debug!(key = %key, location = %artifact.location, "Marking artifact");
        self.store.hset(&key, LOCATION, &artifact.location).await
    }
}
