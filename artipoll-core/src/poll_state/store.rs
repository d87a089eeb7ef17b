//! Backend trait for the hash store holding poll state.

use async_trait::async_trait;

use crate::error::Result;

/// Networked hash-map store (one map of string fields per key).
///
/// Implementations only need single-key atomicity. Transport failures must be
/// reported as [`Error::CacheUnavailable`](crate::error::Error::CacheUnavailable)
/// and must not be retried internally.
#[async_trait]
pub trait HashStore: Send + Sync {
    /// Sets `field` of the map stored at `key`, creating the map if needed.
    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<()>;

    /// Reads `field` of the map stored at `key`.
    ///
    /// Returns `Ok(None)` if the key or the field does not exist.
    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>>;
}
