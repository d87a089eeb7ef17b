//! Repository adapter trait for turning raw query hits into canonical artifacts.

use crate::artifact::{CanonicalArtifact, RepositoryType};
use crate::error::Result;
use crate::query::RepositoryItem;

/// Trait for repository-specific hit interpretation.
///
/// Adapters derive name, version, reference and location from the hit's path
/// alone. They never call back into the repository.
pub trait RepositoryAdapter: Send + Sync {
    fn repository_type(&self) -> RepositoryType;

    /// Converts a hit into an artifact. `base_url` is the endpoint's base URL
    /// without a trailing slash.
    fn to_artifact(&self, item: &RepositoryItem, base_url: &str) -> Result<CanonicalArtifact>;
}
