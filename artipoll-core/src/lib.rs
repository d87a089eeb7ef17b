//! Poll-state bookkeeping and multi-repository artifact resolution.

pub mod adapter;
pub mod adapter_registry;
pub mod artifact;
pub mod config;
pub mod error;
pub mod poll_state;
pub mod query;

pub use adapter::RepositoryAdapter;
pub use adapter_registry::AdapterRegistry;
pub use artifact::{ArtifactIdentity, CanonicalArtifact, RepositoryType};
pub use config::{ArtipollConfig, CacheConfig, Credentials, KeyEncoding, SearchEndpointConfig};
pub use error::{Error, Result};
pub use poll_state::{HashStore, MemoryHashStore, PollStateStore, WebdisHashStore};
pub use query::{HttpSearchClient, RepositoryItem, RepositoryQueryService, SearchClient};
