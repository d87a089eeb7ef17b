//! Error types and result aliases.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error in {context}: {error}")]
    Toml {
        error: toml::de::Error,
        context: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache store unavailable while accessing {key}: {message}")]
    CacheUnavailable { key: String, message: String },

    #[error("Corrupt poll state at {key}: stored value '{value}' is not an integer timestamp")]
    CorruptState { key: String, value: String },

    #[error("Query against endpoint {endpoint} failed: {message}")]
    EndpointQueryFailed { endpoint: String, message: String },

    #[error("Artifact not found: {artifact_type} {name} {version}. No configured endpoint returned a match.")]
    ArtifactNotFound {
        artifact_type: String,
        name: String,
        version: String,
    },

    #[error("Adapter error for repository {repository}: {message}")]
    Adapter { repository: String, message: String },

    #[error("Unsupported repository type: {0}. Supported types: maven, helm, generic")]
    UnsupportedRepositoryType(String),
}

impl Error {
    /// Returns true for a lookup that completed but found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ArtifactNotFound { .. })
    }

    /// Returns true when the backing hash store could not be reached.
    pub fn is_cache_unavailable(&self) -> bool {
        matches!(self, Error::CacheUnavailable { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Toml {
            error,
            context: "artipoll.toml".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
