//! Artifact data models and repository type definitions.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kinds of repositories an endpoint can expose.
///
/// The kind selects the adapter used to interpret query hits and names the
/// repository segment of artifact marker keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    Maven,
    Helm,
    Generic,
}

impl RepositoryType {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryType::Maven => "maven",
            RepositoryType::Helm => "helm",
            RepositoryType::Generic => "generic",
        }
    }

    /// Segment written into artifact marker keys.
    #[inline]
    pub fn repo_type_string(&self) -> &'static str {
        self.as_str()
    }

    /// Parses a repository type string.
    ///
    /// Debian, RPM and plain file repositories all map to `Generic`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "maven" | "maven2" => Some(RepositoryType::Maven),
            "helm" => Some(RepositoryType::Helm),
            "generic" | "debian" | "deb" | "rpm" => Some(RepositoryType::Generic),
            _ => None,
        }
    }
}

/// Logical identity of an artifact as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactIdentity {
    pub artifact_type: String,
    pub name: String,
    pub version: Option<String>,
}

impl ArtifactIdentity {
    /// Creates an identity covering every version of `name`.
    pub fn new(artifact_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            artifact_type: artifact_type.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Pins the identity to a single version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Repository path for the name, with `:` hierarchy separators turned into `/`.
    pub fn repository_path(&self) -> String {
        self.name.replace(':', "/")
    }
}

/// Artifact resolved from a repository hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalArtifact {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub name: String,
    pub version: String,
    /// Repository-native locator.
    pub reference: String,
    /// Resolvable URL.
    pub location: String,
    /// Source that produced the record; the repository name for Artifactory hits.
    pub provenance: String,
}

impl CanonicalArtifact {
    /// Creates a new artifact builder.
    pub fn builder() -> CanonicalArtifactBuilder {
        CanonicalArtifactBuilder::default()
    }
}

/// Builder for canonical artifacts, used by repository adapters.
#[derive(Default)]
pub struct CanonicalArtifactBuilder {
    artifact_type: Option<String>,
    name: Option<String>,
    version: Option<String>,
    reference: Option<String>,
    location: Option<String>,
    provenance: Option<String>,
}

impl CanonicalArtifactBuilder {
    pub fn artifact_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = Some(artifact_type.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = Some(provenance.into());
        self
    }

    /// Builds the artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is missing or the version is empty.
    pub fn build(self) -> Result<CanonicalArtifact> {
        let provenance = self.provenance.ok_or_else(|| missing("provenance"))?;
        let version = self.version.ok_or_else(|| missing("version"))?;
        if version.is_empty() {
            return Err(Error::Adapter {
                repository: provenance,
                message: "version is empty".to_string(),
            });
        }

        Ok(CanonicalArtifact {
            artifact_type: self.artifact_type.ok_or_else(|| missing("artifact_type"))?,
            name: self.name.ok_or_else(|| missing("name"))?,
            version,
            reference: self.reference.ok_or_else(|| missing("reference"))?,
            location: self.location.ok_or_else(|| missing("location"))?,
            provenance,
        })
    }
}

fn missing(field: &str) -> Error {
    Error::Adapter {
        repository: "canonical-artifact".to_string(),
        message: format!("{} is required", field),
    }
}
