//! Artifact resolution across every configured repository endpoint.

mod aql;
mod client;
mod results;

pub use aql::{AqlQuery, Criterion};
pub use client::{HttpSearchClient, SearchClient, AQL_API_PATH};
pub use results::{QueryResults, RepositoryItem};

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapter_registry::AdapterRegistry;
use crate::artifact::{ArtifactIdentity, CanonicalArtifact};
use crate::config::SearchEndpointConfig;
use crate::error::{Error, Result};

use client::endpoint_label;

/// Provider name reported by this service.
pub const ARTIFACT_SERVICE_PROVIDER: &str = "artifactory";

const INCLUDED_FIELDS: [&str; 3] = ["path", "repo", "name"];

/// Query for every version of `identity` in the search's repository.
pub fn versions_query(search: &SearchEndpointConfig, identity: &ArtifactIdentity) -> AqlQuery {
    AqlQuery::items()
        .equals("repo", search.repo.as_str())
        .matches("name", format!("*{}", identity.artifact_type))
        .matches("path", format!("{}*", identity.repository_path()))
        .include(&INCLUDED_FIELDS)
}

/// Query for exactly one version folder of `identity`.
pub fn artifact_query(
    search: &SearchEndpointConfig,
    identity: &ArtifactIdentity,
    version: &str,
) -> AqlQuery {
    AqlQuery::items()
        .equals("repo", search.repo.as_str())
        .matches("name", format!("*{}", identity.artifact_type))
        .matches("path", format!("{}/{}", identity.repository_path(), version))
        .include(&INCLUDED_FIELDS)
}

/// Resolves artifacts by querying every configured endpoint in order.
///
/// Endpoint failures never abort an aggregation: a failing endpoint is logged
/// and contributes nothing, exactly like an endpoint with no hits.
pub struct RepositoryQueryService {
    searches: Vec<SearchEndpointConfig>,
    client: Arc<dyn SearchClient>,
    adapters: Arc<AdapterRegistry>,
}

impl RepositoryQueryService {
    pub fn new(
        searches: Vec<SearchEndpointConfig>,
        client: Arc<dyn SearchClient>,
        adapters: Arc<AdapterRegistry>,
    ) -> Self {
        Self {
            searches,
            client,
            adapters,
        }
    }

    /// Creates a service that talks to the endpoints over HTTP.
    pub fn over_http(searches: Vec<SearchEndpointConfig>, adapters: Arc<AdapterRegistry>) -> Self {
        Self::new(searches, Arc::new(HttpSearchClient::new()), adapters)
    }

    pub fn provider(&self) -> &'static str {
        ARTIFACT_SERVICE_PROVIDER
    }

    /// Lists versions of `name` across all endpoints, in configuration order.
    ///
    /// `release_statuses` is accepted for interface compatibility and not used
    /// to filter. Versions found on several endpoints appear once per endpoint.
    pub async fn list_versions(
        &self,
        artifact_type: &str,
        name: &str,
        _release_statuses: &[String],
    ) -> Vec<String> {
        self.find_artifacts(artifact_type, name)
            .await
            .into_iter()
            .map(|artifact| artifact.version)
            .collect()
    }

    /// Finds every artifact of `name` across all endpoints, in configuration order.
    pub async fn find_artifacts(&self, artifact_type: &str, name: &str) -> Vec<CanonicalArtifact> {
        let identity = ArtifactIdentity::new(artifact_type, name);
        let mut artifacts = Vec::new();
        for search in &self.searches {
            let query = versions_query(search, &identity);
            artifacts.extend(self.query_endpoint(search, &query).await);
        }
        artifacts
    }

    /// Resolves a single artifact version.
    ///
    /// Endpoints are tried in configuration order and the first one holding the
    /// exact version wins; later endpoints are not queried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArtifactNotFound`] if no endpoint has the version.
    pub async fn get_artifact(
        &self,
        artifact_type: &str,
        name: &str,
        version: &str,
    ) -> Result<CanonicalArtifact> {
        let identity = ArtifactIdentity::new(artifact_type, name).with_version(version);
        for search in &self.searches {
            let query = artifact_query(search, &identity, version);
            let found = self
                .query_endpoint(search, &query)
                .await
                .into_iter()
                .find(|artifact| artifact.version == version);
            if let Some(artifact) = found {
                return Ok(artifact);
            }
        }

        Err(Error::ArtifactNotFound {
            artifact_type: artifact_type.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    async fn query_endpoint(
        &self,
        search: &SearchEndpointConfig,
        query: &AqlQuery,
    ) -> Vec<CanonicalArtifact> {
        match self.fetch_artifacts(search, query).await {
            Ok(artifacts) => {
                if artifacts.is_empty() {
                    debug!(endpoint = %endpoint_label(search), repo = %search.repo, "No matching artifacts");
                }
                artifacts
            }
            Err(e) => {
                warn!(endpoint = %endpoint_label(search), repo = %search.repo, error = %e, "Unable to query repository for artifacts");
                Vec::new()
            }
        }
    }

    async fn fetch_artifacts(
        &self,
        search: &SearchEndpointConfig,
        query: &AqlQuery,
    ) -> Result<Vec<CanonicalArtifact>> {
        let adapter = self
            .adapters
            .get(search.repo_type)
            .ok_or_else(|| Error::UnsupportedRepositoryType(search.repo_type.as_str().to_string()))?;

        debug!(endpoint = %endpoint_label(search), query = %query, "Querying repository");
        let results = self.client.search(search, query).await?;

        let mut artifacts = Vec::with_capacity(results.results.len());
        for item in &results.results {
            match adapter.to_artifact(item, &search.base_url) {
                Ok(artifact) => artifacts.push(artifact),
                Err(e) => {
                    warn!(endpoint = %endpoint_label(search), path = %item.path, name = %item.name, error = %e, "Skipping unreadable search hit");
                }
            }
        }
        Ok(artifacts)
    }
}
