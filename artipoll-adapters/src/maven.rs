use artipoll_core::adapter::RepositoryAdapter;
use artipoll_core::error::{Error, Result};
use artipoll_core::{CanonicalArtifact, RepositoryItem, RepositoryType};

/// Reads Maven layouts: `group/parts/artifactId/version/file`.
pub struct MavenAdapter;

impl RepositoryAdapter for MavenAdapter {
    fn repository_type(&self) -> RepositoryType {
        RepositoryType::Maven
    }

    fn to_artifact(&self, item: &RepositoryItem, base_url: &str) -> Result<CanonicalArtifact> {
        let segments = item.path_segments();
        if segments.len() < 3 {
            return Err(Error::Adapter {
                repository: item.repo.clone(),
                message: format!(
                    "Path '{}' is not a Maven layout (expected group/artifactId/version)",
                    item.path
                ),
            });
        }

        let (coordinates, version) = segments.split_at(segments.len() - 1);
        let (group_parts, artifact_id) = coordinates.split_at(coordinates.len() - 1);
        let version = version[0];
        let name = format!("{}:{}", group_parts.join("."), artifact_id[0]);

        CanonicalArtifact::builder()
            .artifact_type("maven/file")
            .reference(format!("{}:{}", name, version))
            .name(name)
            .version(version)
            .location(format!(
                "{}/webapp/#/artifacts/browse/tree/General/{}/{}",
                base_url,
                item.repo,
                segments.join("/")
            ))
            .provenance(item.repo.clone())
            .build()
    }
}
