use artipoll_core::adapter::RepositoryAdapter;
use artipoll_core::error::{Error, Result};
use artipoll_core::{CanonicalArtifact, RepositoryItem, RepositoryType};

/// Reads version-per-folder layouts such as `app/server/1.2.3/server_1.2.3_amd64.deb`.
///
/// The artifact type is the file extension, the version is the last folder.
pub struct GenericAdapter;

impl RepositoryAdapter for GenericAdapter {
    fn repository_type(&self) -> RepositoryType {
        RepositoryType::Generic
    }

    fn to_artifact(&self, item: &RepositoryItem, base_url: &str) -> Result<CanonicalArtifact> {
        let segments = item.path_segments();
        let (version, name_parts) = match segments.split_last() {
            Some((version, name_parts)) if !name_parts.is_empty() => (*version, name_parts),
            _ => {
                return Err(Error::Adapter {
                    repository: item.repo.clone(),
                    message: format!("Path '{}' has no version folder", item.path),
                })
            }
        };

        let artifact_type = item
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("file");

        let reference = item.repo_path();
        CanonicalArtifact::builder()
            .artifact_type(artifact_type)
            .name(name_parts.join("/"))
            .version(version)
            .location(format!("{}/{}", base_url, reference))
            .reference(reference)
            .provenance(item.repo.clone())
            .build()
    }
}
