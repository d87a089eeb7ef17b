use artipoll_core::adapter::RepositoryAdapter;
use artipoll_core::error::{Error, Result};
use artipoll_core::{CanonicalArtifact, RepositoryItem, RepositoryType};
use regex::Regex;

const CHART_FILE: &str =
    r"^(?P<name>.+?)-(?P<version>\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.+-]*)?)\.tgz$";

/// Reads packaged Helm charts named `chart-version.tgz`.
pub struct HelmAdapter;

impl RepositoryAdapter for HelmAdapter {
    fn repository_type(&self) -> RepositoryType {
        RepositoryType::Helm
    }

    fn to_artifact(&self, item: &RepositoryItem, base_url: &str) -> Result<CanonicalArtifact> {
        let chart_re = Regex::new(CHART_FILE).map_err(|e| Error::Adapter {
            repository: item.repo.clone(),
            message: format!("Failed to create regex: {}", e),
        })?;
        let captures = chart_re.captures(&item.name).ok_or_else(|| Error::Adapter {
            repository: item.repo.clone(),
            message: format!("'{}' is not a packaged chart (name-version.tgz)", item.name),
        })?;

        let reference = item.repo_path();
        CanonicalArtifact::builder()
            .artifact_type("helm/chart")
            .name(&captures["name"])
            .version(&captures["version"])
            .location(format!("{}/{}", base_url, reference))
            .reference(reference)
            .provenance(item.repo.clone())
            .build()
    }
}
