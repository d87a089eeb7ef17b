//! Search response models.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Body of a successful search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResults {
    #[serde(default)]
    pub results: Vec<RepositoryItem>,
}

impl QueryResults {
    /// Parses a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndpointQueryFailed`] if the body is not a valid result document.
    pub fn parse(endpoint: &str, body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::EndpointQueryFailed {
            endpoint: endpoint.to_string(),
            message: format!("Failed to parse search results: {}", e),
        })
    }
}

/// One raw hit: the repository, the folder path, and the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryItem {
    pub repo: String,
    pub path: String,
    pub name: String,
}

impl RepositoryItem {
    pub fn new(
        repo: impl Into<String>,
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            repo: repo.into(),
            path: path.into(),
            name: name.into(),
        }
    }

    /// Non-empty path segments.
    pub fn path_segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// `{repo}/{path}/{name}`
    pub fn repo_path(&self) -> String {
        let path = self.path.trim_matches('/');
        if path.is_empty() || path == "." {
            format!("{}/{}", self.repo, self.name)
        } else {
            format!("{}/{}/{}", self.repo, path, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let body = r#"{
            "results": [
                {"repo": "libs-release", "path": "io/example/demo/1.0.0", "name": "demo-1.0.0.jar", "size": 1024}
            ],
            "range": {"start_pos": 0, "end_pos": 1, "total": 1}
        }"#;
        let results = QueryResults::parse("libs", body).unwrap();
        assert_eq!(results.results.len(), 1);
        assert_eq!(results.results[0].path, "io/example/demo/1.0.0");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = QueryResults::parse("libs", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::EndpointQueryFailed { .. }));
    }

    #[test]
    fn test_repo_path_for_root_items() {
        let item = RepositoryItem::new("helm-local", ".", "chart-1.0.0.tgz");
        assert_eq!(item.repo_path(), "helm-local/chart-1.0.0.tgz");

        let item = RepositoryItem::new("debian-local", "app/server/1.0", "server.deb");
        assert_eq!(item.repo_path(), "debian-local/app/server/1.0/server.deb");
        assert_eq!(item.path_segments(), vec!["app", "server", "1.0"]);
    }
}
