//! TOML configuration for the cache namespace and repository search endpoints.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::artifact::RepositoryType;
use crate::error::{Error, Result};

const DEFAULT_CACHE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// How free-form segments are joined into cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    /// Plain colon join. Matches keys written by existing deployments, but two
    /// identities whose fields contain `:` can collide.
    #[default]
    Compatible,
    /// Percent-escapes `%` and `:` inside each free-form segment.
    Escaped,
}

/// Cache namespace configuration consumed by the poll state store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Global key prefix.
    pub prefix: String,
    #[serde(default)]
    pub key_encoding: KeyEncoding,
    /// Base URL of the HTTP hash store gateway.
    #[serde(default)]
    pub store_url: Option<String>,
    #[serde(default = "default_cache_timeout")]
    pub timeout_secs: u64,
}

fn default_cache_timeout() -> u64 {
    DEFAULT_CACHE_TIMEOUT_SECS
}

fn default_query_timeout() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: "artipoll".to_string(),
            key_encoding: KeyEncoding::Compatible,
            store_url: None,
            timeout_secs: DEFAULT_CACHE_TIMEOUT_SECS,
        }
    }
}

impl CacheConfig {
    /// Creates a cache configuration with the given key prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Sets the key encoding.
    pub fn with_key_encoding(mut self, encoding: KeyEncoding) -> Self {
        self.key_encoding = encoding;
        self
    }

    /// Sets the hash store URL.
    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = Some(url.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Credentials for one search endpoint.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    #[default]
    Anonymous,
    Basic {
        username: String,
        password: String,
    },
    AccessToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => write!(f, "Anonymous"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Credentials::AccessToken(_) => write!(f, "AccessToken(***)"),
        }
    }
}

impl Credentials {
    /// Resolves the optional credential fields of a search definition.
    ///
    /// # Errors
    ///
    /// Returns an error if a token is combined with a username or password, or if
    /// only half of a username/password pair is present.
    pub fn from_parts(
        username: Option<String>,
        password: Option<String>,
        access_token: Option<String>,
    ) -> Result<Self> {
        match (username, password, access_token) {
            (None, None, None) => Ok(Credentials::Anonymous),
            (None, None, Some(token)) => Ok(Credentials::AccessToken(token)),
            (Some(username), Some(password), None) => {
                Ok(Credentials::Basic { username, password })
            }
            (_, _, Some(_)) => Err(Error::Config(
                "access_token cannot be combined with username/password".to_string(),
            )),
            _ => Err(Error::Config(
                "username and password must be configured together".to_string(),
            )),
        }
    }
}

/// One configured repository backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawSearch")]
pub struct SearchEndpointConfig {
    /// Search name, used in logs and CLI lookups.
    pub name: String,
    /// Poll partition; defaults to `name`.
    pub partition_name: String,
    pub group_id: String,
    pub base_url: String,
    /// Repository the queries are scoped to.
    pub repo: String,
    pub repo_type: RepositoryType,
    pub credentials: Credentials,
    pub ignore_ssl_issues: bool,
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
struct RawSearch {
    name: String,
    partition_name: Option<String>,
    #[serde(default)]
    group_id: String,
    base_url: String,
    repo: String,
    #[serde(default = "default_repo_type")]
    repo_type: String,
    username: Option<String>,
    password: Option<String>,
    access_token: Option<String>,
    #[serde(default)]
    ignore_ssl_issues: bool,
    #[serde(default = "default_query_timeout")]
    timeout_secs: u64,
}

fn default_repo_type() -> String {
    "maven".to_string()
}

impl TryFrom<RawSearch> for SearchEndpointConfig {
    type Error = String;

    fn try_from(raw: RawSearch) -> std::result::Result<Self, Self::Error> {
        let repo_type = RepositoryType::from_str(&raw.repo_type).ok_or_else(|| {
            Error::UnsupportedRepositoryType(raw.repo_type.clone()).to_string()
        })?;
        let credentials = Credentials::from_parts(raw.username, raw.password, raw.access_token)
            .map_err(|e| format!("search '{}': {}", raw.name, e))?;

        Ok(Self {
            partition_name: raw.partition_name.unwrap_or_else(|| raw.name.clone()),
            name: raw.name,
            group_id: raw.group_id,
            base_url: raw.base_url.trim_end_matches('/').to_string(),
            repo: raw.repo,
            repo_type,
            credentials,
            ignore_ssl_issues: raw.ignore_ssl_issues,
            timeout_secs: raw.timeout_secs,
        })
    }
}

impl SearchEndpointConfig {
    /// Creates an anonymous search endpoint whose partition is its name.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        repo: impl Into<String>,
        repo_type: RepositoryType,
    ) -> Self {
        let name = name.into();
        let base_url: String = base_url.into();
        Self {
            partition_name: name.clone(),
            name,
            group_id: String::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            repo: repo.into(),
            repo_type,
            credentials: Credentials::Anonymous,
            ignore_ssl_issues: false,
            timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }

    pub fn with_partition(mut self, partition_name: impl Into<String>) -> Self {
        self.partition_name = partition_name.into();
        self
    }

    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_ignore_ssl_issues(mut self, ignore: bool) -> Self {
        self.ignore_ssl_issues = ignore;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level `artipoll.toml` contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtipollConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub searches: Vec<SearchEndpointConfig>,
}

impl ArtipollConfig {
    /// Parses configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|error| Error::Toml {
            error,
            context: path.display().to_string(),
        })
    }

    /// Finds a search by name.
    pub fn search(&self, name: &str) -> Option<&SearchEndpointConfig> {
        self.searches.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_mutually_exclusive() {
        assert!(Credentials::from_parts(
            Some("user".to_string()),
            Some("pass".to_string()),
            Some("token".to_string())
        )
        .is_err());
        assert!(Credentials::from_parts(Some("user".to_string()), None, None).is_err());
        assert_eq!(
            Credentials::from_parts(None, None, Some("token".to_string())).unwrap(),
            Credentials::AccessToken("token".to_string())
        );
        assert_eq!(
            Credentials::from_parts(None, None, None).unwrap(),
            Credentials::Anonymous
        );
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let basic = Credentials::Basic {
            username: "deployer".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", basic);
        assert!(rendered.contains("deployer"));
        assert!(!rendered.contains("hunter2"));

        let token = format!("{:?}", Credentials::AccessToken("s3cr3t".to_string()));
        assert!(!token.contains("s3cr3t"));
    }

    #[test]
    fn test_search_new_trims_base_url() {
        let search = SearchEndpointConfig::new(
            "libs",
            "https://repo.example.com/artifactory/",
            "libs-release",
            RepositoryType::Maven,
        );
        assert_eq!(search.base_url, "https://repo.example.com/artifactory");
        assert_eq!(search.partition_name, "libs");
    }
}
