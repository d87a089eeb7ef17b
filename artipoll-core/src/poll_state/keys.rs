//! Deterministic cache key construction for poll state and artifact markers.

use crate::artifact::{CanonicalArtifact, RepositoryType};
use crate::config::{CacheConfig, KeyEncoding, SearchEndpointConfig};

/// Component identifier for poll cycle records.
pub const POLLING_ID: &str = "artifactory:publish:queue";

/// Provider segment of artifact marker keys.
pub const ARTIFACT_REPO_NAME: &str = "artifactory";

const DELIMITER: char = ':';

/// Builds the keys under which poll state and artifact markers are stored.
///
/// Keys are colon-joined: a configured prefix, a fixed component identifier,
/// then identity fields in a fixed order.
#[derive(Debug, Clone)]
pub struct CacheKeys {
    prefix: String,
    encoding: KeyEncoding,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>, encoding: KeyEncoding) -> Self {
        Self {
            prefix: prefix.into(),
            encoding,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.prefix.clone(), config.key_encoding)
    }

    /// `{prefix}:artifactory:publish:queue:{partition}:{group}`
    pub fn polling_key(&self, search: &SearchEndpointConfig) -> String {
        self.join(
            &self.polling_prefix(),
            &[search.partition_name.as_str(), search.group_id.as_str()],
        )
    }

    /// `{prefix}:{repo type}:artifactory:{provenance}:{reference}`
    pub fn artifact_key(&self, artifact: &CanonicalArtifact, repo_type: RepositoryType) -> String {
        let head = format!(
            "{}{}{}{}{}",
            self.prefix,
            DELIMITER,
            repo_type.repo_type_string(),
            DELIMITER,
            ARTIFACT_REPO_NAME
        );
        self.join(&head, &[artifact.provenance.as_str(), artifact.reference.as_str()])
    }

    fn polling_prefix(&self) -> String {
        format!("{}{}{}", self.prefix, DELIMITER, POLLING_ID)
    }

    fn join(&self, head: &str, segments: &[&str]) -> String {
        let mut key = String::from(head);
        for segment in segments {
            key.push(DELIMITER);
            match self.encoding {
                KeyEncoding::Compatible => key.push_str(segment),
                KeyEncoding::Escaped => escape_segment(segment, &mut key),
            }
        }
        key
    }
}

fn escape_segment(segment: &str, out: &mut String) {
    for c in segment.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            other => out.push(other),
        }
    }
}
