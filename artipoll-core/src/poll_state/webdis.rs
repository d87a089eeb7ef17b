//! Hash store reached through a Redis-over-HTTP gateway (webdis protocol).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::CacheConfig;
use crate::error::{Error, Result};

use super::store::HashStore;

/// Hash store backed by a webdis-compatible gateway.
///
/// Commands are issued as `GET {base}/{COMMAND}/{arg}/...` with every argument
/// percent-encoded as one path segment. Replies are JSON objects keyed by the
/// command name. Failures are reported once; nothing is retried here.
pub struct WebdisHashStore {
    client: Client,
    base_url: Url,
}

impl WebdisHashStore {
    /// Creates a store client for the gateway at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be created.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid store URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Store URL '{}' cannot carry command paths",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Creates a store client from the `[cache]` configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no `store_url` is configured.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let url = config
            .store_url
            .as_deref()
            .ok_or_else(|| Error::Config("cache.store_url is not configured".to_string()))?;
        Self::new(url, config.timeout())
    }

    fn command_url(&self, command: &str, args: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(command);
            for arg in args {
                segments.push(arg);
            }
        }
        url
    }

    async fn execute(&self, key: &str, command: &str, args: &[&str]) -> Result<Value> {
        let url = self.command_url(command, args);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(key, format!("{} request failed: {}", command, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| unavailable(key, format!("Failed to read {} reply: {}", command, e)))?;
        if !status.is_success() {
            return Err(unavailable(
                key,
                format!("{} failed with status {}: {}", command, status, body),
            ));
        }

        let mut reply: Value = serde_json::from_str(&body)
            .map_err(|e| unavailable(key, format!("Malformed {} reply: {}", command, e)))?;
        reply
            .get_mut(command)
            .map(Value::take)
            .ok_or_else(|| unavailable(key, format!("{} reply is missing its result", command)))
    }
}

fn unavailable(key: &str, message: String) -> Error {
    Error::CacheUnavailable {
        key: key.to_string(),
        message,
    }
}

#[async_trait]
impl HashStore for WebdisHashStore {
    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        self.execute(key, "HSET", &[key, field, value]).await?;
        Ok(())
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        match self.execute(key, "HGET", &[key, field]).await? {
            Value::Null => Ok(None),
            Value::String(value) => Ok(Some(value)),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(unavailable(key, format!("Unexpected HGET result: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_url_encodes_segments() {
        let store =
            WebdisHashStore::new("http://127.0.0.1:7379/", Duration::from_secs(1)).unwrap();
        let url = store.command_url("HGET", &["igor:maven:artifactory:repo:a/b", "location"]);
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:7379/HGET/igor:maven:artifactory:repo:a%2Fb/location"
        );
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(WebdisHashStore::new("not a url", Duration::from_secs(1)).is_err());
    }
}
