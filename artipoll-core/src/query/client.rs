//! Transport for repository search queries.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use crate::config::{Credentials, SearchEndpointConfig};
use crate::error::{Error, Result};

use super::aql::AqlQuery;
use super::results::QueryResults;

/// Relative path of the AQL search API.
pub const AQL_API_PATH: &str = "api/search/aql";

/// Issues one search query against one endpoint.
///
/// Any non-success response, transport failure or timeout is reported as
/// [`Error::EndpointQueryFailed`]. Queries are read-only.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, search: &SearchEndpointConfig, query: &AqlQuery)
        -> Result<QueryResults>;
}

/// Search client that POSTs AQL text over HTTP.
///
/// A fresh HTTP client is built per query so that each endpoint's TLS and
/// timeout settings apply independently.
#[derive(Debug, Default, Clone)]
pub struct HttpSearchClient;

impl HttpSearchClient {
    pub fn new() -> Self {
        Self
    }

    fn build_client(search: &SearchEndpointConfig) -> Result<Client> {
        Client::builder()
            .timeout(search.timeout())
            .danger_accept_invalid_certs(search.ignore_ssl_issues)
            .build()
            .map_err(|e| failed(search, format!("Failed to create HTTP client: {}", e)))
    }
}

/// Label identifying an endpoint in errors and logs.
pub(crate) fn endpoint_label(search: &SearchEndpointConfig) -> String {
    format!("{} ({})", search.name, search.base_url)
}

fn failed(search: &SearchEndpointConfig, message: String) -> Error {
    Error::EndpointQueryFailed {
        endpoint: endpoint_label(search),
        message,
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(
        &self,
        search: &SearchEndpointConfig,
        query: &AqlQuery,
    ) -> Result<QueryResults> {
        let client = Self::build_client(search)?;
        let url = format!("{}/{}", search.base_url.trim_end_matches('/'), AQL_API_PATH);

        let mut builder = client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .header(ACCEPT, "application/json")
            .body(query.to_aql());
        builder = match &search.credentials {
            Credentials::Anonymous => builder,
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Credentials::AccessToken(token) => builder.bearer_auth(token),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| failed(search, format!("Search request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| failed(search, format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(failed(
                search,
                format!("HTTP {}: {}", status.as_u16(), body),
            ));
        }

        QueryResults::parse(&endpoint_label(search), &body)
    }
}
