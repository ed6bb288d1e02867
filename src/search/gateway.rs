//! HTTPS gateway to the search service REST API

use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{SearchError, SearchResult};
use super::query::QueryParameters;
use crate::config::ServiceConfig;

/// One request per call, no retries, no connection reuse
#[derive(Clone)]
pub struct SearchGateway {
    client: Client,
    base_url: String,
    api_key: String,
    api_version: String,
}

impl SearchGateway {
    pub fn new(config: &ServiceConfig) -> SearchResult<Self> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| SearchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the documents of an index with pre-built parameters
    pub async fn query_index(
        &self,
        index: &str,
        params: &QueryParameters,
    ) -> SearchResult<Option<Value>> {
        let url = format!("{}/indexes/{}/docs?{}", self.base_url, index, params.encode());
        self.execute(Method::GET, &url, None).await
    }

    /// Call a named service function (`servicestats`, `indexes/<name>`,
    /// `indexers/<name>/run`, ...) with an optional JSON body
    pub async fn send(
        &self,
        method: Method,
        function_name: &str,
        body: Option<&Value>,
    ) -> SearchResult<Option<Value>> {
        let mut params = QueryParameters::new();
        params.push("api-version", self.api_version.as_str());

        let url = format!(
            "{}/{}?{}",
            self.base_url,
            function_name.trim_start_matches('/'),
            params.encode()
        );
        self.execute(method, &url, body).await
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> SearchResult<Option<Value>> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header("api-key", &self.api_key)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Transport(format!("Request to search service timed out: {}", e))
            } else if e.is_connect() {
                SearchError::Transport(format!("Failed to connect to search service: {}", e))
            } else {
                SearchError::Transport(format!("Search service request failed: {}", e))
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(format!("Failed to read response body: {}", e)))?;

        debug!(
            method = %method,
            status = status.as_u16(),
            body_length = bytes.len(),
            "Search service responded"
        );
        if !status.is_success() {
            warn!(
                method = %method,
                status = status.as_u16(),
                "Search service returned non-success status"
            );
        }

        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| SearchError::Transport(format!("Response body is not UTF-8: {}", e)))?;

        if text.is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_config(endpoint: &str) -> ServiceConfig {
        ServiceConfig {
            endpoint: endpoint.to_string(),
            api_key: "key".to_string(),
            index_name: "margies-index-py".to_string(),
            api_version: crate::search::API_VERSION.to_string(),
            request_timeout_secs: None,
        }
    }

    #[test]
    fn test_gateway_creation() {
        let gateway = SearchGateway::new(&service_config("margies.search.windows.net")).unwrap();
        assert_eq!(gateway.base_url(), "https://margies.search.windows.net");
    }

    #[test]
    fn test_gateway_creation_with_timeout() {
        let mut config = service_config("http://localhost:9200");
        config.request_timeout_secs = Some(5);
        assert!(SearchGateway::new(&config).is_ok());
    }
}
