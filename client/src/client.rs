//! Core client and shared request execution.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::{ArtifactoryClientBuilder, Credentials};
use crate::error::{ClientError, Result};

/// Artifactory REST API client.
///
/// Configuration (endpoint, credentials, header set) is immutable after
/// construction, so a single instance is safe to share across tasks. All
/// operations issue their HTTP round-trips sequentially; nothing is
/// retried, cached, or paginated beyond what the API natively returns.
#[derive(Debug)]
pub struct ArtifactoryClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl ArtifactoryClient {
    /// Start building a client for the given endpoint URL.
    pub fn builder(endpoint: impl Into<String>) -> ArtifactoryClientBuilder {
        ArtifactoryClientBuilder::new(endpoint)
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        endpoint: String,
        credentials: Credentials,
    ) -> Self {
        Self {
            http,
            endpoint,
            credentials,
        }
    }

    /// The configured endpoint, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Join the endpoint, the `api` segment, and an operation path/query.
    fn api_url(&self, path_and_query: &str) -> String {
        format!("{}/api/{}", self.endpoint, path_and_query)
    }

    /// Attach authentication to a request. The API key lives in the
    /// client's static header set, so only Basic credentials are applied
    /// here.
    fn auth_request(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Credentials::ApiKey(_) => builder,
        }
    }

    /// Issue a GET and return the raw response, mapping transport
    /// failures only. Status handling is the caller's concern.
    pub(crate) async fn get_response(&self, path_and_query: &str) -> Result<reqwest::Response> {
        let url = self.api_url(path_and_query);
        tracing::debug!(%url, "GET");
        Ok(self.auth_request(self.http.get(&url)).send().await?)
    }

    /// Issue a GET, require a success status, and return the body text.
    pub(crate) async fn get_text(&self, path_and_query: &str) -> Result<String> {
        let response = self.get_response(path_and_query).await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            tracing::warn!(status = status.as_u16(), "GET rejected by server");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.text().await?)
    }

    /// Issue a GET and decode the success body as JSON. A success body
    /// that is not valid JSON is a decode error, distinct from transport
    /// and status failures.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let body = self.get_text(path_and_query).await?;
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }

    /// Issue a DELETE; only an empty-success status counts as success.
    pub(crate) async fn delete_no_content(&self, path_and_query: &str) -> Result<()> {
        let url = self.api_url(path_and_query);
        tracing::debug!(%url, "DELETE");
        let response = self.auth_request(self.http.delete(&url)).send().await?;
        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            tracing::warn!(status = status.as_u16(), "DELETE rejected by server");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
