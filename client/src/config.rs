//! Client configuration and construction.
//!
//! Authentication is a tagged choice: either HTTP Basic credentials or a
//! static `X-JFrog-Art-Api` header. Supplying both or neither is a
//! configuration error at `build()` time, so an invalid combination never
//! reaches request execution.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::client::ArtifactoryClient;
use crate::error::{ClientError, Result};

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "X-JFrog-Art-Api";

/// Authentication method for the Artifactory API.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// HTTP Basic credentials, attached per request.
    Basic { username: String, password: String },
    /// API key, merged into the client's static header set.
    ApiKey(String),
}

/// Builder for [`ArtifactoryClient`].
#[derive(Debug, Clone)]
pub struct ArtifactoryClientBuilder {
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
    verify_tls: bool,
}

impl ArtifactoryClientBuilder {
    /// Start building a client for the given endpoint URL
    /// (e.g. `https://artifactory.example.com/artifactory`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: None,
            password: None,
            api_key: None,
            verify_tls: true,
        }
    }

    /// Username for HTTP Basic authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Password for HTTP Basic authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// API key sent as the `X-JFrog-Art-Api` header.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Toggle TLS certificate verification. Verification is on by
    /// default for https endpoints; turning it off is an explicit
    /// opt-out.
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Validate the configuration and construct the client.
    pub fn build(self) -> Result<ArtifactoryClient> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            ClientError::Config(format!("Invalid endpoint URL '{}': {}", self.endpoint, e))
        })?;
        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ClientError::Config(format!(
                "Endpoint must use http or https, got '{}'",
                scheme
            )));
        }

        let credentials = match (self.username, self.api_key) {
            (Some(username), None) => {
                let password = self.password.ok_or_else(|| {
                    ClientError::Config("Username supplied without a password".into())
                })?;
                Credentials::Basic { username, password }
            }
            (None, Some(api_key)) => Credentials::ApiKey(api_key),
            (Some(_), Some(_)) => {
                return Err(ClientError::Config(
                    "Both username/password and API key supplied; choose one".into(),
                ))
            }
            (None, None) => {
                return Err(ClientError::Config(
                    "Either username/password or an API key is required".into(),
                ))
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Credentials::ApiKey(api_key) = &credentials {
            let value = HeaderValue::from_str(api_key).map_err(|_| {
                ClientError::Config("API key contains characters not valid in a header".into())
            })?;
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if scheme == "https" && !self.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build()?;

        let endpoint = self.endpoint.trim_end_matches('/').to_string();
        Ok(ArtifactoryClient::from_parts(http, endpoint, credentials))
    }
}
