//! System-level operations.

use serde::Deserialize;

use crate::client::ArtifactoryClient;
use crate::error::Result;

/// Server version information.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemVersion {
    pub version: String,
    pub revision: Option<String>,
    pub addons: Option<Vec<String>>,
    pub license: Option<String>,
}

impl ArtifactoryClient {
    /// Check that the server is reachable and responding. The ping
    /// endpoint answers with a plain-text body, so only the status is
    /// inspected.
    pub async fn ping(&self) -> Result<bool> {
        let response = self.get_response("system/ping").await?;
        Ok(response.status().is_success())
    }

    /// Fetch server version information.
    pub async fn get_version(&self) -> Result<SystemVersion> {
        self.get_json("system/version").await
    }
}
