//! Repository operations.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::client::ArtifactoryClient;
use crate::error::Result;
use crate::JsonObject;

/// One entry of the `/api/repositories` summary listing. The `key` is
/// pulled out as the mapping key; everything else passes through.
#[derive(Debug, Deserialize)]
struct RepositorySummary {
    key: String,
    #[serde(flatten)]
    rest: JsonObject,
}

impl ArtifactoryClient {
    /// Fetch the full configuration of a single repository.
    ///
    /// The `key` field is removed from the returned object since the
    /// caller already supplied it.
    pub async fn get_repository(&self, key: &str) -> Result<JsonObject> {
        let mut repository: JsonObject =
            self.get_json(&format!("repositories/{}", key)).await?;
        repository.remove("key");
        Ok(repository)
    }

    /// List repositories, keyed by repository key.
    ///
    /// With `recurse` set, the value for each key is the result of
    /// [`get_repository`](Self::get_repository), fetched one key at a time
    /// in the order the server returned them (N+1 round-trips); the first
    /// failing follow-up aborts the whole listing. Otherwise the value is
    /// the summary object with the key stripped.
    pub async fn list_repositories(
        &self,
        repo_type: Option<&str>,
        recurse: bool,
    ) -> Result<BTreeMap<String, JsonObject>> {
        let path = match repo_type {
            Some(repo_type) => format!("repositories?type={}", urlencoding::encode(repo_type)),
            None => "repositories".to_string(),
        };
        let summaries: Vec<RepositorySummary> = self.get_json(&path).await?;

        let mut repositories = BTreeMap::new();
        for summary in summaries {
            let value = if recurse {
                self.get_repository(&summary.key).await?
            } else {
                summary.rest
            };
            repositories.insert(summary.key, value);
        }
        Ok(repositories)
    }
}
