//! Search operations.
//!
//! Every search returns the server's `{"results": [...]}` envelope; the
//! `uri` of each result becomes the key of the returned map and is
//! dropped from the value.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::client::ArtifactoryClient;
use crate::error::{ClientError, Result};
use crate::time;
use crate::JsonObject;

/// Date fields accepted by [`ArtifactoryClient::search_by_dates`].
const DATE_FIELDS: [&str; 3] = ["created", "lastModified", "lastDownloaded"];

#[derive(Debug, Deserialize)]
struct SearchResults<T> {
    #[serde(default = "Vec::new")]
    results: Vec<Keyed<T>>,
}

#[derive(Debug, Deserialize)]
struct Keyed<T> {
    uri: String,
    #[serde(flatten)]
    value: T,
}

impl<T> SearchResults<T> {
    fn into_map(self) -> BTreeMap<String, T> {
        self.results
            .into_iter()
            .map(|keyed| (keyed.uri, keyed.value))
            .collect()
    }
}

/// One result of a usage search.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageEntry {
    #[serde(rename = "lastDownloaded")]
    pub last_downloaded: Option<DateTime<FixedOffset>>,
    #[serde(rename = "remoteLastDownloaded")]
    pub remote_last_downloaded: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// One result of a dates search; only the requested fields are present.
#[derive(Debug, Clone, Deserialize)]
pub struct DateSearchEntry {
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<DateTime<FixedOffset>>,
    #[serde(rename = "lastDownloaded")]
    pub last_downloaded: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// One result of a creation search.
#[derive(Debug, Clone, Deserialize)]
pub struct CreationEntry {
    pub created: DateTime<FixedOffset>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[derive(Debug, Deserialize)]
struct PatternResults {
    #[serde(default)]
    files: Vec<String>,
}

fn join_repos(repos: &[&str]) -> String {
    repos.join(",")
}

impl ArtifactoryClient {
    /// Find artifacts not downloaded since `not_used_since`, optionally
    /// restricted to those created before `created_before`.
    pub async fn search_usage(
        &self,
        repos: &[&str],
        not_used_since: DateTime<Utc>,
        created_before: Option<DateTime<Utc>>,
    ) -> Result<BTreeMap<String, UsageEntry>> {
        let mut path = format!(
            "search/usage?notUsedSince={}&repos={}",
            time::query_millis(&not_used_since),
            join_repos(repos),
        );
        if let Some(created_before) = created_before {
            path.push_str(&format!(
                "&createdBefore={}",
                time::query_millis(&created_before)
            ));
        }
        let results: SearchResults<UsageEntry> = self.get_json(&path).await?;
        Ok(results.into_map())
    }

    /// Find artifacts whose listed date fields fall within the window.
    ///
    /// Every entry of `date_fields` must be one of `created`,
    /// `lastModified`, or `lastDownloaded`, and the list must be
    /// non-empty; violations fail with a validation error before any
    /// request is issued. `to` defaults to now.
    pub async fn search_by_dates(
        &self,
        repos: &[&str],
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
        date_fields: &[&str],
    ) -> Result<BTreeMap<String, DateSearchEntry>> {
        if date_fields.is_empty() {
            return Err(ClientError::Validation(
                "At least one date field is required".into(),
            ));
        }
        for field in date_fields {
            if !DATE_FIELDS.contains(field) {
                return Err(ClientError::Validation(format!(
                    "Unknown date field '{}'; expected one of {}",
                    field,
                    DATE_FIELDS.join(", ")
                )));
            }
        }

        let to_date = to_date.unwrap_or_else(Utc::now);
        let mut path = format!(
            "search/dates?dateFields={}&repos={}",
            date_fields.join(","),
            join_repos(repos),
        );
        if let Some(from_date) = from_date {
            path.push_str(&format!("&from={}", time::query_millis(&from_date)));
        }
        path.push_str(&format!("&to={}", time::query_millis(&to_date)));

        let results: SearchResults<DateSearchEntry> = self.get_json(&path).await?;
        Ok(results.into_map())
    }

    /// Find artifacts created within the window. `to` defaults to now.
    pub async fn search_by_creation(
        &self,
        repos: &[&str],
        from_date: Option<DateTime<Utc>>,
        to_date: Option<DateTime<Utc>>,
    ) -> Result<BTreeMap<String, CreationEntry>> {
        let to_date = to_date.unwrap_or_else(Utc::now);
        let mut path = format!("search/creation?repos={}", join_repos(repos));
        if let Some(from_date) = from_date {
            path.push_str(&format!("&from={}", time::query_millis(&from_date)));
        }
        path.push_str(&format!("&to={}", time::query_millis(&to_date)));

        let results: SearchResults<CreationEntry> = self.get_json(&path).await?;
        Ok(results.into_map())
    }

    /// Find files matching an Ant-style pattern inside one repository.
    /// Returns the server's raw file list.
    pub async fn search_by_pattern(&self, repo_key: &str, pattern: &str) -> Result<Vec<String>> {
        let value = format!("{}:{}", repo_key, pattern);
        let results: PatternResults = self
            .get_json(&format!(
                "search/pattern?pattern={}",
                urlencoding::encode(&value)
            ))
            .await?;
        Ok(results.files)
    }
}
