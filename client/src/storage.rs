//! File and storage operations.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::client::ArtifactoryClient;
use crate::error::Result;
use crate::time;
use crate::JsonObject;

/// Query options for [`ArtifactoryClient::list_files`].
///
/// Boolean flags are encoded as `0`/`1` query parameters on the wire;
/// `depth` is omitted from the query unless greater than zero.
#[derive(Debug, Clone)]
pub struct FileListOptions {
    /// Folder to list, relative to the repository root.
    pub folder_path: String,
    /// Recurse into subfolders.
    pub deep: bool,
    /// Recursion depth limit; `0` means no limit.
    pub depth: u32,
    /// Include folder entries in the listing.
    pub list_folders: bool,
    /// Include metadata timestamps per entry.
    pub md_timestamps: bool,
    /// Prefix entry URIs with the root path.
    pub include_root_path: bool,
}

impl Default for FileListOptions {
    fn default() -> Self {
        Self {
            folder_path: "/".to_string(),
            deep: false,
            depth: 0,
            list_folders: false,
            md_timestamps: false,
            include_root_path: false,
        }
    }
}

/// One entry of a storage listing, keyed by its URI in the returned map.
#[derive(Debug, Clone, Deserialize)]
pub struct FileListEntry {
    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<FixedOffset>,
    #[serde(default)]
    pub folder: bool,
    pub size: Option<i64>,
    pub sha1: Option<String>,
    pub sha2: Option<String>,
    #[serde(rename = "mdTimestamps")]
    pub md_timestamps: Option<Value>,
    /// Fields the server sent that this client does not reshape.
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[derive(Debug, Deserialize)]
struct FileListing {
    #[serde(default)]
    files: Vec<KeyedFileEntry>,
}

#[derive(Debug, Deserialize)]
struct KeyedFileEntry {
    uri: String,
    #[serde(flatten)]
    entry: FileListEntry,
}

/// Checksum block of a storage-info response.
#[derive(Debug, Clone, Deserialize)]
pub struct Checksums {
    pub sha1: Option<String>,
    pub md5: Option<String>,
    pub sha256: Option<String>,
}

/// Storage info for a single artifact or folder. The three server
/// timestamps are parsed; all other fields pass through unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    pub repo: Option<String>,
    pub path: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<DateTime<FixedOffset>>,
    #[serde(rename = "modifiedBy")]
    pub modified_by: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<DateTime<FixedOffset>>,
    #[serde(rename = "downloadUri")]
    pub download_uri: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub size: Option<String>,
    pub checksums: Option<Checksums>,
    #[serde(rename = "originalChecksums")]
    pub original_checksums: Option<Checksums>,
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Download statistics for one artifact.
///
/// `last_downloaded`/`remote_last_downloaded` arrive as
/// epoch-milliseconds where `0` means "never downloaded"; those zeros
/// become `None`, never an epoch-zero timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct FileStat {
    #[serde(rename = "downloadCount")]
    pub download_count: Option<i64>,
    #[serde(
        rename = "lastDownloaded",
        default,
        deserialize_with = "time::de_epoch_millis_nonzero"
    )]
    pub last_downloaded: Option<DateTime<Utc>>,
    #[serde(rename = "lastDownloadedBy")]
    pub last_downloaded_by: Option<String>,
    #[serde(rename = "remoteDownloadCount")]
    pub remote_download_count: Option<i64>,
    #[serde(
        rename = "remoteLastDownloaded",
        default,
        deserialize_with = "time::de_epoch_millis_nonzero"
    )]
    pub remote_last_downloaded: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

impl ArtifactoryClient {
    /// List files under a folder, keyed by file URI, with `lastModified`
    /// parsed to a timestamp.
    pub async fn list_files(
        &self,
        repo_key: &str,
        options: &FileListOptions,
    ) -> Result<BTreeMap<String, FileListEntry>> {
        let folder = if options.folder_path.starts_with('/') {
            options.folder_path.clone()
        } else {
            format!("/{}", options.folder_path)
        };
        let mut path = format!(
            "storage/{}{}?list&deep={}&listFolders={}&mdTimestamps={}&includeRootPath={}",
            repo_key,
            folder,
            flag(options.deep),
            flag(options.list_folders),
            flag(options.md_timestamps),
            flag(options.include_root_path),
        );
        if options.depth > 0 {
            path.push_str(&format!("&depth={}", options.depth));
        }

        let listing: FileListing = self.get_json(&path).await?;
        Ok(listing
            .files
            .into_iter()
            .map(|keyed| (keyed.uri, keyed.entry))
            .collect())
    }

    /// Fetch storage info for a single path.
    pub async fn get_file_info(&self, repo_key: &str, path: &str) -> Result<FileInfo> {
        self.get_json(&format!(
            "storage/{}/{}",
            repo_key,
            path.trim_start_matches('/')
        ))
        .await
    }

    /// Fetch download statistics for a single artifact.
    pub async fn get_file_stat(&self, repo_key: &str, path: &str) -> Result<FileStat> {
        let mut stat: FileStat = self
            .get_json(&format!(
                "storage/{}/{}?stats",
                repo_key,
                path.trim_start_matches('/')
            ))
            .await?;
        // Redundant with the request path.
        stat.extra.remove("uri");
        Ok(stat)
    }

    /// Delete the artifact at the given repository-relative path. Only an
    /// empty-success status (204) counts as success.
    pub async fn delete_file(&self, repo_key: &str, path: &str) -> Result<()> {
        self.delete_no_content(&format!("{}/{}", repo_key, path.trim_start_matches('/')))
            .await
    }
}
