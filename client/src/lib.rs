//! Client library for the JFrog Artifactory REST API.
//!
//! Each public method maps to a single authenticated HTTP request (the
//! recursive listings issue one follow-up call per returned entry) and
//! reshapes the JSON response into a typed structure: redundant keys are
//! stripped, server timestamp strings parse to [`chrono`] types, and
//! epoch-millisecond counters become timestamps only when nonzero.
//!
//! The client holds no mutable state after construction and performs no
//! retries, caching, or pagination of its own.
//!
//! ```no_run
//! use artifactory_client::ArtifactoryClient;
//!
//! # async fn run() -> artifactory_client::Result<()> {
//! let client = ArtifactoryClient::builder("https://artifactory.example.com/artifactory")
//!     .api_key("AKCp8kr3V2x")
//!     .build()?;
//!
//! let repos = client.list_repositories(Some("local"), false).await?;
//! for (key, config) in &repos {
//!     println!("{}: {:?}", key, config.get("type"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod docker;
pub mod error;
pub mod repositories;
pub mod search;
pub mod storage;
pub mod system;
mod time;

/// Generic JSON object for metadata the client passes through unchanged.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

pub use client::ArtifactoryClient;
pub use config::{ArtifactoryClientBuilder, Credentials};
pub use error::{ClientError, Result};
pub use search::{CreationEntry, DateSearchEntry, UsageEntry};
pub use storage::{Checksums, FileInfo, FileListEntry, FileListOptions, FileStat};
pub use system::SystemVersion;
