//! Integration tests for the API surface, against a mocked server.

use artifactory_client::{ArtifactoryClient, FileListOptions};
use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ArtifactoryClient {
    ArtifactoryClient::builder(server.uri())
        .api_key("AKCp8kr3V2x")
        .build()
        .unwrap()
}

#[tokio::test]
async fn list_repositories_keys_by_repository_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/repositories"))
        .and(query_param("type", "local"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([
                {"key": "libs-release", "type": "LOCAL"}
            ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let repos = client_for(&server)
        .list_repositories(Some("local"), false)
        .await
        .unwrap();

    assert_eq!(repos.len(), 1);
    let entry = &repos["libs-release"];
    assert_eq!(entry.get("type").and_then(|v| v.as_str()), Some("LOCAL"));
    assert!(!entry.contains_key("key"));
}

#[tokio::test]
async fn list_repositories_recurse_fetches_each_repository() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"key": "libs-release", "type": "LOCAL"},
            {"key": "libs-snapshot", "type": "LOCAL"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/repositories/libs-release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"key": "libs-release", "rclass": "local", "packageType": "maven"}
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/repositories/libs-snapshot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"key": "libs-snapshot", "rclass": "local", "packageType": "maven"}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let repos = client_for(&server)
        .list_repositories(None, true)
        .await
        .unwrap();

    assert_eq!(repos.len(), 2);
    let release = &repos["libs-release"];
    assert_eq!(release.get("rclass").and_then(|v| v.as_str()), Some("local"));
    assert!(!release.contains_key("key"));
}

#[tokio::test]
async fn get_repository_strips_the_key_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/repositories/libs-release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"key": "libs-release", "rclass": "local", "description": "Releases"}
        )))
        .mount(&server)
        .await;

    let repo = client_for(&server)
        .get_repository("libs-release")
        .await
        .unwrap();

    assert!(!repo.contains_key("key"));
    assert_eq!(
        repo.get("description").and_then(|v| v.as_str()),
        Some("Releases")
    );
}

#[tokio::test]
async fn docker_catalog_returns_plain_name_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/docker/docker-local/v2/_catalog"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"repositories": ["alpine", "nginx"]})),
        )
        .mount(&server)
        .await;

    let images = client_for(&server)
        .list_docker_images("docker-local")
        .await
        .unwrap();
    assert_eq!(images, vec!["alpine", "nginx"]);
}

#[tokio::test]
async fn docker_recursive_listing_maps_images_to_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/docker/docker-local/v2/_catalog"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"repositories": ["alpine"]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/docker/docker-local/v2/alpine/tags/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "alpine", "tags": ["3.19", "latest"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let images = client_for(&server)
        .list_docker_images_with_tags("docker-local")
        .await
        .unwrap();
    assert_eq!(images["alpine"], vec!["3.19", "latest"]);
}

#[tokio::test]
async fn docker_manifest_is_returned_verbatim() {
    let server = MockServer::start().await;
    let manifest = json!({
        "schemaVersion": 2,
        "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
        "layers": [{"digest": "sha256:abc"}]
    });
    Mock::given(method("GET"))
        .and(path("/api/docker/docker-local/v2/alpine/manifests/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest.clone()))
        .mount(&server)
        .await;

    let fetched = client_for(&server)
        .get_docker_manifest("docker-local", "alpine", "latest")
        .await
        .unwrap();
    assert_eq!(fetched, manifest);
}

#[tokio::test]
async fn list_files_encodes_flags_and_parses_last_modified() {
    let server = MockServer::start().await;
    let original = "2024-03-01T10:15:30.000+02:00";
    Mock::given(method("GET"))
        .and(path("/api/storage/libs-release/org"))
        .and(query_param("list", ""))
        .and(query_param("deep", "1"))
        .and(query_param("listFolders", "0"))
        .and(query_param("mdTimestamps", "0"))
        .and(query_param("includeRootPath", "0"))
        .and(query_param("depth", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uri": "https://example.com/api/storage/libs-release/org",
            "files": [
                {
                    "uri": "/acme/acme-1.0.jar",
                    "size": 52188,
                    "lastModified": original,
                    "folder": false
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = FileListOptions {
        folder_path: "/org".into(),
        deep: true,
        depth: 3,
        ..Default::default()
    };
    let files = client_for(&server)
        .list_files("libs-release", &options)
        .await
        .unwrap();

    let entry = &files["/acme/acme-1.0.jar"];
    assert_eq!(
        entry
            .last_modified
            .to_rfc3339_opts(SecondsFormat::Millis, false),
        original
    );
    assert_eq!(entry.size, Some(52188));
}

#[tokio::test]
async fn get_file_info_parses_timestamps_and_keeps_the_rest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/storage/libs-release/org/acme/acme-1.0.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repo": "libs-release",
            "path": "/org/acme/acme-1.0.jar",
            "created": "2024-01-01T00:00:00.000+00:00",
            "lastModified": "2024-01-02T00:00:00.000+00:00",
            "lastUpdated": "2024-01-03T00:00:00.000+00:00",
            "mimeType": "application/java-archive",
            "customField": "custom-value"
        })))
        .mount(&server)
        .await;

    let info = client_for(&server)
        .get_file_info("libs-release", "org/acme/acme-1.0.jar")
        .await
        .unwrap();

    assert!(info.created.is_some());
    assert!(info.last_modified.is_some());
    assert!(info.last_updated.is_some());
    assert_eq!(info.mime_type.as_deref(), Some("application/java-archive"));
    assert_eq!(
        info.extra.get("customField").and_then(|v| v.as_str()),
        Some("custom-value")
    );
}

#[tokio::test]
async fn get_file_stat_omits_zero_download_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/storage/libs-release/org/acme/acme-1.0.jar"))
        .and(query_param("stats", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uri": "https://example.com/libs-release/org/acme/acme-1.0.jar",
            "downloadCount": 0,
            "lastDownloaded": 0,
            "lastDownloadedBy": null
        })))
        .mount(&server)
        .await;

    let stat = client_for(&server)
        .get_file_stat("libs-release", "org/acme/acme-1.0.jar")
        .await
        .unwrap();

    assert!(stat.last_downloaded.is_none());
    assert!(!stat.extra.contains_key("uri"));
}

#[tokio::test]
async fn get_file_stat_converts_nonzero_epoch_millis() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/storage/libs-release/a.jar"))
        .and(query_param("stats", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "downloadCount": 7,
            "lastDownloaded": 1700000000000i64
        })))
        .mount(&server)
        .await;

    let stat = client_for(&server)
        .get_file_stat("libs-release", "a.jar")
        .await
        .unwrap();

    let expected = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();
    assert_eq!(stat.last_downloaded, Some(expected));
    assert_eq!(stat.download_count, Some(7));
}

#[tokio::test]
async fn search_usage_sends_epoch_millis_and_joined_repos() {
    let server = MockServer::start().await;
    // 2024-01-01T00:00:00Z
    let not_used_since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Mock::given(method("GET"))
        .and(path("/api/search/usage"))
        .and(query_param("notUsedSince", "1704067200000"))
        .and(query_param("repos", "libs-release,libs-snapshot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "uri": "https://example.com/api/storage/libs-release/a.jar",
                    "lastDownloaded": "2023-06-01T00:00:00.000+00:00"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_usage(&["libs-release", "libs-snapshot"], not_used_since, None)
        .await
        .unwrap();

    let entry = &results["https://example.com/api/storage/libs-release/a.jar"];
    assert!(entry.last_downloaded.is_some());
    assert!(entry.remote_last_downloaded.is_none());
}

#[tokio::test]
async fn search_by_dates_sends_comma_joined_fields() {
    let server = MockServer::start().await;
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    Mock::given(method("GET"))
        .and(path("/api/search/dates"))
        .and(query_param("dateFields", "created,lastModified"))
        .and(query_param("from", "1704067200000"))
        .and(query_param("to", "1706745600000"))
        .and(query_param("repos", "libs-release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "uri": "https://example.com/api/storage/libs-release/a.jar",
                    "created": "2024-01-15T00:00:00.000+00:00"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_by_dates(
            &["libs-release"],
            Some(from),
            Some(to),
            &["created", "lastModified"],
        )
        .await
        .unwrap();

    assert!(results["https://example.com/api/storage/libs-release/a.jar"]
        .created
        .is_some());
}

#[tokio::test]
async fn search_by_creation_parses_created() {
    let server = MockServer::start().await;
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    Mock::given(method("GET"))
        .and(path("/api/search/creation"))
        .and(query_param("repos", "libs-release"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "uri": "https://example.com/api/storage/libs-release/a.jar",
                    "created": "2024-01-15T00:00:00.000+00:00"
                }
            ]
        })))
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_by_creation(&["libs-release"], Some(from), Some(to))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn search_by_pattern_returns_raw_file_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search/pattern"))
        .and(query_param("pattern", "libs-release:*.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "repoUri": "https://example.com/api/repositories/libs-release",
            "sourcePattern": "libs-release:*.jar",
            "files": ["org/acme/acme-1.0.jar", "org/acme/acme-1.1.jar"]
        })))
        .mount(&server)
        .await;

    let files = client_for(&server)
        .search_by_pattern("libs-release", "*.jar")
        .await
        .unwrap();
    assert_eq!(files.len(), 2);
}

#[tokio::test]
async fn ping_tolerates_a_plain_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    assert!(client_for(&server).ping().await.unwrap());
}

#[tokio::test]
async fn get_version_deserializes_the_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system/version"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"version": "7.55.10", "revision": "75510900"})),
        )
        .mount(&server)
        .await;

    let version = client_for(&server).get_version().await.unwrap();
    assert_eq!(version.version, "7.55.10");
}
