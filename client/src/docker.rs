//! Docker registry operations.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::client::ArtifactoryClient;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    repositories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TagListResponse {
    // The registry returns `"tags": null` for an image with no tags.
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl ArtifactoryClient {
    /// List image names in a Docker repository (the registry catalog).
    pub async fn list_docker_images(&self, repo_key: &str) -> Result<Vec<String>> {
        let catalog: CatalogResponse = self
            .get_json(&format!("docker/{}/v2/_catalog", repo_key))
            .await?;
        Ok(catalog.repositories)
    }

    /// List image names together with their tags.
    ///
    /// Issues one tag-list call per image, sequentially, in the order the
    /// catalog returned the names; the first failing call aborts the
    /// whole listing.
    pub async fn list_docker_images_with_tags(
        &self,
        repo_key: &str,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let names = self.list_docker_images(repo_key).await?;
        let mut images = BTreeMap::new();
        for name in names {
            let tags = self.list_docker_tags(repo_key, &name).await?;
            images.insert(name, tags);
        }
        Ok(images)
    }

    /// List the tags of one image.
    pub async fn list_docker_tags(&self, repo_key: &str, image_name: &str) -> Result<Vec<String>> {
        let tag_list: TagListResponse = self
            .get_json(&format!("docker/{}/v2/{}/tags/list", repo_key, image_name))
            .await?;
        Ok(tag_list.tags.unwrap_or_default())
    }

    /// Fetch the manifest of one image tag, verbatim.
    pub async fn get_docker_manifest(
        &self,
        repo_key: &str,
        image_name: &str,
        image_tag: &str,
    ) -> Result<Value> {
        self.get_json(&format!(
            "docker/{}/v2/{}/manifests/{}",
            repo_key, image_name, image_tag
        ))
        .await
    }
}
