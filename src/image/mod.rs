//! Stored image records and the metadata recovered from their manifests

#[cfg(test)] mod tests;

use crate::{
    errors::ImageError,
    manifest::{Manifest, V1Compatibility},
    meta::ObjectMeta,
};
use std::collections::BTreeMap;

/// An image record as stored by the registry layer
///
/// The raw manifest is filled in when an image is first ingested. Once the
/// metadata has been extracted from it (see [image_with_metadata]), the copy
/// holding the metadata no longer carries the manifest.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub docker_image_reference: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub docker_image_manifest: String,
    #[serde(default)]
    pub docker_image_metadata: ImageMetadata,
}

/// Metadata describing how an image was built
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ImageMetadata {
    pub id: String,
    pub parent: String,
    pub comment: String,
    pub created: String,
    pub container: String,
    pub container_config: ContainerConfig,
    pub docker_version: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ContainerConfig>,
    pub architecture: String,
    pub size: i64,
}

/// The docker container configuration an image was committed from, or the
/// one it runs with
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContainerConfig {
    pub hostname: String,
    pub domainname: String,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposed_ports: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<Vec<String>>,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<BTreeMap<String, serde_json::Value>>,
    pub working_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

impl From<V1Compatibility> for ImageMetadata {
    fn from(v1: V1Compatibility) -> Self {
        ImageMetadata {
            id: v1.id,
            parent: v1.parent,
            comment: v1.comment,
            created: v1.created,
            container: v1.container,
            container_config: v1.container_config.unwrap_or_default(),
            docker_version: v1.docker_version,
            author: v1.author,
            config: v1.config,
            architecture: v1.architecture,
            size: v1.size,
        }
    }
}

impl Image {
    /// Return a copy of this image with metadata filled in from its manifest
    ///
    /// See [image_with_metadata]. This image is left as it is.
    pub fn with_metadata(&self) -> Result<Image, ImageError> {
        image_with_metadata(self.clone())
    }
}

/// Fill in an image's metadata from the raw manifest it carries
///
/// The image is taken by value and returned with its metadata replaced by the
/// compatibility record of the manifest's most recent history entry, and its
/// raw manifest cleared. An image with no manifest, or with a manifest that
/// has no history, comes back unchanged.
pub fn image_with_metadata(mut image: Image) -> Result<Image, ImageError> {
    if image.docker_image_manifest.is_empty() {
        return Ok(image);
    }
    log::debug!("raw json manifest, {}", image.docker_image_manifest);

    let manifest: Manifest = serde_json::from_str(&image.docker_image_manifest)?;
    let v1 = match manifest.latest_compatibility()? {
        Some(v1) => v1,
        None => {
            log::warn!(
                "manifest for image {:?} has no history, metadata left unset",
                image.metadata.name
            );
            return Ok(image);
        }
    };

    image.docker_image_metadata = v1.into();
    image.docker_image_manifest = String::new();
    log::debug!(
        "image {:?} metadata, id {:?}, parent {:?}",
        image.metadata.name,
        image.docker_image_metadata.id,
        image.docker_image_metadata.parent
    );
    Ok(image)
}
