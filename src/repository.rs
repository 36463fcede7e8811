//! Image repositories and their tag history

use crate::{errors::ImageError, meta::ObjectMeta};
use std::collections::BTreeMap;

/// A named collection of images, addressed by tag
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRepository {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub docker_image_repository: String,
    /// Declared tags, each mapped to the pull spec or image it was set to
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub status: ImageRepositoryStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRepositoryStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub docker_image_repository: String,
    #[serde(default)]
    pub tags: BTreeMap<String, TagEventList>,
}

/// History of the images a tag has pointed at
///
/// Whoever appends to this list keeps it ordered newest first.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TagEventList {
    #[serde(default)]
    pub items: Vec<TagEvent>,
}

/// A tag pointing at an image, recorded at some point in time
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagEvent {
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub docker_image_reference: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub generation: i64,
}

impl ImageRepository {
    /// Returns the most recent [TagEvent] recorded for a declared tag
    ///
    /// The first history item is taken as the newest; nothing is sorted here.
    pub fn latest_tagged_image(&self, tag: &str) -> Result<&TagEvent, ImageError> {
        if !self.tags.contains_key(tag) {
            return Err(ImageError::TagNotDeclared {
                namespace: self.metadata.namespace.clone(),
                name: self.metadata.name.clone(),
                tag: tag.to_owned(),
            });
        }
        let history = match self.status.tags.get(tag) {
            Some(history) => history,
            None => {
                return Err(ImageError::TagHistoryMissing {
                    namespace: self.metadata.namespace.clone(),
                    name: self.metadata.name.clone(),
                    tag: tag.to_owned(),
                })
            }
        };
        match history.items.first() {
            Some(event) => {
                log::debug!(
                    "image repository {}/{}: tag {:?} -> {}",
                    self.metadata.namespace,
                    self.metadata.name,
                    tag,
                    event.docker_image_reference
                );
                Ok(event)
            }
            None => Err(ImageError::TagHistoryEmpty {
                namespace: self.metadata.namespace.clone(),
                name: self.metadata.name.clone(),
                tag: tag.to_owned(),
            }),
        }
    }
}
