//! Legacy image manifest data
//!
//! Only the pieces of the manifest needed to recover image metadata are
//! modeled here. The metadata lives in a JSON document that is stored as a
//! string inside each history entry, the first entry describing the image
//! itself and later ones its ancestors.

use crate::image::ContainerConfig;
use serde::{Deserialize, Deserializer};

/// Partial implementation of the image manifest v2 schema1 spec.
///
/// Reference: https://docs.docker.com/registry/spec/manifest-v2-1/
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Manifest {
    #[serde(rename = "schemaVersion", deserialize_with = "null_as_default")]
    pub schema_version: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub architecture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub history: Vec<History>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct History {
    #[serde(rename = "v1Compatibility", default, deserialize_with = "null_as_default")]
    pub v1_compatibility: String,
}

/// Image metadata as recorded in a history entry
///
/// Docker writes these keys in lowercase or snake case, while other tools
/// have used the capitalized or camel case spellings; all are accepted. A
/// record must use one spelling per key: `id` and `Id` together are rejected
/// as a duplicate. A `null` value reads as the empty default.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct V1Compatibility {
    #[serde(
        rename = "id",
        alias = "Id",
        alias = "ID",
        deserialize_with = "null_as_default"
    )]
    pub id: String,
    #[serde(alias = "Parent", deserialize_with = "null_as_default")]
    pub parent: String,
    #[serde(alias = "Comment", deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(alias = "Created", deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(alias = "Container", deserialize_with = "null_as_default")]
    pub container: String,
    #[serde(alias = "containerConfig", alias = "ContainerConfig")]
    pub container_config: Option<ContainerConfig>,
    #[serde(
        alias = "dockerVersion",
        alias = "DockerVersion",
        deserialize_with = "null_as_default"
    )]
    pub docker_version: String,
    #[serde(alias = "Author", deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(alias = "Config")]
    pub config: Option<ContainerConfig>,
    #[serde(alias = "Architecture", deserialize_with = "null_as_default")]
    pub architecture: String,
    #[serde(rename = "Size", alias = "size", deserialize_with = "null_as_default")]
    pub size: i64,
}

impl Manifest {
    /// Decode the compatibility record of the most recent history entry
    ///
    /// Returns [None] if the manifest has no history at all.
    pub fn latest_compatibility(&self) -> Result<Option<V1Compatibility>, serde_json::Error> {
        match self.history.first() {
            None => Ok(None),
            Some(history) => Ok(Some(serde_json::from_str(&history.v1_compatibility)?)),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
