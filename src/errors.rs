//! Error types you might see while interpreting image references and records

use thiserror::Error;

/// Errors from pull spec parsing, manifest decoding, and tag lookups
#[derive(Error, Debug)]
pub enum ImageError {
    /// invalid pull spec
    #[error("invalid pull spec {spec:?}, {reason}")]
    InvalidSpec { spec: String, reason: &'static str },

    /// manifest or compatibility record could not be decoded
    #[error("manifest decode error: {0}")]
    ManifestDecode(#[from] serde_json::Error),

    /// tag is not declared by the image repository
    #[error("image repository {namespace}/{name}: tag {tag:?} not found")]
    TagNotDeclared {
        namespace: String,
        name: String,
        tag: String,
    },

    /// tag is declared but has no recorded history
    #[error("image repository {namespace}/{name}: tag {tag:?} not found in tag history")]
    TagHistoryMissing {
        namespace: String,
        name: String,
        tag: String,
    },

    /// tag history exists but holds no events
    #[error("image repository {namespace}/{name}: tag {tag:?} has 0 history items")]
    TagHistoryEmpty {
        namespace: String,
        name: String,
        tag: String,
    },
}
