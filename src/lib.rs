//! Container image references, manifest metadata, and tag history
//!
//! This crate turns docker-style pull specs into their components and back,
//! fills in image metadata from the legacy compatibility history stored in a
//! raw manifest, and looks up the image currently recorded for a repository
//! tag. Everything here operates on plain values; nothing touches the network
//! or the filesystem.

#[macro_use] extern crate serde;

pub mod errors;
pub mod image;
pub mod manifest;
pub mod meta;
pub mod pullspec;
pub mod repository;

pub use crate::{
    errors::ImageError,
    image::{image_with_metadata, Image, ImageMetadata},
    pullspec::{is_pull_spec, ImageRef, PullSpec, DEFAULT_NAMESPACE},
    repository::{ImageRepository, TagEvent, TagEventList},
};
