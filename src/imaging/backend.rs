//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four operations every rendition and
//! photo record is built from: identify, read_capture_metadata, copy and
//! render.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): the `image` crate for
//! pixels and `kamadak-exif` for capture metadata, statically linked.

use super::params::RenditionParams;
use crate::metadata::{CaptureMetadata, MetadataError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Trait for image processing backends.
///
/// Implementations must be `Sync`: the pipeline calls every operation of a
/// photo concurrently from the rayon pool, and photos of a gallery run
/// concurrently too. Each call writes only to the output path it was given.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Read capture time, exposure time and aperture from embedded EXIF.
    fn read_capture_metadata(&self, path: &Path) -> Result<CaptureMetadata, MetadataError>;

    /// Copy the source byte-for-byte.
    fn copy(&self, source: &Path, output: &Path) -> Result<(), BackendError>;

    /// Resize, optionally crop, and encode as JPEG. Returns the output dimensions.
    fn render(&self, params: &RenditionParams) -> Result<Dimensions, BackendError>;
}
