//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only, no full decode) |
//! | Decode (JPEG) | `image::ImageReader` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Crop | `DynamicImage::crop_imm` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |
//! | Capture metadata | `kamadak-exif` via [`exif_reader`](super::exif_reader) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::plan_resize;
use super::params::RenditionParams;
use crate::metadata::{CaptureMetadata, MetadataError};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode and save as baseline JPEG.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100) as u8);

    // JPEG has no alpha channel
    let result = if img.color().has_alpha() {
        DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)
    } else {
        img.write_with_encoder(encoder)
    };
    result.map_err(|e| {
        BackendError::ProcessingFailed(format!("JPEG encode failed for {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn read_capture_metadata(&self, path: &Path) -> Result<CaptureMetadata, MetadataError> {
        super::exif_reader::read_capture_metadata(path)
    }

    fn copy(&self, source: &Path, output: &Path) -> Result<(), BackendError> {
        std::fs::copy(source, output)?;
        Ok(())
    }

    fn render(&self, params: &RenditionParams) -> Result<Dimensions, BackendError> {
        let img = load_image(&params.source)?;
        let plan = plan_resize(img.dimensions(), params.resize, params.crop);
        let (width, height) = plan.size;

        let kept = if plan.region == img.dimensions() {
            img
        } else {
            img.crop_imm(0, 0, plan.region.0, plan.region.1)
        };
        let resized = if plan.size == kept.dimensions() {
            kept
        } else {
            kept.resize_exact(width, height, FilterType::Lanczos3)
        };

        let final_img = match params.crop {
            Some(crop) => {
                let w = crop.width.min(width.saturating_sub(crop.x));
                let h = crop.height.min(height.saturating_sub(crop.y));
                resized.crop_imm(crop.x, crop.y, w, h)
            }
            None => resized,
        };

        save_jpeg(&final_img, &params.output, params.quality.value())?;
        Ok(final_img.dimensions().into())
    }
}
