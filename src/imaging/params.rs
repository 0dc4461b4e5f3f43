//! Parameter types for image operations.
//!
//! These structs describe *what* to derive, not *how*. They are the interface
//! between the [`rendition`](crate::rendition) recipes (which decide what each
//! rendition looks like) and the [`backend`](super::backend) (which does the
//! pixel work). Target sizes are expressed as bounds rather than exact pixel
//! dimensions: the backend resolves them against the decoded source, so a
//! rendition never has to wait for a separate probe of the source file.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (default 90).
//! - [`Resize`]: Shrink-to-fit or shrink-to-cover a bounding box, never upscaling.
//! - [`Crop`]: A fixed-size crop window, anchored at an offset of the resized image.
//! - [`RenditionParams`]: Everything the backend needs to produce one derived JPEG.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn value(self) -> u32 {
        self.0
    }
}

/// Quality 90, used for every derived rendition.
impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// How the source is scaled before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    /// Fit entirely inside `width`×`height`, preserving aspect ratio.
    /// Sources already inside the box keep their size.
    ShrinkToFit { width: u32, height: u32 },
    /// Cover `width`×`height` (both edges at least as large), preserving
    /// aspect ratio. Sources already covering the box are only shrunk.
    ShrinkToCover { width: u32, height: u32 },
}

/// Crop window applied after the resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Crop {
    /// A `width`×`height` window at the top-left corner.
    pub fn top_left(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: 0,
            y: 0,
        }
    }
}

/// Parameters for deriving one resized (and optionally cropped) JPEG.
#[derive(Debug, Clone, PartialEq)]
pub struct RenditionParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub resize: Resize,
    pub crop: Option<Crop>,
    pub quality: Quality,
}
