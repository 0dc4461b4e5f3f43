//! The four derived images of every photo.
//!
//! | Rendition | Resize | Crop | Quality |
//! |---|---|---|---|
//! | `original` | verbatim copy | none | source |
//! | `large` | shrink-to-fit 900×900 | none | 90 |
//! | `medium` | shrink-to-fit 500×500 | none | 90 |
//! | `small` | shrink-to-cover 200×200 | 150×150 at top-left | 90 |
//!
//! None of the resizes upscale. Each rendition of photo `n` in gallery `g`
//! lives at `g/{rendition}/n.jpg`, so every photo owns four disjoint output
//! paths and renditions of different photos never collide.

use crate::imaging::{BackendError, Crop, Dimensions, ImageBackend, Quality, RenditionParams, Resize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Side of the square thumbnail shown on gallery index pages.
pub const THUMBNAIL_SIZE: u32 = 150;

const LARGE_BOUND: u32 = 900;
const MEDIUM_BOUND: u32 = 500;
const SMALL_COVER: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rendition {
    Original,
    Large,
    Medium,
    Small,
}

impl Rendition {
    pub const ALL: [Rendition; 4] = [
        Rendition::Original,
        Rendition::Large,
        Rendition::Medium,
        Rendition::Small,
    ];

    /// Directory name under the gallery, also used in URLs.
    pub fn dir_name(self) -> &'static str {
        match self {
            Rendition::Original => "original",
            Rendition::Large => "large",
            Rendition::Medium => "medium",
            Rendition::Small => "small",
        }
    }

    /// Absolute output path of photo `index` in `gallery`.
    pub fn file_path(self, target: &Path, gallery: &str, index: usize) -> PathBuf {
        target
            .join(gallery)
            .join(self.dir_name())
            .join(format!("{}.jpg", index))
    }

    /// Site-absolute URL of photo `index` in `gallery`.
    pub fn url(self, gallery: &str, index: usize) -> String {
        format!("/{}/{}/{}.jpg", gallery, self.dir_name(), index)
    }

    /// Resize/crop parameters, or `None` for the verbatim copy.
    pub fn params(self, source: &Path, output: &Path) -> Option<RenditionParams> {
        let (resize, crop) = match self {
            Rendition::Original => return None,
            Rendition::Large => (
                Resize::ShrinkToFit {
                    width: LARGE_BOUND,
                    height: LARGE_BOUND,
                },
                None,
            ),
            Rendition::Medium => (
                Resize::ShrinkToFit {
                    width: MEDIUM_BOUND,
                    height: MEDIUM_BOUND,
                },
                None,
            ),
            Rendition::Small => (
                Resize::ShrinkToCover {
                    width: SMALL_COVER,
                    height: SMALL_COVER,
                },
                Some(Crop::top_left(THUMBNAIL_SIZE, THUMBNAIL_SIZE)),
            ),
        };

        Some(RenditionParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            resize,
            crop,
            quality: Quality::default(),
        })
    }
}

impl fmt::Display for Rendition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Derive one rendition of `source` into `output`.
///
/// Returns the output dimensions for resized renditions and `None` for the
/// original, which is copied without being decoded.
pub fn derive(
    backend: &impl ImageBackend,
    kind: Rendition,
    source: &Path,
    output: &Path,
) -> Result<Option<Dimensions>, BackendError> {
    match kind.params(source, output) {
        Some(params) => backend.render(&params).map(Some),
        None => backend.copy(source, output).map(|()| None),
    }
}
