//! Per-photo unit of work.
//!
//! A [`PhotoJob`] is turned into a [`PhotoRecord`] by six independent
//! operations that run concurrently on the rayon pool:
//!
//! ```text
//!            ┌─ identify ──────────────┐
//!            ├─ read capture metadata ─┤
//! PhotoJob ──┼─ original (copy) ───────┼──▶ PhotoRecord
//!            ├─ large   (fit 900) ─────┤
//!            ├─ medium  (fit 500) ─────┤
//!            └─ small   (cover+crop) ──┘
//! ```
//!
//! All six are joined before the record is built. If any of them fails the
//! photo yields a [`PhotoError`] instead, and whatever renditions were written
//! for it are removed again, so a failed photo leaves nothing in the output
//! tree. Each job writes only to its own four rendition paths; jobs for
//! different photos never touch the same file.

use crate::imaging::{BackendError, Dimensions, ImageBackend};
use crate::metadata::{self, MetadataError};
use crate::rendition::{self, Rendition};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("cannot probe source: {0}")]
    Probe(#[source] BackendError),
    #[error("cannot read capture metadata: {0}")]
    Metadata(#[from] MetadataError),
    #[error("cannot derive {rendition} rendition: {source}")]
    Transform {
        rendition: Rendition,
        source: BackendError,
    },
    #[error("cannot write photo page {path}: {source}")]
    Page {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One photo to process.
#[derive(Debug, Clone)]
pub struct PhotoJob {
    /// Absolute path of the source JPEG.
    pub source: PathBuf,
    pub gallery: String,
    /// Zero-based declared position within the gallery.
    pub index: usize,
    pub title: String,
}

/// Everything a photo page needs, produced once all operations succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRecord {
    pub gallery_name: String,
    pub index: usize,
    pub title: String,
    /// Width of the large rendition (not the source).
    pub width: u32,
    /// Height of the large rendition (not the source).
    pub height: u32,
    /// e.g. `June 15, 2020`.
    pub taken_at: String,
    /// e.g. `1/250`.
    pub shutter_speed: String,
    /// Raw f-number, e.g. `2.8`.
    pub f_number: f64,
}

/// Run every operation for one photo and build its record.
///
/// The gallery's rendition directories must already exist under `target`.
pub fn run(
    backend: &impl ImageBackend,
    job: &PhotoJob,
    target: &Path,
) -> Result<PhotoRecord, PhotoError> {
    let result = run_operations(backend, job, target);
    if result.is_err() {
        discard_renditions(job, target);
    }
    result
}

fn run_operations(
    backend: &impl ImageBackend,
    job: &PhotoJob,
    target: &Path,
) -> Result<PhotoRecord, PhotoError> {
    let derive = |kind: Rendition| -> Result<Option<Dimensions>, PhotoError> {
        let output = kind.file_path(target, &job.gallery, job.index);
        rendition::derive(backend, kind, &job.source, &output)
            .map_err(|source| PhotoError::Transform {
                rendition: kind,
                source,
            })
    };

    let ((probe, capture), ((original, large), (medium, small))) = rayon::join(
        || {
            rayon::join(
                || backend.identify(&job.source),
                || backend.read_capture_metadata(&job.source),
            )
        },
        || {
            rayon::join(
                || rayon::join(|| derive(Rendition::Original), || derive(Rendition::Large)),
                || rayon::join(|| derive(Rendition::Medium), || derive(Rendition::Small)),
            )
        },
    );

    let source_dims = probe.map_err(PhotoError::Probe)?;
    let capture = capture?;
    original?;
    let large = large?.ok_or_else(|| PhotoError::Transform {
        rendition: Rendition::Large,
        source: BackendError::ProcessingFailed("no output dimensions reported".into()),
    })?;
    medium?;
    small?;

    tracing::debug!(
        gallery = %job.gallery,
        index = job.index,
        source_width = source_dims.width,
        source_height = source_dims.height,
        large_width = large.width,
        large_height = large.height,
        "renditions derived"
    );

    Ok(PhotoRecord {
        gallery_name: job.gallery.clone(),
        index: job.index,
        title: job.title.clone(),
        width: large.width,
        height: large.height,
        taken_at: metadata::format_shot_date(&capture.taken_at)?,
        shutter_speed: metadata::format_shutter_speed(capture.exposure_time),
        f_number: capture.f_number,
    })
}

/// Remove whatever renditions a failed job managed to write.
pub(crate) fn discard_renditions(job: &PhotoJob, target: &Path) {
    for kind in Rendition::ALL {
        let path = kind.file_path(target, &job.gallery, job.index);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "cannot remove partial rendition"),
        }
    }
}
