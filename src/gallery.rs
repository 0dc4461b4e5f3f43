//! Gallery build orchestration.
//!
//! Builds one gallery end to end:
//!
//! 1. Remove the numbered pages and renditions an earlier build left behind,
//!    then create `{gallery}/{original,large,medium,small}/`.
//! 2. Run one [`pipeline`](crate::pipeline) job per declared photo on the
//!    rayon pool. Each successful job writes its photo page right away.
//! 3. Once every job has an outcome, write `{gallery}/index.html` listing the
//!    photos that produced a record, in declared order.
//! 4. Return the gallery's cover (its last successful photo) when it is
//!    published.
//!
//! A photo that fails is logged, reported and left out of every page. Failing
//! to create a directory or write the index page aborts the gallery.

use crate::config::{Gallery, SiteInfo};
use crate::imaging::ImageBackend;
use crate::pipeline::{self, PhotoError, PhotoJob, PhotoRecord};
use crate::render::{self, CoverEntry};
use crate::rendition::Rendition;
use crate::site::BuildError;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Where a gallery reads from and writes to, plus site-wide page settings.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Root that `ImageSpec::filename` is relative to.
    pub images_root: &'a Path,
    /// Output root.
    pub target: &'a Path,
    pub site: &'a SiteInfo,
    pub tracking_id: Option<&'a str>,
}

/// Progress events, sent while a build runs.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    GalleryStarted {
        name: String,
        title: String,
        photo_count: usize,
    },
    PhotoWritten {
        index: usize,
        title: String,
        filename: String,
    },
    PhotoFailed {
        index: usize,
        title: String,
        filename: String,
        error: String,
    },
    GalleryFinished {
        name: String,
        written: usize,
        failed: usize,
    },
}

/// A photo that produced no record.
#[derive(Debug)]
pub struct PhotoFailure {
    pub index: usize,
    pub filename: String,
    pub error: PhotoError,
}

/// Outcome of building one gallery.
#[derive(Debug)]
pub struct GalleryReport {
    pub name: String,
    pub title: String,
    pub declared: usize,
    /// Records of the photos whose page was written, in declared order.
    pub photos: Vec<PhotoRecord>,
    pub failures: Vec<PhotoFailure>,
    pub cover: Option<CoverEntry>,
}

fn emit(events: Option<&Sender<BuildEvent>>, event: BuildEvent) {
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}

fn write_page(path: PathBuf, markup: maud::Markup) -> Result<(), (PathBuf, std::io::Error)> {
    fs::write(&path, markup.into_string()).map_err(|e| (path, e))
}

/// `{n}.html` and `{n}.jpg`: the files a photo job owns.
fn is_photo_output(path: &Path) -> bool {
    let numbered = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.parse::<usize>().is_ok());
    let owned_ext = path
        .extension()
        .is_some_and(|ext| ext == "html" || ext == "jpg");
    numbered && owned_ext && path.is_file()
}

/// Delete photo pages and renditions from a previous build of this gallery.
///
/// Photos that fail or were dropped from the config must not leave a page
/// behind. Other files in the gallery directory are left alone.
fn clear_previous_output(gallery_dir: &Path) -> Result<usize, BuildError> {
    let mut removed = 0;
    let dirs = std::iter::once(gallery_dir.to_path_buf())
        .chain(Rendition::ALL.iter().map(|kind| gallery_dir.join(kind.dir_name())));
    for dir in dirs {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => return Err(BuildError::Io { path: dir, source }),
        };
        for entry in entries {
            let path = entry
                .map_err(|source| BuildError::Io {
                    path: dir.clone(),
                    source,
                })?
                .path();
            if is_photo_output(&path) {
                fs::remove_file(&path).map_err(|source| BuildError::Io {
                    path: path.clone(),
                    source,
                })?;
                removed += 1;
            }
        }
    }
    Ok(removed)
}

/// Build every photo of `gallery`, then its index page.
pub fn build_gallery(
    backend: &impl ImageBackend,
    gallery: &Gallery,
    ctx: &BuildContext<'_>,
    events: Option<&Sender<BuildEvent>>,
) -> Result<GalleryReport, BuildError> {
    let gallery_dir = ctx.target.join(&gallery.name);
    let removed = clear_previous_output(&gallery_dir)?;
    if removed > 0 {
        tracing::debug!(gallery = %gallery.name, removed, "cleared previous output");
    }
    for kind in Rendition::ALL {
        let dir = gallery_dir.join(kind.dir_name());
        fs::create_dir_all(&dir).map_err(|source| BuildError::Io { path: dir, source })?;
    }

    let photo_count = gallery.images.len();
    tracing::info!(gallery = %gallery.name, photos = photo_count, "building gallery");
    emit(
        events,
        BuildEvent::GalleryStarted {
            name: gallery.name.clone(),
            title: gallery.title.clone(),
            photo_count,
        },
    );

    let outcomes: Vec<Result<PhotoRecord, PhotoFailure>> = gallery
        .images
        .par_iter()
        .enumerate()
        .map(|(index, spec)| {
            let job = PhotoJob {
                source: ctx.images_root.join(&spec.filename),
                gallery: gallery.name.clone(),
                index,
                title: spec.title.clone(),
            };

            let outcome = pipeline::run(backend, &job, ctx.target).and_then(|record| {
                let page = render::render_photo_page(
                    ctx.site,
                    &gallery.title,
                    &record,
                    photo_count,
                    ctx.tracking_id,
                );
                write_page(gallery_dir.join(format!("{}.html", index)), page).map_err(
                    |(path, source)| {
                        pipeline::discard_renditions(&job, ctx.target);
                        PhotoError::Page { path, source }
                    },
                )?;
                Ok(record)
            });

            match &outcome {
                Ok(_) => {
                    tracing::debug!(gallery = %gallery.name, index, "photo page written");
                    emit(
                        events,
                        BuildEvent::PhotoWritten {
                            index,
                            title: spec.title.clone(),
                            filename: spec.filename.clone(),
                        },
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        gallery = %gallery.name,
                        index,
                        filename = %spec.filename,
                        %error,
                        "photo skipped"
                    );
                    emit(
                        events,
                        BuildEvent::PhotoFailed {
                            index,
                            title: spec.title.clone(),
                            filename: spec.filename.clone(),
                            error: error.to_string(),
                        },
                    );
                }
            }

            outcome.map_err(|error| PhotoFailure {
                index,
                filename: spec.filename.clone(),
                error,
            })
        })
        .collect();

    // Every photo has an outcome from here on.
    let (photos, failures): (Vec<_>, Vec<_>) = outcomes.into_iter().partition(Result::is_ok);
    let photos: Vec<PhotoRecord> = photos.into_iter().filter_map(Result::ok).collect();
    let failures: Vec<PhotoFailure> = failures.into_iter().filter_map(Result::err).collect();

    let index_page = render::render_gallery_page(
        ctx.site,
        &gallery.name,
        &gallery.title,
        &photos,
        ctx.tracking_id,
    );
    write_page(gallery_dir.join("index.html"), index_page)
        .map_err(|(path, source)| BuildError::Io { path, source })?;

    let cover = if gallery.publish {
        let cover = photos.last().map(|record| CoverEntry {
            gallery_name: gallery.name.clone(),
            gallery_title: gallery.title.clone(),
            index: record.index,
        });
        if cover.is_none() {
            tracing::warn!(gallery = %gallery.name, "published gallery has no photos to use as cover");
        }
        cover
    } else {
        None
    };

    emit(
        events,
        BuildEvent::GalleryFinished {
            name: gallery.name.clone(),
            written: photos.len(),
            failed: failures.len(),
        },
    );

    Ok(GalleryReport {
        name: gallery.name.clone(),
        title: gallery.title.clone(),
        declared: photo_count,
        photos,
        failures,
        cover,
    })
}
