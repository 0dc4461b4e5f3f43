//! Whole-site build.
//!
//! Copies the stylesheet, builds each gallery in declared order, and writes the
//! front page once every gallery has returned. Galleries hand their cover back
//! to this function; nothing shared is mutated while photos are in flight.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── index.html                 # Front page (published galleries)
//! ├── site.css
//! └── iceland/
//!     ├── index.html             # Gallery page
//!     ├── 0.html                 # Photo pages
//!     ├── 1.html
//!     ├── original/0.jpg         # Verbatim copy
//!     ├── large/0.jpg            # ≤ 900×900
//!     ├── medium/0.jpg           # ≤ 500×500
//!     └── small/0.jpg            # 150×150
//! ```

use crate::config::Config;
use crate::gallery::{self, BuildContext, BuildEvent, GalleryReport};
use crate::imaging::ImageBackend;
use crate::render::{self, CoverEntry};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Stylesheet used when the resources directory has none.
const DEFAULT_CSS: &str = include_str!("../static/site.css");

const STYLESHEET_FILENAME: &str = "site.css";
const IMAGES_DIR: &str = "images";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where `site.css` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stylesheet {
    Copied,
    Default,
}

/// Outcome of a full build.
#[derive(Debug)]
pub struct SiteReport {
    /// Per-gallery results, in declared order.
    pub galleries: Vec<GalleryReport>,
    /// Front page entries, in declared order.
    pub covers: Vec<CoverEntry>,
    pub stylesheet: Stylesheet,
}

impl SiteReport {
    pub fn photos_written(&self) -> usize {
        self.galleries.iter().map(|g| g.photos.len()).sum()
    }

    pub fn photos_failed(&self) -> usize {
        self.galleries.iter().map(|g| g.failures.len()).sum()
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError {
    move |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Directory that config `filename`s are relative to.
pub fn images_root(resources: &Path) -> PathBuf {
    resources.join(IMAGES_DIR)
}

/// Copy `resources/site.css`, or write the built-in stylesheet if there is none.
fn install_stylesheet(resources: &Path, target: &Path) -> Result<Stylesheet, BuildError> {
    let source = resources.join(STYLESHEET_FILENAME);
    let output = target.join(STYLESHEET_FILENAME);
    if source.is_file() {
        fs::copy(&source, &output).map_err(io_error(&output))?;
        Ok(Stylesheet::Copied)
    } else {
        tracing::info!(path = %source.display(), "no stylesheet in resources, using the built-in one");
        fs::write(&output, DEFAULT_CSS).map_err(io_error(&output))?;
        Ok(Stylesheet::Default)
    }
}

/// Build the whole site from a loaded config.
///
/// Source photos are read from `resources/images/`, the stylesheet from
/// `resources/site.css`. Everything is written under `target`.
pub fn build_site(
    config: &Config,
    resources: &Path,
    target: &Path,
    backend: &impl ImageBackend,
    events: Option<Sender<BuildEvent>>,
) -> Result<SiteReport, BuildError> {
    fs::create_dir_all(target).map_err(io_error(target))?;
    let stylesheet = install_stylesheet(resources, target)?;

    let images_root = images_root(resources);
    let ctx = BuildContext {
        images_root: &images_root,
        target,
        site: &config.site,
        tracking_id: config.tracking_id(),
    };

    let mut galleries = Vec::with_capacity(config.galleries.len());
    for g in &config.galleries {
        galleries.push(gallery::build_gallery(backend, g, &ctx, events.as_ref())?);
    }

    // All galleries are done; the cover list is final.
    let covers: Vec<CoverEntry> = galleries.iter().filter_map(|g| g.cover.clone()).collect();
    let front_page = target.join("index.html");
    fs::write(
        &front_page,
        render::render_front_page(&config.site, &covers).into_string(),
    )
    .map_err(io_error(&front_page))?;
    tracing::info!(covers = covers.len(), "front page written");

    Ok(SiteReport {
        galleries,
        covers,
        stylesheet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{read_output, write_resources};
    use tempfile::TempDir;

    const TWO_GALLERIES: &str = r#"{
        "galleries": {
            "zebra": {
                "title": "Zebra",
                "publish": true,
                "images": [
                    { "filename": "a.jpg", "title": "A" },
                    { "filename": "b.jpg", "title": "B" },
                    { "filename": "c.jpg", "title": "C" }
                ]
            },
            "drafts": {
                "title": "Drafts",
                "publish": false,
                "images": [ { "filename": "d.jpg", "title": "D" } ]
            },
            "alpha": {
                "title": "Alpha",
                "publish": true,
                "images": [ { "filename": "e.jpg", "title": "E" } ]
            }
        },
        "tracking": { "googleAnalyticsTrackingId": "UA-99" },
        "site": { "title": "Test Site", "contact": "me@example.com" }
    }"#;

    fn setup() -> (TempDir, TempDir, Config) {
        let resources = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let config = Config::from_json(TWO_GALLERIES).unwrap();
        (resources, target, config)
    }

    #[test]
    fn front_page_lists_published_galleries_in_declared_order() {
        let (resources, target, config) = setup();
        let backend = MockBackend::new();

        let report = build_site(&config, resources.path(), target.path(), &backend, None).unwrap();

        let front = read_output(&target.path().join("index.html"));
        let zebra = front.find("/zebra/medium/2.jpg").unwrap();
        let alpha = front.find("/alpha/medium/0.jpg").unwrap();
        assert!(zebra < alpha);
        assert!(!front.contains("/drafts/"));
        assert_eq!(report.covers.len(), 2);
    }

    #[test]
    fn front_page_has_no_analytics() {
        let (resources, target, config) = setup();
        let backend = MockBackend::new();

        build_site(&config, resources.path(), target.path(), &backend, None).unwrap();

        let front = read_output(&target.path().join("index.html"));
        assert!(!front.contains("UA-99"));
        assert!(read_output(&target.path().join("zebra/0.html")).contains("UA-99"));
    }

    #[test]
    fn every_gallery_gets_an_index_page() {
        let (resources, target, config) = setup();
        let backend = MockBackend::new();

        let report = build_site(&config, resources.path(), target.path(), &backend, None).unwrap();

        for name in ["zebra", "drafts", "alpha"] {
            assert!(target.path().join(name).join("index.html").exists());
        }
        assert_eq!(report.photos_written(), 5);
        assert_eq!(report.photos_failed(), 0);
    }

    #[test]
    fn copies_stylesheet_from_resources() {
        let (resources, target, config) = setup();
        fs::write(resources.path().join("site.css"), "body { color: red; }").unwrap();
        let backend = MockBackend::new();

        let report = build_site(&config, resources.path(), target.path(), &backend, None).unwrap();

        assert_eq!(report.stylesheet, Stylesheet::Copied);
        assert_eq!(
            read_output(&target.path().join("site.css")),
            "body { color: red; }"
        );
    }

    #[test]
    fn falls_back_to_built_in_stylesheet() {
        let (resources, target, config) = setup();
        let backend = MockBackend::new();

        let report = build_site(&config, resources.path(), target.path(), &backend, None).unwrap();

        assert_eq!(report.stylesheet, Stylesheet::Default);
        assert_eq!(read_output(&target.path().join("site.css")), DEFAULT_CSS);
    }

    #[test]
    fn photos_resolve_under_resources_images() {
        let (resources, target, config) = setup();
        let backend = MockBackend::new();

        build_site(&config, resources.path(), target.path(), &backend, None).unwrap();

        let expected = resources.path().join("images").join("a.jpg");
        assert!(backend.get_operations().iter().any(|op| matches!(
            op,
            crate::imaging::backend::tests::RecordedOp::Identify(p)
                if Path::new(p) == expected
        )));
    }

    #[test]
    fn creates_missing_target() {
        let (resources, target, config) = setup();
        let nested = target.path().join("deep/public");
        let backend = MockBackend::new();

        build_site(&config, resources.path(), &nested, &backend, None).unwrap();

        assert!(nested.join("index.html").exists());
    }

    #[test]
    fn failed_cover_photo_falls_back_on_front_page() {
        let (resources, target, config) = setup();
        let backend = MockBackend::new().failing_metadata_for("c.jpg");

        let report = build_site(&config, resources.path(), target.path(), &backend, None).unwrap();

        let front = read_output(&target.path().join("index.html"));
        assert!(front.contains("/zebra/medium/1.jpg"));
        assert!(!front.contains("/zebra/medium/2.jpg"));
        assert_eq!(report.photos_failed(), 1);
    }

    #[test]
    fn gallery_directory_failure_stops_the_build() {
        let (resources, target, config) = setup();
        fs::write(target.path().join("drafts"), b"file in the way").unwrap();
        let backend = MockBackend::new();

        let result = build_site(&config, resources.path(), target.path(), &backend, None);

        assert!(matches!(result, Err(BuildError::Io { .. })));
        assert!(!target.path().join("index.html").exists());
        assert!(!target.path().join("alpha").exists());
    }

    #[test]
    fn real_backend_builds_from_resources_dir() {
        let resources = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        write_resources(
            resources.path(),
            r#"{"galleries": {"g": {"title": "G", "publish": true, "images": [
                {"filename": "a.jpg", "title": "A"},
                {"filename": "b.jpg", "title": "B"}
            ]}}}"#,
            &["a.jpg", "b.jpg"],
        );
        let config = crate::config::load_config(resources.path()).unwrap();

        let report = build_site(
            &config,
            resources.path(),
            target.path(),
            &crate::imaging::RustBackend::new(),
            None,
        )
        .unwrap();

        assert_eq!(report.photos_written(), 2);
        let page = read_output(&target.path().join("g/1.html"));
        assert!(page.contains(r#"width="900" height="600""#));
        assert!(page.contains("June 15, 2020, 1/250 at f/2.8"));
        assert!(read_output(&target.path().join("index.html")).contains("/g/medium/1.jpg"));
    }

    #[test]
    fn events_flow_to_receiver() {
        let (resources, target, config) = setup();
        let backend = MockBackend::new();
        let (tx, rx) = std::sync::mpsc::channel();

        build_site(&config, resources.path(), target.path(), &backend, Some(tx)).unwrap();

        let started: Vec<String> = rx
            .into_iter()
            .filter_map(|e| match e {
                BuildEvent::GalleryStarted { name, .. } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(started, vec!["zebra", "drafts", "alpha"]);
    }
}
