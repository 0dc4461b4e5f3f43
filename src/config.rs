//! Site configuration module.
//!
//! Handles loading and validating `config.json` from the resources directory.
//! The config is read exactly once per build, before any output is written; a
//! config error aborts the build with an empty target directory.
//!
//! ## Config File Location
//!
//! ```text
//! resources/
//! ├── config.json              # This file
//! ├── site.css                 # Copied to the output root
//! └── images/                  # Source photos, referenced by `filename`
//!     ├── DSC_0001.jpg
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```json
//! {
//!   "galleries": {
//!     "iceland": {
//!       "title": "Iceland",
//!       "publish": true,
//!       "images": [
//!         { "filename": "DSC_0001.jpg", "title": "Skógafoss" }
//!       ]
//!     }
//!   },
//!   "tracking": { "googleAnalyticsTrackingId": "UA-000000-1" },
//!   "site": { "title": "Photographs", "contact": "me@example.com" },
//!   "processing": { "maxProcesses": 4 }
//! }
//! ```
//!
//! Galleries are built, and listed on the front page, in the order their keys
//! appear in the file. The gallery key is also its output directory name.
//! `tracking`, `site` and `processing` are optional. Unknown keys are rejected
//! to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file within the resources directory.
pub const CONFIG_FILENAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Galleries in declaration order.
    #[serde(with = "gallery_map")]
    pub galleries: Vec<Gallery>,
    /// Analytics settings.
    #[serde(default)]
    pub tracking: TrackingConfig,
    /// Site heading and footer.
    #[serde(default)]
    pub site: SiteInfo,
    /// Parallel processing settings.
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// One gallery: a titled, ordered collection of photos.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Gallery {
    /// Key in the `galleries` object; doubles as the output directory name.
    #[serde(skip)]
    pub name: String,
    pub title: String,
    /// Whether the gallery gets a cover on the front page.
    #[serde(default)]
    pub publish: bool,
    pub images: Vec<ImageSpec>,
}

/// A source photo and its caption title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSpec {
    /// Path relative to the source images root.
    pub filename: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TrackingConfig {
    pub google_analytics_tracking_id: Option<String>,
}

/// Site-wide heading and contact footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Shown as the front page heading and in every `<title>`.
    pub title: String,
    /// E-mail address shown in the front page footer.
    pub contact: Option<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Photographs".to_string(),
            contact: None,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

impl Config {
    /// Parse and validate a config from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The analytics id, if one is configured and non-empty.
    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking
            .google_analytics_tracking_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Validate values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for gallery in &self.galleries {
            validate_gallery_name(&gallery.name)?;
            if gallery.title.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "gallery '{}' has an empty title",
                    gallery.name
                )));
            }
            if gallery.images.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "gallery '{}' has no images",
                    gallery.name
                )));
            }
            if let Some(pos) = gallery
                .images
                .iter()
                .position(|img| img.filename.trim().is_empty())
            {
                return Err(ConfigError::Validation(format!(
                    "gallery '{}' image #{} has an empty filename",
                    gallery.name, pos
                )));
            }
            if let Some(pos) = gallery
                .images
                .iter()
                .position(|img| img.title.trim().is_empty())
            {
                return Err(ConfigError::Validation(format!(
                    "gallery '{}' image #{} has an empty title",
                    gallery.name, pos
                )));
            }
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.maxProcesses must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Source files referenced by the config that do not exist under `images_root`.
    pub fn missing_sources(&self, images_root: &Path) -> Vec<PathBuf> {
        self.galleries
            .iter()
            .flat_map(|g| &g.images)
            .map(|img| images_root.join(&img.filename))
            .filter(|path| !path.is_file())
            .collect()
    }
}

/// Gallery names become directory names and URL path segments, so they are
/// limited to ASCII letters, digits, `-`, `_` and `.`.
fn validate_gallery_name(name: &str) -> Result<(), ConfigError> {
    let url_safe = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if name.is_empty() || name == "." || name == ".." || !url_safe {
        return Err(ConfigError::Validation(format!(
            "gallery name {:?} must use only ASCII letters, digits, '-', '_' or '.'",
            name
        )));
    }
    Ok(())
}

/// Load `config.json` from the resources directory and validate it.
pub fn load_config(resources: &Path) -> Result<Config, ConfigError> {
    let path = resources.join(CONFIG_FILENAME);
    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Config::from_json(&content)
}

/// Returns a sample `config.json` with every option present.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_json() -> &'static str {
    r##"{
  "galleries": {
    "landscapes": {
      "title": "Landscapes",
      "publish": true,
      "images": [
        { "filename": "dawn.jpg", "title": "Dawn" },
        { "filename": "ridge.jpg", "title": "The Ridge" }
      ]
    },
    "drafts": {
      "title": "Work in Progress",
      "publish": false,
      "images": [
        { "filename": "untitled.jpg", "title": "Untitled" }
      ]
    }
  },
  "tracking": {
    "googleAnalyticsTrackingId": null
  },
  "site": {
    "title": "Photographs",
    "contact": null
  },
  "processing": {
    "maxProcesses": null
  }
}
"##
}

/// Serde adapter keeping the `galleries` object as an ordered `Vec`.
///
/// Object keys are visited in document order, which is the order galleries
/// are built and listed in.
mod gallery_map {
    use super::Gallery;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(galleries: &[Gallery], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(galleries.len()))?;
        for gallery in galleries {
            map.serialize_entry(&gallery.name, gallery)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Gallery>, D::Error> {
        deserializer.deserialize_map(GalleriesVisitor)
    }

    struct GalleriesVisitor;

    impl<'de> Visitor<'de> for GalleriesVisitor {
        type Value = Vec<Gallery>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping gallery names to galleries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut galleries: Vec<Gallery> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, mut gallery)) = access.next_entry::<String, Gallery>()? {
                if galleries.iter().any(|g| g.name == name) {
                    return Err(de::Error::custom(format!("duplicate gallery '{}'", name)));
                }
                gallery.name = name;
                galleries.push(gallery);
            }
            Ok(galleries)
        }
    }
}
