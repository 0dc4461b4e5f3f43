//! # Photo Folio
//!
//! A static site generator for photo galleries. A JSON config declares the
//! galleries, their photos and captions, and which galleries are published;
//! every build regenerates the whole site from it.
//!
//! # Architecture: Per-Gallery Pipeline
//!
//! ```text
//! config.json ─▶ site ─▶ gallery (in declared order) ─▶ pipeline (per photo, concurrent)
//!                  │           │                              │
//!                  │           ├─ {n}.html as each photo ends ◀┘
//!                  │           └─ index.html once all photos have an outcome
//!                  └─ index.html once every gallery has returned
//! ```
//!
//! Every photo owns four output paths (`{gallery}/{rendition}/{n}.jpg`) and one
//! page, so photos run in parallel on the rayon pool without locks. The only
//! cross-photo state, the front page cover list, is assembled by the site
//! builder from values the gallery builders return.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Whole build: stylesheet, galleries in order, front page |
//! | [`gallery`] | One gallery: directories, concurrent photo jobs, index page, cover |
//! | [`pipeline`] | One photo: probe, EXIF and four renditions joined into a [`pipeline::PhotoRecord`] |
//! | [`rendition`] | The four rendition recipes and their paths and URLs |
//! | [`render`] | Maud templates for photo, gallery and front pages |
//! | [`metadata`] | Capture metadata and its display formatting |
//! | [`imaging`] | [`imaging::ImageBackend`] trait, pure-Rust backend, EXIF reader |
//! | [`config`] | `config.json` loading and validation |
//! | [`output`] | CLI output formatting for progress events and the build report |
//!
//! # Design Decisions
//!
//! ## Failed Photos Are Excluded
//!
//! A photo whose EXIF cannot be read, or whose renditions cannot be derived,
//! gets no page and never appears on its gallery index or as a cover. The
//! failure is logged and listed in the build report; the rest of the gallery
//! is built normally.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error and every interpolated
//! caption is escaped.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling, JPEG
//! encoding) and `kamadak-exif`. No system libraries, no external processes.

pub mod config;
pub mod gallery;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod rendition;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;
