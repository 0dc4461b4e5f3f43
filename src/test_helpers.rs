//! Shared test utilities for the photo-folio test suite.
//!
//! Synthetic JPEGs (with or without an EXIF block) and on-disk resources
//! directories that the gallery and site builders can run against.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_resources(tmp.path(), CONFIG_JSON, &["a.jpg", "b.jpg"]);
//! let html = read_output(&target.join("index.html"));
//! ```

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{ImageEncoder, RgbImage};
use std::io::Cursor;
use std::path::Path;

// =========================================================================
// Synthetic JPEGs
// =========================================================================

/// Capture fields embedded by [`create_test_jpeg_with_exif`].
///
/// `None` leaves the tag out entirely.
#[derive(Debug, Clone)]
pub struct SampleExif {
    pub taken_at: Option<String>,
    pub exposure_time: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
}

impl Default for SampleExif {
    fn default() -> Self {
        Self {
            taken_at: Some("2020:06:15 14:30:00".to_string()),
            exposure_time: Some((1, 250)),
            f_number: Some((28, 10)),
        }
    }
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// Write a gradient JPEG without any EXIF.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_jpeg(width, height)).unwrap();
}

/// Write a gradient JPEG with an APP1 EXIF segment carrying `sample`.
pub fn create_test_jpeg_with_exif(path: &Path, width: u32, height: u32, sample: &SampleExif) {
    let mut fields = Vec::new();
    if let Some(taken_at) = &sample.taken_at {
        fields.push(Field {
            tag: Tag::DateTimeOriginal,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![taken_at.as_bytes().to_vec()]),
        });
    }
    if let Some(exposure) = sample.exposure_time {
        fields.push(Field {
            tag: Tag::ExposureTime,
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![Rational::from(exposure)]),
        });
    }
    if let Some(f_number) = sample.f_number {
        fields.push(Field {
            tag: Tag::FNumber,
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![Rational::from(f_number)]),
        });
    }

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    let jpeg = encode_jpeg(width, height);
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    // SOI, then APP1 before everything else
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

// =========================================================================
// Resources directory
// =========================================================================

/// Lay out `root/config.json` and `root/images/<name>` for each image name.
///
/// Every image is an 1200×800 JPEG with the default [`SampleExif`].
pub fn write_resources(root: &Path, config_json: &str, images: &[&str]) {
    let images_dir = root.join("images");
    std::fs::create_dir_all(&images_dir).unwrap();
    std::fs::write(root.join(crate::config::CONFIG_FILENAME), config_json).unwrap();
    for name in images {
        create_test_jpeg_with_exif(&images_dir.join(name), 1200, 800, &SampleExif::default());
    }
}

/// Read a generated file as a string. Panics with the path on failure.
pub fn read_output(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}
