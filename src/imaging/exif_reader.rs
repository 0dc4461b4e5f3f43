//! EXIF capture-field extraction via `kamadak-exif`.
//!
//! Reads the three fields the photo caption needs from the primary image:
//! - `DateTimeOriginal` (ASCII)
//! - `ExposureTime` (RATIONAL, seconds)
//! - `FNumber` (RATIONAL)
//!
//! None of them is optional: a photo whose file carries no EXIF block, or
//! misses one of these fields, fails extraction.

use crate::metadata::{CaptureMetadata, MetadataError};
use ::exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read capture metadata from a JPEG (or any container `kamadak-exif` knows).
pub fn read_capture_metadata(path: &Path) -> Result<CaptureMetadata, MetadataError> {
    let file = File::open(path)
        .map_err(|e| MetadataError::NoExif(format!("{}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| MetadataError::NoExif(format!("{}: {}", path.display(), e)))?;

    capture_metadata_from(&exif)
}

/// Pull the caption fields out of an already-parsed EXIF block.
pub fn capture_metadata_from(exif: &Exif) -> Result<CaptureMetadata, MetadataError> {
    let taken_at = ascii_field(exif, Tag::DateTimeOriginal, "DateTimeOriginal")?;

    let exposure_time = rational_field(exif, Tag::ExposureTime, "ExposureTime")?;
    if !exposure_time.is_finite() || exposure_time <= 0.0 {
        return Err(MetadataError::InvalidValue {
            field: "ExposureTime",
            value: exposure_time.to_string(),
        });
    }

    let f_number = rational_field(exif, Tag::FNumber, "FNumber")?;
    if !f_number.is_finite() {
        return Err(MetadataError::InvalidValue {
            field: "FNumber",
            value: f_number.to_string(),
        });
    }

    Ok(CaptureMetadata {
        taken_at,
        exposure_time,
        f_number,
    })
}

fn ascii_field(exif: &Exif, tag: Tag, name: &'static str) -> Result<String, MetadataError> {
    let field = exif
        .get_field(tag, In::PRIMARY)
        .ok_or(MetadataError::MissingField(name))?;

    match &field.value {
        Value::Ascii(parts) if !parts.is_empty() => {
            Ok(String::from_utf8_lossy(&parts[0]).into_owned())
        }
        other => Err(MetadataError::InvalidValue {
            field: name,
            value: format!("{:?}", other),
        }),
    }
}

fn rational_field(exif: &Exif, tag: Tag, name: &'static str) -> Result<f64, MetadataError> {
    let field = exif
        .get_field(tag, In::PRIMARY)
        .ok_or(MetadataError::MissingField(name))?;

    match &field.value {
        Value::Rational(values) if !values.is_empty() => Ok(values[0].to_f64()),
        other => Err(MetadataError::InvalidValue {
            field: name,
            value: format!("{:?}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{SampleExif, create_test_jpeg, create_test_jpeg_with_exif};

    #[test]
    fn reads_all_three_fields() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        create_test_jpeg_with_exif(&path, 64, 48, &SampleExif::default());

        let meta = read_capture_metadata(&path).unwrap();
        assert_eq!(meta.taken_at, "2020:06:15 14:30:00");
        assert!((meta.exposure_time - 0.004).abs() < 1e-9);
        assert!((meta.f_number - 2.8).abs() < 1e-9);
    }

    #[test]
    fn jpeg_without_exif_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("bare.jpg");
        create_test_jpeg(&path, 32, 32);

        assert!(matches!(
            read_capture_metadata(&path),
            Err(MetadataError::NoExif(_))
        ));
    }

    #[test]
    fn nonexistent_file_fails() {
        assert!(matches!(
            read_capture_metadata(Path::new("/nonexistent/photo.jpg")),
            Err(MetadataError::NoExif(_))
        ));
    }

    #[test]
    fn missing_aperture_is_reported_by_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        let sample = SampleExif {
            f_number: None,
            ..SampleExif::default()
        };
        create_test_jpeg_with_exif(&path, 32, 32, &sample);

        assert!(matches!(
            read_capture_metadata(&path),
            Err(MetadataError::MissingField("FNumber"))
        ));
    }

    #[test]
    fn zero_exposure_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        let sample = SampleExif {
            exposure_time: Some((0, 1)),
            ..SampleExif::default()
        };
        create_test_jpeg_with_exif(&path, 32, 32, &sample);

        assert!(matches!(
            read_capture_metadata(&path),
            Err(MetadataError::InvalidValue {
                field: "ExposureTime",
                ..
            })
        ));
    }
}
