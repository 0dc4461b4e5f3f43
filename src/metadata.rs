//! Capture metadata and its display formatting.
//!
//! Every photo page caption is assembled from three EXIF fields read from the
//! source file:
//!
//! | Field | EXIF tag | Raw form | Displayed as |
//! |---|---|---|---|
//! | Capture time | `DateTimeOriginal` | `2020:06:15 14:30:00` | `June 15, 2020` |
//! | Exposure time | `ExposureTime` | seconds as a rational | `1/250`, `1 second`, `2.5 seconds` |
//! | Aperture | `FNumber` | f-number as a rational | `f/2.8` |
//!
//! Decoding lives in [`imaging::exif_reader`](crate::imaging::exif_reader); this module holds
//! the decoded form ([`CaptureMetadata`]) and the pure formatting functions.
//!
//! ## Dates
//!
//! EXIF timestamps carry no timezone. The displayed date uses the literal
//! year, month and day fields, so a photo taken just before midnight never
//! shifts to the next day.

use chrono::NaiveDateTime;
use thiserror::Error;

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("No readable EXIF data: {0}")]
    NoExif(String),
    #[error("EXIF field {0} is missing")]
    MissingField(&'static str),
    #[error("EXIF field {field} has an unusable value: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("Unparseable capture date: {0:?}")]
    InvalidDate(String),
}

/// Raw capture fields as decoded from EXIF.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureMetadata {
    /// `DateTimeOriginal`, e.g. `2020:06:15 14:30:00`.
    pub taken_at: String,
    /// `ExposureTime` in seconds. Always finite and positive.
    pub exposure_time: f64,
    /// `FNumber`, e.g. `2.8`.
    pub f_number: f64,
}

/// Format an EXIF timestamp as `{MonthName} {Day}, {Year}`.
///
/// ```
/// # use photo_folio::metadata::format_shot_date;
/// assert_eq!(format_shot_date("2020:06:15 14:30:00").unwrap(), "June 15, 2020");
/// ```
pub fn format_shot_date(raw: &str) -> Result<String, MetadataError> {
    // Cameras pad the fixed-width ASCII field with NULs or spaces.
    let trimmed = raw.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    let parsed = NaiveDateTime::parse_from_str(trimmed, EXIF_DATE_FORMAT)
        .map_err(|_| MetadataError::InvalidDate(raw.to_string()))?;
    Ok(parsed.format("%B %-d, %Y").to_string())
}

/// Format an exposure time in seconds for display.
///
/// - exactly one second: `1 second`
/// - longer: rounded to one decimal, `2 seconds`, `2.5 seconds`
/// - shorter: as a reciprocal, `1/250`
pub fn format_shutter_speed(seconds: f64) -> String {
    if seconds == 1.0 {
        "1 second".to_string()
    } else if seconds > 1.0 {
        format!("{} seconds", (seconds * 10.0).round() / 10.0)
    } else {
        format!("1/{}", (1.0 / seconds).round())
    }
}

/// Format an aperture as `f/{value}`, with the value unformatted.
pub fn format_aperture(f_number: f64) -> String {
    format!("f/{}", f_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shot_date_uses_month_name() {
        assert_eq!(
            format_shot_date("2020:06:15 14:30:00").unwrap(),
            "June 15, 2020"
        );
    }

    #[test]
    fn shot_date_has_no_leading_zero_day() {
        assert_eq!(
            format_shot_date("2019:01:05 08:00:00").unwrap(),
            "January 5, 2019"
        );
    }

    #[test]
    fn shot_date_ignores_time_of_day() {
        // No timezone conversion: late evening stays on the same day
        assert_eq!(
            format_shot_date("2018:12:31 23:59:59").unwrap(),
            "December 31, 2018"
        );
    }

    #[test]
    fn shot_date_tolerates_nul_padding() {
        assert_eq!(
            format_shot_date("2020:06:15 14:30:00\0").unwrap(),
            "June 15, 2020"
        );
    }

    #[test]
    fn shot_date_rejects_garbage() {
        assert!(matches!(
            format_shot_date("yesterday"),
            Err(MetadataError::InvalidDate(_))
        ));
        assert!(format_shot_date("2020-06-15 14:30:00").is_err());
    }

    #[test]
    fn shutter_exactly_one_second() {
        assert_eq!(format_shutter_speed(1.0), "1 second");
    }

    #[test]
    fn shutter_long_exposure_rounds_to_one_decimal() {
        assert_eq!(format_shutter_speed(2.0), "2 seconds");
        assert_eq!(format_shutter_speed(2.5), "2.5 seconds");
        assert_eq!(format_shutter_speed(1.34), "1.3 seconds");
        assert_eq!(format_shutter_speed(30.0), "30 seconds");
    }

    #[test]
    fn shutter_fast_exposure_is_reciprocal() {
        assert_eq!(format_shutter_speed(0.004), "1/250");
        assert_eq!(format_shutter_speed(1.0 / 60.0), "1/60");
        assert_eq!(format_shutter_speed(0.5), "1/2");
    }

    #[test]
    fn shutter_reciprocal_rounds_to_nearest() {
        // 1/0.3 = 3.33…
        assert_eq!(format_shutter_speed(0.3), "1/3");
    }

    #[test]
    fn aperture_is_unformatted() {
        assert_eq!(format_aperture(2.8), "f/2.8");
        assert_eq!(format_aperture(4.0), "f/4");
        assert_eq!(format_aperture(11.0), "f/11");
    }
}
