//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{Crop, Resize};

/// Scale `(w, h)` by `factor`, rounding and keeping both edges at least 1px.
fn scale(source: (u32, u32), factor: f64) -> (u32, u32) {
    let (w, h) = source;
    (
        ((w as f64 * factor).round() as u32).max(1),
        ((h as f64 * factor).round() as u32).max(1),
    )
}

/// Calculate dimensions that fit inside `bounds`, never upscaling.
///
/// # Examples
/// ```
/// # use photo_folio::imaging::calculate_fit_dimensions;
/// // 1800x1200 into 900x900 → 900x600
/// assert_eq!(calculate_fit_dimensions((1800, 1200), (900, 900)), (900, 600));
///
/// // Already inside the box → unchanged
/// assert_eq!(calculate_fit_dimensions((640, 480), (900, 900)), (640, 480));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w <= max_w && src_h <= max_h {
        return source;
    }

    let factor = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    scale(source, factor)
}

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
/// This may upscale; see [`calculate_cover_dimensions`] for the shrink-only variant.
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w, h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h)
    }
}

/// Calculate dimensions that cover `bounds`, never upscaling.
///
/// A source that does not cover the box on at least one edge is returned
/// unchanged.
pub fn calculate_cover_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = bounds;

    let factor = (tgt_w as f64 / src_w as f64).max(tgt_h as f64 / src_h as f64);
    if factor >= 1.0 {
        return source;
    }
    calculate_fill_dimensions(source, bounds)
}

/// How a decoded source becomes a rendition, before the crop window is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    /// Top-left region of the source to keep. The whole source unless the
    /// crop window forces an upscale.
    pub region: (u32, u32),
    /// Size the region is resampled to.
    pub size: (u32, u32),
}

/// Resolve a [`Resize`] (and optional [`Crop`]) against a decoded source size.
///
/// When the shrink-only resize leaves the image too small for the crop window,
/// only the part of the source that lands inside the window is kept and it is
/// scaled to exactly the window's extent. The intermediate image is therefore
/// never larger than the crop, whatever the source aspect ratio.
pub fn plan_resize(source: (u32, u32), resize: Resize, crop: Option<Crop>) -> ResizePlan {
    let resized = match resize {
        Resize::ShrinkToFit { width, height } => calculate_fit_dimensions(source, (width, height)),
        Resize::ShrinkToCover { width, height } => {
            calculate_cover_dimensions(source, (width, height))
        }
    };

    if let Some(crop) = crop {
        let needed = (crop.x + crop.width, crop.y + crop.height);
        if resized.0 < needed.0 || resized.1 < needed.1 {
            let (src_w, src_h) = source;
            let factor = (needed.0 as f64 / src_w as f64).max(needed.1 as f64 / src_h as f64);
            let region = (
                ((needed.0 as f64 / factor).round() as u32).clamp(1, src_w),
                ((needed.1 as f64 / factor).round() as u32).clamp(1, src_h),
            );
            return ResizePlan {
                region,
                size: needed,
            };
        }
    }

    ResizePlan {
        region: source,
        size: resized,
    }
}
