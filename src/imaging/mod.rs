//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Capture metadata** | `kamadak-exif` (DateTimeOriginal, ExposureTime, FNumber) |
//! | **Resize / crop → JPEG** | Lanczos3 + `JpegEncoder` |
//! | **Original** | byte-for-byte copy |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **EXIF reader**: capture-field extraction used by the backend

pub mod backend;
mod calculations;
pub mod exif_reader;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    calculate_cover_dimensions, calculate_fill_dimensions, calculate_fit_dimensions, plan_resize,
    ResizePlan,
};
pub use params::{Crop, Quality, RenditionParams, Resize};
pub use rust_backend::RustBackend;
