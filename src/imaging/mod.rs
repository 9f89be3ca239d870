//! Image processing: decode, flatten, resize, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Resize** | Lanczos3 via `image::imageops::resize` |
//! | **Encode → WebP** | `webp` (libwebp, lossy) |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`normalize`], combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::calculate_fit_width;
pub use operations::{ExportResult, ExportedFile, NormalizeError, normalize, remove_outputs};
pub use params::{ExportParams, ExportSpec, OutputFormat, Quality};
pub use rust_backend::RustBackend;
