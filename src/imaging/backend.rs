//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and export.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): `image` crate decoders,
//! Lanczos3 resampling, and libwebp/`image` encoders.

use super::params::ExportParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// Keeps the normalizer and batch exporter independent of pixel work so
/// they can be tested against a recording mock.
pub trait ImageBackend {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source once, flatten to opaque RGB, resize to the exact
    /// target dimensions, and write every requested output.
    fn export(&self, params: &ExportParams) -> Result<(), BackendError>;
}
