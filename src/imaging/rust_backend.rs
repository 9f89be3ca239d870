//! Pure Rust decode/resize backend with libwebp for lossy WebP output.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header only, format sniffed) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate decoders |
//! | Flatten to opaque RGB | `DynamicImage::to_rgb8` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → WebP | `webp::Encoder` (libwebp, lossy) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ExportParams, OutputFormat};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Production backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load, decode, and flatten an image to 8-bit opaque RGB.
///
/// Palette, alpha, grayscale and 16-bit sources all end up as RGB8;
/// neither output format keeps transparency.
fn load_rgb(path: &Path) -> Result<RgbImage, BackendError> {
    let img = ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })?;
    Ok(img.to_rgb8())
}

/// Encode an RGB buffer as lossy WebP.
fn encode_webp(img: &RgbImage, quality: u32) -> Result<Vec<u8>, BackendError> {
    let encoder = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height());
    let encoded = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {:?}", e)))?;
    Ok(encoded.to_vec())
}

/// Encode an RGB buffer as baseline JPEG.
fn encode_jpeg(img: &RgbImage, quality: u32) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality as u8);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    Ok(buf)
}

fn encode(img: &RgbImage, format: OutputFormat, quality: u32) -> Result<Vec<u8>, BackendError> {
    match format {
        OutputFormat::Webp => encode_webp(img, quality),
        OutputFormat::Jpeg => encode_jpeg(img, quality),
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
            })?;
        Ok(Dimensions { width, height })
    }

    fn export(&self, params: &ExportParams) -> Result<(), BackendError> {
        let img = load_rgb(&params.source)?;

        let resized = if img.dimensions() == (params.width, params.height) {
            img
        } else {
            image::imageops::resize(&img, params.width, params.height, FilterType::Lanczos3)
        };

        // Encode everything before touching the filesystem so an encoder
        // failure leaves no files behind.
        let quality = params.quality.value();
        let encoded = params
            .outputs
            .iter()
            .map(|(format, path)| Ok((path, encode(&resized, *format, quality)?)))
            .collect::<Result<Vec<_>, BackendError>>()?;

        for (path, bytes) in encoded {
            std::fs::write(path, bytes)?;
        }
        Ok(())
    }
}
