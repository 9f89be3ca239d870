//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what files to write) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 85). Clamped on construction.
//! - [`OutputFormat`]: Target encodings: WebP (primary) and JPEG (fallback).
//! - [`ExportSpec`]: Max width, quality and formats governing one transform.
//! - [`ExportParams`]: One export: source, target dimensions, output files.

use crate::config::ImagesConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// An encoding the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Webp,
    Jpeg,
}

impl OutputFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Whether a file extension belongs to this format (case-insensitive).
    pub fn matches_extension(self, ext: &str) -> bool {
        match self {
            OutputFormat::Webp => ext.eq_ignore_ascii_case("webp"),
            OutputFormat::Jpeg => {
                ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Webp => write!(f, "WebP"),
            OutputFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// How a single image is transformed: width cap, quality, target formats.
///
/// `formats` is ordered. The first entry is the primary format (the
/// manifest's `src`), a second one is the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    pub max_width: u32,
    pub quality: Quality,
    pub formats: Vec<OutputFormat>,
}

impl ExportSpec {
    pub fn from_images_config(images: &ImagesConfig) -> Self {
        Self {
            max_width: images.max_width,
            quality: Quality::new(images.quality),
            formats: images.formats.clone(),
        }
    }
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self::from_images_config(&ImagesConfig::default())
    }
}

/// Parameters for one decode → resize → encode pass.
///
/// The source is decoded once and encoded into every entry of `outputs`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportParams {
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
    pub outputs: Vec<(OutputFormat, PathBuf)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_85() {
        assert_eq!(Quality::default().value(), 85);
    }

    #[test]
    fn format_extensions() {
        assert_eq!(OutputFormat::Webp.extension(), "webp");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert!(OutputFormat::Jpeg.matches_extension("JPEG"));
        assert!(!OutputFormat::Webp.matches_extension("jpg"));
    }

    #[test]
    fn default_spec_is_webp_only() {
        let spec = ExportSpec::default();
        assert_eq!(spec.max_width, 1920);
        assert_eq!(spec.quality.value(), 85);
        assert_eq!(spec.formats, vec![OutputFormat::Webp]);
    }

    #[test]
    fn formats_deserialize_lowercase() {
        let formats: Vec<OutputFormat> = serde_json::from_str(r#"["webp", "jpeg"]"#).unwrap();
        assert_eq!(formats, vec![OutputFormat::Webp, OutputFormat::Jpeg]);
    }
}
