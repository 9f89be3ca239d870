//! Shared test utilities for the photo-export test suite.
//!
//! Builders for configs and catalog entries rooted in a temp directory, plus
//! writers for small real images the production backend can decode.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let config = test_config(tmp.path());
//! write_jpeg(&config.source_dir.join("roof.jpg"), 400, 300);
//! let entry = catalog_entry("roof.jpg", "roof", "shingle");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};

use crate::catalog::CatalogEntry;
use crate::config::ExportConfig;

// =========================================================================
// Files
// =========================================================================

/// Create an empty file, creating parent directories as needed.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

/// Write a gradient JPEG of the given size.
///
/// Always JPEG-encoded, whatever the extension, so tests can plant files
/// whose content disagrees with their name.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save_with_format(path, ImageFormat::Jpeg).unwrap();
}

/// Write a PNG with an alpha channel: left half opaque red, right half
/// fully transparent.
pub fn write_rgba_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

/// Write an 8-bit indexed-color PNG: left half palette entry 0 (red), right
/// half entry 1 (blue).
pub fn write_palette_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![255, 0, 0, 0, 0, 255]);
    let indices: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).map(move |x| u8::from(x >= width / 2)))
        .collect();
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&indices).unwrap();
}

/// Write a 16-bit grayscale PNG with a horizontal gradient.
pub fn write_gray16_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_fn(width, height, |x, _| Luma([(x * 65535 / width.max(1)) as u16]));
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

// =========================================================================
// Config and catalog builders
// =========================================================================

/// Stock config with `source_dir` and `output_dir` under `root`.
pub fn test_config(root: &Path) -> ExportConfig {
    ExportConfig {
        source_dir: root.join("raw"),
        output_dir: root.join("out"),
        catalog: root.join("catalog.toml"),
        ..ExportConfig::default()
    }
}

/// A non-featured, untitled catalog entry.
pub fn catalog_entry(source: &str, output: &str, category: &str) -> CatalogEntry {
    CatalogEntry {
        source: PathBuf::from(source),
        output: output.to_string(),
        category: category.to_string(),
        alt: format!("{category} roof"),
        title: None,
        featured: false,
    }
}
