//! Export configuration module.
//!
//! Handles loading and validating `export.toml`. Every path and encoding
//! parameter lives here so the exporter can run against arbitrary input and
//! output directories without code changes.
//!
//! ## Config File Location
//!
//! Pass the file with `--config` (default `export.toml` in the working
//! directory). Relative paths inside it are resolved against the directory
//! that contains the config file. A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "raw"                     # Where catalog `source` paths are looked up
//! output_dir = "public/images/gallery"   # Where encoded files and the manifest go
//! catalog = "catalog.toml"               # Catalog document (.toml or .json)
//! manifest_name = "manifest.json"        # Manifest file name inside output_dir
//! public_prefix = "/images/gallery"      # Web-root path of output_dir
//! # featured_dir = "public/images/hero"  # Copies of featured entries' outputs
//!
//! [images]
//! max_width = 1920          # Wider images are scaled down to this width
//! quality = 85              # WebP/JPEG encoding quality (0-100)
//! formats = ["webp"]        # First = manifest `src`; add "jpeg" for a fallback
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Exporter configuration loaded from `export.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory catalog `source` paths are relative to.
    pub source_dir: PathBuf,
    /// Directory encoded files and the manifest are written to.
    pub output_dir: PathBuf,
    /// Catalog document path.
    pub catalog: PathBuf,
    /// Manifest file name, written inside `output_dir`.
    pub manifest_name: String,
    /// Web-root path under which `output_dir` is served.
    pub public_prefix: String,
    /// Optional directory receiving copies of featured entries' outputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_dir: Option<PathBuf>,
    /// Resize and encoding settings.
    pub images: ImagesConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("raw"),
            output_dir: PathBuf::from("public/images/gallery"),
            catalog: PathBuf::from("catalog.toml"),
            manifest_name: "manifest.json".to_string(),
            public_prefix: "/images/gallery".to_string(),
            featured_dir: None,
            images: ImagesConfig::default(),
        }
    }
}

/// Resize and encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Images wider than this are scaled down to exactly this width.
    pub max_width: u32,
    /// WebP/JPEG encoding quality (0 = worst, 100 = best).
    pub quality: u32,
    /// Formats to write, in order. The first is the manifest's `src`.
    pub formats: Vec<OutputFormat>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            quality: 85,
            formats: vec![OutputFormat::Webp],
        }
    }
}

impl ExportConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.max_width == 0 {
            return Err(ConfigError::Validation(
                "images.max_width must be positive".into(),
            ));
        }
        if self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 0-100".into(),
            ));
        }
        if self.images.formats.is_empty() {
            return Err(ConfigError::Validation(
                "images.formats must not be empty".into(),
            ));
        }
        let formats = &self.images.formats;
        if formats
            .iter()
            .enumerate()
            .any(|(i, f)| formats[..i].contains(f))
        {
            return Err(ConfigError::Validation(
                "images.formats must not repeat a format".into(),
            ));
        }
        let manifest = Path::new(&self.manifest_name);
        if self.manifest_name.is_empty() || manifest.file_name() != Some(manifest.as_os_str()) {
            return Err(ConfigError::Validation(
                "manifest_name must be a plain file name".into(),
            ));
        }
        let image_ext = manifest
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                [OutputFormat::Webp, OutputFormat::Jpeg]
                    .iter()
                    .any(|f| f.matches_extension(ext))
            });
        if image_ext {
            return Err(ConfigError::Validation(
                "manifest_name must not use an image extension".into(),
            ));
        }
        if self.featured_dir.as_deref() == Some(self.output_dir.as_path()) {
            return Err(ConfigError::Validation(
                "featured_dir must differ from output_dir".into(),
            ));
        }
        Ok(())
    }

    /// Resolve relative paths against `base` (the config file's directory).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.source_dir = base.join(&self.source_dir);
        self.output_dir = base.join(&self.output_dir);
        self.catalog = base.join(&self.catalog);
        self.featured_dir = self.featured_dir.map(|d| base.join(d));
        self
    }

    /// Full path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_name)
    }
}

/// Parse config TOML and validate it. Paths are left as written.
pub fn parse_config(content: &str) -> Result<ExportConfig, ConfigError> {
    let config: ExportConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from a `export.toml` path.
///
/// Missing file → stock defaults. Relative paths resolve against the file's
/// directory. Rejects unknown keys and validates the result.
pub fn load_config(path: &Path) -> Result<ExportConfig, ConfigError> {
    let base = path.parent().unwrap_or(Path::new(""));
    let config = if path.exists() {
        parse_config(&fs::read_to_string(path)?)?
    } else {
        ExportConfig::default()
    };
    Ok(config.resolve_paths(base))
}

/// Returns a fully-commented stock `export.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photo-export configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths are resolved against the directory containing this file.
# Unknown keys will cause an error.

# Directory that catalog `source` paths are relative to.
source_dir = "raw"

# Directory that encoded images and the manifest are written to.
output_dir = "public/images/gallery"

# Catalog document listing the images to export (.toml or .json).
catalog = "catalog.toml"

# Manifest file name, written inside output_dir. Overwritten on every run.
# Must not end in an image extension (.webp, .jpg).
manifest_name = "manifest.json"

# Web-root path under which output_dir is served. Manifest `src` values
# are this prefix plus the output's relative path.
public_prefix = "/images/gallery"

# Copy every featured entry's outputs into this directory as well.
# Must differ from output_dir.
# featured_dir = "public/images/hero"

# ---------------------------------------------------------------------------
# Resize and encoding
# ---------------------------------------------------------------------------
[images]
# Images wider than this are scaled down to exactly this width, keeping
# their aspect ratio. Narrower images are never upscaled.
max_width = 1920

# WebP/JPEG encoding quality (0 = worst, 100 = best).
quality = 85

# Formats to write, in order. The first becomes the manifest `src`; a
# second one is recorded as `fallback`. Options: "webp", "jpeg".
formats = ["webp"]
"##
}
