//! The JSON manifest consumed by the website.
//!
//! A manifest is a bare JSON array, one object per successfully exported
//! image, in catalog order:
//!
//! ```json
//! [
//!   {
//!     "src": "/images/gallery/shingle-roof-completed-maine-01.webp",
//!     "alt": "Completed architectural shingle roof replacement in Maine",
//!     "title": "Shingle Roof Replacement - Maine",
//!     "category": "shingle",
//!     "featured": true,
//!     "width": 1920,
//!     "height": 1440
//!   }
//! ]
//! ```
//!
//! `width`/`height` are always the dimensions of the written file, not the
//! source. `title` is omitted when the catalog has none, and `fallback` only
//! appears when a second format was exported. The file is rewritten from
//! scratch on every run, never merged.

use crate::catalog::CatalogEntry;
use crate::imaging::ExportResult;
use crate::naming::public_src;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One exported image as the website sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Web-root path of the primary output.
    pub src: String,
    /// Web-root path of the fallback output, when two formats were exported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    pub width: u32,
    pub height: u32,
}

impl ManifestEntry {
    /// Merge an export result with the catalog's descriptive metadata.
    pub fn from_export(result: &ExportResult, entry: &CatalogEntry, public_prefix: &str) -> Self {
        let src = result
            .primary()
            .map(|f| public_src(public_prefix, &f.relative))
            .unwrap_or_default();
        let fallback = result
            .fallback()
            .map(|f| public_src(public_prefix, &f.relative));

        Self {
            src,
            fallback,
            alt: entry.alt.clone(),
            title: entry.title.clone(),
            category: entry.category.clone(),
            featured: entry.featured,
            width: result.width,
            height: result.height,
        }
    }
}

/// Ordered, append-only list of manifest entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON (two-space indent).
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the manifest, replacing any previous file at `path`.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Number of entries per category, in order of first appearance.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(c, _)| *c == entry.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.category.clone(), 1)),
            }
        }
        counts
    }
}
