//! Catalog loading and validation.
//!
//! The catalog is the list of images to export, each with its output name and
//! the descriptive metadata the website shows (alt text, title, category).
//! It is plain data kept outside the code so it can be edited and reviewed on
//! its own.
//!
//! ## Formats
//!
//! The file extension picks the parser. TOML uses `[[image]]` tables:
//!
//! ```toml
//! [[image]]
//! source = "shingles/dji_fly_20250824_015816_0223_photo.JPG"
//! output = "shingle-roof-completed-maine-01.webp"
//! category = "shingle"
//! alt = "Completed architectural shingle roof replacement in Maine"
//! title = "Shingle Roof Replacement - Maine"
//! featured = true
//! ```
//!
//! JSON (`.json`) is a top-level array of the same objects.
//!
//! ## Validation
//!
//! - `source`, `output`, `category` and `alt` must be non-empty
//! - `output` must stay inside the output directory (no absolute paths, no `..`)
//! - No two entries may write the same output name
//! - No two featured entries may share a file name, even in different
//!   subdirectories, since featured copies are flat
//!
//! Catalog order is display order on the site, so it is preserved as written.

use crate::naming::is_contained_output_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog entry {index} ({output}): {message}")]
    Validation {
        index: usize,
        output: String,
        message: String,
    },
}

/// One image to export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    /// Source file, relative to the configured source directory.
    pub source: PathBuf,
    /// Output base name (or relative path); the extension is replaced per format.
    pub output: String,
    pub category: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Ordered list of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(rename = "image", default)]
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every entry, reporting the first problem found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        let mut featured_names = HashSet::new();
        for (index, entry) in self.entries.iter().enumerate() {
            let invalid = |message: &str| CatalogError::Validation {
                index,
                output: entry.output.clone(),
                message: message.to_string(),
            };

            if entry.source.as_os_str().is_empty() {
                return Err(invalid("source must not be empty"));
            }
            if entry.output.trim().is_empty() {
                return Err(invalid("output must not be empty"));
            }
            if !is_contained_output_name(&entry.output) {
                return Err(invalid("output must be a relative path inside the output directory"));
            }
            if entry.category.trim().is_empty() {
                return Err(invalid("category must not be empty"));
            }
            if entry.alt.trim().is_empty() {
                return Err(invalid("alt must not be empty"));
            }
            // Extensions are replaced on write, so `a.webp` and `a` collide.
            let key = Path::new(&entry.output).with_extension("");
            if !seen.insert(key) {
                return Err(invalid("output name is used by an earlier entry"));
            }
            // Featured copies land flat in one directory.
            if entry.featured {
                let stem = Path::new(&entry.output).file_stem().map(|s| s.to_os_string());
                if !featured_names.insert(stem) {
                    return Err(invalid(
                        "featured file name is used by an earlier featured entry",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Parse a TOML catalog (`[[image]]` tables) and validate it.
pub fn parse_toml_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = toml::from_str(content)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Parse a JSON catalog (top-level array) and validate it.
pub fn parse_json_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(content)?;
    let catalog = Catalog { entries };
    catalog.validate()?;
    Ok(catalog)
}

/// Load a catalog file, choosing the parser by extension (`.json` or TOML).
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json_catalog(&content)
    } else {
        parse_toml_catalog(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_ENTRIES: &str = r#"
[[image]]
source = "metal/20251014_202328000_iOS.jpg"
output = "standing-seam-metal-roof-blue-maine-01.webp"
category = "metal"
alt = "Blue standing seam metal roof installation in Maine"
title = "Standing Seam Metal Roof - Blue"
featured = true

[[image]]
source = "metal/20251015_190416000_iOS.jpg"
output = "metal-roof-before-replacement-maine"
category = "before"
alt = "Old rusty metal roof before replacement"
"#;

    #[test]
    fn parse_toml_keeps_order_and_defaults() {
        let catalog = parse_toml_catalog(TWO_ENTRIES).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries[0].category, "metal");
        assert!(catalog.entries[0].featured);
        assert_eq!(
            catalog.entries[0].title.as_deref(),
            Some("Standing Seam Metal Roof - Blue")
        );
        assert_eq!(catalog.entries[1].category, "before");
        assert!(!catalog.entries[1].featured);
        assert_eq!(catalog.entries[1].title, None);
    }

    #[test]
    fn parse_json_array() {
        let json = r#"[
            {"source": "a.jpg", "output": "a", "category": "shingle", "alt": "A roof"},
            {"source": "b.jpg", "output": "b", "category": "metal", "alt": "B roof", "featured": true}
        ]"#;
        let catalog = parse_json_catalog(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.entries[1].featured);
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = parse_toml_catalog("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn unknown_entry_key_is_rejected() {
        let toml = r#"
[[image]]
source = "a.jpg"
output = "a"
category = "c"
alt = "x"
caption = "typo"
"#;
        assert!(matches!(parse_toml_catalog(toml), Err(CatalogError::Toml(_))));
    }

    #[test]
    fn missing_alt_is_rejected() {
        let toml = r#"
[[image]]
source = "a.jpg"
output = "a"
category = "c"
alt = "  "
"#;
        let err = parse_toml_catalog(toml).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { index: 0, .. }));
        assert!(err.to_string().contains("alt must not be empty"));
    }

    #[test]
    fn duplicate_output_ignoring_extension_is_rejected() {
        let json = r#"[
            {"source": "a.jpg", "output": "roof.webp", "category": "c", "alt": "x"},
            {"source": "b.jpg", "output": "roof", "category": "c", "alt": "y"}
        ]"#;
        let err = parse_json_catalog(json).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { index: 1, .. }));
    }

    #[test]
    fn featured_entries_sharing_a_file_name_are_rejected() {
        let json = r#"[
            {"source": "a.jpg", "output": "shingle/roof", "category": "c", "alt": "x", "featured": true},
            {"source": "b.jpg", "output": "metal/roof.webp", "category": "c", "alt": "y", "featured": true}
        ]"#;
        let err = parse_json_catalog(json).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { index: 1, .. }));
        assert!(err.to_string().contains("featured"));
    }

    #[test]
    fn shared_file_name_is_fine_when_not_both_featured() {
        let json = r#"[
            {"source": "a.jpg", "output": "shingle/roof", "category": "c", "alt": "x", "featured": true},
            {"source": "b.jpg", "output": "metal/roof", "category": "c", "alt": "y"}
        ]"#;
        assert_eq!(parse_json_catalog(json).unwrap().len(), 2);
    }

    #[test]
    fn escaping_output_is_rejected() {
        let json = r#"[{"source": "a.jpg", "output": "../a", "category": "c", "alt": "x"}]"#;
        assert!(matches!(
            parse_json_catalog(json),
            Err(CatalogError::Validation { .. })
        ));
    }

    #[test]
    fn load_catalog_picks_parser_by_extension() {
        let tmp = TempDir::new().unwrap();
        let toml_path = tmp.path().join("catalog.toml");
        fs::write(&toml_path, TWO_ENTRIES).unwrap();
        assert_eq!(load_catalog(&toml_path).unwrap().len(), 2);

        let json_path = tmp.path().join("catalog.json");
        fs::write(
            &json_path,
            r#"[{"source": "a.jpg", "output": "a", "category": "c", "alt": "x"}]"#,
        )
        .unwrap();
        assert_eq!(load_catalog(&json_path).unwrap().len(), 1);
    }

    #[test]
    fn load_fixture_catalog() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.toml");
        let catalog = load_catalog(&path).unwrap();

        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.entries[0].output, "shingle-roof-completed-maine-01.webp");
        assert_eq!(catalog.entries.iter().filter(|e| e.featured).count(), 5);
        assert!(catalog.entries.iter().any(|e| e.category == "before"));
    }

    #[test]
    fn load_catalog_missing_file_names_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }
}
