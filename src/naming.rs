//! Output file naming and web-root paths.
//!
//! Catalog entries name their output with a base name, optionally under a
//! subdirectory and optionally with an extension:
//!
//! - `shingle-roof-01` → `shingle-roof-01.webp` / `shingle-roof-01.jpg`
//! - `shingle-roof-01.webp` → same as above (extension is replaced per format)
//! - `hero/maine-home` → `hero/maine-home.webp`
//!
//! The same relative path is used on disk (under the output directory) and in
//! the manifest (under the public prefix), so one function produces both.

use crate::imaging::OutputFormat;
use std::path::{Component, Path, PathBuf};

/// Relative output path for a catalog output name and format.
///
/// ```
/// # use photo_export::naming::output_relative_path;
/// # use photo_export::imaging::OutputFormat;
/// # use std::path::Path;
/// assert_eq!(
///     output_relative_path("gallery/roof-01.webp", OutputFormat::Jpeg),
///     Path::new("gallery/roof-01.jpg")
/// );
/// ```
pub fn output_relative_path(output_name: &str, format: OutputFormat) -> PathBuf {
    Path::new(output_name).with_extension(format.extension())
}

/// Whether an output name stays inside the output directory.
///
/// Rejects absolute paths, `..` components, and names without a file part.
pub fn is_contained_output_name(output_name: &str) -> bool {
    let path = Path::new(output_name);
    path.file_stem().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Web-root path for a relative output path: `{prefix}/{a}/{b}` with `/` separators.
///
/// Trailing slashes on the prefix are ignored; an empty prefix yields a
/// path relative to the site root's current directory.
pub fn public_src(prefix: &str, relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let joined = parts.join("/");
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        joined
    } else {
        format!("{}/{}", prefix, joined)
    }
}

/// Inverse of [`public_src`]: the path relative to the output directory.
///
/// Returns `None` if `src` does not live under `prefix`.
pub fn relative_from_src(prefix: &str, src: &str) -> Option<PathBuf> {
    let prefix = prefix.trim_end_matches('/');
    let rest = if prefix.is_empty() {
        src
    } else {
        src.strip_prefix(prefix)?.strip_prefix('/')?
    };
    if rest.is_empty() {
        return None;
    }
    Some(rest.split('/').collect())
}

/// Whether `candidate` names the same file as `existing`.
///
/// `existing` must be on disk; `candidate` need not be, but its parent
/// directory must exist for the two to match. Symlinks and `..` are
/// resolved on both sides.
pub fn is_same_file(existing: &Path, candidate: &Path) -> bool {
    let Ok(existing) = existing.canonicalize() else {
        return false;
    };
    let (Some(parent), Some(name)) = (candidate.parent(), candidate.file_name()) else {
        return false;
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    parent
        .canonicalize()
        .is_ok_and(|dir| dir.join(name) == existing)
}
