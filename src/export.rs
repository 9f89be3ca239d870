//! Batch export: catalog in, encoded images and manifest out.
//!
//! Walks the catalog in order and runs each entry through
//! [`normalize`](crate::imaging::normalize). One bad image never stops the
//! run: missing sources are skipped, processing failures are reported, and
//! the manifest ends up with exactly the entries that succeeded.
//!
//! ## Output Structure
//!
//! ```text
//! public/images/gallery/               # output_dir
//! ├── manifest.json                    # rewritten every run
//! ├── shingle-roof-completed-maine-01.webp
//! ├── shingle-roof-completed-maine-01.jpg   # only with formats = ["webp", "jpeg"]
//! └── hero/
//!     └── maine-home-shingle-roof.webp # catalog output names may include subdirectories
//! ```
//!
//! ## Featured copies
//!
//! With `featured_dir` set, each featured entry's outputs are also copied
//! there under their file names, for pages that load hero images from a
//! separate directory.
//!
//! ## Sequential Processing
//!
//! Images are processed one at a time in catalog order. Progress is reported
//! through an optional [`ExportEvent`] channel so the CLI can print while the
//! batch runs.

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::ExportConfig;
use crate::imaging::{
    ExportResult, ExportSpec, ImageBackend, NormalizeError, RustBackend, normalize,
    remove_outputs,
};
use crate::manifest::{Manifest, ManifestEntry, ManifestError};
use crate::naming::is_same_file;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Progress events emitted while the batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Started {
        total: usize,
        output_dir: PathBuf,
    },
    /// Entry written; `output` is the primary file's relative path.
    Exported {
        index: usize,
        output: String,
        width: u32,
        height: u32,
    },
    /// Source file missing; entry left out of the manifest.
    Skipped { index: usize, source: PathBuf },
    /// Decode/resize/encode/write/copy failed; entry left out of the manifest.
    Failed {
        index: usize,
        source: PathBuf,
        cause: String,
    },
    ManifestWritten { path: PathBuf, count: usize },
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct ExportReport {
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcome of a dry run: catalog entries whose source file is missing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub total: usize,
    pub missing: Vec<(usize, PathBuf)>,
}

fn emit(events: &Option<Sender<ExportEvent>>, event: ExportEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is printing.
        let _ = tx.send(event);
    }
}

/// Run the full export with the production backend.
pub fn run(
    config: &ExportConfig,
    catalog: &Catalog,
    events: Option<Sender<ExportEvent>>,
) -> Result<ExportReport, ExportError> {
    run_with_backend(&RustBackend::new(), config, catalog, events)
}

/// Run the full export with a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    config: &ExportConfig,
    catalog: &Catalog,
    events: Option<Sender<ExportEvent>>,
) -> Result<ExportReport, ExportError> {
    std::fs::create_dir_all(&config.output_dir)?;
    let spec = ExportSpec::from_images_config(&config.images);

    emit(
        &events,
        ExportEvent::Started {
            total: catalog.len(),
            output_dir: config.output_dir.clone(),
        },
    );

    let mut manifest = Manifest::new();
    let mut skipped = 0;
    let mut failed = 0;

    for (index, entry) in catalog.entries.iter().enumerate() {
        let source = config.source_dir.join(&entry.source);

        let outcome = normalize(backend, &source, &config.output_dir, &entry.output, &spec)
            .and_then(|result| copy_if_featured(config, entry, &source, result));

        match outcome {
            Ok(result) => {
                let manifest_entry = ManifestEntry::from_export(&result, entry, &config.public_prefix);
                let output = result
                    .primary()
                    .map(|f| f.relative.to_string_lossy().into_owned())
                    .unwrap_or_default();
                emit(
                    &events,
                    ExportEvent::Exported {
                        index,
                        output,
                        width: result.width,
                        height: result.height,
                    },
                );
                manifest.push(manifest_entry);
            }
            Err(NormalizeError::SourceNotFound(source)) => {
                skipped += 1;
                emit(&events, ExportEvent::Skipped { index, source });
            }
            Err(NormalizeError::ProcessingFailure { source_path, cause }) => {
                failed += 1;
                emit(
                    &events,
                    ExportEvent::Failed {
                        index,
                        source: source_path,
                        cause: cause.to_string(),
                    },
                );
            }
        }
    }

    let manifest_path = config.manifest_path();
    manifest.write(&manifest_path)?;
    emit(
        &events,
        ExportEvent::ManifestWritten {
            path: manifest_path.clone(),
            count: manifest.len(),
        },
    );

    Ok(ExportReport {
        manifest,
        manifest_path,
        skipped,
        failed,
    })
}

/// Copy a featured entry's outputs into `featured_dir`.
///
/// On failure the entry's outputs and any copies made so far are removed, so
/// the entry disappears entirely.
fn copy_if_featured(
    config: &ExportConfig,
    entry: &CatalogEntry,
    source: &Path,
    result: ExportResult,
) -> Result<ExportResult, NormalizeError> {
    let Some(featured_dir) = config.featured_dir.as_deref() else {
        return Ok(result);
    };
    if !entry.featured {
        return Ok(result);
    }

    let mut copies = Vec::new();
    let copied = std::fs::create_dir_all(featured_dir).and_then(|()| {
        for file in &result.outputs {
            let name = file.path.file_name().unwrap_or(file.path.as_os_str());
            let dest = featured_dir.join(name);
            // Already in place; copying a file onto itself truncates it.
            if is_same_file(&file.path, &dest) {
                continue;
            }
            std::fs::copy(&file.path, &dest)?;
            copies.push(dest);
        }
        Ok(())
    });

    match copied {
        Ok(()) => Ok(result),
        Err(e) => {
            remove_outputs(copies.iter().map(PathBuf::as_path));
            remove_outputs(result.outputs.iter().map(|f| f.path.as_path()));
            Err(NormalizeError::ProcessingFailure {
                source_path: source.to_path_buf(),
                cause: e.into(),
            })
        }
    }
}

/// Dry run: report catalog entries whose source file does not exist.
///
/// Nothing is decoded or written.
pub fn check(config: &ExportConfig, catalog: &Catalog) -> CheckReport {
    let missing = catalog
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| (i, config.source_dir.join(&e.source)))
        .filter(|(_, p)| !p.is_file())
        .collect();

    CheckReport {
        total: catalog.len(),
        missing,
    }
}
