//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take an [`ExportSpec`], compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_fit_width;
use super::params::{ExportParams, ExportSpec, OutputFormat};
use crate::naming::{is_same_file, output_relative_path};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single image could not be normalized.
///
/// Neither variant is fatal to a batch: callers log and move on.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Source not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("{}: {cause}", .source_path.display())]
    ProcessingFailure {
        source_path: PathBuf,
        #[source]
        cause: BackendError,
    },
}

/// One written output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub format: OutputFormat,
    /// Absolute (or output-dir-joined) path on disk.
    pub path: PathBuf,
    /// Path relative to the output directory.
    pub relative: PathBuf,
}

/// Outcome of a successful normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// One file per requested format, in `ExportSpec::formats` order.
    pub outputs: Vec<ExportedFile>,
    /// Final (post-resize) width.
    pub width: u32,
    /// Final (post-resize) height.
    pub height: u32,
}

impl ExportResult {
    /// The primary (first-format) output.
    pub fn primary(&self) -> Option<&ExportedFile> {
        self.outputs.first()
    }

    /// The fallback (second-format) output, if two formats were requested.
    pub fn fallback(&self) -> Option<&ExportedFile> {
        self.outputs.get(1)
    }
}

/// Plan an export without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_export(
    source: &Path,
    source_dims: (u32, u32),
    output_dir: &Path,
    output_name: &str,
    spec: &ExportSpec,
) -> ExportParams {
    let (width, height) = calculate_fit_width(source_dims, spec.max_width);

    ExportParams {
        source: source.to_path_buf(),
        width,
        height,
        quality: spec.quality,
        outputs: spec
            .formats
            .iter()
            .map(|&f| (f, output_dir.join(output_relative_path(output_name, f))))
            .collect(),
    }
}

/// Resize and re-encode one source image into every format of `spec`.
///
/// Writes `output_dir/output_name` with the extension replaced per format.
/// Either every output is written or none is: on failure, outputs already
/// written for this call are removed. The source is never modified; an
/// output path that resolves to the source fails before anything is written.
pub fn normalize(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    output_name: &str,
    spec: &ExportSpec,
) -> Result<ExportResult, NormalizeError> {
    if !source.is_file() {
        return Err(NormalizeError::SourceNotFound(source.to_path_buf()));
    }

    let failure = |cause: BackendError| NormalizeError::ProcessingFailure {
        source_path: source.to_path_buf(),
        cause,
    };

    let dims = backend.identify(source).map_err(failure)?;
    let params = plan_export(source, (dims.width, dims.height), output_dir, output_name, spec);

    if let Some((_, path)) = params.outputs.iter().find(|(_, p)| is_same_file(source, p)) {
        return Err(failure(BackendError::ProcessingFailed(format!(
            "output {} would overwrite the source",
            path.display()
        ))));
    }

    for (_, path) in &params.outputs {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| failure(e.into()))?;
        }
    }

    if let Err(cause) = backend.export(&params) {
        remove_outputs(params.outputs.iter().map(|(_, p)| p.as_path()));
        return Err(failure(cause));
    }

    Ok(ExportResult {
        outputs: params
            .outputs
            .into_iter()
            .map(|(format, path)| ExportedFile {
                format,
                path,
                relative: output_relative_path(output_name, format),
            })
            .collect(),
        width: params.width,
        height: params.height,
    })
}

/// Best-effort removal of written files; missing files are ignored.
pub fn remove_outputs<'a>(paths: impl IntoIterator<Item = &'a Path>) {
    for path in paths {
        let _ = std::fs::remove_file(path);
    }
}
