//! Post-export verification of written files.
//!
//! Two checks, both read-only:
//!
//! 1. **Signatures**: every `.webp` under the output directory must really be
//!    WebP (`RIFF....WEBP`), every `.jpg`/`.jpeg` must start with a JPEG SOI
//!    marker. Files renamed to `.webp` without re-encoding are the usual
//!    culprit.
//! 2. **Manifest**: every `src`/`fallback` in the manifest must exist under
//!    the output directory and decode to the recorded `width`×`height`.
//!
//! [`repair`] fixes the first kind of problem: each mislabeled file is
//! decoded from whatever it really holds and re-encoded, in place, into the
//! format its extension claims.

use crate::imaging::{
    BackendError, ExportParams, ImageBackend, OutputFormat, Quality, RustBackend, remove_outputs,
};
use crate::manifest::{Manifest, ManifestError};
use crate::naming::relative_from_src;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Cannot read manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        source: ManifestError,
    },
}

/// A single verification failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// File content does not match its extension.
    BadSignature { path: PathBuf, expected: OutputFormat },
    /// A manifest path has no file behind it (or lies outside the prefix).
    Missing { src: String },
    /// Decoded dimensions differ from the manifest.
    DimensionMismatch {
        src: String,
        recorded: (u32, u32),
        actual: (u32, u32),
    },
    /// File exists but could not be read or decoded.
    Unreadable { path: PathBuf, cause: String },
}

/// Outcome of a verification pass.
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Files whose signature was checked.
    pub files_checked: usize,
    /// Manifest entries checked.
    pub entries_checked: usize,
    pub problems: Vec<Problem>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Identify an encoded file from its first bytes.
pub fn sniff_format(header: &[u8]) -> Option<OutputFormat> {
    if header.len() >= 12 && &header[0..4] == b"RIFF" && &header[8..12] == b"WEBP" {
        Some(OutputFormat::Webp)
    } else if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(OutputFormat::Jpeg)
    } else {
        None
    }
}

fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut header = Vec::with_capacity(12);
    std::fs::File::open(path)?.take(12).read_to_end(&mut header)?;
    Ok(header)
}

fn expected_format(path: &Path) -> Option<OutputFormat> {
    let ext = path.extension()?.to_str()?;
    [OutputFormat::Webp, OutputFormat::Jpeg]
        .into_iter()
        .find(|f| f.matches_extension(ext))
}

fn decoded_dimensions(path: &Path) -> image::ImageResult<(u32, u32)> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
}

/// Check the signature of every WebP/JPEG file under `dir`.
pub fn check_signatures(dir: &Path, report: &mut VerifyReport) {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.problems.push(Problem::Unreadable {
                    path: e.path().unwrap_or(dir).to_path_buf(),
                    cause: e.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(expected) = expected_format(path) else {
            continue;
        };
        report.files_checked += 1;
        match read_header(path) {
            Ok(header) if sniff_format(&header) == Some(expected) => {}
            Ok(_) => report.problems.push(Problem::BadSignature {
                path: path.to_path_buf(),
                expected,
            }),
            Err(e) => report.problems.push(Problem::Unreadable {
                path: path.to_path_buf(),
                cause: e.to_string(),
            }),
        }
    }
}

/// Check that every manifest path exists and matches its recorded dimensions.
pub fn check_manifest(
    manifest: &Manifest,
    output_dir: &Path,
    public_prefix: &str,
    report: &mut VerifyReport,
) {
    for entry in &manifest.entries {
        report.entries_checked += 1;
        let recorded = (entry.width, entry.height);

        for src in std::iter::once(&entry.src).chain(entry.fallback.as_ref()) {
            let Some(path) = relative_from_src(public_prefix, src)
                .map(|rel| output_dir.join(rel))
                .filter(|p| p.is_file())
            else {
                report.problems.push(Problem::Missing { src: src.clone() });
                continue;
            };

            match decoded_dimensions(&path) {
                Ok(actual) if actual == recorded => {}
                Ok(actual) => report.problems.push(Problem::DimensionMismatch {
                    src: src.clone(),
                    recorded,
                    actual,
                }),
                Err(e) => report.problems.push(Problem::Unreadable {
                    path,
                    cause: e.to_string(),
                }),
            }
        }
    }
}

/// Run both checks against an export's output directory and manifest.
pub fn verify(
    output_dir: &Path,
    manifest_path: &Path,
    public_prefix: &str,
) -> Result<VerifyReport, VerifyError> {
    let manifest = Manifest::load(manifest_path).map_err(|source| VerifyError::Manifest {
        path: manifest_path.to_path_buf(),
        source,
    })?;

    let mut report = VerifyReport::default();
    check_signatures(output_dir, &mut report);
    check_manifest(&manifest, output_dir, public_prefix, &mut report);
    Ok(report)
}

/// Outcome of a repair pass.
#[derive(Debug, Default)]
pub struct RepairReport {
    /// Files re-encoded in place.
    pub converted: Vec<PathBuf>,
    /// Files that could not be converted, with the cause. Left untouched.
    pub failed: Vec<(PathBuf, String)>,
}

/// Re-encode every [`Problem::BadSignature`] file with the production backend.
pub fn repair(report: &VerifyReport, quality: Quality) -> RepairReport {
    repair_with_backend(&RustBackend::new(), report, quality)
}

/// Re-encode every [`Problem::BadSignature`] file into its expected format.
///
/// Other problems are ignored; dimensions are kept as they are.
pub fn repair_with_backend(
    backend: &impl ImageBackend,
    report: &VerifyReport,
    quality: Quality,
) -> RepairReport {
    let mut repaired = RepairReport::default();
    for problem in &report.problems {
        let Problem::BadSignature { path, expected } = problem else {
            continue;
        };
        match reencode_in_place(backend, path, *expected, quality) {
            Ok(()) => repaired.converted.push(path.clone()),
            Err(e) => repaired.failed.push((path.clone(), e.to_string())),
        }
    }
    repaired
}

/// Encode to a sibling `.tmp` file, then rename it over the original.
///
/// On failure the temp file is removed and the original is untouched.
fn reencode_in_place(
    backend: &impl ImageBackend,
    path: &Path,
    format: OutputFormat,
    quality: Quality,
) -> Result<(), BackendError> {
    let dims = backend.identify(path)?;
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let params = ExportParams {
        source: path.to_path_buf(),
        width: dims.width,
        height: dims.height,
        quality,
        outputs: vec![(format, tmp.clone())],
    };
    let result = backend
        .export(&params)
        .and_then(|()| std::fs::rename(&tmp, path).map_err(BackendError::from));
    if result.is_err() {
        remove_outputs([tmp.as_path()]);
    }
    result
}
