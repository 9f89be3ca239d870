//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Export
//!
//! ```text
//! Exporting 12 images → public/images/gallery
//!
//!   OK: shingle-roof-completed-maine-01.webp (1920x1440)
//!   SKIP: Source not found: raw/shingles/dji_fly_0223.JPG
//!   ERROR: raw/metal/20251014.jpg: Processing failed: Failed to decode ...
//!
//! Processed 10 images (1 skipped, 1 failed)
//! Manifest saved to: public/images/gallery/manifest.json
//!
//! Summary by category:
//!   shingle: 4 images
//!   metal: 6 images
//! ```
//!
//! ## Verify --fix
//!
//! ```text
//!   CONVERTED: public/images/gallery/metal-roof-01.webp
//! Converted 1 of 1 file
//! ```
//!
//! ## Check
//!
//! ```text
//! Catalog: 12 entries
//!   MISSING: #4 raw/shingles/dji_fly_0223.JPG
//! 11 of 12 sources found
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions do no I/O.

use crate::export::{CheckReport, ExportEvent, ExportReport};
use crate::manifest::Manifest;
use crate::verify::{Problem, RepairReport, VerifyReport};

/// `1 image`, `2 images`; irregular plurals pass their own form.
fn count(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

// ============================================================================
// Export
// ============================================================================

/// Format a single export progress event as display lines.
pub fn format_export_event(event: &ExportEvent) -> Vec<String> {
    match event {
        ExportEvent::Started { total, output_dir } => vec![
            format!("Exporting {} → {}", count(*total, "image", "images"), output_dir.display()),
            String::new(),
        ],
        ExportEvent::Exported {
            output,
            width,
            height,
            ..
        } => vec![format!("  OK: {} ({}x{})", output, width, height)],
        ExportEvent::Skipped { source, .. } => {
            vec![format!("  SKIP: Source not found: {}", source.display())]
        }
        ExportEvent::Failed { source, cause, .. } => {
            vec![format!("  ERROR: {}: {}", source.display(), cause)]
        }
        // Reported by the summary instead.
        ExportEvent::ManifestWritten { .. } => Vec::new(),
    }
}

/// Per-category tally of the manifest.
pub fn format_category_summary(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Summary by category:".to_string()];
    for (category, n) in manifest.category_counts() {
        lines.push(format!("  {}: {}", category, count(n, "image", "images")));
    }
    lines
}

/// End-of-run summary: counts, manifest location, category tally.
pub fn format_export_summary(report: &ExportReport) -> Vec<String> {
    let mut headline = format!("Processed {}", count(report.manifest.len(), "image", "images"));
    if report.skipped > 0 || report.failed > 0 {
        headline.push_str(&format!(
            " ({} skipped, {} failed)",
            report.skipped, report.failed
        ));
    }

    let mut lines = vec![
        String::new(),
        headline,
        format!("Manifest saved to: {}", report.manifest_path.display()),
    ];
    if !report.manifest.is_empty() {
        lines.push(String::new());
        lines.extend(format_category_summary(&report.manifest));
    }
    lines
}

pub fn print_export_summary(report: &ExportReport) {
    for line in format_export_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!("Catalog: {}", count(report.total, "entry", "entries"))];
    for (index, path) in &report.missing {
        lines.push(format!("  MISSING: #{} {}", index + 1, path.display()));
    }
    lines.push(format!(
        "{} of {} sources found",
        report.total - report.missing.len(),
        report.total
    ));
    lines
}

pub fn print_check_report(report: &CheckReport) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Verify
// ============================================================================

fn format_problem(problem: &Problem) -> String {
    match problem {
        Problem::BadSignature { path, expected } => {
            format!("  INVALID: {} is not a valid {} file", path.display(), expected)
        }
        Problem::Missing { src } => format!("  MISSING: {}", src),
        Problem::DimensionMismatch {
            src,
            recorded,
            actual,
        } => format!(
            "  MISMATCH: {} is {}x{}, manifest says {}x{}",
            src, actual.0, actual.1, recorded.0, recorded.1
        ),
        Problem::Unreadable { path, cause } => {
            format!("  ERROR: {}: {}", path.display(), cause)
        }
    }
}

pub fn format_verify_report(report: &VerifyReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Checked {} and {}",
        count(report.files_checked, "file", "files"),
        count(report.entries_checked, "manifest entry", "manifest entries")
    )];
    lines.extend(report.problems.iter().map(format_problem));
    if report.is_ok() {
        lines.push("All outputs are valid".to_string());
    } else {
        lines.push(format!("Found {}", count(report.problems.len(), "problem", "problems")));
    }
    lines
}

pub fn print_verify_report(report: &VerifyReport) {
    for line in format_verify_report(report) {
        println!("{}", line);
    }
}

pub fn format_repair_report(report: &RepairReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .converted
        .iter()
        .map(|path| format!("  CONVERTED: {}", path.display()))
        .collect();
    for (path, cause) in &report.failed {
        lines.push(format!("  ERROR: {}: {}", path.display(), cause));
    }
    let total = report.converted.len() + report.failed.len();
    lines.push(format!(
        "Converted {} of {}",
        report.converted.len(),
        count(total, "file", "files")
    ));
    lines
}

pub fn print_repair_report(report: &RepairReport) {
    for line in format_repair_report(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::OutputFormat;
    use crate::manifest::ManifestEntry;
    use std::path::PathBuf;

    fn manifest_with(categories: &[&str]) -> Manifest {
        let mut manifest = Manifest::new();
        for c in categories {
            manifest.push(ManifestEntry {
                src: format!("/img/{c}.webp"),
                fallback: None,
                alt: "alt".to_string(),
                title: None,
                category: c.to_string(),
                featured: false,
                width: 1,
                height: 1,
            });
        }
        manifest
    }

    #[test]
    fn ok_line_shows_output_and_dimensions() {
        let lines = format_export_event(&ExportEvent::Exported {
            index: 0,
            output: "shingle-roof-completed-maine-01.webp".to_string(),
            width: 1920,
            height: 1440,
        });
        assert_eq!(lines, vec!["  OK: shingle-roof-completed-maine-01.webp (1920x1440)"]);
    }

    #[test]
    fn skip_and_error_lines() {
        let skip = format_export_event(&ExportEvent::Skipped {
            index: 3,
            source: PathBuf::from("raw/gone.jpg"),
        });
        assert_eq!(skip, vec!["  SKIP: Source not found: raw/gone.jpg"]);

        let error = format_export_event(&ExportEvent::Failed {
            index: 4,
            source: PathBuf::from("raw/bad.jpg"),
            cause: "Processing failed: truncated".to_string(),
        });
        assert_eq!(error, vec!["  ERROR: raw/bad.jpg: Processing failed: truncated"]);
    }

    #[test]
    fn started_line_pluralizes() {
        let lines = format_export_event(&ExportEvent::Started {
            total: 1,
            output_dir: PathBuf::from("out"),
        });
        assert_eq!(lines[0], "Exporting 1 image → out");
    }

    #[test]
    fn manifest_written_prints_nothing() {
        let lines = format_export_event(&ExportEvent::ManifestWritten {
            path: PathBuf::from("out/manifest.json"),
            count: 2,
        });
        assert!(lines.is_empty());
    }

    #[test]
    fn summary_lists_categories_in_order() {
        let report = ExportReport {
            manifest: manifest_with(&["shingle", "metal", "shingle"]),
            manifest_path: PathBuf::from("out/manifest.json"),
            skipped: 1,
            failed: 0,
        };

        assert_eq!(
            format_export_summary(&report),
            vec![
                "",
                "Processed 3 images (1 skipped, 0 failed)",
                "Manifest saved to: out/manifest.json",
                "",
                "Summary by category:",
                "  shingle: 2 images",
                "  metal: 1 image",
            ]
        );
    }

    #[test]
    fn check_report_lines() {
        let report = CheckReport {
            total: 3,
            missing: vec![(1, PathBuf::from("raw/b.jpg"))],
        };
        assert_eq!(
            format_check_report(&report),
            vec!["Catalog: 3 entries", "  MISSING: #2 raw/b.jpg", "2 of 3 sources found"]
        );
    }

    #[test]
    fn verify_report_lines() {
        let report = VerifyReport {
            files_checked: 2,
            entries_checked: 1,
            problems: vec![Problem::BadSignature {
                path: PathBuf::from("out/a.webp"),
                expected: OutputFormat::Webp,
            }],
        };
        assert_eq!(
            format_verify_report(&report),
            vec![
                "Checked 2 files and 1 manifest entry",
                "  INVALID: out/a.webp is not a valid WebP file",
                "Found 1 problem",
            ]
        );
    }

    #[test]
    fn repair_report_lines() {
        let report = RepairReport {
            converted: vec![PathBuf::from("out/a.webp")],
            failed: vec![(PathBuf::from("out/b.webp"), "Processing failed: junk".to_string())],
        };
        assert_eq!(
            format_repair_report(&report),
            vec![
                "  CONVERTED: out/a.webp",
                "  ERROR: out/b.webp: Processing failed: junk",
                "Converted 1 of 2 files",
            ]
        );
    }
}
