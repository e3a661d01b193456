//! CLI output formatting.
//!
//! # Entity Display Contract
//!
//! Every entity (section, media file, rename step) follows the same two-level
//! pattern:
//!
//! 1. **Header line**: positional index + title (+ optional detail)
//! 2. **Context lines**: indented `Source:` lines, outcome details
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Sections
//! 001 Human Practices (3 media: 1 images, 2 videos)
//!     Source: HP/
//!     001 Lab Tour [video]
//!         Source: HP/2026/Lab_Tour.MOV
//! 002 Art & Design (not found)
//!     Source: ART/
//!
//! Total: 3 media files
//! ```
//!
//! ## Build
//!
//! ```text
//! Page → gallery.html
//! Snippet → gallery_snippet.html
//! Data → gallery_data.json
//! Generated 2 sections, 3 media files
//! ```
//!
//! ## Rename
//!
//! ```text
//! ART (2 files)
//!     001 sketch.PNG → MEDIA-ART-001.png [IMAGE]
//!     002 MEDIA-ART-002.jpg (unchanged) [IMAGE]
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::GenerateResult;
use crate::media::MediaKind;
use crate::naming::display_title;
use crate::rename::{RenamePlan, RenameReport, StepOutcome};
use crate::scan::Manifest;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
        MediaKind::Unknown => "file",
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scan listing: each section, then each media file in it.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    for (i, section) in manifest.sections.iter().enumerate() {
        let detail = if !section.found {
            "not found".to_string()
        } else {
            format!(
                "{} media: {} images, {} videos",
                section.entries.len(),
                section.image_count(),
                section.video_count()
            )
        };
        lines.push(format!("{} {} ({})", format_index(i + 1), section.title, detail));
        lines.push(format!("{}Source: {}/", indent(1), section.directory));

        for (j, entry) in section.entries.iter().enumerate() {
            lines.push(format!(
                "{}{} {} [{}]",
                indent(1),
                format_index(j + 1),
                display_title(entry.stem()),
                kind_label(entry.kind)
            ));
            lines.push(format!("{}Source: {}", indent(2), entry.path));
        }
    }

    lines.push(String::new());
    lines.push(format!("Total: {} media files", manifest.total()));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the list of written files.
pub fn format_generate_output(manifest: &Manifest, result: &GenerateResult) -> Vec<String> {
    let mut lines = vec![format!("Page \u{2192} {}", file_name(&result.page))];
    if let Some(snippet) = &result.snippet {
        lines.push(format!("Snippet \u{2192} {}", file_name(snippet)));
    }
    if let Some(data) = &result.data {
        lines.push(format!("Data \u{2192} {}", file_name(data)));
    }
    lines.push(format!(
        "Generated {} sections, {} media files",
        manifest.sections.len(),
        manifest.total()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_generate_output(manifest: &Manifest, result: &GenerateResult) {
    for line in format_generate_output(manifest, result) {
        println!("{}", line);
    }
}

// ============================================================================
// Rename output
// ============================================================================

/// Format a rename preview. Nothing has been touched yet.
pub fn format_rename_plan(plan: &RenamePlan) -> Vec<String> {
    if plan.steps.is_empty() {
        return vec![format!("{}: no media files found", plan.label)];
    }

    let mut lines = vec![format!("{} ({} files)", plan.label, plan.steps.len())];
    for (i, step) in plan.steps.iter().enumerate() {
        if step.is_unchanged() {
            lines.push(format!(
                "{}{} {} (unchanged) [{}]",
                indent(1),
                format_index(i + 1),
                step.source_name(),
                step.kind.tag()
            ));
        } else {
            lines.push(format!(
                "{}{} {} \u{2192} {} [{}]",
                indent(1),
                format_index(i + 1),
                step.source_name(),
                step.destination_name(),
                step.kind.tag()
            ));
        }
    }
    lines
}

/// Print a rename preview to stdout.
pub fn print_rename_plan(plan: &RenamePlan) {
    for line in format_rename_plan(plan) {
        println!("{}", line);
    }
}

/// Format what a rename run did to one section.
pub fn format_rename_report(report: &RenameReport) -> Vec<String> {
    if report.results.is_empty() {
        return vec![format!("{}: no media files found", report.label)];
    }

    let mut lines = vec![report.label.clone()];
    for (i, result) in report.results.iter().enumerate() {
        let index = format_index(i + 1);
        let line = match &result.outcome {
            StepOutcome::Renamed => format!(
                "{} {} \u{2192} {} [{}]",
                index,
                result.from,
                result.to,
                result.kind.tag()
            ),
            StepOutcome::Unchanged => {
                format!("{} {} (unchanged) [{}]", index, result.from, result.kind.tag())
            }
            StepOutcome::Failed(err) => format!("{} {} failed: {}", index, result.from, err),
        };
        lines.push(format!("{}{}", indent(1), line));
    }
    lines.push(format!(
        "{}Renamed {}, unchanged {}, failed {}",
        indent(1),
        report.renamed(),
        report.unchanged(),
        report.failed()
    ));
    lines
}

/// Format the closing totals of a rename run over several sections.
pub fn format_rename_summary(reports: &[RenameReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        lines.push(format!("{}: {} files renamed", report.label, report.renamed()));
    }
    let total: usize = reports.iter().map(|r| r.renamed()).sum();
    let failed: usize = reports.iter().map(|r| r.failed()).sum();
    lines.push(format!("Total: {} files renamed, {} failed", total, failed));
    lines
}

/// Print rename results and totals to stdout.
pub fn print_rename_reports(reports: &[RenameReport]) {
    for report in reports {
        for line in format_rename_report(report) {
            println!("{}", line);
        }
    }
    for line in format_rename_summary(reports) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
