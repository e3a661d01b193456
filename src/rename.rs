//! Sequential renaming into the canonical naming scheme.
//!
//! Media files directly inside a section directory (no recursion) are ordered
//! by modification time, oldest first, and renamed to
//! `<prefix>-<label>-<NNN>.<ext>`:
//!
//! ```text
//! ART/                              ART/
//! ├── sketch.PNG      (mtime 1) →   ├── MEDIA-ART-001.png
//! ├── final_v2.jpg    (mtime 2) →   ├── MEDIA-ART-002.jpg
//! └── poster.jpg      (mtime 3) →   └── MEDIA-ART-003.jpg
//! ```
//!
//! ## Execution
//!
//! A run happens in two passes so that a destination which is itself still
//! waiting to be renamed is never clobbered:
//!
//! 1. every moving file goes to a hidden temporary name in the same directory,
//! 2. every temporary goes to its final name. Anything still occupying the
//!    final name at that point is removed first (last writer wins).
//!
//! Files already carrying their final name are left alone. A failure on one
//! file is recorded in the [`RenameReport`] and the run continues with the
//! next file. Nothing is rolled back.

use crate::config::{GalleryConfig, SectionConfig};
use crate::media::{MediaExtensionSet, MediaKind};
use crate::naming::canonical_name;
use crate::scan::resolve_dir;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// One planned move.
#[derive(Debug, Clone)]
pub struct RenameStep {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: MediaKind,
}

impl RenameStep {
    pub fn source_name(&self) -> String {
        file_name(&self.source)
    }

    pub fn destination_name(&self) -> String {
        file_name(&self.destination)
    }

    /// The file already has its canonical name.
    pub fn is_unchanged(&self) -> bool {
        self.source == self.destination
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// The ordered moves for one section directory.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub label: String,
    pub directory: PathBuf,
    pub steps: Vec<RenameStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Renamed,
    Unchanged,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct StepResult {
    pub from: String,
    pub to: String,
    pub kind: MediaKind,
    pub outcome: StepOutcome,
}

/// What happened to every step of a plan.
#[derive(Debug, Clone)]
pub struct RenameReport {
    pub label: String,
    pub results: Vec<StepResult>,
}

impl RenameReport {
    pub fn renamed(&self) -> usize {
        self.count(|o| *o == StepOutcome::Renamed)
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| *o == StepOutcome::Unchanged)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

// ============================================================================
// Planning
// ============================================================================

/// Media files directly inside `dir`, oldest modification time first.
///
/// Ties are broken by file name. Hidden files are skipped.
pub fn list_media_files(
    dir: &Path,
    extensions: &MediaExtensionSet,
) -> Result<Vec<PathBuf>, RenameError> {
    if !dir.is_dir() {
        return Err(RenameError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !path.is_file() || !extensions.matches(&path) {
            continue;
        }
        let mtime = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or_else(|err| {
                log::warn!("No modification time for {}: {err}", path.display());
                SystemTime::UNIX_EPOCH
            });
        files.push((mtime, path));
    }

    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Compute the moves for one directory without touching it.
pub fn plan(
    dir: &Path,
    label: &str,
    prefix: &str,
    extensions: &MediaExtensionSet,
) -> Result<RenamePlan, RenameError> {
    let files = list_media_files(dir, extensions)?;
    let steps = files
        .into_iter()
        .enumerate()
        .map(|(i, source)| {
            let ext = source
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();
            let destination = dir.join(canonical_name(prefix, label, i + 1, &ext));
            let kind = extensions.classify(&source);
            RenameStep {
                source,
                destination,
                kind,
            }
        })
        .collect();

    Ok(RenamePlan {
        label: label.to_string(),
        directory: dir.to_path_buf(),
        steps,
    })
}

/// Plan every selected section (all of them when `labels` is empty).
/// Repeated labels are planned once.
///
/// Fails before planning anything if a label is unknown or a section
/// directory is missing.
pub fn plan_sections(
    config: &GalleryConfig,
    root: &Path,
    labels: &[String],
) -> Result<Vec<RenamePlan>, RenameError> {
    let mut selected: Vec<&SectionConfig> = Vec::new();
    if labels.is_empty() {
        selected.extend(config.sections.iter());
    } else {
        for label in labels {
            let section = config
                .section(label)
                .ok_or_else(|| RenameError::UnknownSection(label.clone()))?;
            // A repeated label would plan files its first plan already moved.
            if !selected.iter().any(|s| s.label == section.label) {
                selected.push(section);
            }
        }
    }

    let dirs: Vec<PathBuf> = selected
        .iter()
        .map(|s| resolve_dir(root, &s.directory))
        .collect();
    if let Some(missing) = dirs.iter().find(|d| !d.is_dir()) {
        return Err(RenameError::MissingDirectory(missing.clone()));
    }

    selected
        .iter()
        .zip(dirs)
        .map(|(section, dir)| {
            plan(
                &dir,
                &section.label,
                &config.rename.prefix,
                &config.extensions,
            )
        })
        .collect()
}

// ============================================================================
// Execution
// ============================================================================

fn temp_path(step: &RenameStep, index: usize) -> PathBuf {
    let dir = step.destination.parent().unwrap_or_else(|| Path::new("."));
    dir.join(format!(".media-gal-{index}-{}.tmp", step.destination_name()))
}

/// Carry out a plan, continuing past individual failures.
pub fn execute(plan: &RenamePlan) -> RenameReport {
    let mut outcomes: Vec<Option<StepOutcome>> = vec![None; plan.steps.len()];
    let mut staged: Vec<Option<PathBuf>> = vec![None; plan.steps.len()];

    // Pass 1: move every changing file out of the way.
    for (i, step) in plan.steps.iter().enumerate() {
        if step.is_unchanged() {
            outcomes[i] = Some(StepOutcome::Unchanged);
            continue;
        }
        let temp = temp_path(step, i);
        let staged_move = remove_if_exists(&temp).and_then(|_| fs::rename(&step.source, &temp));
        match staged_move {
            Ok(()) => staged[i] = Some(temp),
            Err(err) => {
                log::error!("Rename failed for {}: {err}", step.source_name());
                outcomes[i] = Some(StepOutcome::Failed(err.to_string()));
            }
        }
    }

    // Sources that could not be staged are still in place and must survive.
    let stuck: Vec<&Path> = plan
        .steps
        .iter()
        .zip(&staged)
        .filter(|(step, temp)| temp.is_none() && !step.is_unchanged())
        .map(|(step, _)| step.source.as_path())
        .collect();

    // Pass 2: move staged files to their final names.
    for (i, step) in plan.steps.iter().enumerate() {
        let Some(temp) = &staged[i] else {
            continue;
        };
        let outcome = if stuck.contains(&step.destination.as_path()) {
            let message = format!(
                "{} is occupied by a file that could not be moved",
                step.destination_name()
            );
            restore(temp, step);
            StepOutcome::Failed(message)
        } else {
            let moved =
                remove_if_exists(&step.destination).and_then(|_| fs::rename(temp, &step.destination));
            match moved {
                Ok(()) => {
                    log::debug!("{} -> {}", step.source_name(), step.destination_name());
                    StepOutcome::Renamed
                }
                Err(err) => {
                    restore(temp, step);
                    StepOutcome::Failed(err.to_string())
                }
            }
        };
        if let StepOutcome::Failed(message) = &outcome {
            log::error!("Rename failed for {}: {message}", step.source_name());
        }
        outcomes[i] = Some(outcome);
    }

    let results = plan
        .steps
        .iter()
        .zip(outcomes)
        .map(|(step, outcome)| StepResult {
            from: step.source_name(),
            to: step.destination_name(),
            kind: step.kind,
            outcome: outcome.unwrap_or(StepOutcome::Unchanged),
        })
        .collect();

    RenameReport {
        label: plan.label.clone(),
        results,
    }
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Put a staged file back under its original name after a failed final move.
fn restore(temp: &Path, step: &RenameStep) {
    if step.source.exists() {
        log::warn!(
            "Left {} in place; {} is taken",
            temp.display(),
            step.source.display()
        );
        return;
    }
    if let Err(err) = fs::rename(temp, &step.source) {
        log::warn!(
            "Could not restore {} to {}: {err}",
            temp.display(),
            step.source.display()
        );
    }
}
