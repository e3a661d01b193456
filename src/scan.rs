//! Filesystem scanning.
//!
//! Walks every configured section directory, keeps files whose extension is in
//! the [`MediaExtensionSet`], and produces a [`Manifest`] that the renderer,
//! the JSON sidecar and the CLI report all consume.
//!
//! ## Directory Structure
//!
//! ```text
//! project/                         # Project root (paths are relative to it)
//! ├── gallery.toml                 # Optional configuration
//! ├── HP/                          # Section "HP"
//! │   ├── interview_day.mp4
//! │   ├── poster.webp
//! │   └── 2026/                    # Subdirectories are scanned too
//! │       └── Lab_Tour.MOV
//! └── ART/                         # Section "ART"
//!     ├── sunrise_study.jpg
//!     └── .drafts/                 # Hidden entries are skipped
//! ```
//!
//! ## Ordering
//!
//! Entries are deduplicated by relative path and sorted lexicographically on
//! that path, so the output is identical across runs and platforms.
//!
//! ## Missing Directories
//!
//! A section whose directory does not exist is not an error: it is logged,
//! marked as not found, and rendered as an empty section.

use crate::config::{GalleryConfig, SectionConfig};
use crate::media::{MediaEntry, MediaExtensionSet, MediaKind};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// `last_updated` format, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Result of scanning every configured section.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub sections: Vec<ScannedSection>,
    /// Scan time as `YYYY-MM-DD HH:MM:SS`.
    pub last_updated: String,
}

impl Manifest {
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn section(&self, label: &str) -> Option<&ScannedSection> {
        self.sections.iter().find(|s| s.label == label)
    }
}

/// One section and what was found in it.
#[derive(Debug, Serialize)]
pub struct ScannedSection {
    pub label: String,
    pub title: String,
    /// Section directory as configured.
    pub directory: String,
    /// False when the directory did not exist.
    pub found: bool,
    pub entries: Vec<MediaEntry>,
}

impl ScannedSection {
    pub fn image_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_image()).count()
    }

    pub fn video_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_video()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scan every configured section under `root`.
pub fn scan(config: &GalleryConfig, root: &Path) -> Result<Manifest, ScanError> {
    let mut sections = Vec::with_capacity(config.sections.len());
    for section in &config.sections {
        sections.push(scan_section(section, &config.extensions, root)?);
    }

    Ok(Manifest {
        sections,
        last_updated: format_timestamp(&Local::now()),
    })
}

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

fn scan_section(
    section: &SectionConfig,
    extensions: &MediaExtensionSet,
    root: &Path,
) -> Result<ScannedSection, ScanError> {
    let dir = resolve_dir(root, &section.directory);
    let found = dir.exists();
    let entries = scan_directory(&dir, extensions, root)?;

    Ok(ScannedSection {
        label: section.label.clone(),
        title: section.display_title().to_string(),
        directory: section.directory.to_string_lossy().to_string(),
        found,
        entries,
    })
}

/// Join a configured directory onto the project root unless it is absolute.
pub fn resolve_dir(root: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}

/// Recursively collect media files under `dir`.
///
/// Returned paths are relative to `root`, `/`-separated, unique, and sorted
/// in ascending lexicographic order. A missing `dir` yields an empty list.
pub fn scan_directory(
    dir: &Path,
    extensions: &MediaExtensionSet,
    root: &Path,
) -> Result<Vec<MediaEntry>, ScanError> {
    if !dir.exists() {
        log::warn!("Directory not found: {}", dir.display());
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let canonical_root = root.canonicalize().ok();
    let mut found: BTreeMap<String, MediaEntry> = BTreeMap::new();

    let walker = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let kind = extensions.classify(path);
        if kind == MediaKind::Unknown {
            log::trace!("Ignoring {}", path.display());
            continue;
        }

        let rel = relative_path(path, root, canonical_root.as_deref());
        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Local>::from);

        log::debug!("Found {:?} {}", kind, rel);
        found.entry(rel.clone()).or_insert(MediaEntry {
            path: rel,
            kind,
            modified,
        });
    }

    Ok(found.into_values().collect())
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Express `path` relative to `root` as a `/`-separated string.
///
/// Falls back to the canonical forms when the plain prefix does not match
/// (e.g. an absolute section directory below a relative root), and to the
/// path itself when it lies outside the root entirely.
fn relative_path(path: &Path, root: &Path, canonical_root: Option<&Path>) -> String {
    if let Ok(rel) = path.strip_prefix(root) {
        return to_slash(rel);
    }
    if let Some(canonical_root) = canonical_root
        && let Ok(canonical) = path.canonicalize()
        && let Ok(rel) = canonical.strip_prefix(canonical_root)
    {
        return to_slash(rel);
    }
    to_slash(path)
}

fn to_slash(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            other => Some(other.as_os_str().to_string_lossy().to_string()),
        })
        .collect();
    parts.join("/")
}
