//! Shared test utilities.
//!
//! Provides fixture setup, file builders, and manifest lookups that panic with
//! a readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(&GalleryConfig::default(), tmp.path()).unwrap();
//!
//! let hp = find_section(&manifest, "HP");
//! assert_eq!(entry_paths(hp), vec!["HP/2026/Lab_Tour.MOV", ...]);
//! ```

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use crate::scan::{Manifest, ScannedSection};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Create each relative path under `root` with placeholder contents.
pub fn write_files(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, format!("fake media: {file}")).unwrap();
    }
}

/// Create `name` in `dir` and set its modification time to
/// `base + offset_secs`.
pub fn write_with_mtime(dir: &Path, name: &str, offset_secs: u64) {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, format!("fake media: {name}")).unwrap();
    let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let file = fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(base + Duration::from_secs(offset_secs))
        .unwrap();
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

// =========================================================================
// Manifest lookups
// =========================================================================

/// Find a section by label. Panics if not found.
pub fn find_section<'a>(manifest: &'a Manifest, label: &str) -> &'a ScannedSection {
    manifest.section(label).unwrap_or_else(|| {
        panic!(
            "section '{label}' not found. Available: {:?}",
            section_labels(manifest)
        )
    })
}

/// All section labels in manifest order.
pub fn section_labels(manifest: &Manifest) -> Vec<&str> {
    manifest.sections.iter().map(|s| s.label.as_str()).collect()
}

/// Entry paths of a section in scan order.
pub fn entry_paths(section: &ScannedSection) -> Vec<&str> {
    section.entries.iter().map(|e| e.path.as_str()).collect()
}
