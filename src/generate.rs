//! Output generation.
//!
//! Takes a scanned [`Manifest`] and writes the generated files into the
//! configured output directory.
//!
//! ## Generated Files
//!
//! ```text
//! <output>/
//! ├── gallery.html           # Full self-contained page (CSS + JS inline)
//! ├── gallery_snippet.html   # Embeddable fragment, section grids only
//! └── gallery_data.json      # Paths and counts per section
//! ```
//!
//! File names come from `[output]` in `gallery.toml`; an empty name turns the
//! snippet or the sidecar off. The page is always written.
//!
//! ## JSON Sidecar
//!
//! ```json
//! {
//!   "last_updated": "2026-10-16 09:30:00",
//!   "sections": { "ART": ["ART/a.jpg"], "HP": [] },
//!   "stats": {
//!     "sections": { "ART": { "images": 1, "videos": 0, "total": 1 },
//!                   "HP":  { "images": 0, "videos": 0, "total": 0 } },
//!     "total_all": 1
//!   }
//! }
//! ```

use crate::config::GalleryConfig;
use crate::render;
use crate::scan::{self, Manifest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Contents of the JSON sidecar.
#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryData {
    pub last_updated: String,
    /// Section label → relative media paths in scan order.
    pub sections: BTreeMap<String, Vec<String>>,
    pub stats: GalleryStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryStats {
    pub sections: BTreeMap<String, SectionStats>,
    pub total_all: usize,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionStats {
    pub images: usize,
    pub videos: usize,
    pub total: usize,
}

impl GalleryData {
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let mut sections = BTreeMap::new();
        let mut stats = BTreeMap::new();
        for section in &manifest.sections {
            sections.insert(
                section.label.clone(),
                section.entries.iter().map(|e| e.path.clone()).collect(),
            );
            stats.insert(
                section.label.clone(),
                SectionStats {
                    images: section.image_count(),
                    videos: section.video_count(),
                    total: section.entries.len(),
                },
            );
        }
        Self {
            last_updated: manifest.last_updated.clone(),
            sections,
            stats: GalleryStats {
                sections: stats,
                total_all: manifest.total(),
            },
        }
    }
}

/// What a generate run wrote.
#[derive(Debug)]
pub struct GenerateResult {
    pub page: PathBuf,
    pub snippet: Option<PathBuf>,
    pub data: Option<PathBuf>,
}

/// Write the page, snippet and sidecar for `manifest` under `root`.
pub fn generate(
    manifest: &Manifest,
    config: &GalleryConfig,
    root: &Path,
) -> Result<GenerateResult, GenerateError> {
    let output_dir = scan::resolve_dir(root, &config.output.directory);
    fs::create_dir_all(&output_dir)?;

    let prefix = render::asset_prefix(&config.output.directory);
    if config.output.directory.is_absolute() {
        log::warn!(
            "Output directory {} is absolute; media links stay relative to the project root",
            config.output.directory.display()
        );
    }

    let page = output_dir.join(&config.output.page);
    let html = render::render_page(manifest, config, &prefix);
    fs::write(&page, html.into_string())?;
    log::info!("Wrote {}", page.display());

    let snippet = if config.output.snippet.is_empty() {
        None
    } else {
        let path = output_dir.join(&config.output.snippet);
        fs::write(&path, render::render_snippet(manifest, &prefix).into_string())?;
        log::info!("Wrote {}", path.display());
        Some(path)
    };

    let data = if config.output.data.is_empty() {
        None
    } else {
        let path = output_dir.join(&config.output.data);
        let json = serde_json::to_string_pretty(&GalleryData::from_manifest(manifest))?;
        fs::write(&path, json)?;
        log::info!("Wrote {}", path.display());
        Some(path)
    };

    Ok(GenerateResult {
        page,
        snippet,
        data,
    })
}
