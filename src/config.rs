//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `gallery.toml`. Stock defaults are
//! overridden by the user file found in the project root (or passed with
//! `--config`). The user file is sparse: only the keys it names change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [[sections]]
//! label = "HP"                  # Category label (rename tag, JSON key)
//! title = "Human Practices"     # Heading shown on the page
//! directory = "HP"              # Scanned recursively, relative to the root
//!
//! [[sections]]
//! label = "ART"
//! title = "Art & Design"
//! directory = "ART"
//!
//! [extensions]
//! images = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff"]
//! videos = ["mp4", "avi", "mov", "wmv", "flv", "webm", "mkv"]
//!
//! [output]
//! directory = "."
//! page = "gallery.html"
//! snippet = "gallery_snippet.html"
//! data = "gallery_data.json"
//!
//! [page]
//! title = "Media Gallery"
//! subtitle = "Documenting our work in pictures and video"
//!
//! [colors]
//! primary = "#255A3B"
//! accent = "#81B095"
//! background = "#F7FAF8"
//! text = "#1F2A24"
//!
//! [rename]
//! prefix = "MEDIA"
//! ```
//!
//! An array of tables (`[[sections]]`) replaces the default list as a whole.
//! Unknown keys are rejected to catch typos early.

use crate::media::MediaExtensionSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Collections to scan, in page order.
    pub sections: Vec<SectionConfig>,
    /// Recognized image and video extensions.
    pub extensions: MediaExtensionSet,
    /// Where generated files go and what they are called.
    pub output: OutputConfig,
    /// Page title and subtitle.
    pub page: PageConfig,
    /// Palette injected as CSS custom properties.
    pub colors: ColorConfig,
    /// Canonical naming scheme for the renamer.
    pub rename: RenameConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                SectionConfig::new("HP", "Human Practices", "HP"),
                SectionConfig::new("ART", "Art & Design", "ART"),
            ],
            extensions: MediaExtensionSet::default(),
            output: OutputConfig::default(),
            page: PageConfig::default(),
            colors: ColorConfig::default(),
            rename: RenameConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[sections]] entry is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.label.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "sections.label must not be empty".into(),
                ));
            }
            // Labels end up in file names and HTML anchor ids.
            let valid_chars = section
                .label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid_chars {
                return Err(ConfigError::Validation(format!(
                    "sections.label '{}' may only contain ASCII letters, digits, '-' and '_'",
                    section.label
                )));
            }
            if !seen.insert(section.label.to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section label '{}' (labels are compared ignoring case)",
                    section.label
                )));
            }
        }
        if self.extensions.images.is_empty() && self.extensions.videos.is_empty() {
            return Err(ConfigError::Validation(
                "extensions.images and extensions.videos must not both be empty".into(),
            ));
        }
        if self.rename.prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "rename.prefix must not be empty".into(),
            ));
        }
        if self.rename.prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "rename.prefix must not contain path separators".into(),
            ));
        }
        // Colors are spliced into the page's <style> block unescaped.
        for (key, value) in [
            ("colors.primary", &self.colors.primary),
            ("colors.accent", &self.colors.accent),
            ("colors.background", &self.colors.background),
            ("colors.text", &self.colors.text),
        ] {
            if value.contains(['<', '>', '{', '}', ';']) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a plain CSS color, got '{value}'"
                )));
            }
        }
        Ok(())
    }

    /// Look a section up by label (case-sensitive).
    pub fn section(&self, label: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.label == label)
    }
}

/// One scanned collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Category label, e.g. `ART`. Used in rename targets and as JSON key.
    pub label: String,
    /// Heading on the generated page. Defaults to the label.
    #[serde(default)]
    pub title: String,
    /// Directory scanned recursively, relative to the project root.
    pub directory: PathBuf,
}

impl SectionConfig {
    pub fn new(label: &str, title: &str, directory: impl Into<PathBuf>) -> Self {
        Self {
            label: label.to_string(),
            title: title.to_string(),
            directory: directory.into(),
        }
    }

    /// Display heading, falling back to the label.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.label
        } else {
            &self.title
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory, relative to the project root.
    pub directory: PathBuf,
    /// Full gallery page.
    pub page: String,
    /// Embeddable fragment. Empty string disables it.
    pub snippet: String,
    /// JSON sidecar. Empty string disables it.
    pub data: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            page: "gallery.html".to_string(),
            snippet: "gallery_snippet.html".to_string(),
            data: "gallery_data.json".to_string(),
        }
    }
}

/// Page text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub title: String,
    pub subtitle: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Media Gallery".to_string(),
            subtitle: "Documenting our work in pictures and video".to_string(),
        }
    }
}

/// Page palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Headings and buttons.
    pub primary: String,
    /// Borders, badges and hover states.
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#255A3B".to_string(),
            accent: "#81B095".to_string(),
            background: "#F7FAF8".to_string(),
            text: "#1F2A24".to_string(),
        }
    }
}

/// Renamer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameConfig {
    /// Leading part of `<prefix>-<label>-<NNN>.<ext>`.
    pub prefix: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            prefix: "MEDIA".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (arrays included) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when it
/// does not exist.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        log::info!("Loaded config from {}", path.display());
    } else {
        log::debug!("No config at {}, using defaults", path.display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# media-gal configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Sections: each one is scanned recursively and rendered as its own gallery.
# Declaring any [[sections]] replaces this whole list.
# ---------------------------------------------------------------------------
[[sections]]
label = "HP"                  # Category label: rename tag and JSON key (A-Z, 0-9, - and _)
title = "Human Practices"     # Heading on the page (defaults to label)
directory = "HP"              # Relative to the project root

[[sections]]
label = "ART"
title = "Art & Design"
directory = "ART"

# ---------------------------------------------------------------------------
# Recognized extensions (matched case-insensitively, no leading dot needed)
# ---------------------------------------------------------------------------
[extensions]
images = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff"]
videos = ["mp4", "avi", "mov", "wmv", "flv", "webm", "mkv"]

# ---------------------------------------------------------------------------
# Generated files
# ---------------------------------------------------------------------------
[output]
directory = "."
page = "gallery.html"
snippet = "gallery_snippet.html"   # "" disables the embeddable fragment
data = "gallery_data.json"         # "" disables the JSON sidecar

# ---------------------------------------------------------------------------
# Page text
# ---------------------------------------------------------------------------
[page]
title = "Media Gallery"
subtitle = "Documenting our work in pictures and video"

# ---------------------------------------------------------------------------
# Palette (CSS colors)
# ---------------------------------------------------------------------------
[colors]
primary = "#255A3B"
accent = "#81B095"
background = "#F7FAF8"
text = "#1F2A24"

# ---------------------------------------------------------------------------
# Renamer: files become <prefix>-<label>-<NNN>.<ext>
# ---------------------------------------------------------------------------
[rename]
prefix = "MEDIA"
"##
}

/// Generate CSS custom properties from the palette.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-accent: {accent};
    --color-bg: {background};
    --color-text: {text};
}}"#,
        primary = colors.primary,
        accent = colors.accent,
        background = colors.background,
        text = colors.text,
    )
}
