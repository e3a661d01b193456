//! Media model shared by every stage.
//!
//! A [`MediaEntry`] is one discovered file. Its [`MediaKind`] is derived from
//! the file extension alone; file contents are never inspected.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of a media file, decided by extension lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Unknown,
}

impl MediaKind {
    /// Upper-case tag used in rename reports (`IMAGE`, `VIDEO`, `FILE`).
    pub fn tag(self) -> &'static str {
        match self {
            MediaKind::Image => "IMAGE",
            MediaKind::Video => "VIDEO",
            MediaKind::Unknown => "FILE",
        }
    }
}

/// The two recognized extension lists, stored without the leading dot.
///
/// Matching is ASCII case-insensitive: `photo.JPG` and `photo.Jpg` both match
/// `jpg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediaExtensionSet {
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff"];
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "webm", "mkv"];

impl Default for MediaExtensionSet {
    fn default() -> Self {
        Self {
            images: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            videos: DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl MediaExtensionSet {
    /// Classify a path by its extension.
    pub fn classify(&self, path: impl AsRef<Path>) -> MediaKind {
        let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return MediaKind::Unknown;
        };
        if contains_ignore_case(&self.images, ext) {
            MediaKind::Image
        } else if contains_ignore_case(&self.videos, ext) {
            MediaKind::Video
        } else {
            MediaKind::Unknown
        }
    }

    /// Whether the scanner should pick this path up.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        self.classify(path) != MediaKind::Unknown
    }
}

fn contains_ignore_case(list: &[String], ext: &str) -> bool {
    list.iter()
        .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// One discovered image or video file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaEntry {
    /// Path relative to the project root, always `/`-separated.
    pub path: String,
    pub kind: MediaKind,
    /// Last modification time, when the filesystem reports one.
    #[serde(skip)]
    pub modified: Option<DateTime<Local>>,
}

impl MediaEntry {
    pub fn new(path: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            path: path.into(),
            kind,
            modified: None,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// File name without directories or extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.path)
    }

    /// Lowercased extension without the dot, empty if there is none.
    pub fn extension(&self) -> String {
        Path::new(&self.path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}

/// MIME type for the `<source type=…>` attribute of a video card.
pub fn video_mime_type(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "mkv" => "video/x-matroska",
        _ => "video/mp4",
    }
}
