//! # Media Gal
//!
//! Builds a browsable gallery out of plain directories of photos and videos,
//! and keeps those directories tidy with a sequential renamer.
//!
//! # Architecture
//!
//! ```text
//! 1. Scan      section dirs  →  Manifest                (filesystem → structured data)
//! 2. Generate  Manifest      →  page + snippet + JSON   (maud templates)
//!    Rename    section dir   →  RenamePlan → RenameReport
//! ```
//!
//! Scanning never touches the filesystem beyond reading it, and renaming is
//! split into a pure planning step and an execution step, so a preview is
//! exactly what an execution would do.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks every section directory and produces the [`scan::Manifest`] |
//! | [`media`] | Extension sets, media classification and the [`media::MediaEntry`] record |
//! | [`naming`] | Display titles from file stems, canonical rename targets |
//! | [`render`] | Maud templates for the full page, the snippet and the cards |
//! | [`generate`] | Writes the page, the snippet and the JSON sidecar |
//! | [`rename`] | Plans and executes `<PREFIX>-<LABEL>-<NNN>.<ext>` renames |
//! | [`menu`] | Interactive preview/confirm/execute loop over the renamer |
//! | [`config`] | `gallery.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting for scan, build and rename reports |
//!
//! # Design Decisions
//!
//! ## Sections Are Configuration
//!
//! Which directories form the gallery, their labels and display titles are
//! all read from `gallery.toml`. The stock defaults describe two sections
//! (`HP` and `ART`), so a project with that layout needs no config at all.
//!
//! ## Maud Over String Templates
//!
//! File names end up in HTML attributes and text. Maud escapes every
//! interpolated value, so a file called `<img onerror=x>.jpg` renders as
//! text. Media URLs are additionally percent-encoded.
//!
//! ## Self-Contained Output
//!
//! The page inlines its CSS and JavaScript. Media is referenced in place by
//! relative path; nothing is copied or transcoded. The output can be opened
//! straight from disk.
//!
//! ## Two-Pass Renames
//!
//! Renaming a directory in place can collide with its own targets: the file
//! that should become `MEDIA-ART-002.jpg` may currently be called
//! `MEDIA-ART-001.jpg`. Every changing file is first moved to a hidden staging
//! name, then to its final name, so no file is overwritten by a sibling.

pub mod config;
pub mod generate;
pub mod media;
pub mod menu;
pub mod naming;
pub mod output;
pub mod rename;
pub mod render;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
