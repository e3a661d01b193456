//! HTML rendering.
//!
//! Turns scanned sections into markup with [maud](https://maud.lambda.xyz/).
//! Every interpolated value (file paths, titles, labels) goes through maud's
//! escaping, so a file called `"><script>.jpg` renders as text.
//!
//! ## Building Blocks
//!
//! - [`render_cards`]: `&[MediaEntry]` → card fragment (images and videos)
//! - [`render_section`]: one titled section, cards or an empty-state block
//! - [`render_page`]: the complete self-contained HTML document
//! - [`render_snippet`]: the embeddable fragment (section grids only)
//!
//! ## Static Assets
//!
//! Embedded at compile time:
//! - `static/gallery.css`: base styles (palette variables injected from config)
//! - `static/gallery.js`: lightbox and video play buttons

use crate::config::{self, GalleryConfig};
use crate::media::{MediaEntry, MediaKind, video_mime_type};
use crate::naming::display_title;
use crate::scan::{Manifest, ScannedSection};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::path::{Component, Path};

const CSS_STATIC: &str = include_str!("../static/gallery.css");
const JS: &str = include_str!("../static/gallery.js");

/// Format of the date line on a card.
const CARD_DATE_FORMAT: &str = "%b %d, %Y";

/// Prefix that turns a root-relative media path into a URL that resolves from
/// the output directory.
///
/// `"."` → `""`, `"site/out"` → `"../../"`. Absolute output directories and
/// ones that climb out with `..` cannot be inverted; media paths are then used
/// unchanged.
pub fn asset_prefix(output_dir: &Path) -> String {
    if output_dir.is_absolute() {
        return String::new();
    }
    let mut depth = 0;
    for component in output_dir.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(_) => depth += 1,
            _ => return String::new(),
        }
    }
    "../".repeat(depth)
}

/// Percent-encode a `/`-separated path for use in `src`/`href`.
///
/// Relative paths get `prefix` in front. Absolute paths (a section directory
/// outside the project root) become `file://` URLs and ignore the prefix.
pub fn media_url(prefix: &str, path: &str) -> String {
    let encoded = path
        .split('/')
        .map(|segment| urlencoding::encode(segment))
        .collect::<Vec<_>>()
        .join("/");
    if path.starts_with('/') {
        format!("file://{encoded}")
    } else {
        format!("{prefix}{encoded}")
    }
}

/// Anchor id for a section.
fn section_id(label: &str) -> String {
    format!("section-{}", label.to_lowercase())
}

// ============================================================================
// Cards
// ============================================================================

/// Renders one card per entry.
pub fn render_cards(entries: &[MediaEntry], prefix: &str) -> Markup {
    html! {
        @for entry in entries {
            (render_card(entry, prefix))
        }
    }
}

fn render_card(entry: &MediaEntry, prefix: &str) -> Markup {
    let title = display_title(entry.stem());
    let src = media_url(prefix, &entry.path);
    let date = entry
        .modified
        .map(|t| t.format(CARD_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "Added recently".to_string());

    match entry.kind {
        MediaKind::Video => html! {
            div.gallery-card.video-card data-kind="video" {
                div.card-image {
                    video.media-preview preload="metadata" {
                        source src=(src) type=(video_mime_type(&entry.extension()));
                        "Your browser does not support the video tag."
                    }
                    div.image-overlay {
                        button.play-btn type="button" data-action="play" {
                            span.play-icon { "▶" }
                            span.play-text { "Play Video" }
                        }
                    }
                    div.video-badge { "VIDEO" }
                }
                div.card-content {
                    h3.media-title { (title) }
                    p.media-date { "Video • " (date) }
                }
            }
        },
        _ => html! {
            div.gallery-card data-kind="image" {
                div.card-image {
                    img.media-preview src=(src) alt=(title) loading="lazy";
                    div.image-overlay {
                        button.view-btn type="button" data-action="view" { "View" }
                    }
                }
                div.card-content {
                    h3.media-title { (title) }
                    p.media-date { "Photo • " (date) }
                }
            }
        },
    }
}

/// Placeholder shown instead of an empty grid.
fn empty_state(section: &ScannedSection) -> Markup {
    html! {
        div.empty-state {
            h3 { "No " (section.title) " media found yet." }
            p {
                "Add images or videos to the "
                code { (section.directory) "/" }
                " folder to see them displayed here."
            }
        }
    }
}

// ============================================================================
// Sections and documents
// ============================================================================

/// Renders a titled section: its card grid, or the empty-state block.
pub fn render_section(section: &ScannedSection, prefix: &str) -> Markup {
    html! {
        section.gallery-section id=(section_id(&section.label)) data-label=(section.label) {
            h2.section-title { (section.title) }
            p.section-meta {
                (section.image_count()) " images · " (section.video_count()) " videos"
            }
            @if section.is_empty() {
                (empty_state(section))
            } @else {
                div.gallery-grid {
                    (render_cards(&section.entries, prefix))
                }
            }
        }
    }
}

/// Renders the full gallery page.
pub fn render_page(manifest: &Manifest, config: &GalleryConfig, prefix: &str) -> Markup {
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.page.title) }
                style { (PreEscaped(css)) }
            }
            body {
                div.gallery-container {
                    header.gallery-header {
                        h1.gallery-title { (config.page.title) }
                        @if !config.page.subtitle.is_empty() {
                            p.gallery-subtitle { (config.page.subtitle) }
                        }
                        div.gallery-stats {
                            @for section in &manifest.sections {
                                div.stat {
                                    span.stat-number { (section.entries.len()) }
                                    span.stat-label { (section.title) }
                                }
                            }
                            div.stat {
                                span.stat-number { (manifest.total()) }
                                span.stat-label { "Total" }
                            }
                        }
                        nav.section-nav {
                            @for section in &manifest.sections {
                                a href={ "#" (section_id(&section.label)) } { (section.title) }
                            }
                        }
                    }
                    main {
                        @for section in &manifest.sections {
                            (render_section(section, prefix))
                        }
                    }
                    footer.gallery-footer {
                        "Last updated: " (manifest.last_updated)
                    }
                }
                div.lightbox id="lightbox" hidden {
                    button.lightbox-close type="button" aria-label="Close" { "×" }
                    img.lightbox-image alt="";
                }
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the embeddable fragment: one grid per section, no document shell.
pub fn render_snippet(manifest: &Manifest, prefix: &str) -> Markup {
    html! {
        div.integrated-gallery {
            @for section in &manifest.sections {
                div.gallery-section data-label=(section.label) {
                    h3.section-title { (section.title) }
                    div.gallery-grid.compact {
                        @if section.is_empty() {
                            p.no-media { "No " (section.title) " media yet." }
                        } @else {
                            (render_cards(&section.entries, prefix))
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaEntry;

    fn section(label: &str, title: &str, entries: Vec<MediaEntry>) -> ScannedSection {
        ScannedSection {
            label: label.to_string(),
            title: title.to_string(),
            directory: label.to_string(),
            found: true,
            entries,
        }
    }

    fn manifest(sections: Vec<ScannedSection>) -> Manifest {
        Manifest {
            sections,
            last_updated: "2026-10-16 09:30:00".to_string(),
        }
    }

    fn empty_manifest() -> Manifest {
        manifest(vec![
            section("HP", "Human Practices", vec![]),
            section("ART", "Art & Design", vec![]),
        ])
    }

    #[test]
    fn image_card_structure() {
        let entries = vec![MediaEntry::new("ART/sunrise_study.jpg", MediaKind::Image)];
        let html = render_cards(&entries, "").into_string();

        assert!(html.contains(r#"src="ART/sunrise_study.jpg""#));
        assert!(html.contains(r#"alt="Sunrise Study""#));
        assert!(html.contains(r#"loading="lazy""#));
        assert!(html.contains("Photo • Added recently"));
        assert!(!html.contains("<video"));
    }

    #[test]
    fn video_card_structure() {
        let entries = vec![MediaEntry::new("HP/lab_tour.webm", MediaKind::Video)];
        let html = render_cards(&entries, "").into_string();

        assert!(html.contains("video-card"));
        assert!(html.contains(r#"preload="metadata""#));
        assert!(html.contains(r#"type="video/webm""#));
        assert!(html.contains("VIDEO"));
        assert!(html.contains("Lab Tour"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn card_shows_modification_date() {
        use chrono::TimeZone;
        let mut entry = MediaEntry::new("HP/a.jpg", MediaKind::Image);
        entry.modified = chrono::Local.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).single();
        let html = render_cards(&[entry], "").into_string();
        assert!(html.contains("Photo • Mar 05, 2026"));
    }

    #[test]
    fn hostile_file_names_are_escaped() {
        let entries = vec![MediaEntry::new("HP/<img onerror=x>.jpg", MediaKind::Image)];
        let html = render_cards(&entries, "").into_string();

        assert!(!html.contains("<img onerror"));
        assert!(!html.contains("<Img"));
        assert!(html.contains("&lt;Img Onerror=X&gt;"));
        assert!(html.contains("%3Cimg%20onerror%3Dx%3E.jpg"));
    }

    #[test]
    fn empty_manifest_renders_two_placeholders() {
        let doc = render_page(&empty_manifest(), &GalleryConfig::default(), "").into_string();

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.trim_end().ends_with("</html>"));
        assert_eq!(doc.matches(r#"class="empty-state""#).count(), 2);
        assert!(doc.contains("No Human Practices media found yet."));
        assert!(doc.contains("No Art &amp; Design media found yet."));
        assert!(!doc.contains(r#"class="gallery-grid""#));
    }

    #[test]
    fn page_has_sections_stats_and_timestamp() {
        let m = manifest(vec![
            section(
                "HP",
                "Human Practices",
                vec![
                    MediaEntry::new("HP/a.jpg", MediaKind::Image),
                    MediaEntry::new("HP/b.mp4", MediaKind::Video),
                ],
            ),
            section("ART", "Art & Design", vec![MediaEntry::new("ART/c.png", MediaKind::Image)]),
        ]);
        let doc = render_page(&m, &GalleryConfig::default(), "").into_string();

        assert!(doc.contains(r#"id="section-hp""#));
        assert!(doc.contains(r#"id="section-art""#));
        assert!(doc.contains(r##"href="#section-hp""##));
        assert!(doc.contains("1 images · 1 videos"));
        assert!(doc.contains(r#"<span class="stat-number">3</span>"#));
        assert!(doc.contains("Last updated: 2026-10-16 09:30:00"));
        assert!(doc.contains("--color-primary: #255A3B"));
        assert!(doc.contains(r#"id="lightbox""#));
    }

    #[test]
    fn page_title_from_config() {
        let mut config = GalleryConfig::default();
        config.page.title = "Team Gallery".to_string();
        let doc = render_page(&empty_manifest(), &config, "").into_string();
        assert!(doc.contains("<title>Team Gallery</title>"));
    }

    #[test]
    fn snippet_has_no_document_shell() {
        let m = manifest(vec![
            section("HP", "Human Practices", vec![MediaEntry::new("HP/a.jpg", MediaKind::Image)]),
            section("ART", "Art & Design", vec![]),
        ]);
        let html = render_snippet(&m, "").into_string();

        assert!(html.starts_with(r#"<div class="integrated-gallery">"#));
        assert!(!html.contains("<!DOCTYPE"));
        assert!(!html.contains("<script"));
        assert!(html.contains(r#"src="HP/a.jpg""#));
        assert!(html.contains("No Art &amp; Design media yet."));
    }

    #[test]
    fn asset_prefix_from_output_dir() {
        assert_eq!(asset_prefix(Path::new(".")), "");
        assert_eq!(asset_prefix(Path::new("dist")), "../");
        assert_eq!(asset_prefix(Path::new("./site/out")), "../../");
        assert_eq!(asset_prefix(Path::new("../elsewhere")), "");
    }

    #[test]
    fn media_url_encodes_unsafe_bytes() {
        assert_eq!(media_url("", "HP/a b.jpg"), "HP/a%20b.jpg");
        assert_eq!(media_url("../", "ART/#1.png"), "../ART/%231.png");
        assert_eq!(media_url("", "HP/café.jpg"), "HP/caf%C3%A9.jpg");
        assert_eq!(media_url("", "HP/50%.jpg"), "HP/50%25.jpg");
    }

    #[test]
    fn prefix_applied_to_sources() {
        let entries = vec![MediaEntry::new("ART/a.jpg", MediaKind::Image)];
        let html = render_cards(&entries, "../").into_string();
        assert!(html.contains(r#"src="../ART/a.jpg""#));
    }

    #[test]
    fn absolute_paths_skip_prefix() {
        assert_eq!(
            media_url("../", "/srv/media/a b.jpg"),
            "file:///srv/media/a%20b.jpg"
        );
        let entries = vec![MediaEntry::new("/srv/media/clip.mp4", MediaKind::Video)];
        let html = render_cards(&entries, "../../").into_string();
        assert!(html.contains(r#"src="file:///srv/media/clip.mp4""#));
        assert!(!html.contains("..//"));
    }
}
