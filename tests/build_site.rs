//! End-to-end run through the library: config → scan → generate → rename →
//! rebuild, against a throwaway project directory.
//!
//! Run with: cargo test --test build_site

use media_gal::config::{self, CONFIG_FILE_NAME};
use media_gal::generate::{self, GalleryData};
use media_gal::{rename, scan};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const GALLERY_TOML: &str = r##"
[[sections]]
label = "HP"
title = "Outreach"
directory = "media/hp"

[[sections]]
label = "ART"
directory = "media/art"

[output]
directory = "public"

[page]
title = "Team Gallery"

[rename]
prefix = "IGEM"
"##;

fn write_media(root: &Path, rel: &str, offset_secs: u64) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, rel).unwrap();
    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + offset_secs);
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join(CONFIG_FILE_NAME), GALLERY_TOML).unwrap();
    write_media(root, "media/hp/workshop.JPG", 20);
    write_media(root, "media/hp/school_visit.mp4", 10);
    write_media(root, "media/hp/notes.txt", 0);
    write_media(root, "media/art/logo-final.png", 5);
    write_media(root, "media/art/.thumbs/logo.png", 0);
    tmp
}

fn read_data(path: &Path) -> GalleryData {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn build_writes_page_snippet_and_sidecar() {
    let tmp = project();
    let root = tmp.path();
    let cfg = config::load_config(&root.join(CONFIG_FILE_NAME)).unwrap();

    let manifest = scan::scan(&cfg, root).unwrap();
    assert_eq!(manifest.total(), 3);

    let result = generate::generate(&manifest, &cfg, root).unwrap();
    assert_eq!(result.page, root.join("public/gallery.html"));

    let html = fs::read_to_string(&result.page).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Team Gallery</title>"));
    assert!(html.contains("Outreach"));
    assert!(html.contains(r#"src="../media/hp/workshop.JPG""#));
    assert!(html.contains(r#"src="../media/hp/school_visit.mp4""#));
    assert!(html.contains("Logo Final"));
    assert!(!html.contains("notes.txt"));
    assert!(!html.contains(".thumbs"));

    let snippet = fs::read_to_string(result.snippet.unwrap()).unwrap();
    assert!(snippet.starts_with(r#"<div class="integrated-gallery">"#));
    assert!(!snippet.contains("<html"));

    let data = read_data(&result.data.unwrap());
    assert_eq!(
        data.sections["HP"],
        vec!["media/hp/school_visit.mp4", "media/hp/workshop.JPG"]
    );
    assert_eq!(data.sections["ART"], vec!["media/art/logo-final.png"]);
    assert_eq!(data.stats.sections["HP"].videos, 1);
    assert_eq!(data.stats.total_all, 3);
}

#[test]
fn rename_then_rebuild_uses_canonical_names() {
    let tmp = project();
    let root = tmp.path();
    let cfg = config::load_config(&root.join(CONFIG_FILE_NAME)).unwrap();

    let plans = rename::plan_sections(&cfg, root, &["HP".to_string()]).unwrap();
    assert_eq!(plans.len(), 1);
    let report = rename::execute(&plans[0]);
    assert_eq!(report.renamed(), 2);
    assert_eq!(report.failed(), 0);

    let manifest = scan::scan(&cfg, root).unwrap();
    let result = generate::generate(&manifest, &cfg, root).unwrap();
    let data = read_data(&result.data.unwrap());

    // Oldest file first, extension lowercased; ART was not selected.
    assert_eq!(
        data.sections["HP"],
        vec!["media/hp/IGEM-HP-001.mp4", "media/hp/IGEM-HP-002.jpg"]
    );
    assert_eq!(data.sections["ART"], vec!["media/art/logo-final.png"]);
    assert!(root.join("media/hp/notes.txt").exists());

    // A second run has nothing left to do.
    let again = rename::plan_sections(&cfg, root, &["HP".to_string()]).unwrap();
    let report = rename::execute(&again[0]);
    assert_eq!(report.unchanged(), 2);
    assert_eq!(report.renamed(), 0);
}

#[test]
fn missing_config_uses_stock_sections() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_media(root, "ART/poster.png", 0);

    let cfg = config::load_config(&root.join(CONFIG_FILE_NAME)).unwrap();
    let manifest = scan::scan(&cfg, root).unwrap();

    let labels: Vec<&str> = manifest.sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["HP", "ART"]);
    assert_eq!(manifest.total(), 1);

    let result = generate::generate(&manifest, &cfg, root).unwrap();
    let html = fs::read_to_string(result.page).unwrap();
    assert!(html.contains("No Human Practices media found yet."));
}

#[test]
fn stock_config_round_trips() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(CONFIG_FILE_NAME);
    fs::write(&path, config::stock_config_toml()).unwrap();

    let cfg = config::load_config(&path).unwrap();
    assert_eq!(cfg.sections.len(), 2);
    assert_eq!(cfg.rename.prefix, "MEDIA");
}
