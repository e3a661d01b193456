//! Filename conventions.
//!
//! Two directions:
//!
//! - **Reading**: a file stem becomes a card title. Underscores and dashes
//!   turn into spaces and every word is capitalized:
//!   `lab_tour-day2` → "Lab Tour Day2".
//! - **Writing**: the renamer's canonical scheme
//!   `<prefix>-<label>-<NNN>.<ext>`, with a 3-digit 1-based index and a
//!   lowercased extension: `MEDIA-ART-007.jpg`.

/// Turn a file stem into a display title.
///
/// Separators (`_`, `-`) become spaces. Each run of letters is title-cased:
/// the first letter upper, the rest lower. A letter that follows a digit
/// starts a new run (`2b` → `2B`).
pub fn display_title(stem: &str) -> String {
    let mut title = String::with_capacity(stem.len());
    let mut prev_is_letter = false;
    for c in stem.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            title.push(c);
            prev_is_letter = false;
        }
    }
    title
}

/// Canonical renamed file name.
///
/// `index` is 1-based. Indices past 999 keep all their digits.
pub fn canonical_name(prefix: &str, label: &str, index: usize, ext: &str) -> String {
    let ext = ext.trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        format!("{prefix}-{label}-{index:03}")
    } else {
        format!("{prefix}-{label}-{index:03}.{ext}")
    }
}
