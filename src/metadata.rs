//! Filename conventions and per-image metadata.
//!
//! Every gallery image and project file follows the same naming pattern: an
//! optional numeric prefix (`NNN-`) followed by a name whose dashes become
//! spaces for display.
//!
//! - `001-Harbour-at-dusk.jpg` → number 1, title "Harbour at dusk"
//! - `010-weather-station.md` → number 10, title "weather station"
//! - `loose.jpg` → unnumbered, title "loose"
//!
//! ## Resolution priority
//!
//! Each field is resolved independently; the first non-empty value wins:
//!
//! - **Title**: filename title → filename
//! - **Description**: sidecar `.txt` → empty
//! - **Alt text**: title
//!
//! A sidecar is a plain text file with the image's stem:
//! `001-Harbour-at-dusk.txt` next to `001-Harbour-at-dusk.jpg`.

use std::path::Path;

/// Result of parsing an entry name like `020-My-Best-Photos`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present.
    pub number: Option<u32>,
    /// Name after `NNN-`, dashes preserved; the whole input when unnumbered.
    pub name: String,
    /// `name` with dashes turned into spaces.
    pub display_title: String,
}

/// Parse an entry name following the `NNN-name` convention.
///
/// - `"020-My-Best-Photos"` → `Some(20)`, `"My-Best-Photos"`, `"My Best Photos"`
/// - `"001"` / `"001-"` → `Some(1)`, `""`, `""`
/// - `"wip-drafts"` → `None`, `"wip-drafts"`, `"wip drafts"`
pub fn parse_entry_name(name: &str) -> ParsedName {
    let numbered = match name.split_once('-') {
        Some((prefix, rest)) => prefix.parse::<u32>().ok().map(|n| (n, rest)),
        None => name.parse::<u32>().ok().map(|n| (n, "")),
    };
    let (number, raw) = match numbered {
        Some((n, rest)) => (Some(n), rest),
        None => (None, name),
    };
    ParsedName {
        number,
        name: raw.to_string(),
        display_title: raw.replace('-', " "),
    }
}

/// Return the first non-empty source, trimmed.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Read the `.txt` sidecar next to an image, trimmed. `None` when missing or
/// blank.
pub fn read_sidecar(image_path: &Path) -> Option<String> {
    std::fs::read_to_string(image_path.with_extension("txt"))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolved display metadata for one gallery image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMetadata {
    pub number: Option<u32>,
    pub title: String,
    pub description: String,
    pub alt: String,
    /// Whether the description came from a sidecar file.
    pub has_sidecar: bool,
}

/// Resolve title, description and alt text for the image at `path`.
pub fn image_metadata(path: &Path) -> ImageMetadata {
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parsed = parse_entry_name(&stem);
    let sidecar = read_sidecar(path);

    let title = resolve(&[Some(parsed.display_title.as_str()), Some(filename.as_str())])
        .unwrap_or_default();
    let description = resolve(&[sidecar.as_deref()]).unwrap_or_default();

    ImageMetadata {
        number: parsed.number,
        alt: title.clone(),
        title,
        description,
        has_sidecar: sidecar.is_some(),
    }
}
