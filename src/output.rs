//! CLI output formatting for the build stages.
//!
//! # Information-First Display
//!
//! Output lists content, not files. Each entity (slide, gallery image) leads
//! with its positional index and title; filesystem paths follow as indented
//! `Source:` lines so the listing reads as a content inventory that can still
//! be traced back to files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Projects
//! 001 Weather Station
//!     Slug: weather-station
//!     Image: projects/010-weather-station.jpg
//! 002 Compiler
//!     Slug: Compiler
//!
//! Gallery (3 photos)
//! 001 Harbour at dusk
//!     Source: gallery/001-Harbour-at-dusk.jpg
//!     Description: 001-Harbour-at-dusk.txt
//! 002 Quarry
//!     Source: gallery/002-Quarry.png
//!
//! Config
//!     config.toml
//!     Autoplay: 10000ms, fade: 150ms, swipe: 50px
//! ```
//!
//! ## Build
//!
//! ```text
//! index.html
//!     2 slides, 3 gallery images (0 lazy)
//!     Copied 4 files
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::GenerateSummary;
use crate::scan::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Scan output
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !manifest.projects.is_empty() {
        lines.push("Projects".to_string());
        for (i, slide) in manifest.projects.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), slide.title));
            lines.push(format!("    Slug: {}", slide.slug));
            if let Some(image) = &slide.image {
                lines.push(format!("    Image: {}", image));
            }
            let body = truncate_desc(slide.body.lines().next().unwrap_or("").trim(), 60);
            if !body.is_empty() {
                lines.push(format!("    {}", body));
            }
        }
        lines.push(String::new());
    }

    if !manifest.gallery.is_empty() {
        lines.push(format!(
            "Gallery ({})",
            plural(manifest.gallery.len(), "photo", "photos")
        ));
        for (i, entry) in manifest.gallery.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), entry.item.title));
            lines.push(format!("    Source: {}", entry.source_path));
            if entry.has_sidecar {
                let sidecar = Path::new(&entry.filename).with_extension("txt");
                lines.push(format!("    Description: {}", sidecar.display()));
            }
        }
        lines.push(String::new());
    }

    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    let config = &manifest.config;
    lines.push(format!(
        "    Autoplay: {}ms, fade: {}ms, swipe: {}px",
        config.carousel.autoplay_interval_ms, config.gallery.fade_ms, config.input.swipe_threshold
    ));

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// One-line verdict for `check`.
pub fn format_check_output(manifest: &Manifest) -> String {
    format!(
        "Content OK: {}, {}",
        plural(manifest.projects.len(), "project", "projects"),
        plural(manifest.gallery.len(), "gallery image", "gallery images")
    )
}

// ============================================================================
// Build output
// ============================================================================

pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    vec![
        "index.html".to_string(),
        format!(
            "    {}, {} ({} lazy)",
            plural(summary.slides, "slide", "slides"),
            plural(summary.gallery_items, "gallery image", "gallery images"),
            summary.lazy_images
        ),
        format!("    Copied {}", plural(summary.copied_files, "file", "files")),
    ]
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}
