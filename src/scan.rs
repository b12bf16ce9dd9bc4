//! Content scanning.
//!
//! Stage 1 of the build. Walks the content directory and produces a
//! [`Manifest`]: the ordered gallery items, the ordered project slides, and
//! the resolved site configuration.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                  # Site configuration (optional)
//! ├── gallery/
//! │   ├── 001-Harbour-at-dusk.jpg  # Gallery image (numbered = ordered)
//! │   ├── 001-Harbour-at-dusk.txt  # Description sidecar (optional)
//! │   ├── 002-Quarry.png
//! │   └── loose.jpg                # Unnumbered = after numbered, by filename
//! ├── projects/
//! │   ├── 010-weather-station.md   # Carousel slide: "# Title" + markdown body
//! │   ├── 010-weather-station.jpg  # Slide image (same stem, optional)
//! │   └── 020-compiler.md
//! ```
//!
//! Either of `gallery/` and `projects/` may be missing; the matching
//! collection is then empty and the page is built without it.
//!
//! ## Validation
//!
//! - No duplicate numbers among gallery images
//! - No duplicate numbers among project files

use crate::config::{self, SiteConfig};
use crate::metadata::{self, parse_entry_name};
use crate::types::{GalleryItem, ProjectSlide};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Duplicate number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
}

pub const GALLERY_DIR: &str = "gallery";
pub const PROJECTS_DIR: &str = "projects";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif", "gif"];

/// Manifest output from the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub gallery: Vec<GalleryEntry>,
    pub projects: Vec<ProjectSlide>,
    pub config: SiteConfig,
}

/// A gallery image together with where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Path relative to the content root, unencoded. The built site keeps
    /// the same path; `item.src` is its URL form.
    pub source_path: String,
    pub filename: String,
    /// Whether the description came from a `.txt` sidecar.
    pub has_sidecar: bool,
    #[serde(flatten)]
    pub item: GalleryItem,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let gallery = scan_gallery(root)?;
    let projects = scan_projects(root)?;
    let config = config::load_config(root)?;

    tracing::debug!(
        gallery = gallery.len(),
        projects = projects.len(),
        "content scanned"
    );

    Ok(Manifest {
        gallery,
        projects,
        config,
    })
}

fn scan_gallery(root: &Path) -> Result<Vec<GalleryEntry>, ScanError> {
    let dir = root.join(GALLERY_DIR);
    let mut entries = Vec::new();
    for path in collect_files(&dir)?.into_iter().filter(|p| is_image(p)) {
        let meta = metadata::image_metadata(&path);
        let filename = file_name(&path);
        let source_path = format!("{GALLERY_DIR}/{filename}");
        entries.push(GalleryEntry {
            number: meta.number,
            item: GalleryItem::new(url_path(&source_path), meta.alt, meta.title, meta.description),
            source_path,
            filename,
            has_sidecar: meta.has_sidecar,
        });
    }

    check_unique(entries.iter().filter_map(|e| e.number), &dir)?;
    entries.sort_by(|a, b| order_key(a.number, &a.filename).cmp(&order_key(b.number, &b.filename)));
    Ok(entries)
}

fn scan_projects(root: &Path) -> Result<Vec<ProjectSlide>, ScanError> {
    let dir = root.join(PROJECTS_DIR);
    let files = collect_files(&dir)?;

    let mut slides = Vec::new();
    let mut numbers = Vec::new();
    for md_path in files.iter().filter(|p| has_extension(p, &["md"])) {
        let stem = md_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parsed = parse_entry_name(&stem);
        if let Some(n) = parsed.number {
            numbers.push(n);
        }

        let content = fs::read_to_string(md_path)?;
        let (heading, body) = split_heading(&content);
        let fallback = metadata::resolve(&[Some(parsed.display_title.as_str()), Some(stem.as_str())])
            .unwrap_or_default();
        let title = heading.unwrap_or(fallback);

        let image = files
            .iter()
            .find(|p| is_image(p) && p.file_stem() == md_path.file_stem())
            .map(|p| format!("{PROJECTS_DIR}/{}", file_name(p)));

        let slug = if parsed.name.is_empty() {
            stem.clone()
        } else {
            parsed.name.clone()
        };

        slides.push(ProjectSlide {
            title,
            slug,
            body,
            image,
            sort_key: parsed.number.unwrap_or(u32::MAX),
        });
    }

    check_unique(numbers.into_iter(), &dir)?;
    slides.sort_by(|a, b| (a.sort_key, &a.slug).cmp(&(b.sort_key, &b.slug)));
    Ok(slides)
}

/// URL for a content-relative path: each `/` segment percent-encoded.
///
/// ```
/// # use portfolio_viewer::scan::url_path;
/// assert_eq!(url_path("gallery/001-Sea#2 at 50%.jpg"), "gallery/001-Sea%232%20at%2050%25.jpg");
/// ```
pub fn url_path(rel: &str) -> String {
    rel.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Split off the first `# heading` line. Returns the heading text and the
/// remaining markdown, trimmed.
fn split_heading(content: &str) -> (Option<String>, String) {
    let mut heading = None;
    let mut body = Vec::new();
    for line in content.lines() {
        if heading.is_none() && line.starts_with("# ") {
            heading = Some(line.trim_start_matches("# ").trim().to_string());
        } else {
            body.push(line);
        }
    }
    (heading, body.join("\n").trim().to_string())
}

/// Files directly inside `dir`, sorted, hidden files skipped. A missing
/// directory yields nothing.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && !file_name(p).starts_with('.'))
        .collect();
    files.sort();
    Ok(files)
}

fn check_unique(numbers: impl Iterator<Item = u32>, dir: &Path) -> Result<(), ScanError> {
    let mut seen = BTreeSet::new();
    for n in numbers {
        if !seen.insert(n) {
            return Err(ScanError::DuplicateNumber(n, dir.to_path_buf()));
        }
    }
    Ok(())
}

/// Numbered entries first by number, then unnumbered ones by filename.
fn order_key(number: Option<u32>, filename: &str) -> (bool, u32, String) {
    (number.is_none(), number.unwrap_or(0), filename.to_string())
}

fn is_image(path: &Path) -> bool {
    has_extension(path, IMAGE_EXTENSIONS)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    extensions.contains(&ext.as_str())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default()
}
