//! HTML page generation.
//!
//! Stage 2 of the build. Takes the scan [`Manifest`] and writes a single
//! static page whose markup is the DOM the viewer controllers bind to.
//!
//! ## Generated markup
//!
//! ```text
//! .project-carousel
//! ├── .project-slide × n        first one .active
//! ├── .carousel-nav.prev/.next  data-step = -1 / 1
//! └── .carousel-dots > .dot × n data-index, first one .active
//! .gallery
//! └── .gallery-item × m         img + h3 (title) + p (description)
//! #imageModal.modal             shared lightbox
//! script#portfolio-viewer-config  behaviour config as JSON
//! script[type=module]           loads the wasm bundle from pkg/
//! ```
//!
//! The first `gallery.eager_images` thumbnails get a real `src`. Later ones
//! carry `data-src` and the `lazy` class and are filled in by the browser
//! binding when they scroll into view.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── gallery/…        # gallery images (copied)
//! └── projects/…       # slide images (copied)
//! ```
//!
//! Copies keep their content-relative paths. The markup refers to them
//! through [`url_path`], so a filename like `001-Sea#2 at 50%.jpg` becomes
//! `gallery/001-Sea%232%20at%2050%25.jpg` in `src`.
//!
//! The wasm bundle itself (`dist/pkg/`) is built separately with the `web`
//! feature.

use crate::config;
use crate::gallery::aria_label;
use crate::scan::{GalleryEntry, Manifest, url_path};
use crate::types::ProjectSlide;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Element id of the embedded behaviour config.
pub const CONFIG_SCRIPT_ID: &str = "portfolio-viewer-config";

/// Module path of the wasm bundle, relative to `index.html`.
pub const BUNDLE_PATH: &str = "./pkg/portfolio_viewer.js";

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What a generate run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub gallery_items: usize,
    pub slides: usize,
    pub lazy_images: usize,
    pub copied_files: usize,
}

pub fn generate(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let color_css = config::generate_color_css(&manifest.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    let config_json = embed_json(&serde_json::to_string(&manifest.config.viewer())?);

    let page = render_page(manifest, &css, &config_json);
    fs::write(output_dir.join("index.html"), page.into_string())?;

    let mut copied = 0;
    let images = manifest
        .gallery
        .iter()
        .map(|e| e.source_path.as_str())
        .chain(manifest.projects.iter().filter_map(|p| p.image.as_deref()));
    for rel in images {
        copy_file(&source_dir.join(rel), &output_dir.join(rel))?;
        copied += 1;
    }

    let eager = manifest.config.gallery.eager_images;
    Ok(GenerateSummary {
        gallery_items: manifest.gallery.len(),
        slides: manifest.projects.len(),
        lazy_images: manifest.gallery.len().saturating_sub(eager),
        copied_files: copied,
    })
}

/// Make JSON safe to place inside a `<script>` element.
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn copy_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(markdown));
    out
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// The project carousel: slides, prev/next controls, and one dot per slide.
pub fn render_carousel(slides: &[ProjectSlide]) -> Markup {
    html! {
        div.project-carousel {
            @for (i, slide) in slides.iter().enumerate() {
                article.project-slide.active[i == 0] data-slug=(slide.slug) {
                    @if let Some(image) = &slide.image {
                        img src=(url_path(image)) alt=(slide.title) loading="lazy";
                    }
                    h3 { (slide.title) }
                    div.project-body {
                        (PreEscaped(markdown_to_html(&slide.body)))
                    }
                }
            }
            button.carousel-nav.prev type="button" data-step="-1" aria-label="Previous project" { "‹" }
            button.carousel-nav.next type="button" data-step="1" aria-label="Next project" { "›" }
            div.carousel-dots {
                @for i in 0..slides.len() {
                    button.dot.active[i == 0] type="button" data-index=(i)
                        aria-label={ "Show project " (i + 1) } {}
                }
            }
        }
    }
}

/// The gallery grid. Items past `eager` defer their source to `data-src`.
pub fn render_gallery(entries: &[GalleryEntry], eager: usize) -> Markup {
    html! {
        div.gallery {
            @for (i, entry) in entries.iter().enumerate() {
                @let item = &entry.item;
                div.gallery-item tabindex="0" role="button" aria-label=(aria_label(item)) {
                    @if i < eager {
                        img src=(item.src) alt=(item.alt);
                    } @else {
                        img.lazy data-src=(item.src) alt=(item.alt);
                    }
                    div.gallery-caption {
                        h3 { (item.title) }
                        p { (item.description) }
                    }
                }
            }
        }
    }
}

/// The shared lightbox overlay, closed.
pub fn render_modal() -> Markup {
    html! {
        div #imageModal .modal {
            div.modal-content {
                button.close type="button" aria-label="Close" { "×" }
                button.modal-nav.prev-modal type="button" aria-label="Previous image" { "‹" }
                button.modal-nav.next-modal type="button" aria-label="Next image" { "›" }
                img #modalImage .modal-image src="" alt="" tabindex="-1";
                div.modal-caption {
                    h3 #modalTitle {}
                    p #modalDescription {}
                }
            }
        }
    }
}

fn render_page(manifest: &Manifest, css: &str, config_json: &str) -> Markup {
    let title = &manifest.config.site_title;
    let bootstrap = format!("import init from \"{BUNDLE_PATH}\";\ninit();");

    let content = html! {
        header.site-header {
            h1 { (title) }
        }
        main {
            @if !manifest.projects.is_empty() {
                section #projects {
                    h2 { "Projects" }
                    (render_carousel(&manifest.projects))
                }
            }
            @if !manifest.gallery.is_empty() {
                section #gallery {
                    h2 { "Gallery" }
                    (render_gallery(&manifest.gallery, manifest.config.gallery.eager_images))
                }
            }
        }
        (render_modal())
        script id=(CONFIG_SCRIPT_ID) type="application/json" { (PreEscaped(config_json)) }
        script type="module" { (PreEscaped(bootstrap)) }
    };

    base_document(title, css, content)
}

// ============================================================================
// Tests
// ============================================================================
