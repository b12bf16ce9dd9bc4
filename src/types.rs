//! Shared types used by the scan stage, the page generator and the controllers.
//!
//! [`GalleryItem`] is produced by [`crate::scan`], rendered into markup by
//! [`crate::generate`], and read back out of that markup by the browser
//! binding before it is handed to [`crate::gallery::GalleryController`].

use serde::{Deserialize, Serialize};

/// One enlargeable image in the gallery.
///
/// Immutable once collected. The controller indexes into an owned
/// `Vec<GalleryItem>` and never re-reads the page after setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Image URL, relative to the page.
    pub src: String,
    /// Alt text for the enlarged image.
    pub alt: String,
    /// Heading shown under the enlarged image.
    pub title: String,
    /// Paragraph shown under the title. May be empty.
    pub description: String,
}

impl GalleryItem {
    pub fn new(
        src: impl Into<String>,
        alt: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// One slide of the project carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSlide {
    /// Title from the first `# heading`, or the filename title as fallback.
    pub title: String,
    /// URL slug (filename stem with number prefix stripped).
    pub slug: String,
    /// Raw markdown body, heading line removed.
    pub body: String,
    /// Slide image relative to the content root, if one shares the stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Sort key from number prefix.
    pub sort_key: u32,
}
