//! Thumbnail loading: fade-in, broken-image placeholders and lazy sources.
//!
//! Every gallery thumbnail starts transparent and is revealed on its load
//! signal. A failed load hides the image and inserts a single placeholder
//! message; nothing is retried and nothing propagates. Thumbnails past the
//! eager prefix of the page carry a deferred source that is assigned the
//! first time the image scrolls into view.

use crate::surface::ImageSurface;

/// Text shown in place of an image that failed to load.
pub const PLACEHOLDER_TEXT: &str = "Image not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug)]
struct Slot {
    state: LoadState,
    deferred_src: Option<String>,
}

#[derive(Debug)]
pub struct ImageLoader<I> {
    slots: Vec<Slot>,
    surface: I,
}

impl<I: ImageSurface> ImageLoader<I> {
    /// One slot per image; `Some(src)` marks a lazily loaded image.
    pub fn new(deferred_sources: Vec<Option<String>>, surface: I) -> Self {
        let slots = deferred_sources
            .into_iter()
            .map(|deferred_src| Slot {
                state: LoadState::Pending,
                deferred_src,
            })
            .collect();
        Self { slots, surface }
    }

    pub fn state(&self, index: usize) -> Option<LoadState> {
        self.slots.get(index).map(|s| s.state)
    }

    pub fn surface(&self) -> &I {
        &self.surface
    }

    pub fn on_load(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        slot.state = LoadState::Loaded;
        self.surface.reveal(index);
    }

    /// Replace a broken image with the placeholder, once.
    pub fn on_error(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.state == LoadState::Failed {
            return;
        }
        slot.state = LoadState::Failed;
        self.surface.insert_placeholder(index, PLACEHOLDER_TEXT);
        self.surface.hide(index);
        tracing::debug!(index, "image failed to load");
    }

    /// The image entered the viewport. Returns `true` when it no longer
    /// needs observing.
    pub fn on_visible(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return true;
        };
        if let Some(src) = slot.deferred_src.take() {
            self.surface.assign_source(index, &src);
        }
        true
    }
}
