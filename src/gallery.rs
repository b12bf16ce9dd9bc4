//! Modal gallery navigation.
//!
//! A [`GalleryController`] owns the captured list of [`GalleryItem`]s, the
//! index of the item on display, and the shared lightbox ([`ModalSurface`]).
//!
//! ## Cycling
//!
//! `next` and `previous` wrap in both directions:
//!
//! ```text
//! next:     (i + 1) mod n
//! previous: (i - 1 + n) mod n
//! ```
//!
//! With no items both are no-ops.
//!
//! ## Cross-fade ordering
//!
//! Stepping between items hides the current image *before* the next source
//! and caption are assigned, then reveals it. With a non-zero fade the
//! assignment waits for a [`Task::RevealModal`] timer, so the overlay never
//! shows a new caption under the old picture or the other way round. Only one
//! reveal is ever pending; stepping again during a fade replaces it.

use std::time::Duration;

use crate::surface::{ModalSurface, Scheduler, Task, TimerId};
use crate::types::GalleryItem;

/// Accessible label applied to each gallery item at setup.
pub fn aria_label(item: &GalleryItem) -> String {
    format!("View {} in large size", item.title)
}

/// Lightbox state machine over a fixed list of gallery items.
#[derive(Debug)]
pub struct GalleryController<M, S> {
    items: Vec<GalleryItem>,
    current: usize,
    open: bool,
    fade: Duration,
    pending_reveal: Option<TimerId>,
    modal: M,
    scheduler: S,
}

impl<M: ModalSurface, S: Scheduler> GalleryController<M, S> {
    pub fn new(items: Vec<GalleryItem>, modal: M, scheduler: S, fade: Duration) -> Self {
        Self {
            items,
            current: 0,
            open: false,
            fade,
            pending_reveal: None,
            modal,
            scheduler,
        }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a cross-fade is waiting for its reveal.
    pub fn is_transitioning(&self) -> bool {
        self.pending_reveal.is_some()
    }

    pub fn modal(&self) -> &M {
        &self.modal
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Show item `index` in the lightbox.
    ///
    /// An index outside `0..item_count` is ignored.
    pub fn open(&mut self, index: usize) {
        if index >= self.items.len() {
            tracing::debug!(index, count = self.items.len(), "gallery open ignored");
            return;
        }
        self.cancel_reveal();
        self.current = index;
        self.open = true;
        self.render_current();
        self.modal.set_image_visible(true);
        self.modal.set_open(true);
        self.modal.lock_scroll(true);
        self.modal.focus_modal();
        tracing::debug!(index, "gallery opened");
    }

    /// Hide the lightbox and hand focus back to the item it was showing.
    pub fn close(&mut self) {
        self.cancel_reveal();
        self.open = false;
        self.modal.set_open(false);
        self.modal.lock_scroll(false);
        if self.current < self.items.len() {
            self.modal.focus_item(self.current);
        }
        tracing::debug!(index = self.current, "gallery closed");
    }

    pub fn next(&mut self) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        self.current = (self.current + 1) % n;
        self.transition();
    }

    pub fn previous(&mut self) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        self.current = (self.current + n - 1) % n;
        self.transition();
    }

    /// Complete a pending cross-fade: assign the current item and reveal it.
    pub fn finish_transition(&mut self) {
        let Some(id) = self.pending_reveal.take() else {
            return;
        };
        self.scheduler.clear(id);
        self.render_current();
        self.modal.set_image_visible(true);
    }

    /// Run a fired timer task. Tasks owned by other controllers are ignored.
    pub fn dispatch(&mut self, task: Task) {
        if task == Task::RevealModal {
            self.finish_transition();
        }
    }

    fn transition(&mut self) {
        self.modal.set_image_visible(false);
        self.cancel_reveal();
        if self.fade.is_zero() {
            self.render_current();
            self.modal.set_image_visible(true);
        } else {
            self.pending_reveal = Some(self.scheduler.set_timeout(self.fade, Task::RevealModal));
        }
        tracing::debug!(index = self.current, "gallery stepped");
    }

    fn cancel_reveal(&mut self) {
        if let Some(id) = self.pending_reveal.take() {
            self.scheduler.clear(id);
        }
    }

    fn render_current(&mut self) {
        let Some(item) = self.items.get(self.current) else {
            return;
        };
        self.modal.set_image(&item.src, &item.alt);
        self.modal.set_caption(&item.title, &item.description);
    }
}
