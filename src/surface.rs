//! Rendering and scheduling seams between the controllers and their host.
//!
//! Controllers never touch the DOM directly. Everything they need from the
//! page goes through three small traits:
//!
//! | Trait | Implemented by | Purpose |
//! |-------|----------------|---------|
//! | [`ModalSurface`] | the lightbox overlay | image slot, caption, open/closed state, focus |
//! | [`SlideSurface`] | the carousel slides + dots | per-index active flag |
//! | [`Scheduler`] | the host's timer facility | repeating and one-shot timers |
//!
//! The browser binding (`web` feature) implements them over `web-sys`; the test
//! suite implements them with recorders and a manual clock. Because the
//! controllers are generic over these traits, the same navigation code runs in
//! both places.
//!
//! ## Timers carry tasks, not callbacks
//!
//! A scheduled timer is tagged with a [`Task`]. When it fires, the host hands
//! the task back to [`crate::page::Page::dispatch`], which routes it to the
//! owning controller. Timers therefore never hold references into controller
//! state, and a controller stays the only writer of its own fields.

use std::time::Duration;

/// Opaque handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Work a timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Carousel autoplay period elapsed.
    AutoplayTick,
    /// Gallery fade-out finished; swap in the new image and reveal it.
    RevealModal,
}

/// Host timer facility.
pub trait Scheduler {
    /// Fire `task` every `period` until cleared.
    fn set_interval(&mut self, period: Duration, task: Task) -> TimerId;

    /// Fire `task` once after `delay`.
    fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId;

    /// Cancel a timer. Clearing an unknown or already-fired timer is a no-op.
    fn clear(&mut self, id: TimerId);
}

/// The shared lightbox overlay.
pub trait ModalSurface {
    /// Assign the enlarged image's source and alt text.
    fn set_image(&mut self, src: &str, alt: &str);

    /// Assign the caption title and description.
    fn set_caption(&mut self, title: &str, description: &str);

    /// Show or hide the image (opacity), used for the cross-fade.
    fn set_image_visible(&mut self, visible: bool);

    /// Toggle the overlay's active state.
    fn set_open(&mut self, open: bool);

    /// Lock or unlock page scrolling behind the overlay.
    fn lock_scroll(&mut self, locked: bool);

    /// Move input focus into the overlay.
    fn focus_modal(&mut self);

    /// Return input focus to the gallery item at `index`.
    fn focus_item(&mut self, index: usize);
}

/// Index-aligned slides and indicator dots.
pub trait SlideSurface {
    /// Number of slide/dot pairs.
    fn slide_count(&self) -> usize;

    /// Mark the slide and dot at `index` active or inactive.
    fn set_active(&mut self, index: usize, active: bool);
}

/// Per-image presentation hooks used by [`crate::images::ImageLoader`].
pub trait ImageSurface {
    /// Fade the image in after it has loaded.
    fn reveal(&mut self, index: usize);

    /// Hide a broken image.
    fn hide(&mut self, index: usize);

    /// Insert a placeholder message next to the image.
    fn insert_placeholder(&mut self, index: usize, message: &str);

    /// Assign a deferred source and drop the lazy marker.
    fn assign_source(&mut self, index: usize, src: &str);
}
