//! Shared test utilities for the portfolio-viewer test suite.
//!
//! Provides recording implementations of the surface traits, a manually
//! driven [`Scheduler`], and a content-directory fixture builder.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let clock = ManualScheduler::new();
//! let mut carousel = CarouselController::new(RecordingSlides::new(4), clock.clone(), PERIOD);
//! carousel.show(0);
//! clock.advance(30_000, |task| carousel.dispatch(task));
//! assert_eq!(carousel.current_index(), 3);
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;

use crate::carousel::slide_span;
use crate::scan::Manifest;
use crate::surface::{ImageSurface, ModalSurface, Scheduler, SlideSurface, Task, TimerId};
use crate::types::GalleryItem;

// =========================================================================
// Gallery items
// =========================================================================

/// `count` distinct gallery items: `img-0.jpg` / `Title 0` / `Description 0`, ...
pub fn gallery_items(count: usize) -> Vec<GalleryItem> {
    (0..count)
        .map(|i| {
            GalleryItem::new(
                format!("gallery/img-{i}.jpg"),
                format!("Alt {i}"),
                format!("Title {i}"),
                format!("Description {i}"),
            )
        })
        .collect()
}

// =========================================================================
// Modal recorder
// =========================================================================

/// Where input focus was last sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Nowhere,
    Modal,
    Item(usize),
}

/// A single call made on a [`RecordingModal`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalCall {
    Image(String),
    Caption(String),
    Visible(bool),
    Open(bool),
    Scroll(bool),
    FocusModal,
    FocusItem(usize),
}

/// Modal surface that keeps its current state and a call log.
#[derive(Debug)]
pub struct RecordingModal {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub description: String,
    pub image_visible: bool,
    pub open: bool,
    pub scroll_locked: bool,
    pub focus: Focus,
    pub calls: Vec<ModalCall>,
}

impl RecordingModal {
    pub fn new() -> Self {
        Self {
            src: String::new(),
            alt: String::new(),
            title: String::new(),
            description: String::new(),
            image_visible: true,
            open: false,
            scroll_locked: false,
            focus: Focus::Nowhere,
            calls: Vec::new(),
        }
    }

    /// Assert the modal currently shows `item` in full.
    pub fn assert_shows(&self, item: &GalleryItem) {
        assert_eq!(self.src, item.src, "modal image src mismatch");
        assert_eq!(self.alt, item.alt, "modal image alt mismatch");
        assert_eq!(self.title, item.title, "modal title mismatch");
        assert_eq!(self.description, item.description, "modal description mismatch");
        assert!(self.image_visible, "modal image is still hidden");
    }
}

impl ModalSurface for RecordingModal {
    fn set_image(&mut self, src: &str, alt: &str) {
        self.src = src.to_string();
        self.alt = alt.to_string();
        self.calls.push(ModalCall::Image(src.to_string()));
    }

    fn set_caption(&mut self, title: &str, description: &str) {
        self.title = title.to_string();
        self.description = description.to_string();
        self.calls.push(ModalCall::Caption(title.to_string()));
    }

    fn set_image_visible(&mut self, visible: bool) {
        self.image_visible = visible;
        self.calls.push(ModalCall::Visible(visible));
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
        self.calls.push(ModalCall::Open(open));
    }

    fn lock_scroll(&mut self, locked: bool) {
        self.scroll_locked = locked;
        self.calls.push(ModalCall::Scroll(locked));
    }

    fn focus_modal(&mut self) {
        self.focus = Focus::Modal;
        self.calls.push(ModalCall::FocusModal);
    }

    fn focus_item(&mut self, index: usize) {
        self.focus = Focus::Item(index);
        self.calls.push(ModalCall::FocusItem(index));
    }
}

// =========================================================================
// Slide recorder
// =========================================================================

/// Slide surface holding one active flag per slide and per dot.
#[derive(Debug)]
pub struct RecordingSlides {
    pub active: Vec<bool>,
    pub dots: Vec<bool>,
}

impl RecordingSlides {
    pub fn new(count: usize) -> Self {
        Self::with_dots(count, count)
    }

    /// Markup whose slide and dot lists disagree in length.
    pub fn with_dots(slides: usize, dots: usize) -> Self {
        Self {
            active: vec![false; slides],
            dots: vec![false; dots],
        }
    }

    /// Indices currently marked active.
    pub fn active_indices(&self) -> Vec<usize> {
        set_indices(&self.active)
    }

    pub fn active_dots(&self) -> Vec<usize> {
        set_indices(&self.dots)
    }
}

fn set_indices(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter(|(_, a)| **a)
        .map(|(i, _)| i)
        .collect()
}

impl SlideSurface for RecordingSlides {
    fn slide_count(&self) -> usize {
        slide_span(self.active.len(), self.dots.len())
    }

    fn set_active(&mut self, index: usize, active: bool) {
        self.active[index] = active;
        self.dots[index] = active;
    }
}

// =========================================================================
// Image recorder
// =========================================================================

/// Per-image presentation state recorded by [`RecordingImages`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRecord {
    pub revealed: bool,
    pub hidden: bool,
    pub placeholders: Vec<String>,
    pub assigned: Option<String>,
}

#[derive(Debug)]
pub struct RecordingImages {
    pub images: Vec<ImageRecord>,
}

impl RecordingImages {
    pub fn new(count: usize) -> Self {
        Self {
            images: vec![ImageRecord::default(); count],
        }
    }
}

impl ImageSurface for RecordingImages {
    fn reveal(&mut self, index: usize) {
        self.images[index].revealed = true;
    }

    fn hide(&mut self, index: usize) {
        self.images[index].hidden = true;
    }

    fn insert_placeholder(&mut self, index: usize, message: &str) {
        self.images[index].placeholders.push(message.to_string());
    }

    fn assign_source(&mut self, index: usize, src: &str) {
        self.images[index].assigned = Some(src.to_string());
    }
}

// =========================================================================
// Manual clock
// =========================================================================

#[derive(Debug)]
struct PendingTimer {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u64>,
    task: Task,
}

#[derive(Debug, Default)]
struct ClockState {
    now_ms: u64,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

/// Deterministic [`Scheduler`] driven by the test.
///
/// Clones share one clock, so a page's two controllers can each own a handle
/// while the test advances time through a third.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ClockState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of live timers.
    pub fn active(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Number of live timers carrying `task`.
    pub fn active_for(&self, task: Task) -> usize {
        self.state
            .borrow()
            .timers
            .iter()
            .filter(|t| t.task == task)
            .count()
    }

    /// Advance the clock by `ms`, handing every task that fires to `dispatch`
    /// in due order. Timers scheduled or cleared by `dispatch` take effect
    /// immediately.
    pub fn advance(&self, ms: u64, mut dispatch: impl FnMut(Task)) {
        let until = self.now_ms() + ms;
        while let Some(task) = self.pop_due(until) {
            dispatch(task);
        }
        self.state.borrow_mut().now_ms = until;
    }

    fn pop_due(&self, until: u64) -> Option<Task> {
        let mut state = self.state.borrow_mut();
        let pos = state
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until)
            .min_by_key(|(_, t)| (t.due_ms, t.id.0))
            .map(|(i, _)| i)?;
        let due = state.timers[pos].due_ms;
        state.now_ms = due;
        let task = state.timers[pos].task;
        match state.timers[pos].period_ms {
            Some(period) => state.timers[pos].due_ms = due + period,
            None => {
                state.timers.remove(pos);
            }
        }
        Some(task)
    }

    fn push(&self, delay: Duration, period: Option<Duration>, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let due_ms = state.now_ms + (delay.as_millis() as u64);
        state.timers.push(PendingTimer {
            id,
            due_ms,
            period_ms: period.map(|p| (p.as_millis() as u64).max(1)),
            task,
        });
        id
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&mut self, period: Duration, task: Task) -> TimerId {
        self.push(period.max(Duration::from_millis(1)), Some(period), task)
    }

    fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId {
        self.push(delay, None, task)
    }

    fn clear(&mut self, id: TimerId) {
        self.state.borrow_mut().timers.retain(|t| t.id != id);
    }
}

// =========================================================================
// Content fixtures
// =========================================================================

/// Build a small content directory in a temp dir:
///
/// ```text
/// gallery/001-Harbour-at-dusk.jpg  (+ .txt sidecar)
/// gallery/002-Quarry.png
/// gallery/loose.jpg                (unnumbered → sorted last)
/// projects/010-weather-station.md  (+ .jpg slide image)
/// projects/020-Compiler.md
/// ```
pub fn content_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "gallery/001-Harbour-at-dusk.jpg", "jpg");
    write(
        root,
        "gallery/001-Harbour-at-dusk.txt",
        "Long exposure from the pier.\n",
    );
    write(root, "gallery/002-Quarry.png", "png");
    write(root, "gallery/loose.jpg", "jpg");
    write(
        root,
        "projects/010-weather-station.md",
        "# Weather Station\n\nA **solar** powered sensor node.\n",
    );
    write(root, "projects/010-weather-station.jpg", "jpg");
    write(root, "projects/020-Compiler.md", "A toy compiler.\n");
    tmp
}

/// Gallery titles in manifest order.
pub fn gallery_titles(manifest: &Manifest) -> Vec<&str> {
    manifest
        .gallery
        .iter()
        .map(|e| e.item.title.as_str())
        .collect()
}

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}
