//! # Portfolio Viewer
//!
//! The presentation layer of a single-page portfolio: a project carousel that
//! advances on its own, and an image gallery that opens into a full-screen
//! lightbox with keyboard, pointer and swipe navigation.
//!
//! # Two Halves
//!
//! ```text
//! Build time   content/  →  scan  →  Manifest  →  generate  →  dist/index.html
//! Run time     dist/index.html  +  pkg/ (wasm, `web` feature)  →  Page
//! ```
//!
//! The build half is a small static generator: it reads images and markdown
//! from a content directory and writes the page markup the controllers bind
//! to. The run-time half is the controllers themselves.
//!
//! # Host-Agnostic Controllers
//!
//! [`gallery::GalleryController`] and [`carousel::CarouselController`] never
//! touch a DOM. They drive the traits in [`surface`]:
//!
//! - a [`surface::ModalSurface`] for the lightbox,
//! - a [`surface::SlideSurface`] for slides and their dots,
//! - a [`surface::Scheduler`] for timers.
//!
//! Timers carry a [`surface::Task`] tag instead of a callback, so a fired
//! timer is just a value handed back through [`page::Page::dispatch`]. That
//! keeps the controllers free of shared ownership and lets tests drive time
//! by hand. The browser binding in `web` implements the traits over
//! `web-sys`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | Lightbox state machine: open, close, wrap-around stepping, fade |
//! | [`carousel`] | Slide rotation with a resettable autoplay timer |
//! | [`input`] | Key mapping and swipe classification |
//! | [`page`] | Wires both controllers to input events; routes timer tasks |
//! | [`images`] | Per-image load, failure placeholder, and lazy source swap |
//! | [`surface`] | Traits the controllers drive; implemented by hosts |
//! | [`types`] | `GalleryItem`, `ProjectSlide` |
//! | [`scan`] | Walks the content directory into a [`scan::Manifest`] |
//! | [`metadata`] | `NNN-name` filename convention and sidecar descriptions |
//! | [`generate`] | Renders the page with Maud and copies media |
//! | [`config`] | `config.toml` loading, validation, merging, CSS generation |
//! | [`output`] | CLI output formatting |

pub mod carousel;
pub mod config;
pub mod gallery;
pub mod generate;
pub mod images;
pub mod input;
pub mod metadata;
pub mod output;
pub mod page;
pub mod scan;
pub mod surface;
pub mod types;

#[cfg(feature = "web")]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;
