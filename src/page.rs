//! Routes host events to the controllers of one page.
//!
//! Either controller may be missing: a page without a carousel simply passes
//! `None`, and every carousel event then falls through silently. The same
//! holds for the gallery.
//!
//! | Event | Gallery | Carousel |
//! |-------|---------|----------|
//! | `ArrowLeft` / `ArrowRight` | `previous` / `next`, only while open | `advance(-1)` / `advance(1)`, always |
//! | `Escape` | `close`, only while open | - |
//! | Enter / Space on an item | `open(index)` | - |
//! | swipe on the overlay | `next` / `previous`, only while open | - |
//! | swipe on the carousel | - | `advance(1)` / `advance(-1)` |
//! | pointer enter / touch start | - | `stop_autoplay` |
//! | pointer leave / non-swipe touch end | - | `start_autoplay` |

use crate::carousel::CarouselController;
use crate::gallery::GalleryController;
use crate::input::{Key, Swipe, SwipeTracker};
use crate::surface::{ModalSurface, Scheduler, SlideSurface, Task};

pub struct Page<M, V, S> {
    gallery: Option<GalleryController<M, S>>,
    carousel: Option<CarouselController<V, S>>,
    modal_swipe: SwipeTracker,
    carousel_swipe: SwipeTracker,
}

impl<M, V, S> Page<M, V, S>
where
    M: ModalSurface,
    V: SlideSurface,
    S: Scheduler,
{
    pub fn new(
        gallery: Option<GalleryController<M, S>>,
        carousel: Option<CarouselController<V, S>>,
        swipe_threshold: f64,
    ) -> Self {
        Self {
            gallery,
            carousel,
            modal_swipe: SwipeTracker::new(swipe_threshold),
            carousel_swipe: SwipeTracker::new(swipe_threshold),
        }
    }

    pub fn gallery(&self) -> Option<&GalleryController<M, S>> {
        self.gallery.as_ref()
    }

    pub fn carousel(&self) -> Option<&CarouselController<V, S>> {
        self.carousel.as_ref()
    }

    /// Show the first slide, which also starts autoplay.
    pub fn start(&mut self) {
        if let Some(carousel) = &mut self.carousel {
            carousel.show(0);
        }
    }

    /// Route a document-level key press. Returns whether anything reacted.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let mut handled = false;

        if let Some(gallery) = self.gallery.as_mut().filter(|g| g.is_open()) {
            match key {
                Key::Escape => gallery.close(),
                Key::ArrowLeft => gallery.previous(),
                Key::ArrowRight => gallery.next(),
                _ => {}
            }
            handled |= matches!(key, Key::Escape | Key::ArrowLeft | Key::ArrowRight);
        }

        if let Some(carousel) = &mut self.carousel {
            match key {
                Key::ArrowLeft => carousel.advance(-1),
                Key::ArrowRight => carousel.advance(1),
                _ => {}
            }
            handled |= matches!(key, Key::ArrowLeft | Key::ArrowRight);
        }

        handled
    }

    /// A key pressed while gallery item `index` has focus.
    pub fn handle_item_key(&mut self, index: usize, key: Key) -> bool {
        if !key.activates() {
            return false;
        }
        self.open_item(index);
        true
    }

    pub fn open_item(&mut self, index: usize) {
        if let Some(gallery) = &mut self.gallery {
            gallery.open(index);
        }
    }

    pub fn close_modal(&mut self) {
        if let Some(gallery) = &mut self.gallery {
            gallery.close();
        }
    }

    pub fn modal_next(&mut self) {
        if let Some(gallery) = &mut self.gallery {
            gallery.next();
        }
    }

    pub fn modal_previous(&mut self) {
        if let Some(gallery) = &mut self.gallery {
            gallery.previous();
        }
    }

    pub fn modal_touch_start(&mut self, x: f64) {
        self.modal_swipe.begin(x);
    }

    pub fn modal_touch_end(&mut self, x: f64) {
        let swipe = self.modal_swipe.end(x);
        let Some(gallery) = self.gallery.as_mut().filter(|g| g.is_open()) else {
            return;
        };
        match swipe {
            Some(Swipe::Left) => gallery.next(),
            Some(Swipe::Right) => gallery.previous(),
            None => {}
        }
    }

    /// Indicator dot `index` clicked.
    pub fn select_slide(&mut self, index: usize) {
        if let Some(carousel) = &mut self.carousel {
            carousel.show(index as isize);
        }
    }

    /// Carousel prev/next button clicked.
    pub fn step_slide(&mut self, delta: isize) {
        if let Some(carousel) = &mut self.carousel {
            carousel.advance(delta);
        }
    }

    pub fn carousel_pointer_enter(&mut self) {
        if let Some(carousel) = &mut self.carousel {
            carousel.stop_autoplay();
        }
    }

    pub fn carousel_pointer_leave(&mut self) {
        if let Some(carousel) = &mut self.carousel {
            carousel.start_autoplay();
        }
    }

    pub fn carousel_touch_start(&mut self, x: f64) {
        self.carousel_swipe.begin(x);
        self.carousel_pointer_enter();
    }

    pub fn carousel_touch_end(&mut self, x: f64) {
        let swipe = self.carousel_swipe.end(x);
        let Some(carousel) = &mut self.carousel else {
            return;
        };
        match swipe {
            Some(swipe) => carousel.advance(swipe.step()),
            None => carousel.start_autoplay(),
        }
    }

    /// Hand a fired timer task to its controller.
    pub fn dispatch(&mut self, task: Task) {
        match task {
            Task::RevealModal => {
                if let Some(gallery) = &mut self.gallery {
                    gallery.dispatch(task);
                }
            }
            Task::AutoplayTick => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.dispatch(task);
                }
            }
        }
    }
}
