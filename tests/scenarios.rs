//! End-to-end page scenarios through the public API.
//!
//! The doubles here are deliberately small: a modal that remembers what it
//! shows, slides that remember which one is active, and a clock that fires
//! due timers in order.

use portfolio_viewer::carousel::CarouselController;
use portfolio_viewer::gallery::GalleryController;
use portfolio_viewer::input::{Key, SWIPE_THRESHOLD};
use portfolio_viewer::page::Page;
use portfolio_viewer::surface::{ModalSurface, Scheduler, SlideSurface, Task, TimerId};
use portfolio_viewer::types::GalleryItem;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Modal {
    title: String,
    visible: bool,
    open: bool,
    scroll_locked: bool,
    focused_item: Option<usize>,
}

impl ModalSurface for Modal {
    fn set_image(&mut self, _src: &str, _alt: &str) {}

    fn set_caption(&mut self, title: &str, _description: &str) {
        self.title = title.to_string();
    }

    fn set_image_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    fn lock_scroll(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn focus_modal(&mut self) {
        self.focused_item = None;
    }

    fn focus_item(&mut self, index: usize) {
        self.focused_item = Some(index);
    }
}

struct Slides(Vec<bool>);

impl SlideSurface for Slides {
    fn slide_count(&self) -> usize {
        self.0.len()
    }

    fn set_active(&mut self, index: usize, active: bool) {
        self.0[index] = active;
    }
}

#[derive(Default)]
struct Timers {
    now: u64,
    next_id: u64,
    // (id, due, period, task)
    pending: Vec<(u64, u64, Option<u64>, Task)>,
}

#[derive(Clone, Default)]
struct Clock(Rc<RefCell<Timers>>);

impl Clock {
    fn live(&self) -> usize {
        self.0.borrow().pending.len()
    }

    fn advance(&self, ms: u64, mut fire: impl FnMut(Task)) {
        let until = self.0.borrow().now + ms;
        loop {
            let task = {
                let mut t = self.0.borrow_mut();
                let Some(pos) = (0..t.pending.len())
                    .filter(|&i| t.pending[i].1 <= until)
                    .min_by_key(|&i| (t.pending[i].1, t.pending[i].0))
                else {
                    break;
                };
                let (_, due, period, task) = t.pending[pos];
                t.now = due;
                match period {
                    Some(p) => t.pending[pos].1 = due + p,
                    None => {
                        t.pending.remove(pos);
                    }
                }
                task
            };
            fire(task);
        }
        self.0.borrow_mut().now = until;
    }

    fn schedule(&self, delay: Duration, period: Option<Duration>, task: Task) -> TimerId {
        let mut t = self.0.borrow_mut();
        t.next_id += 1;
        let id = t.next_id;
        let due = t.now + delay.as_millis() as u64;
        t.pending
            .push((id, due, period.map(|p| p.as_millis() as u64), task));
        TimerId(id)
    }
}

impl Scheduler for Clock {
    fn set_interval(&mut self, period: Duration, task: Task) -> TimerId {
        self.schedule(period, Some(period), task)
    }

    fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId {
        self.schedule(delay, None, task)
    }

    fn clear(&mut self, id: TimerId) {
        self.0.borrow_mut().pending.retain(|t| t.0 != id.0);
    }
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

const FADE: Duration = Duration::from_millis(150);
const PERIOD: Duration = Duration::from_millis(10_000);

fn items(n: usize) -> Vec<GalleryItem> {
    (0..n)
        .map(|i| GalleryItem::new(format!("{i}.jpg"), format!("alt {i}"), format!("Photo {i}"), ""))
        .collect()
}

fn page(images: usize, slides: usize) -> (Page<Modal, Slides, Clock>, Clock) {
    let clock = Clock::default();
    let gallery = GalleryController::new(items(images), Modal::default(), clock.clone(), FADE);
    let carousel = CarouselController::new(Slides(vec![false; slides]), clock.clone(), PERIOD);
    let mut page = Page::new(Some(gallery), Some(carousel), SWIPE_THRESHOLD);
    page.start();
    (page, clock)
}

fn modal_title(page: &Page<Modal, Slides, Clock>) -> &str {
    &page.gallery().unwrap().modal().title
}

fn slide(page: &Page<Modal, Slides, Clock>) -> usize {
    page.carousel().unwrap().current_index()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn browse_gallery_with_keyboard_then_escape() {
    let (mut page, clock) = page(5, 3);

    assert!(page.handle_item_key(2, Key::Enter));
    let modal = page.gallery().unwrap().modal();
    assert!(modal.open && modal.scroll_locked && modal.visible);
    assert_eq!(modal_title(&page), "Photo 2");

    for _ in 0..4 {
        page.handle_key(Key::ArrowRight);
        clock.advance(FADE.as_millis() as u64, |task| page.dispatch(task));
    }
    assert_eq!(page.gallery().unwrap().current_index(), 1);
    assert_eq!(modal_title(&page), "Photo 1");
    assert!(page.gallery().unwrap().modal().visible);

    page.handle_key(Key::Escape);
    let modal = page.gallery().unwrap().modal();
    assert!(!modal.open && !modal.scroll_locked);
    assert_eq!(modal.focused_item, Some(1));
}

#[test]
fn caption_is_never_shown_with_a_hidden_swap_pending() {
    let (mut page, clock) = page(3, 0);
    page.open_item(0);
    page.modal_next();

    let modal = page.gallery().unwrap().modal();
    assert!(!modal.visible);
    assert_eq!(modal.title, "Photo 0");

    clock.advance(FADE.as_millis() as u64, |task| page.dispatch(task));
    let modal = page.gallery().unwrap().modal();
    assert!(modal.visible);
    assert_eq!(modal.title, "Photo 1");
}

#[test]
fn arrows_drive_carousel_but_gallery_only_while_open() {
    let (mut page, _clock) = page(4, 3);

    page.handle_key(Key::ArrowRight);
    assert_eq!(slide(&page), 1);
    assert_eq!(page.gallery().unwrap().current_index(), 0);

    page.open_item(0);
    page.handle_key(Key::ArrowLeft);
    assert_eq!(page.gallery().unwrap().current_index(), 3);
    assert_eq!(slide(&page), 0);
}

#[test]
fn autoplay_cycles_and_wraps() {
    let (mut page, clock) = page(0, 4);
    assert_eq!(slide(&page), 0);

    let mut seen = Vec::new();
    for _ in 0..4 {
        clock.advance(PERIOD.as_millis() as u64, |task| page.dispatch(task));
        seen.push(slide(&page));
    }
    assert_eq!(seen, vec![1, 2, 3, 0]);
    assert_eq!(clock.live(), 1);
}

#[test]
fn hover_pauses_and_leave_resumes_autoplay() {
    let (mut page, clock) = page(0, 3);

    page.carousel_pointer_enter();
    clock.advance(3 * PERIOD.as_millis() as u64, |task| page.dispatch(task));
    assert_eq!(slide(&page), 0);

    page.carousel_pointer_leave();
    page.carousel_pointer_leave();
    assert_eq!(clock.live(), 1);
    clock.advance(PERIOD.as_millis() as u64, |task| page.dispatch(task));
    assert_eq!(slide(&page), 1);
}

#[test]
fn manual_navigation_restarts_the_period() {
    let (mut page, clock) = page(0, 3);

    clock.advance(9_000, |task| page.dispatch(task));
    page.select_slide(2);
    clock.advance(9_000, |task| page.dispatch(task));
    assert_eq!(slide(&page), 2);
    clock.advance(1_000, |task| page.dispatch(task));
    assert_eq!(slide(&page), 0);
}

#[test]
fn swipes_respect_the_threshold() {
    let (mut page, _clock) = page(5, 3);
    page.open_item(0);

    page.modal_touch_start(300.0);
    page.modal_touch_end(240.0);
    assert_eq!(page.gallery().unwrap().current_index(), 1);

    page.modal_touch_start(300.0);
    page.modal_touch_end(260.0);
    assert_eq!(page.gallery().unwrap().current_index(), 1);

    page.carousel_touch_start(100.0);
    page.carousel_touch_end(200.0);
    assert_eq!(slide(&page), 2);
}

#[test]
fn empty_page_ignores_everything() {
    let clock = Clock::default();
    let mut page: Page<Modal, Slides, Clock> = Page::new(None, None, SWIPE_THRESHOLD);
    page.start();
    assert!(!page.handle_key(Key::ArrowRight));
    page.open_item(0);
    page.modal_next();
    page.step_slide(1);
    page.carousel_touch_start(0.0);
    page.carousel_touch_end(500.0);
    assert_eq!(clock.live(), 0);
}
