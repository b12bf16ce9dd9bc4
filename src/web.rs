//! Browser binding over `web-sys` (`web` feature).
//!
//! Runs once when the wasm module starts. It reads the page the generator
//! produced, builds a [`Page`] from what it finds, and wires DOM events to it.
//!
//! | DOM | Surface |
//! |-----|---------|
//! | `#imageModal`, `#modalImage`, `#modalTitle`, `#modalDescription` | [`DomModal`] |
//! | `.project-slide`, `.dot` | [`DomSlides`] |
//! | `.gallery-item img` | [`DomImages`] |
//! | `setInterval` / `setTimeout` | [`DomScheduler`] |
//!
//! Anything missing from the page is skipped. The shared page lives in an
//! `Rc<RefCell<Option<_>>>`; listeners hold it strongly, timer callbacks hold
//! a `Weak` and hand their [`Task`] to [`Page::dispatch`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, KeyboardEvent, Node, NodeList, TouchEvent, Window,
};

use crate::carousel::{CarouselController, slide_span};
use crate::config::ViewerConfig;
use crate::gallery::{GalleryController, aria_label};
use crate::generate::{CONFIG_SCRIPT_ID, render_modal};
use crate::images::ImageLoader;
use crate::input::Key;
use crate::page::Page;
use crate::surface::{ImageSurface, ModalSurface, Scheduler, SlideSurface, Task, TimerId};
use crate::types::GalleryItem;

type DomPage = Page<DomModal, DomSlides, DomScheduler>;
type SharedPage = Rc<RefCell<Option<DomPage>>>;

const MODAL_ID: &str = "imageModal";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = read_config(&document);

    let shared: SharedPage = Rc::new(RefCell::new(None));
    let scheduler = DomScheduler::new(window, Rc::downgrade(&shared));

    let gallery = bind_gallery(&document)?.map(|(items, modal)| {
        GalleryController::new(items, modal, scheduler.clone(), config.fade())
    });
    let carousel = bind_slides(&document)?
        .map(|slides| CarouselController::new(slides, scheduler, config.autoplay_interval()));
    let has_gallery = gallery.is_some();
    let has_carousel = carousel.is_some();

    *shared.borrow_mut() = Some(Page::new(gallery, carousel, config.input.swipe_threshold));

    if has_gallery {
        listen_gallery(&document, &shared)?;
    }
    if has_carousel {
        listen_carousel(&document, &shared)?;
    }
    listen(
        &document,
        "keydown",
        on(&shared, |page, event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                page.handle_key(Key::from_dom(&event.key()));
            }
        }),
    )?;
    bind_images(&document)?;

    with_page(&shared, |page| page.start());
    tracing::debug!(has_gallery, has_carousel, "viewer started");
    Ok(())
}

// ============================================================================
// Page discovery
// ============================================================================

/// Behaviour config embedded by the generator, or defaults.
fn read_config(document: &Document) -> ViewerConfig {
    let text = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());
    ViewerConfig::from_embedded(text.as_deref())
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn text_of(root: &Element, selector: &str) -> String {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

/// Capture one gallery item from its thumbnail, heading and paragraph.
fn read_item(element: &Element) -> GalleryItem {
    let img = element
        .query_selector("img")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
    let (src, alt) = match &img {
        Some(img) => (
            img.get_attribute("data-src").unwrap_or_else(|| img.src()),
            img.alt(),
        ),
        None => Default::default(),
    };
    GalleryItem::new(src, alt, text_of(element, "h3"), text_of(element, "p"))
}

fn bind_gallery(document: &Document) -> Result<Option<(Vec<GalleryItem>, DomModal)>, JsValue> {
    let mut items = Vec::new();
    let mut focus_targets = Vec::new();
    for element in elements(document.query_selector_all(".gallery-item")?) {
        let item = read_item(&element);
        element.set_attribute("tabindex", "0")?;
        element.set_attribute("role", "button")?;
        element.set_attribute("aria-label", &aria_label(&item))?;
        items.push(item);
        focus_targets.push(element.dyn_into::<HtmlElement>().ok());
    }

    if document.get_element_by_id(MODAL_ID).is_none() {
        if let Some(body) = document.body() {
            body.insert_adjacent_html("beforeend", &render_modal().into_string())?;
        }
    }

    Ok(DomModal::find(document, focus_targets).map(|modal| (items, modal)))
}

fn bind_slides(document: &Document) -> Result<Option<DomSlides>, JsValue> {
    let slides = elements(document.query_selector_all(".project-slide")?);
    if slides.is_empty() {
        return Ok(None);
    }
    let dots = elements(document.query_selector_all(".dot")?);
    if dots.len() != slides.len() {
        tracing::warn!(
            slides = slides.len(),
            dots = dots.len(),
            span = slide_span(slides.len(), dots.len()),
            "slide and dot counts differ"
        );
    }
    Ok(Some(DomSlides { slides, dots }))
}

fn bind_images(document: &Document) -> Result<(), JsValue> {
    let images: Vec<HtmlImageElement> = elements(document.query_selector_all(".gallery-item img")?)
        .into_iter()
        .filter_map(|el| el.dyn_into().ok())
        .collect();
    let deferred = images.iter().map(|img| img.get_attribute("data-src")).collect();
    let loader = Rc::new(RefCell::new(ImageLoader::new(
        deferred,
        DomImages {
            images: images.clone(),
        },
    )));

    for (index, img) in images.iter().enumerate() {
        let _ = img.style().set_property("opacity", "0");
        let on_load = loader.clone();
        listen(img, "load", move |_| {
            if let Ok(mut loader) = on_load.try_borrow_mut() {
                loader.on_load(index);
            }
        })?;
        let on_error = loader.clone();
        listen(img, "error", move |_| {
            if let Ok(mut loader) = on_error.try_borrow_mut() {
                loader.on_error(index);
            }
        })?;

        // Eager images may have settled before the module ran.
        if img.complete() && !img.src().is_empty() {
            let mut loader = loader.borrow_mut();
            if img.natural_width() > 0 {
                loader.on_load(index);
            } else {
                loader.on_error(index);
            }
        }
    }

    let lazy: Vec<usize> = images
        .iter()
        .enumerate()
        .filter(|(_, img)| img.has_attribute("data-src"))
        .map(|(i, _)| i)
        .collect();
    if lazy.is_empty() {
        return Ok(());
    }

    let observed = images.clone();
    let on_visible = loader.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                let Some(index) = observed
                    .iter()
                    .position(|img| img.is_same_node(Some(target.as_ref())))
                else {
                    continue;
                };
                if let Ok(mut loader) = on_visible.try_borrow_mut() {
                    loader.on_visible(index);
                }
            }
        },
    );

    match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => {
            for &index in &lazy {
                observer.observe(&images[index]);
            }
            callback.forget();
        }
        Err(_) => {
            let mut loader = loader.borrow_mut();
            for index in lazy {
                loader.on_visible(index);
            }
        }
    }
    Ok(())
}

// ============================================================================
// Listeners
// ============================================================================

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn with_page(shared: &SharedPage, action: impl FnOnce(&mut DomPage)) {
    if let Ok(mut guard) = shared.try_borrow_mut() {
        if let Some(page) = guard.as_mut() {
            action(page);
        }
    }
}

/// Event handler that runs `action` against the page.
fn on(
    shared: &SharedPage,
    mut action: impl FnMut(&mut DomPage, &Event) + 'static,
) -> impl FnMut(Event) + 'static {
    let shared = shared.clone();
    move |event| with_page(&shared, |page| action(page, &event))
}

fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_x()))
}

fn listen_gallery(document: &Document, shared: &SharedPage) -> Result<(), JsValue> {
    for (index, element) in elements(document.query_selector_all(".gallery-item")?)
        .into_iter()
        .enumerate()
    {
        listen(&element, "click", on(shared, move |page, _| page.open_item(index)))?;
        listen(
            &element,
            "keydown",
            on(shared, move |page, event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|e| Key::from_dom(&e.key()))
                else {
                    return;
                };
                if page.handle_item_key(index, key) {
                    event.prevent_default();
                }
            }),
        )?;
    }

    let Some(modal) = document.get_element_by_id(MODAL_ID) else {
        return Ok(());
    };
    if let Some(close) = modal.query_selector(".close")? {
        listen(&close, "click", on(shared, |page, _| page.close_modal()))?;
        // A button activates on Enter/Space by itself; other elements need it wired.
        if close.tag_name() != "BUTTON" {
            listen(
                &close,
                "keydown",
                on(shared, |page, event| {
                    if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                        if Key::from_dom(&key.key()).activates() {
                            event.prevent_default();
                            page.close_modal();
                        }
                    }
                }),
            )?;
        }
    }
    if let Some(prev) = modal.query_selector(".prev-modal")? {
        listen(&prev, "click", on(shared, |page, _| page.modal_previous()))?;
    }
    if let Some(next) = modal.query_selector(".next-modal")? {
        listen(&next, "click", on(shared, |page, _| page.modal_next()))?;
    }

    let backdrop: Node = modal.clone().into();
    listen(
        &modal,
        "click",
        on(shared, move |page, event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            if backdrop.is_same_node(target.as_ref()) {
                page.close_modal();
            }
        }),
    )?;
    listen(
        &modal,
        "touchstart",
        on(shared, |page, event| {
            if let Some(x) = touch_x(event) {
                page.modal_touch_start(x);
            }
        }),
    )?;
    listen(
        &modal,
        "touchend",
        on(shared, |page, event| {
            if let Some(x) = touch_x(event) {
                page.modal_touch_end(x);
            }
        }),
    )?;
    Ok(())
}

fn listen_carousel(document: &Document, shared: &SharedPage) -> Result<(), JsValue> {
    for (index, dot) in elements(document.query_selector_all(".dot")?)
        .into_iter()
        .enumerate()
    {
        listen(&dot, "click", on(shared, move |page, _| page.select_slide(index)))?;
    }
    for button in elements(document.query_selector_all(".carousel-nav[data-step]")?) {
        let step = button
            .get_attribute("data-step")
            .and_then(|s| s.parse::<isize>().ok())
            .unwrap_or(1);
        listen(&button, "click", on(shared, move |page, _| page.step_slide(step)))?;
    }

    let Some(carousel) = document.query_selector(".project-carousel")? else {
        return Ok(());
    };
    listen(
        &carousel,
        "mouseenter",
        on(shared, |page, _| page.carousel_pointer_enter()),
    )?;
    listen(
        &carousel,
        "mouseleave",
        on(shared, |page, _| page.carousel_pointer_leave()),
    )?;
    listen(
        &carousel,
        "touchstart",
        on(shared, |page, event| {
            if let Some(x) = touch_x(event) {
                page.carousel_touch_start(x);
            }
        }),
    )?;
    listen(
        &carousel,
        "touchend",
        on(shared, |page, event| {
            if let Some(x) = touch_x(event) {
                page.carousel_touch_end(x);
            }
        }),
    )?;
    Ok(())
}

// ============================================================================
// Surfaces
// ============================================================================

pub struct DomModal {
    body: Option<HtmlElement>,
    modal: Element,
    image: HtmlImageElement,
    title: Element,
    description: Element,
    items: Vec<Option<HtmlElement>>,
}

impl DomModal {
    fn find(document: &Document, items: Vec<Option<HtmlElement>>) -> Option<Self> {
        Some(Self {
            body: document.body(),
            modal: document.get_element_by_id(MODAL_ID)?,
            image: document.get_element_by_id("modalImage")?.dyn_into().ok()?,
            title: document.get_element_by_id("modalTitle")?,
            description: document.get_element_by_id("modalDescription")?,
            items,
        })
    }
}

impl ModalSurface for DomModal {
    fn set_image(&mut self, src: &str, alt: &str) {
        self.image.set_src(src);
        self.image.set_alt(alt);
    }

    fn set_caption(&mut self, title: &str, description: &str) {
        self.title.set_text_content(Some(title));
        self.description.set_text_content(Some(description));
    }

    fn set_image_visible(&mut self, visible: bool) {
        let opacity = if visible { "1" } else { "0" };
        let _ = self.image.style().set_property("opacity", opacity);
    }

    fn set_open(&mut self, open: bool) {
        let _ = self.modal.class_list().toggle_with_force("active", open);
    }

    fn lock_scroll(&mut self, locked: bool) {
        let Some(body) = &self.body else {
            return;
        };
        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
    }

    fn focus_modal(&mut self) {
        let _ = self.image.focus();
    }

    fn focus_item(&mut self, index: usize) {
        if let Some(Some(item)) = self.items.get(index) {
            let _ = item.focus();
        }
    }
}

pub struct DomSlides {
    slides: Vec<Element>,
    dots: Vec<Element>,
}

impl SlideSurface for DomSlides {
    fn slide_count(&self) -> usize {
        slide_span(self.slides.len(), self.dots.len())
    }

    fn set_active(&mut self, index: usize, active: bool) {
        for list in [&self.slides, &self.dots] {
            if let Some(el) = list.get(index) {
                let _ = el.class_list().toggle_with_force("active", active);
            }
        }
    }
}

pub struct DomImages {
    images: Vec<HtmlImageElement>,
}

impl ImageSurface for DomImages {
    fn reveal(&mut self, index: usize) {
        if let Some(img) = self.images.get(index) {
            let _ = img.style().set_property("opacity", "1");
        }
    }

    fn hide(&mut self, index: usize) {
        if let Some(img) = self.images.get(index) {
            let _ = img.style().set_property("display", "none");
        }
    }

    fn insert_placeholder(&mut self, index: usize, message: &str) {
        let Some(img) = self.images.get(index) else {
            return;
        };
        let (Some(document), Some(parent)) = (img.owner_document(), img.parent_node()) else {
            return;
        };
        if let Ok(placeholder) = document.create_element("div") {
            placeholder.set_class_name("loading-placeholder");
            placeholder.set_text_content(Some(message));
            let _ = parent.append_child(&placeholder);
        }
    }

    fn assign_source(&mut self, index: usize, src: &str) {
        if let Some(img) = self.images.get(index) {
            img.set_src(src);
            let _ = img.class_list().remove_1("lazy");
        }
    }
}

/// [`Scheduler`] over the window's timer functions.
///
/// Interval callbacks are kept alive in `intervals` until cleared. Timeouts
/// use one-shot closures that free themselves when they run.
#[derive(Clone)]
pub struct DomScheduler {
    window: Window,
    page: Weak<RefCell<Option<DomPage>>>,
    intervals: Rc<RefCell<HashMap<i32, Closure<dyn FnMut()>>>>,
}

impl DomScheduler {
    fn new(window: Window, page: Weak<RefCell<Option<DomPage>>>) -> Self {
        Self {
            window,
            page,
            intervals: Rc::default(),
        }
    }

    fn fire(page: &Weak<RefCell<Option<DomPage>>>, task: Task) {
        if let Some(shared) = page.upgrade() {
            with_page(&shared, |page| page.dispatch(task));
        }
    }
}

fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

impl Scheduler for DomScheduler {
    fn set_interval(&mut self, period: Duration, task: Task) -> TimerId {
        let page = self.page.clone();
        let callback = Closure::<dyn FnMut()>::new(move || Self::fire(&page, task));
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis(period),
            )
            .unwrap_or(0);
        self.intervals.borrow_mut().insert(handle, callback);
        TimerId(handle as u64)
    }

    fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId {
        let page = self.page.clone();
        let callback = Closure::once_into_js(move || Self::fire(&page, task));
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay),
            )
            .unwrap_or(0);
        TimerId(handle as u64)
    }

    fn clear(&mut self, id: TimerId) {
        let handle = id.0 as i32;
        let interval = self.intervals.borrow_mut().remove(&handle);
        match interval {
            Some(callback) => {
                self.window.clear_interval_with_handle(handle);
                drop(callback);
            }
            None => self.window.clear_timeout_with_handle(handle),
        }
    }
}
