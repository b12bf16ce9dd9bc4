//! Keyboard and touch input classification.
//!
//! These adapters only *classify* raw input. Routing the result to a
//! controller is [`crate::page::Page`]'s job, which keeps this module free of
//! controller generics and easy to reuse from any host.

/// Default minimum horizontal travel, in CSS pixels, for a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Keys the page reacts to, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` string.
    pub fn from_dom(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }

    /// Whether the key activates a focused gallery item.
    pub fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Direction of a recognised swipe, named by finger travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved right-to-left: go forward.
    Left,
    /// Finger moved left-to-right: go back.
    Right,
}

impl Swipe {
    /// Navigation step this swipe stands for.
    pub fn step(self) -> isize {
        match self {
            Swipe::Left => 1,
            Swipe::Right => -1,
        }
    }
}

/// Classify a touch by its net horizontal displacement.
///
/// Travel must strictly exceed `threshold`; anything at or below it is not a
/// swipe.
pub fn classify_swipe(start_x: f64, end_x: f64, threshold: f64) -> Option<Swipe> {
    let diff = start_x - end_x;
    if diff.abs() <= threshold {
        return None;
    }
    if diff > 0.0 { Some(Swipe::Left) } else { Some(Swipe::Right) }
}

/// Remembers where the current touch started on one surface.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the touch. A touch end without a recorded start yields nothing.
    pub fn end(&mut self, x: f64) -> Option<Swipe> {
        let start = self.start_x.take()?;
        classify_swipe(start, x, self.threshold)
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}
