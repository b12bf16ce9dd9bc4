//! Project carousel with autoplay.
//!
//! A [`CarouselController`] owns the visible slide index and the handle of
//! its single autoplay timer.
//!
//! ## Wrapping
//!
//! [`CarouselController::show`] corrects one step of overflow only: an index
//! at or past the end shows the first slide, a negative index shows the last.
//! [`CarouselController::advance`] wraps with a true modulo, which agrees with
//! `show(current + delta)` for the one-step moves the page produces and stays
//! in range for larger jumps.
//!
//! ## Autoplay discipline
//!
//! Every manual navigation stops the autoplay timer and starts a fresh one, so
//! a tick can never land right after a click. Starting is idempotent: at most
//! one timer is ever live.

use std::time::Duration;

use crate::surface::{Scheduler, SlideSurface, Task, TimerId};

/// Navigable length when slides and dots are counted separately. The shorter
/// list wins, so every reachable slide has a dot and vice versa.
pub fn slide_span(slides: usize, dots: usize) -> usize {
    slides.min(dots)
}

#[derive(Debug)]
pub struct CarouselController<V, S> {
    current: usize,
    interval: Duration,
    autoplay: Option<TimerId>,
    slides: V,
    scheduler: S,
}

impl<V: SlideSurface, S: Scheduler> CarouselController<V, S> {
    pub fn new(slides: V, scheduler: S, interval: Duration) -> Self {
        Self {
            current: 0,
            interval,
            autoplay: None,
            slides,
            scheduler,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.slide_count()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn slides(&self) -> &V {
        &self.slides
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Show slide `index`, wrapping a single step past either end.
    pub fn show(&mut self, index: isize) {
        self.stop_autoplay();
        self.start_autoplay();

        let n = self.slide_count();
        if n == 0 {
            return;
        }
        self.current = if index >= n as isize {
            0
        } else if index < 0 {
            n - 1
        } else {
            index as usize
        };
        self.render();
        tracing::debug!(index = self.current, "carousel slide shown");
    }

    /// Move `delta` slides from the current one.
    pub fn advance(&mut self, delta: isize) {
        let n = self.slide_count();
        if n == 0 {
            self.show(0);
            return;
        }
        let target = (self.current as isize + delta).rem_euclid(n as isize);
        self.show(target);
    }

    /// Begin automatic progression unless it is already running.
    pub fn start_autoplay(&mut self) {
        if self.autoplay.is_some() || self.slide_count() == 0 {
            return;
        }
        self.autoplay = Some(self.scheduler.set_interval(self.interval, Task::AutoplayTick));
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "autoplay started");
    }

    pub fn stop_autoplay(&mut self) {
        if let Some(id) = self.autoplay.take() {
            self.scheduler.clear(id);
            tracing::debug!("autoplay stopped");
        }
    }

    /// One autoplay period elapsed: step forward without resetting the timer.
    pub fn on_autoplay_tick(&mut self) {
        let n = self.slide_count();
        if n == 0 || self.autoplay.is_none() {
            return;
        }
        self.current = (self.current + 1) % n;
        self.render();
    }

    /// Run a fired timer task. Tasks owned by other controllers are ignored.
    pub fn dispatch(&mut self, task: Task) {
        if task == Task::AutoplayTick {
            self.on_autoplay_tick();
        }
    }

    fn render(&mut self) {
        for i in 0..self.slide_count() {
            self.slides.set_active(i, false);
        }
        self.slides.set_active(self.current, true);
    }
}
