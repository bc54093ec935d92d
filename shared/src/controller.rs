//! Lifecycle controller for the page loader overlay.
//!
//! Wires the show/hide operations to page events:
//!
//! * DOM ready arms a fallback timer that forces the overlay out if it is
//!   still displayed after `fallback_ms`.
//! * Full resource load waits `hold_after_load_ms`, then fades out.
//! * Form submissions from non-exempt forms show the overlay again.
//!
//! Every timer is held as a cancellable handle. A fade that completes
//! cancels the fallback, and `show()` cancels a fade in progress.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::LoaderConfig;
use crate::ops::{fade_out, show_loader};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::style::{DisplayMode, LoaderElement, LoaderPhase, StylePriority};

struct Inner<E, S: Scheduler> {
    element: Option<E>,
    scheduler: S,
    config: LoaderConfig,
    armed: Cell<bool>,
    load_seen: Cell<bool>,
    hold_pending: Cell<bool>,
    fade_pending: Cell<bool>,
    // Fired handles stay in their slot until replaced; a timer never drops
    // its own handle from inside its callback.
    hold_timer: RefCell<Option<S::Handle>>,
    fade_timer: RefCell<Option<S::Handle>>,
    fallback_timer: RefCell<Option<S::Handle>>,
}

/// Drives one overlay element. Clones share state.
pub struct LoaderController<E, S: Scheduler> {
    inner: Rc<Inner<E, S>>,
}

impl<E, S: Scheduler> Clone for LoaderController<E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E, S> LoaderController<E, S>
where
    E: LoaderElement + 'static,
    S: Scheduler + 'static,
{
    pub fn new(element: Option<E>, scheduler: S, config: LoaderConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                element,
                scheduler,
                config,
                armed: Cell::new(false),
                load_seen: Cell::new(false),
                hold_pending: Cell::new(false),
                fade_pending: Cell::new(false),
                hold_timer: RefCell::new(None),
                fade_timer: RefCell::new(None),
                fallback_timer: RefCell::new(None),
            }),
        }
    }

    pub fn element(&self) -> Option<&E> {
        self.inner.element.as_ref()
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.inner.config
    }

    pub fn phase(&self) -> LoaderPhase {
        let inner = &self.inner;
        if inner.fade_pending.get() {
            LoaderPhase::Fading
        } else if self.display() == Some(DisplayMode::None) {
            LoaderPhase::Hidden
        } else if inner.hold_pending.get() {
            LoaderPhase::HidePending
        } else {
            LoaderPhase::Visible
        }
    }

    /// Show the overlay right away, abandoning any fade in progress.
    pub fn show(&self) {
        let Some(element) = self.element() else {
            return;
        };

        if self.inner.fade_pending.replace(false) {
            log::debug!("Loader shown during fade; cancelling pending hide");
            cancel(&self.inner.fade_timer);
        }
        show_loader(Some(element));
    }

    /// Fade the overlay out; it reaches `display: none` `fade_ms` after the
    /// first `hide()` of a fade. Repeated calls re-apply the fade styles.
    pub fn hide(&self) {
        let Some(element) = self.element() else {
            return;
        };

        let fade_ms = self.inner.config.fade_ms;
        fade_out(element, fade_ms);

        // An explicit hide supersedes the post-load hold
        if self.inner.hold_pending.replace(false) {
            cancel(&self.inner.hold_timer);
        }
        if self.inner.fade_pending.replace(true) {
            return;
        }

        let timer = self.schedule(fade_ms, |controller| controller.finish_fade());
        *self.inner.fade_timer.borrow_mut() = Some(timer);
    }

    /// Structural content is ready: arm the fallback timer.
    pub fn on_dom_ready(&self) {
        if self.element().is_none() {
            log::debug!(
                "No #{} element on page; loader lifecycle not armed",
                self.inner.config.element_id
            );
            return;
        }
        if self.inner.armed.replace(true) {
            return;
        }

        let fallback_ms = self.inner.config.fallback_ms;
        log::debug!("Loader armed; fallback in {}ms", fallback_ms);

        let timer = self.schedule(fallback_ms, |controller| {
            if controller.display() != Some(DisplayMode::None) {
                log::info!("Page load not settled in time; forcing loader out");
                controller.hide();
            }
        });
        *self.inner.fallback_timer.borrow_mut() = Some(timer);
    }

    /// All page resources finished loading: hold briefly, then fade out.
    pub fn on_window_load(&self) {
        let inner = &self.inner;
        if !inner.armed.get() || inner.load_seen.replace(true) {
            return;
        }

        log::debug!(
            "Page resources loaded; hiding loader in {}ms",
            inner.config.hold_after_load_ms
        );
        inner.hold_pending.set(true);

        let timer = self.schedule(inner.config.hold_after_load_ms, |controller| {
            controller.inner.hold_pending.set(false);
            controller.hide();
        });
        *inner.hold_timer.borrow_mut() = Some(timer);
    }

    /// A form was submitted. Returns whether the overlay was shown.
    ///
    /// The submission itself is never blocked or delayed.
    pub fn on_submit(&self, form_id: Option<&str>) -> bool {
        if !self.inner.config.shows_loader_for(form_id) {
            return false;
        }
        log::debug!("Form {:?} submitted; showing loader", form_id.unwrap_or_default());
        self.show();
        true
    }

    fn display(&self) -> Option<DisplayMode> {
        self.element().and_then(|element| element.display())
    }

    fn finish_fade(&self) {
        self.inner.fade_pending.set(false);
        if let Some(element) = self.element() {
            element.set_display(DisplayMode::None, StylePriority::Normal);
        }
        cancel(&self.inner.fallback_timer);
        log::debug!("Loader hidden");
    }

    fn schedule<F>(&self, delay_ms: u32, callback: F) -> S::Handle
    where
        F: FnOnce(&Self) + 'static,
    {
        let weak: Weak<Inner<E, S>> = Rc::downgrade(&self.inner);
        self.inner.scheduler.schedule(
            delay_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    callback(&LoaderController { inner });
                }
            }),
        )
    }
}

fn cancel<H: TimerHandle>(slot: &RefCell<Option<H>>) {
    let timer = slot.borrow_mut().take();
    if let Some(timer) = timer {
        timer.cancel();
    }
}
