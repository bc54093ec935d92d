//! The two style operations behind the overlay.
//!
//! Both take the element explicitly; `None` stands for a page without the
//! overlay and turns every operation into a no-op.

use crate::config::fade_transition;
use crate::scheduler::Scheduler;
use crate::style::{DisplayMode, LoaderElement, StylePriority};

/// Show the overlay immediately: `display: flex !important; opacity: 1`.
pub fn show_loader<E: LoaderElement>(element: Option<&E>) {
    if let Some(element) = element {
        element.set_display(DisplayMode::Flex, StylePriority::Important);
        element.set_opacity(1.0);
    }
}

/// Fade the overlay out and schedule `display: none` after `fade_ms`.
///
/// Returns the handle of the `display: none` timer, or `None` when there is
/// no element.
pub fn hide_loader<E, S>(element: Option<&E>, scheduler: &S, fade_ms: u32) -> Option<S::Handle>
where
    E: LoaderElement + Clone + 'static,
    S: Scheduler,
{
    let element = element?;
    fade_out(element, fade_ms);

    let element = element.clone();
    Some(scheduler.schedule(
        fade_ms,
        Box::new(move || element.set_display(DisplayMode::None, StylePriority::Normal)),
    ))
}

pub(crate) fn fade_out<E: LoaderElement>(element: &E, fade_ms: u32) {
    element.set_transition(&fade_transition(fade_ms));
    element.set_opacity(0.0);
}
