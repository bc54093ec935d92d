//! Page wiring: DOM events in, loader operations out.

use std::cell::RefCell;

use loader_shared::{LoaderConfig, LoaderController};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, Window};

use crate::dom::DomLoader;
use crate::error::LoaderError;
use crate::timers::BrowserScheduler;

/// Attribute on `<html>` holding an optional JSON [`LoaderConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-page-loader";

pub type PageLoader = LoaderController<DomLoader, BrowserScheduler>;

thread_local! {
    static CONTROLLER: RefCell<Option<PageLoader>> = const { RefCell::new(None) };
}

/// Run `f` against the installed controller, if any.
pub fn with_controller<R>(f: impl FnOnce(&PageLoader) -> R) -> Option<R> {
    // Clone out so the slot is not borrowed while the controller runs
    let controller = CONTROLLER.with(|slot| slot.borrow().clone());
    controller.as_ref().map(f)
}

/// Read the page's loader configuration.
///
/// A missing or unusable attribute yields the defaults, so a bad config can
/// never leave the overlay without its fallback.
pub fn config_from_document(document: &Document) -> LoaderConfig {
    let raw = document
        .document_element()
        .and_then(|root| root.get_attribute(CONFIG_ATTRIBUTE));

    match raw.map(|json| LoaderConfig::from_json(&json)) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("Ignoring {} attribute: {}", CONFIG_ATTRIBUTE, err);
            LoaderConfig::default()
        }
        None => LoaderConfig::default(),
    }
}

/// Hook the loader into the current page.
///
/// The submit listener is registered right away; the controller is built
/// once the DOM is ready, since the overlay lives in the page markup.
pub fn install(config: LoaderConfig) -> Result<(), LoaderError> {
    config.validate()?;
    let window = web_sys::window().ok_or(LoaderError::NoWindow)?;
    let document = window.document().ok_or(LoaderError::NoDocument)?;

    expose_globals(&window)?;
    listen_for_submits(&document)?;

    if document.ready_state() == "loading" {
        let callback = Closure::once_into_js(move || {
            if let Err(err) = on_dom_ready(config) {
                log::warn!("Loader setup failed: {}", err);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
            .map_err(LoaderError::binding)?;
    } else {
        on_dom_ready(config)?;
    }

    Ok(())
}

fn on_dom_ready(config: LoaderConfig) -> Result<(), LoaderError> {
    let window = web_sys::window().ok_or(LoaderError::NoWindow)?;
    let document = window.document().ok_or(LoaderError::NoDocument)?;

    let element = DomLoader::find(&document, &config.element_id);
    let controller = PageLoader::new(element, BrowserScheduler, config);
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller.clone()));

    controller.on_dom_ready();
    listen_for_load(&window, &document, controller)
}

fn listen_for_load(
    window: &Window,
    document: &Document,
    controller: PageLoader,
) -> Result<(), LoaderError> {
    if document.ready_state() == "complete" {
        controller.on_window_load();
        return Ok(());
    }

    let callback = Closure::once_into_js(move || controller.on_window_load());
    window
        .add_event_listener_with_callback("load", callback.unchecked_ref())
        .map_err(LoaderError::binding)
}

fn listen_for_submits(document: &Document) -> Result<(), LoaderError> {
    let onsubmit = Closure::wrap(Box::new(move |event: Event| {
        let form_id = submitted_form_id(&event);
        with_controller(|controller| controller.on_submit(form_id.as_deref()));
    }) as Box<dyn FnMut(Event)>);

    document
        .add_event_listener_with_callback("submit", onsubmit.as_ref().unchecked_ref())
        .map_err(LoaderError::binding)?;
    onsubmit.forget();
    Ok(())
}

fn submitted_form_id(event: &Event) -> Option<String> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| element.id())
}

/// Publish `window.showLoader()` / `window.hideLoader()` for other page scripts.
fn expose_globals(window: &Window) -> Result<(), LoaderError> {
    expose(window, "showLoader", show_loader)?;
    expose(window, "hideLoader", hide_loader)
}

fn expose(window: &Window, name: &str, operation: fn()) -> Result<(), LoaderError> {
    let callback = Closure::wrap(Box::new(operation) as Box<dyn Fn()>);
    js_sys::Reflect::set(window, &JsValue::from_str(name), callback.as_ref())
        .map_err(LoaderError::binding)?;
    callback.forget();
    Ok(())
}

/// Show the loader overlay. Also reachable as `window.showLoader()`.
#[wasm_bindgen(js_name = showLoader)]
pub fn show_loader() {
    with_controller(|controller| controller.show());
}

/// Fade the loader overlay out. Also reachable as `window.hideLoader()`.
#[wasm_bindgen(js_name = hideLoader)]
pub fn hide_loader() {
    with_controller(|controller| controller.hide());
}
