pub mod bindings;
pub mod components;
pub mod dom;
pub mod error;
pub mod logging;
pub mod timers;

pub use bindings::{config_from_document, install, with_controller, PageLoader};
pub use dom::DomLoader;
pub use error::LoaderError;
pub use timers::{BrowserScheduler, BrowserTimer};

use log::LevelFilter;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);

    if let Err(err) = start() {
        log::warn!("Page loader disabled: {}", err);
    }
}

fn start() -> Result<(), LoaderError> {
    let window = web_sys::window().ok_or(LoaderError::NoWindow)?;
    let document = window.document().ok_or(LoaderError::NoDocument)?;

    let config = config_from_document(&document);
    logging::init(config.log_level);
    install(config)
}
