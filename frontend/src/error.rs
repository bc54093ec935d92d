use loader_shared::ConfigError;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("No window available")]
    NoWindow,
    #[error("No document available")]
    NoDocument,
    #[error("Failed to bind event listener: {0}")]
    EventBinding(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LoaderError {
    pub(crate) fn binding(err: JsValue) -> Self {
        LoaderError::EventBinding(format!("{:?}", err))
    }
}
