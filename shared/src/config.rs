use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ELEMENT_ID: &str = "global-loader";
pub const DEFAULT_EXEMPT_FORMS: [&str; 2] = ["enquiryForm", "replyForm"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid loader configuration: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Loader element id must not be empty")]
    EmptyElementId,
    #[error("Exempt form ids must not be empty")]
    EmptyExemptFormId,
}

/// Timing and targeting for the loader overlay. All delays are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub element_id: String,
    /// Opacity transition length, and the delay before `display: none`.
    pub fade_ms: u32,
    /// Delay between full resource load and the start of the fade.
    pub hold_after_load_ms: u32,
    /// Safety timeout from DOM ready after which the loader is forced out.
    pub fallback_ms: u32,
    /// Forms that manage their own loading UI.
    pub exempt_forms: Vec<String>,
    /// Whether a submit from a form without an id shows the loader.
    ///
    /// Off by default. `true` matches pages that show the loader for every
    /// non-exempt submit, anonymous forms included.
    pub show_on_anonymous_forms: bool,
    pub log_level: LevelFilter,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            element_id: DEFAULT_ELEMENT_ID.to_string(),
            fade_ms: 600,
            hold_after_load_ms: 1200,
            fallback_ms: 1900,
            exempt_forms: DEFAULT_EXEMPT_FORMS.iter().map(|id| id.to_string()).collect(),
            show_on_anonymous_forms: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl LoaderConfig {
    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.element_id.trim().is_empty() {
            return Err(ConfigError::EmptyElementId);
        }
        if self.exempt_forms.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::EmptyExemptFormId);
        }
        Ok(())
    }

    /// CSS `transition` value applied when fading out, e.g. `opacity 0.6s ease`.
    pub fn transition_css(&self) -> String {
        fade_transition(self.fade_ms)
    }

    /// Decide whether a submit from the form with `form_id` shows the loader.
    pub fn shows_loader_for(&self, form_id: Option<&str>) -> bool {
        match form_id.filter(|id| !id.is_empty()) {
            Some(id) => !self.exempt_forms.iter().any(|exempt| exempt == id),
            None => self.show_on_anonymous_forms,
        }
    }
}

pub(crate) fn fade_transition(fade_ms: u32) -> String {
    format!("opacity {}s ease", f64::from(fade_ms) / 1000.0)
}
