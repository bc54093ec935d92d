use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;

// ============================================================================
// Style Types
// ============================================================================

/// Inline `display` values the loader switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Flex,
    None,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Flex => "flex",
            DisplayMode::None => "none",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported display value: {0}")]
pub struct StyleParseError(pub String);

impl FromStr for DisplayMode {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flex" => Ok(DisplayMode::Flex),
            "none" => Ok(DisplayMode::None),
            other => Err(StyleParseError(other.to_string())),
        }
    }
}

/// CSS declaration priority. `Important` maps to `!important`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StylePriority {
    #[default]
    Normal,
    Important,
}

/// Observable lifecycle state of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Shown, nothing scheduled to hide it yet.
    Visible,
    /// Resources finished loading; waiting out the hold delay.
    HidePending,
    /// Opacity is transitioning to 0; `display: none` is scheduled.
    Fading,
    Hidden,
}

// ============================================================================
// Element Handles
// ============================================================================

/// Handle to the overlay element's inline style.
///
/// Handles are shared references to a single element (like a DOM node), so
/// every mutator takes `&self`.
pub trait LoaderElement {
    /// Current inline `display`, or `None` when unset or not one of ours.
    fn display(&self) -> Option<DisplayMode>;
    fn set_display(&self, mode: DisplayMode, priority: StylePriority);
    fn set_opacity(&self, opacity: f64);
    fn set_transition(&self, transition: &str);
}

/// Snapshot of the inline style held by a [`MemoryElement`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    pub display: Option<DisplayMode>,
    pub display_priority: StylePriority,
    pub opacity: Option<f64>,
    pub transition: Option<String>,
}

/// In-memory element for hosts without a DOM. Clones share the same style.
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    style: Rc<RefCell<InlineStyle>>,
}

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: InlineStyle) -> Self {
        Self {
            style: Rc::new(RefCell::new(style)),
        }
    }

    pub fn style(&self) -> InlineStyle {
        self.style.borrow().clone()
    }

    pub fn opacity(&self) -> Option<f64> {
        self.style.borrow().opacity
    }
}

impl LoaderElement for MemoryElement {
    fn display(&self) -> Option<DisplayMode> {
        self.style.borrow().display
    }

    fn set_display(&self, mode: DisplayMode, priority: StylePriority) {
        let mut style = self.style.borrow_mut();
        style.display = Some(mode);
        style.display_priority = priority;
    }

    fn set_opacity(&self, opacity: f64) {
        self.style.borrow_mut().opacity = Some(opacity.clamp(0.0, 1.0));
    }

    fn set_transition(&self, transition: &str) {
        self.style.borrow_mut().transition = Some(transition.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mode_from_str() {
        assert_eq!("flex".parse(), Ok(DisplayMode::Flex));
        assert_eq!(" NONE ".parse(), Ok(DisplayMode::None));
        assert_eq!(
            "block".parse::<DisplayMode>(),
            Err(StyleParseError("block".to_string()))
        );
        assert!("".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_display_mode_as_str() {
        assert_eq!(DisplayMode::Flex.as_str(), "flex");
        assert_eq!(DisplayMode::None.to_string(), "none");
    }

    #[test]
    fn test_memory_element_clones_share_style() {
        let element = MemoryElement::new();
        let other = element.clone();

        other.set_display(DisplayMode::Flex, StylePriority::Important);
        other.set_opacity(1.5);
        other.set_transition("opacity 0.6s ease");

        let style = element.style();
        assert_eq!(style.display, Some(DisplayMode::Flex));
        assert_eq!(style.display_priority, StylePriority::Important);
        assert_eq!(style.opacity, Some(1.0));
        assert_eq!(style.transition.as_deref(), Some("opacity 0.6s ease"));
    }

    #[test]
    fn test_memory_element_starts_unset() {
        let element = MemoryElement::new();
        assert_eq!(element.display(), None);
        assert_eq!(element.opacity(), None);
    }
}
