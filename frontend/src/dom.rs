use loader_shared::{DisplayMode, LoaderElement, StylePriority};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

/// The overlay element in the live page.
///
/// Style writes that the browser rejects are logged and otherwise ignored;
/// a broken overlay is cosmetic.
#[derive(Debug, Clone)]
pub struct DomLoader {
    element: HtmlElement,
}

impl DomLoader {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    /// Look up the overlay by id.
    pub fn find(document: &Document, id: &str) -> Option<Self> {
        document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(Self::new)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn set_property(&self, name: &str, value: &str, priority: StylePriority) {
        let style = self.element.style();
        let result = match priority {
            StylePriority::Normal => style.set_property(name, value),
            StylePriority::Important => style.set_property_with_priority(name, value, "important"),
        };
        if let Err(err) = result {
            log::warn!("Failed to set loader {} to {}: {:?}", name, value, err);
        }
    }
}

impl LoaderElement for DomLoader {
    fn display(&self) -> Option<DisplayMode> {
        self.element
            .style()
            .get_property_value("display")
            .ok()?
            .parse()
            .ok()
    }

    fn set_display(&self, mode: DisplayMode, priority: StylePriority) {
        self.set_property("display", mode.as_str(), priority);
    }

    fn set_opacity(&self, opacity: f64) {
        self.set_property("opacity", &opacity.clamp(0.0, 1.0).to_string(), StylePriority::Normal);
    }

    fn set_transition(&self, transition: &str) {
        self.set_property("transition", transition, StylePriority::Normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn overlay(id: &str) -> DomLoader {
        let document = web_sys::window().unwrap().document().unwrap();
        let element = document.create_element("div").unwrap();
        element.set_id(id);
        document.body().unwrap().append_child(&element).unwrap();
        DomLoader::find(&document, id).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_dom_loader_writes_inline_style() {
        let loader = overlay("dom-loader-style");
        assert_eq!(loader.display(), None);

        loader.set_display(DisplayMode::Flex, StylePriority::Important);
        loader.set_opacity(1.0);
        let style = loader.element().style();
        assert_eq!(loader.display(), Some(DisplayMode::Flex));
        assert_eq!(style.get_property_priority("display"), "important");
        assert_eq!(style.get_property_value("opacity").unwrap(), "1");

        loader.set_transition("opacity 0.6s ease");
        loader.set_opacity(0.0);
        loader.set_display(DisplayMode::None, StylePriority::Normal);
        assert_eq!(loader.display(), Some(DisplayMode::None));
        assert_eq!(style.get_property_value("opacity").unwrap(), "0");
    }

    #[wasm_bindgen_test]
    fn test_find_missing_element() {
        let document = web_sys::window().unwrap().document().unwrap();
        assert!(DomLoader::find(&document, "no-such-loader").is_none());
    }
}
