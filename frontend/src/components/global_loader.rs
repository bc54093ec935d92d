use leptos::*;
use loader_shared::DEFAULT_ELEMENT_ID;

/// Full-page loading overlay driven by the page loader controller.
///
/// Render it once near the top of the page; the controller finds it by id.
#[component]
pub fn GlobalLoader(
    #[prop(optional, into)] element_id: Option<String>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let id = element_id.unwrap_or_else(|| DEFAULT_ELEMENT_ID.to_string());

    view! {
        <div id=id class="global-loader" role="status" aria-live="polite">
            <div class="spinner"></div>
            {label.map(|text| view! { <p class="global-loader-label">{text}</p> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_global_loader_renders_overlay() {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document
            .create_element("div")
            .unwrap()
            .unchecked_into::<web_sys::HtmlElement>();
        document.body().unwrap().append_child(&host).unwrap();

        mount_to(host, || view! { <GlobalLoader element_id="rendered-loader" label="Loading..." /> });

        let overlay = document.get_element_by_id("rendered-loader").unwrap();
        assert_eq!(overlay.class_name(), "global-loader");
        assert_eq!(overlay.get_attribute("role").as_deref(), Some("status"));
        assert_eq!(overlay.text_content().as_deref(), Some("Loading..."));
    }
}
