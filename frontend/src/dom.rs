//! Page-level lookups done once at startup.

use widget_core::WidgetConfig;

/// Id of the optional `<script type="application/json">` element carrying
/// the host page's widget settings.
const CONFIG_ELEMENT_ID: &str = "chat-widget-config";

pub fn load_config() -> WidgetConfig {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
    else {
        return WidgetConfig::default();
    };

    let json = element.text_content().unwrap_or_default();
    match WidgetConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring malformed #{CONFIG_ELEMENT_ID}: {e}");
            WidgetConfig::default()
        }
    }
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}
