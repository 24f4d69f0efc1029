//! Configuration for the frontend application

use sitekit_shared::UiConfig;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` element holding
/// page overrides.
pub const CONFIG_ELEMENT_ID: &str = "sitekit-config";

/// Read the page configuration, falling back to defaults.
pub fn load(document: &Document) -> UiConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    parse(raw.as_deref())
}

fn parse(raw: Option<&str>) -> UiConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return UiConfig::default();
    };
    match UiConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
            UiConfig::default()
        },
    }
}
