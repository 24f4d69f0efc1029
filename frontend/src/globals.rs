//! Page-level helpers exposed on `window` for other scripts.

use std::rc::Rc;

use sitekit_shared::{KeyValueStore, Severity, SiteBehaviors, UiError};
use wasm_bindgen::{
    closure::{Closure, WasmClosure},
    JsCast, JsValue,
};
use web_sys::{Element, Window};

use crate::web_env::WebEnvironment;

/// The installed behaviors as seen from the browser.
pub type Site = SiteBehaviors<WebEnvironment, Rc<dyn KeyValueStore>>;

/// Expose `window.showNotification(message, type)` and
/// `window.setLoadingState(button, isLoading)` to the page's other scripts.
pub fn publish(window: &Window, site: Rc<Site>) -> Result<(), UiError> {
    let notify = {
        let site = Rc::clone(&site);
        Closure::<dyn Fn(JsValue, JsValue)>::new(move |message: JsValue, severity: JsValue| {
            let message = message_text(&message);
            let severity = severity.as_string().unwrap_or_default();
            site.notify(&message, &Severity::from(severity.as_str()));
        })
    };
    set_global(window, "showNotification", notify)?;

    let loading =
        Closure::<dyn Fn(JsValue, JsValue)>::new(move |button: JsValue, is_loading: JsValue| {
            let button = button.dyn_into::<Element>().ok();
            site.set_loading_state(button.as_ref(), is_loading.is_truthy());
        });
    set_global(window, "setLoadingState", loading)
}

/// Text a page script meant to display, coerced the way `textContent`
/// assignment would. `null` and `undefined` show nothing.
fn message_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if value.is_undefined() || value.is_null() {
        return String::new();
    }
    if let Some(number) = value.as_f64() {
        return number_text(number);
    }
    if let Some(flag) = value.as_bool() {
        return flag.to_string();
    }
    value.unchecked_ref::<js_sys::Object>().to_string().into()
}

/// `Number.prototype.toString` for the values a banner is likely to get.
fn number_text(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        if number > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if number == 0.0 {
        "0".to_string()
    } else {
        number.to_string()
    }
}

fn set_global<T>(window: &Window, name: &str, closure: Closure<T>) -> Result<(), UiError>
where
    T: ?Sized + WasmClosure,
{
    js_sys::Reflect::set(window, &JsValue::from_str(name), closure.as_ref())
        .map_err(|err| UiError::Host(format!("failed to publish {name}: {err:?}")))?;
    closure.forget();
    Ok(())
}
