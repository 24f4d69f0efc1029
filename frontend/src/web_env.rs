//! `web-sys` implementation of the host seam.

use gloo_timers::callback::Timeout;
use sitekit_shared::{
    env::{Handler, VisibilityCallback},
    DomEvent, Environment, EventKind, ListenTarget, UiError, VisibilityOptions,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, SvgElement, Window,
};

/// Browser-backed environment.
pub struct WebEnvironment {
    window: Window,
    document: Document,
}

impl WebEnvironment {
    /// Bind to the global window and its document.
    pub fn new() -> Result<Self, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Host("no global `window`".into()))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::Host("window has no document".into()))?;
        Ok(Self {
            window,
            document,
        })
    }

    /// The global window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The page document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Environment for WebEnvironment {
    type Element = Element;
    type Timer = Timeout;
    type Observer = IntersectionObserver;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        // Invalid selectors throw; treat them as "nothing matched".
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|idx| list.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_in(&self, parent: &Element, selector: &str) -> Option<Element> {
        parent.query_selector(selector).ok().flatten()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &Node = node;
        ancestor.contains(Some(node))
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn set_class_name(&self, element: &Element, class_name: &str) {
        element.set_class_name(class_name);
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        let style = if let Some(html) = element.dyn_ref::<HtmlElement>() {
            html.style()
        } else if let Some(svg) = element.dyn_ref::<SvgElement>() {
            svg.style()
        } else {
            return;
        };
        if let Err(err) = style.set_property(property, value) {
            log::warn!("failed to set style {property}: {err:?}");
        }
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn has_attribute(&self, element: &Element, name: &str) -> bool {
        element.has_attribute(name)
    }

    fn value(&self, element: &Element) -> Option<String> {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else {
            element.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
        }
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            let _ = element.set_attribute("disabled", "");
        } else {
            let _ = element.remove_attribute("disabled");
        }
    }

    fn scroll_into_view(&self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn document_ready(&self) -> bool {
        self.document.ready_state() != "loading"
    }

    fn listen(&self, target: ListenTarget<Element>, kind: EventKind, handler: Handler<Element>) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            let dom_event = DomEvent::new(target);
            handler(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        });

        let callback = closure.as_ref().unchecked_ref();
        let result = match &target {
            ListenTarget::Window => {
                self.window.add_event_listener_with_callback(kind.name(), callback)
            },
            ListenTarget::Document => {
                self.document.add_event_listener_with_callback(kind.name(), callback)
            },
            ListenTarget::Element(element) => {
                element.add_event_listener_with_callback(kind.name(), callback)
            },
        };
        if let Err(err) = result {
            log::warn!("failed to listen for {}: {err:?}", kind.name());
            return;
        }
        // Listeners live as long as the page.
        closure.forget();
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }

    fn observe_visibility(
        &self,
        options: &VisibilityOptions,
        callback: VisibilityCallback<Element>,
    ) -> Option<IntersectionObserver> {
        let supported =
            js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false);
        if !supported {
            return None;
        }

        let on_entries = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        callback(&entry.target());
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        match IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                on_entries.forget();
                Some(observer)
            },
            Err(err) => {
                log::warn!("IntersectionObserver unavailable: {err:?}");
                None
            },
        }
    }

    fn observe(&self, observer: &IntersectionObserver, element: &Element) {
        observer.observe(element);
    }

    fn unobserve(&self, observer: &IntersectionObserver, element: &Element) {
        observer.unobserve(element);
    }
}
