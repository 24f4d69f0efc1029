//! The host seam every controller talks to.
//!
//! In the browser this is backed by `web-sys`; tests use an in-memory DOM.
//! Controllers only ever see the operations below, so a missing element or
//! an unsupported capability shows up as `None` rather than an error.

use std::{cell::Cell, rc::Rc};

/// Events the controllers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer click.
    Click,
    /// Window scroll.
    Scroll,
    /// Focus left a field.
    Blur,
    /// A field's value changed.
    Input,
    /// The document finished parsing.
    DomContentLoaded,
}

impl EventKind {
    /// DOM event name.
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::Blur => "blur",
            EventKind::Input => "input",
            EventKind::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget<E> {
    /// The global window.
    Window,
    /// The document.
    Document,
    /// A single element.
    Element(E),
}

/// Event delivered to a handler.
#[derive(Debug)]
pub struct DomEvent<E> {
    target: Option<E>,
    default_prevented: Cell<bool>,
}

impl<E> DomEvent<E> {
    /// Wrap the element the event originated from.
    pub fn new(target: Option<E>) -> Self {
        Self {
            target,
            default_prevented: Cell::new(false),
        }
    }

    /// Element the event originated from, when it is an element.
    pub fn target(&self) -> Option<&E> {
        self.target.as_ref()
    }

    /// Ask the host to skip the browser's default action.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether a handler called [`DomEvent::prevent_default`].
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Event callback.
pub type Handler<E> = Rc<dyn Fn(&DomEvent<E>)>;

/// Callback invoked with each observed element that became visible.
pub type VisibilityCallback<E> = Rc<dyn Fn(&E)>;

/// Options for visibility observation.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityOptions {
    /// Visible fraction that counts as "in view".
    pub threshold: f64,
    /// Root margin, CSS shorthand.
    pub root_margin: String,
}

/// Host environment: element lookup, mutation, events, timers and
/// visibility detection.
pub trait Environment: 'static {
    /// Element handle. Equality is identity.
    type Element: Clone + PartialEq + std::fmt::Debug + 'static;
    /// One-shot timer. Dropping it cancels the timer if it has not fired.
    type Timer: 'static;
    /// Visibility observer handle.
    type Observer: 'static;

    /// Look up an element by id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    /// First element matching `selector` in the document.
    fn query(&self, selector: &str) -> Option<Self::Element>;
    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    /// First descendant of `parent` matching `selector`.
    fn query_in(&self, parent: &Self::Element, selector: &str) -> Option<Self::Element>;
    /// The document body.
    fn body(&self) -> Option<Self::Element>;
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    /// Whether the element carries `class`.
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    /// Add `class` to the element.
    fn add_class(&self, element: &Self::Element, class: &str);
    /// Remove `class` from the element.
    fn remove_class(&self, element: &Self::Element, class: &str);
    /// Replace the whole class attribute.
    fn set_class_name(&self, element: &Self::Element, class_name: &str);
    /// Replace the element's text content.
    fn set_text(&self, element: &Self::Element, text: &str);
    /// Set an inline style property (CSS property name, e.g. `transition-delay`).
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);
    /// Read an attribute.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    /// Whether the attribute is present.
    fn has_attribute(&self, element: &Self::Element, name: &str) -> bool;
    /// Current value of a form field; `None` for non-field elements.
    fn value(&self, element: &Self::Element) -> Option<String>;
    /// Enable or disable a control.
    fn set_disabled(&self, element: &Self::Element, disabled: bool);
    /// Smoothly scroll the element into view, aligned to the block start.
    fn scroll_into_view(&self, element: &Self::Element);

    /// Current vertical scroll offset in px.
    fn scroll_y(&self) -> f64;
    /// Whether the document has finished parsing.
    fn document_ready(&self) -> bool;

    /// Subscribe `handler` to `kind` events on `target` for the page lifetime.
    fn listen(
        &self,
        target: ListenTarget<Self::Element>,
        kind: EventKind,
        handler: Handler<Self::Element>,
    );
    /// Run `callback` once after `delay_ms`.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;

    /// Create a visibility observer. `None` when the host cannot detect
    /// visibility.
    fn observe_visibility(
        &self,
        options: &VisibilityOptions,
        callback: VisibilityCallback<Self::Element>,
    ) -> Option<Self::Observer>;
    /// Start watching `element`.
    fn observe(&self, observer: &Self::Observer, element: &Self::Element);
    /// Stop watching `element`.
    fn unobserve(&self, observer: &Self::Observer, element: &Self::Element);
}
