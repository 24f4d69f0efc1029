//! In-memory DOM used by the unit tests.
//!
//! Supports the selector subset the behaviors use (tag, `#id`, `.class`,
//! `[attr]`, `[attr="v"]`, `[attr^="v"]`, comma lists), bubbling dispatch,
//! a virtual clock and hand-driven visibility observers.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
};

use crate::env::{
    DomEvent, Environment, EventKind, Handler, ListenTarget, VisibilityCallback, VisibilityOptions,
};

pub(crate) struct FakeNode {
    tag: String,
    classes: RefCell<Vec<String>>,
    attrs: RefCell<BTreeMap<String, String>>,
    styles: RefCell<BTreeMap<String, String>>,
    text: RefCell<String>,
    value: RefCell<Option<String>>,
    disabled: Cell<bool>,
    scrolled_into_view: Cell<u32>,
    children: RefCell<Vec<FakeElement>>,
    parent: RefCell<Weak<FakeNode>>,
}

#[derive(Clone)]
pub(crate) struct FakeElement(Rc<FakeNode>);

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.0.tag)?;
        if let Some(id) = self.attr("id") {
            write!(f, " id={id:?}")?;
        }
        write!(f, " class={:?}>", self.class_name())
    }
}

impl FakeElement {
    pub(crate) fn new(tag: &str) -> Self {
        let value = matches!(tag, "input" | "textarea").then(String::new);
        Self(Rc::new(FakeNode {
            tag: tag.to_string(),
            classes: RefCell::new(Vec::new()),
            attrs: RefCell::new(BTreeMap::new()),
            styles: RefCell::new(BTreeMap::new()),
            text: RefCell::new(String::new()),
            value: RefCell::new(value),
            disabled: Cell::new(false),
            scrolled_into_view: Cell::new(0),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
        }))
    }

    pub(crate) fn with_id(self, id: &str) -> Self {
        self.0.attrs.borrow_mut().insert("id".to_string(), id.to_string());
        self
    }

    pub(crate) fn with_class(self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.0.classes.borrow_mut().push(name.to_string());
        }
        self
    }

    pub(crate) fn with_attr(self, name: &str, value: &str) -> Self {
        self.0.attrs.borrow_mut().insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn append(&self, child: &FakeElement) -> &Self {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        self
    }

    pub(crate) fn set_value(&self, value: &str) {
        *self.0.value.borrow_mut() = Some(value.to_string());
    }

    pub(crate) fn class_name(&self) -> String {
        self.0.classes.borrow().join(" ")
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    pub(crate) fn style(&self, property: &str) -> Option<String> {
        self.0.styles.borrow().get(property).cloned()
    }

    pub(crate) fn text(&self) -> String {
        self.0.text.borrow().clone()
    }

    pub(crate) fn is_disabled(&self) -> bool {
        self.0.disabled.get()
    }

    pub(crate) fn scroll_count(&self) -> u32 {
        self.0.scrolled_into_view.get()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.attrs.borrow().get(name).cloned()
    }

    fn parent(&self) -> Option<FakeElement> {
        self.0.parent.borrow().upgrade().map(FakeElement)
    }

    fn descendants(&self, out: &mut Vec<FakeElement>) {
        for child in self.0.children.borrow().iter() {
            out.push(child.clone());
            child.descendants(out);
        }
    }
}

#[derive(Debug, PartialEq)]
enum AttrTest {
    Present,
    Equals(String),
    StartsWith(String),
}

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrTest)>,
}

impl Compound {
    fn matches(&self, el: &FakeElement) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != el.0.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, test)| match (el.attr(name), test) {
            (None, _) => false,
            (Some(_), AttrTest::Present) => true,
            (Some(v), AttrTest::Equals(want)) => v == *want,
            (Some(v), AttrTest::StartsWith(prefix)) => v.starts_with(prefix.as_str()),
        })
    }
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> Option<String> {
    let start = *pos;
    while *pos < chars.len() && is_ident(chars[*pos]) {
        *pos += 1;
    }
    (*pos > start).then(|| chars[start..*pos].iter().collect())
}

fn parse_compound(raw: &str) -> Option<Compound> {
    let chars: Vec<char> = raw.trim().chars().collect();
    if chars.is_empty() {
        return None;
    }
    let mut out = Compound::default();
    let mut pos = 0;
    if chars[0] == '*' {
        out.tag = Some("*".to_string());
        pos = 1;
    } else if is_ident(chars[0]) {
        out.tag = take_ident(&chars, &mut pos);
    }
    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                pos += 1;
                out.id = Some(take_ident(&chars, &mut pos)?);
            },
            '.' => {
                pos += 1;
                out.classes.push(take_ident(&chars, &mut pos)?);
            },
            '[' => {
                pos += 1;
                let name = take_ident(&chars, &mut pos)?;
                let end = chars[pos..].iter().position(|c| *c == ']')? + pos;
                let rest: String = chars[pos..end].iter().collect();
                let test = if rest.is_empty() {
                    AttrTest::Present
                } else if let Some(v) = rest.strip_prefix("^=") {
                    AttrTest::StartsWith(v.trim_matches('"').to_string())
                } else if let Some(v) = rest.strip_prefix('=') {
                    AttrTest::Equals(v.trim_matches('"').to_string())
                } else {
                    return None;
                };
                out.attrs.push((name, test));
                pos = end + 1;
            },
            _ => return None,
        }
    }
    Some(out)
}

fn parse_selector(selector: &str) -> Option<Vec<Compound>> {
    selector.split(',').map(parse_compound).collect()
}

struct PendingTimer {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerQueue {
    now: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

pub(crate) struct FakeTimer {
    id: u64,
    queue: Weak<RefCell<TimerQueue>>,
}

impl Drop for FakeTimer {
    fn drop(&mut self) {
        let Some(queue) = self.queue.upgrade() else {
            return;
        };
        let removed = {
            let mut queue = queue.borrow_mut();
            let idx = queue.pending.iter().position(|t| t.id == self.id);
            idx.map(|idx| queue.pending.remove(idx))
        };
        drop(removed);
    }
}

struct FakeObserverState {
    options: VisibilityOptions,
    callback: VisibilityCallback<FakeElement>,
    observed: Vec<FakeElement>,
}

pub(crate) struct FakeEnv {
    body: FakeElement,
    listeners: RefCell<Vec<(ListenTarget<FakeElement>, EventKind, Handler<FakeElement>)>>,
    timers: Rc<RefCell<TimerQueue>>,
    observers: RefCell<Vec<FakeObserverState>>,
    scroll_y: Cell<f64>,
    ready: Cell<bool>,
    visibility_supported: Cell<bool>,
}

impl FakeEnv {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            body: FakeElement::new("body"),
            listeners: RefCell::new(Vec::new()),
            timers: Rc::new(RefCell::new(TimerQueue::default())),
            observers: RefCell::new(Vec::new()),
            scroll_y: Cell::new(0.0),
            ready: Cell::new(true),
            visibility_supported: Cell::new(true),
        })
    }

    pub(crate) fn body_element(&self) -> FakeElement {
        self.body.clone()
    }

    pub(crate) fn set_scroll(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub(crate) fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    pub(crate) fn disable_visibility(&self) {
        self.visibility_supported.set(false);
    }

    /// Dispatch `kind` on `target`, bubbling to the document and window.
    pub(crate) fn dispatch(&self, target: &FakeElement, kind: EventKind) -> DomEvent<FakeElement> {
        let event = DomEvent::new(Some(target.clone()));
        let mut path = Vec::new();
        let mut node = Some(target.clone());
        while let Some(current) = node {
            node = current.parent();
            path.push(ListenTarget::Element(current));
        }
        path.push(ListenTarget::Document);
        path.push(ListenTarget::Window);
        for hop in path {
            for handler in self.handlers_for(&hop, kind) {
                handler(&event);
            }
        }
        event
    }

    pub(crate) fn dispatch_document(&self, kind: EventKind) {
        let event = DomEvent::new(None);
        for handler in self.handlers_for(&ListenTarget::Document, kind) {
            handler(&event);
        }
    }

    pub(crate) fn dispatch_window(&self, kind: EventKind) {
        let event = DomEvent::new(None);
        for handler in self.handlers_for(&ListenTarget::Window, kind) {
            handler(&event);
        }
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn handlers_for(
        &self,
        target: &ListenTarget<FakeElement>,
        kind: EventKind,
    ) -> Vec<Handler<FakeElement>> {
        self.listeners
            .borrow()
            .iter()
            .filter(|(t, k, _)| t == target && *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect()
    }

    /// Move the virtual clock forward, firing due timers in order.
    pub(crate) fn advance(&self, ms: u64) {
        let target = self.timers.borrow().now + ms;
        loop {
            let next = {
                let mut queue = self.timers.borrow_mut();
                let idx = queue
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(idx, _)| idx);
                idx.map(|idx| {
                    let timer = queue.pending.remove(idx);
                    queue.now = timer.due;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.timers.borrow_mut().now = target;
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.borrow().pending.len()
    }

    /// Report `element` as visible to every observer watching it.
    pub(crate) fn intersect(&self, element: &FakeElement) {
        let callbacks: Vec<_> = self
            .observers
            .borrow()
            .iter()
            .filter(|o| o.observed.contains(element))
            .map(|o| Rc::clone(&o.callback))
            .collect();
        for callback in callbacks {
            callback(element);
        }
    }

    pub(crate) fn observed_count(&self) -> usize {
        self.observers.borrow().iter().map(|o| o.observed.len()).sum()
    }

    pub(crate) fn observer_options(&self) -> Vec<VisibilityOptions> {
        self.observers.borrow().iter().map(|o| o.options.clone()).collect()
    }

    fn all_elements(&self) -> Vec<FakeElement> {
        let mut out = vec![self.body.clone()];
        self.body.descendants(&mut out);
        out
    }
}

impl Environment for FakeEnv {
    type Element = FakeElement;
    type Timer = FakeTimer;
    type Observer = usize;

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.all_elements()
            .into_iter()
            .find(|el| el.attr("id").as_deref() == Some(id))
    }

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        let Some(groups) = parse_selector(selector) else {
            return Vec::new();
        };
        self.all_elements()
            .into_iter()
            .filter(|el| groups.iter().any(|g| g.matches(el)))
            .collect()
    }

    fn query_in(&self, parent: &FakeElement, selector: &str) -> Option<FakeElement> {
        let groups = parse_selector(selector)?;
        let mut scope = Vec::new();
        parent.descendants(&mut scope);
        scope.into_iter().find(|el| groups.iter().any(|g| g.matches(el)))
    }

    fn body(&self) -> Option<FakeElement> {
        Some(self.body.clone())
    }

    fn contains(&self, ancestor: &FakeElement, node: &FakeElement) -> bool {
        let mut current = Some(node.clone());
        while let Some(el) = current {
            if el == *ancestor {
                return true;
            }
            current = el.parent();
        }
        false
    }

    fn has_class(&self, element: &FakeElement, class: &str) -> bool {
        element.has_class(class)
    }

    fn add_class(&self, element: &FakeElement, class: &str) {
        if !element.has_class(class) {
            element.0.classes.borrow_mut().push(class.to_string());
        }
    }

    fn remove_class(&self, element: &FakeElement, class: &str) {
        element.0.classes.borrow_mut().retain(|c| c != class);
    }

    fn set_class_name(&self, element: &FakeElement, class_name: &str) {
        *element.0.classes.borrow_mut() =
            class_name.split_whitespace().map(str::to_string).collect();
    }

    fn set_text(&self, element: &FakeElement, text: &str) {
        *element.0.text.borrow_mut() = text.to_string();
    }

    fn set_style(&self, element: &FakeElement, property: &str, value: &str) {
        element
            .0
            .styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn attribute(&self, element: &FakeElement, name: &str) -> Option<String> {
        element.attr(name)
    }

    fn has_attribute(&self, element: &FakeElement, name: &str) -> bool {
        element.attr(name).is_some()
    }

    fn value(&self, element: &FakeElement) -> Option<String> {
        element.0.value.borrow().clone()
    }

    fn set_disabled(&self, element: &FakeElement, disabled: bool) {
        element.0.disabled.set(disabled);
    }

    fn scroll_into_view(&self, element: &FakeElement) {
        let count = element.0.scrolled_into_view.get();
        element.0.scrolled_into_view.set(count + 1);
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn document_ready(&self) -> bool {
        self.ready.get()
    }

    fn listen(
        &self,
        target: ListenTarget<FakeElement>,
        kind: EventKind,
        handler: Handler<FakeElement>,
    ) {
        self.listeners.borrow_mut().push((target, kind, handler));
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> FakeTimer {
        let mut queue = self.timers.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + u64::from(delay_ms);
        queue.pending.push(PendingTimer {
            id,
            due,
            callback,
        });
        FakeTimer {
            id,
            queue: Rc::downgrade(&self.timers),
        }
    }

    fn observe_visibility(
        &self,
        options: &VisibilityOptions,
        callback: VisibilityCallback<FakeElement>,
    ) -> Option<usize> {
        if !self.visibility_supported.get() {
            return None;
        }
        let mut observers = self.observers.borrow_mut();
        observers.push(FakeObserverState {
            options: options.clone(),
            callback,
            observed: Vec::new(),
        });
        Some(observers.len() - 1)
    }

    fn observe(&self, observer: &usize, element: &FakeElement) {
        if let Some(state) = self.observers.borrow_mut().get_mut(*observer) {
            if !state.observed.contains(element) {
                state.observed.push(element.clone());
            }
        }
    }

    fn unobserve(&self, observer: &usize, element: &FakeElement) {
        if let Some(state) = self.observers.borrow_mut().get_mut(*observer) {
            state.observed.retain(|el| el != element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_subset_matches_like_the_browser() {
        let env = FakeEnv::new();
        let body = env.body_element();
        let link = FakeElement::new("a").with_attr("href", "#about");
        let external = FakeElement::new("a").with_attr("href", "/contact");
        let card = FakeElement::new("div").with_class("card team-card").with_id("first");
        body.append(&link).append(&external).append(&card);

        assert_eq!(env.query_all("a[href^=\"#\"]"), vec![link]);
        assert_eq!(env.query(".team-card"), Some(card.clone()));
        assert_eq!(env.query("div#first.card"), Some(card));
        assert!(env.query("#").is_none());
        assert!(env.query_all("a ~ b").is_empty());
    }

    #[test]
    fn dropped_timer_never_fires() {
        let env = FakeEnv::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let timer = env.set_timeout(10, Box::new(move || flag.set(true)));
        drop(timer);
        env.advance(20);
        assert!(!fired.get());
        assert_eq!(env.pending_timers(), 0);
    }
}
