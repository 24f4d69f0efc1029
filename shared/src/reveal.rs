//! One-shot fade/slide-in for content sections.
//!
//! Each section starts hidden and offset. The first time it scrolls into
//! view it transitions to its resting state and is dropped from the
//! observer, so it is revealed at most once.

use std::{cell::RefCell, rc::Rc};

use crate::{
    config::RevealConfig,
    env::{Environment, VisibilityOptions},
};

/// Lifecycle of a revealable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Hidden, waiting to enter the viewport.
    Pending,
    /// Shown. Never observed again.
    Revealed,
}

struct Tracked<T> {
    element: T,
    state: RevealState,
}

/// Drives the reveal animation of every matching section.
pub struct RevealController<E: Environment> {
    env: Rc<E>,
    observer: RefCell<Option<E::Observer>>,
    tracked: RefCell<Vec<Tracked<E::Element>>>,
}

impl<E: Environment> RevealController<E> {
    /// Prepare every matching section and start observing them.
    ///
    /// Hosts without visibility detection get every section revealed
    /// immediately.
    pub fn install(env: Rc<E>, config: &RevealConfig) -> Rc<Self> {
        let selector = config.selectors.join(", ");
        let elements = if selector.is_empty() {
            Vec::new()
        } else {
            env.query_all(&selector)
        };

        let controller = Rc::new(Self {
            env,
            observer: RefCell::new(None),
            tracked: RefCell::new(Vec::with_capacity(elements.len())),
        });
        if elements.is_empty() {
            return controller;
        }

        let transition = format!(
            "opacity {ms}ms ease-out, transform {ms}ms ease-out",
            ms = config.duration_ms
        );
        let offset = format!("translateY({}px)", config.offset_px);
        for (index, element) in elements.iter().enumerate() {
            let delay = u64::from(config.stagger_ms) * index as u64;
            controller.env.set_style(element, "opacity", "0");
            controller.env.set_style(element, "transform", &offset);
            controller.env.set_style(element, "transition", &transition);
            controller.env.set_style(element, "transition-delay", &format!("{delay}ms"));
        }

        let options = VisibilityOptions {
            threshold: config.threshold,
            root_margin: config.root_margin.clone(),
        };
        let this = Rc::clone(&controller);
        let observer = controller.env.observe_visibility(
            &options,
            Rc::new(move |element: &E::Element| this.on_visible(element)),
        );

        match observer {
            Some(observer) => {
                for element in &elements {
                    controller.env.observe(&observer, element);
                }
                controller.tracked.borrow_mut().extend(elements.into_iter().map(|element| Tracked {
                    element,
                    state: RevealState::Pending,
                }));
                *controller.observer.borrow_mut() = Some(observer);
            },
            None => {
                tracing::debug!("visibility detection unavailable, revealing all sections");
                for element in &elements {
                    controller.show(element);
                }
            },
        }

        controller
    }

    /// Sections still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.tracked
            .borrow()
            .iter()
            .filter(|t| t.state == RevealState::Pending)
            .count()
    }

    /// Handle an element entering the viewport.
    pub fn on_visible(&self, element: &E::Element) {
        let revealed = {
            let mut tracked = self.tracked.borrow_mut();
            match tracked.iter().position(|t| t.element == *element) {
                Some(idx) if tracked[idx].state == RevealState::Pending => {
                    tracked[idx].state = RevealState::Revealed;
                    Some(tracked.remove(idx).element)
                },
                _ => None,
            }
        };
        let Some(element) = revealed else {
            return;
        };

        self.show(&element);
        if let Some(observer) = self.observer.borrow().as_ref() {
            self.env.unobserve(observer, &element);
        }
    }

    fn show(&self, element: &E::Element) {
        self.env.set_style(element, "opacity", "1");
        self.env.set_style(element, "transform", "translateY(0)");
    }
}
