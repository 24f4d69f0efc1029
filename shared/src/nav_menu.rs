//! Mobile navigation menu.

use std::rc::Rc;

use crate::{
    config::NavConfig,
    env::{DomEvent, EventKind, ListenTarget},
    Environment,
};

/// Mobile navigation panel: opened by its button, closed by clicks elsewhere.
pub struct NavMenuController<E: Environment> {
    env: Rc<E>,
    toggle: E::Element,
    menu: E::Element,
    active_class: String,
}

impl<E: Environment> NavMenuController<E> {
    /// Wire the menu. `None` unless both the button and the menu exist.
    pub fn install(env: Rc<E>, config: &NavConfig) -> Option<Rc<Self>> {
        let toggle = env.element_by_id(&config.toggle_id);
        let menu = env.query(&config.menu);
        let (Some(toggle), Some(menu)) = (toggle, menu) else {
            tracing::debug!(
                toggle = %config.toggle_id,
                menu = %config.menu,
                "mobile menu not present"
            );
            return None;
        };

        let controller = Rc::new(Self {
            env,
            toggle,
            menu,
            active_class: config.active_class.clone(),
        });

        let this = Rc::clone(&controller);
        controller.env.listen(
            ListenTarget::Element(controller.toggle.clone()),
            EventKind::Click,
            Rc::new(move |_: &DomEvent<E::Element>| this.toggle()),
        );

        let this = Rc::clone(&controller);
        controller.env.listen(
            ListenTarget::Document,
            EventKind::Click,
            Rc::new(move |event: &DomEvent<E::Element>| this.on_document_click(event)),
        );

        Some(controller)
    }

    /// Flip the menu between open and closed.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.env.add_class(&self.menu, &self.active_class);
        }
    }

    /// Close the menu. No-op when already closed.
    pub fn close(&self) {
        self.env.remove_class(&self.menu, &self.active_class);
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.env.has_class(&self.menu, &self.active_class)
    }

    fn on_document_click(&self, event: &DomEvent<E::Element>) {
        let inside = event.target().is_some_and(|target| {
            self.env.contains(&self.menu, target) || self.env.contains(&self.toggle, target)
        });
        if !inside {
            self.close();
        }
    }
}
