//! Navbar look that depends on the scroll offset.

use std::rc::Rc;

use crate::{
    config::ScrollConfig,
    env::{DomEvent, EventKind, ListenTarget},
    Environment,
};

/// Marks the navbar as scrolled once the page is scrolled past a threshold.
pub struct ScrollEffectController<E: Environment> {
    env: Rc<E>,
    navbar: E::Element,
    config: ScrollConfig,
}

impl<E: Environment> ScrollEffectController<E> {
    /// Wire the window scroll listener. `None` when there is no navbar.
    pub fn install(env: Rc<E>, config: ScrollConfig) -> Option<Rc<Self>> {
        let Some(navbar) = env.query(&config.navbar) else {
            tracing::debug!(selector = %config.navbar, "navbar not present");
            return None;
        };
        let controller = Rc::new(Self {
            env,
            navbar,
            config,
        });

        // A restored page may already be scrolled.
        controller.refresh();

        let this = Rc::clone(&controller);
        controller.env.listen(
            ListenTarget::Window,
            EventKind::Scroll,
            Rc::new(move |_: &DomEvent<E::Element>| this.refresh()),
        );

        Some(controller)
    }

    /// Re-evaluate the current scroll offset.
    pub fn refresh(&self) {
        if self.env.scroll_y() >= self.config.threshold_px {
            self.env.add_class(&self.navbar, &self.config.scrolled_class);
        } else {
            self.env.remove_class(&self.navbar, &self.config.scrolled_class);
        }
    }
}
