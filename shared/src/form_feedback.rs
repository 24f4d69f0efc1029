//! Inline validation feedback for form fields.

use std::rc::Rc;

use crate::{
    config::FormConfig,
    env::{DomEvent, EventKind, ListenTarget},
    Environment,
};

/// Flags empty required fields when they lose focus.
pub struct FormFeedbackController<E: Environment> {
    env: Rc<E>,
    error_class: String,
}

impl<E: Environment> FormFeedbackController<E> {
    /// Attach blur and input handlers to every matching field.
    pub fn install(env: Rc<E>, config: &FormConfig) -> Rc<Self> {
        let fields = env.query_all(&config.fields);
        let controller = Rc::new(Self {
            env,
            error_class: config.error_class.clone(),
        });

        for field in fields {
            let this = Rc::clone(&controller);
            let target = field.clone();
            controller.env.listen(
                ListenTarget::Element(field.clone()),
                EventKind::Blur,
                Rc::new(move |_: &DomEvent<E::Element>| this.on_blur(&target)),
            );

            let this = Rc::clone(&controller);
            let target = field.clone();
            controller.env.listen(
                ListenTarget::Element(field),
                EventKind::Input,
                Rc::new(move |_: &DomEvent<E::Element>| this.on_input(&target)),
            );
        }

        controller
    }

    /// Mark the field invalid if it is required and blank, clear it otherwise.
    pub fn on_blur(&self, field: &E::Element) {
        if self.env.has_attribute(field, "required") && self.is_blank(field) {
            self.env.add_class(field, &self.error_class);
        } else {
            self.env.remove_class(field, &self.error_class);
        }
    }

    /// Clear an existing error as soon as the field has content.
    pub fn on_input(&self, field: &E::Element) {
        if self.env.has_class(field, &self.error_class) && !self.is_blank(field) {
            self.env.remove_class(field, &self.error_class);
        }
    }

    fn is_blank(&self, field: &E::Element) -> bool {
        self.env
            .value(field)
            .is_none_or(|value| value.trim().is_empty())
    }
}
