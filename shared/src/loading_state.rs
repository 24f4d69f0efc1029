//! Busy/idle state for submit buttons.

use crate::{config::LoadingConfig, Environment};

/// Switch `button` between its busy and idle look.
///
/// Busy disables the button, hides its label and shows its spinner; idle does
/// the reverse. Missing sub-elements are skipped and a `None` button is a
/// no-op.
pub fn set_loading_state<E: Environment>(
    env: &E,
    config: &LoadingConfig,
    button: Option<&E::Element>,
    is_loading: bool,
) {
    let Some(button) = button else {
        return;
    };

    env.set_disabled(button, is_loading);

    if let Some(label) = env.query_in(button, &config.label) {
        if is_loading {
            env.add_class(&label, &config.hidden_class);
        } else {
            env.remove_class(&label, &config.hidden_class);
        }
    }

    if let Some(loader) = env.query_in(button, &config.loader) {
        if is_loading {
            env.remove_class(&loader, &config.hidden_class);
        } else {
            env.add_class(&loader, &config.hidden_class);
        }
    }
}
