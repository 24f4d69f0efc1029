//! Installs every behavior for a page.

use std::{cell::RefCell, rc::Rc};

use crate::{
    anchor_scroll::install_anchor_scroll,
    config::UiConfig,
    env::{DomEvent, EventKind, ListenTarget},
    form_feedback::FormFeedbackController,
    loading_state,
    nav_menu::NavMenuController,
    notification::{NotificationController, Severity},
    reveal::RevealController,
    scroll_effect::ScrollEffectController,
    store::KeyValueStore,
    theme::ThemeController,
    Environment,
};

/// Controllers that need the parsed document.
struct DeferredControllers<E: Environment> {
    reveal: Rc<RevealController<E>>,
    forms: Rc<FormFeedbackController<E>>,
}

type DeferredSlot<E> = Rc<RefCell<Option<DeferredControllers<E>>>>;

/// Every behavior of the page, installed together.
pub struct SiteBehaviors<E: Environment, S: KeyValueStore> {
    env: Rc<E>,
    config: UiConfig,
    theme: Rc<ThemeController<E, S>>,
    nav_menu: Option<Rc<NavMenuController<E>>>,
    scroll_effect: Option<Rc<ScrollEffectController<E>>>,
    notifications: Rc<NotificationController<E>>,
    deferred: DeferredSlot<E>,
}

impl<E: Environment, S: KeyValueStore + 'static> SiteBehaviors<E, S> {
    /// Install everything.
    ///
    /// Reveal and form feedback wait for `DOMContentLoaded` unless the
    /// document is already parsed.
    pub fn install(env: Rc<E>, store: S, config: UiConfig) -> Self {
        let theme = ThemeController::install(Rc::clone(&env), store, config.theme.clone());
        let nav_menu = NavMenuController::install(Rc::clone(&env), &config.nav);
        let scroll_effect = ScrollEffectController::install(Rc::clone(&env), config.scroll.clone());
        let anchors = install_anchor_scroll(&env, &config.anchors);
        let notifications =
            NotificationController::new(Rc::clone(&env), config.notification.clone());
        tracing::debug!(anchors, "page behaviors installed");

        let deferred: DeferredSlot<E> = Rc::new(RefCell::new(None));
        if env.document_ready() {
            install_deferred(&env, &config, &deferred);
        } else {
            let env_ref = Rc::clone(&env);
            let config_ref = config.clone();
            let slot = Rc::clone(&deferred);
            env.listen(
                ListenTarget::Document,
                EventKind::DomContentLoaded,
                Rc::new(move |_: &DomEvent<E::Element>| {
                    install_deferred(&env_ref, &config_ref, &slot);
                }),
            );
        }

        Self {
            env,
            config,
            theme,
            nav_menu,
            scroll_effect,
            notifications,
            deferred,
        }
    }

    /// Show a notification banner.
    pub fn notify(&self, message: &str, severity: &Severity) {
        self.notifications.show(message, severity);
    }

    /// Toggle a button's busy look.
    pub fn set_loading_state(&self, button: Option<&E::Element>, is_loading: bool) {
        let env = self.env.as_ref();
        loading_state::set_loading_state(env, &self.config.loading, button, is_loading);
    }

    /// Theme controller.
    pub fn theme(&self) -> &Rc<ThemeController<E, S>> {
        &self.theme
    }

    /// Mobile menu controller, when the page has one.
    pub fn nav_menu(&self) -> Option<&Rc<NavMenuController<E>>> {
        self.nav_menu.as_ref()
    }

    /// Navbar scroll controller, when the page has a navbar.
    pub fn scroll_effect(&self) -> Option<&Rc<ScrollEffectController<E>>> {
        self.scroll_effect.as_ref()
    }

    /// Notification controller.
    pub fn notifications(&self) -> &Rc<NotificationController<E>> {
        &self.notifications
    }

    /// Reveal controller, once the document is ready.
    pub fn reveal(&self) -> Option<Rc<RevealController<E>>> {
        self.deferred.borrow().as_ref().map(|d| Rc::clone(&d.reveal))
    }

    /// Form feedback controller, once the document is ready.
    pub fn forms(&self) -> Option<Rc<FormFeedbackController<E>>> {
        self.deferred.borrow().as_ref().map(|d| Rc::clone(&d.forms))
    }
}

fn install_deferred<E: Environment>(env: &Rc<E>, config: &UiConfig, slot: &DeferredSlot<E>) {
    if slot.borrow().is_some() {
        return;
    }
    let reveal = RevealController::install(Rc::clone(env), &config.reveal);
    let forms = FormFeedbackController::install(Rc::clone(env), &config.forms);
    tracing::debug!(pending_reveals = reveal.pending(), "deferred behaviors installed");
    *slot.borrow_mut() = Some(DeferredControllers {
        reveal,
        forms,
    });
}
