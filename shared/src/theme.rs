//! Light/dark theme with a persisted preference.

use std::{cell::RefCell, fmt, rc::Rc, str::FromStr};

use crate::{
    config::ThemeConfig,
    env::{DomEvent, EventKind, ListenTarget},
    store::KeyValueStore,
    Environment,
};

/// Site colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Light scheme, the default.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Value written to storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme.
    pub const fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Interpret a stored value. Anything unrecognized is light.
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is neither `light` nor `dark`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Owns the body theme classes, the toggle icons and the stored flag.
pub struct ThemeController<E: Environment, S: KeyValueStore> {
    env: Rc<E>,
    store: S,
    config: ThemeConfig,
    toggle: Option<E::Element>,
    pulse: RefCell<Option<E::Timer>>,
}

impl<E: Environment, S: KeyValueStore + 'static> ThemeController<E, S> {
    /// Apply the stored theme and wire the toggle control, if present.
    pub fn install(env: Rc<E>, store: S, config: ThemeConfig) -> Rc<Self> {
        let toggle = env.element_by_id(&config.toggle_id);
        let controller = Rc::new(Self {
            env,
            store,
            config,
            toggle,
            pulse: RefCell::new(None),
        });

        controller.apply(controller.stored());

        match controller.toggle.clone() {
            Some(toggle) => {
                let this = Rc::clone(&controller);
                controller.env.listen(
                    ListenTarget::Element(toggle),
                    EventKind::Click,
                    Rc::new(move |_: &DomEvent<E::Element>| {
                        this.toggle();
                    }),
                );
            },
            None => tracing::debug!(id = %controller.config.toggle_id, "theme toggle not found"),
        }

        controller
    }

    /// Theme recorded in storage, light when absent or unrecognized.
    pub fn stored(&self) -> Theme {
        self.store
            .get(&self.config.storage_key)
            .map(|value| Theme::from_stored(&value))
            .unwrap_or_default()
    }

    /// Theme currently shown by the document.
    pub fn current(&self) -> Theme {
        match self.env.body() {
            Some(body) if self.env.has_class(&body, &self.config.dark_class) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Show `theme`: exactly one theme class on the body, icons to match.
    pub fn apply(&self, theme: Theme) {
        if let Some(body) = self.env.body() {
            let (on, off) = match theme {
                Theme::Light => (&self.config.light_class, &self.config.dark_class),
                Theme::Dark => (&self.config.dark_class, &self.config.light_class),
            };
            self.env.remove_class(&body, off);
            self.env.add_class(&body, on);
        }
        self.update_icons(theme);
    }

    /// Switch to the other theme and persist it. Returns the new theme.
    pub fn toggle(self: &Rc<Self>) -> Theme {
        let next = self.current().flipped();
        self.apply(next);
        if let Err(err) = self.store.set(&self.config.storage_key, next.as_str()) {
            tracing::warn!(error = %err, "failed to persist theme preference");
        }
        self.pulse();
        next
    }

    fn update_icons(&self, theme: Theme) {
        let Some(toggle) = self.toggle.as_ref() else {
            return;
        };
        let sun = self.env.query_in(toggle, &self.config.sun_icon);
        let moon = self.env.query_in(toggle, &self.config.moon_icon);
        if let (Some(sun), Some(moon)) = (sun, moon) {
            let (sun_display, moon_display) = match theme {
                Theme::Light => ("block", "none"),
                Theme::Dark => ("none", "block"),
            };
            self.env.set_style(&sun, "display", sun_display);
            self.env.set_style(&moon, "display", moon_display);
        }
    }

    fn pulse(self: &Rc<Self>) {
        let Some(toggle) = self.toggle.clone() else {
            return;
        };
        // Cancel an unfinished pulse before starting the next one.
        self.pulse.borrow_mut().take();
        self.env.set_style(&toggle, "transform", &self.config.pulse_transform);

        let this = Rc::clone(self);
        let timer = self.env.set_timeout(
            self.config.pulse_ms,
            Box::new(move || {
                this.env.set_style(&toggle, "transform", &this.config.rest_transform);
                this.pulse.borrow_mut().take();
            }),
        );
        *self.pulse.borrow_mut() = Some(timer);
    }
}
