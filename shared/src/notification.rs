//! Transient status banner.
//!
//! The banner moves through three phases:
//!
//! ```text
//! Hidden --show()--> Visible --display_ms--> Fading --fade_ms--> Hidden
//! ```
//!
//! Only one dismissal timer is pending at a time. A new `show` cancels it, so
//! an older message's timers can never clear a newer message early.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{config::NotificationConfig, Environment};

/// Visual category of a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information, the default.
    #[default]
    Info,
    /// An operation succeeded.
    Success,
    /// An operation failed.
    Error,
    /// Something needs attention.
    Warning,
    /// Site-specific category, used verbatim as a class name.
    Custom(String),
}

impl Severity {
    /// Class applied to the banner for this severity.
    pub fn class_name(&self) -> &str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Custom(name) => name.as_str(),
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "info" => Severity::Info,
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            other => Severity::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Where the banner is in its show/dismiss cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationPhase {
    /// Base class only.
    #[default]
    Hidden,
    /// Showing a message.
    Visible,
    /// Exit transition running.
    Fading,
}

struct BannerState<T> {
    phase: NotificationPhase,
    pending: Option<T>,
}

/// Shows messages in the page's notification element.
pub struct NotificationController<E: Environment> {
    env: Rc<E>,
    config: NotificationConfig,
    state: RefCell<BannerState<E::Timer>>,
}

impl<E: Environment> NotificationController<E> {
    /// Create the controller. The banner element is looked up on every call,
    /// so it may be added to the page later.
    pub fn new(env: Rc<E>, config: NotificationConfig) -> Rc<Self> {
        Rc::new(Self {
            env,
            config,
            state: RefCell::new(BannerState {
                phase: NotificationPhase::Hidden,
                pending: None,
            }),
        })
    }

    /// Current phase.
    pub fn phase(&self) -> NotificationPhase {
        self.state.borrow().phase
    }

    /// Display `message` with `severity`, replacing whatever is showing.
    ///
    /// No-op when the page has no notification element.
    pub fn show(self: &Rc<Self>, message: &str, severity: &Severity) {
        let Some(banner) = self.banner() else {
            tracing::debug!(id = %self.config.element_id, "notification element not found");
            return;
        };

        let cancelled = self.state.borrow_mut().pending.take();
        drop(cancelled);

        self.env.set_text(&banner, message);
        self.env.set_class_name(
            &banner,
            &format!("{} {}", self.config.base_class, severity.class_name()),
        );
        self.env.add_class(&banner, &self.config.visible_class);

        let this = Rc::clone(self);
        let timer = self
            .env
            .set_timeout(self.config.display_ms, Box::new(move || this.begin_fade()));
        self.arm(NotificationPhase::Visible, timer);
    }

    fn begin_fade(self: &Rc<Self>) {
        if let Some(banner) = self.banner() {
            self.env.remove_class(&banner, &self.config.visible_class);
        }
        let this = Rc::clone(self);
        let timer = self
            .env
            .set_timeout(self.config.fade_ms, Box::new(move || this.reset()));
        self.arm(NotificationPhase::Fading, timer);
    }

    fn reset(&self) {
        if let Some(banner) = self.banner() {
            self.env.set_class_name(&banner, &self.config.base_class);
        }
        let finished = {
            let mut state = self.state.borrow_mut();
            state.phase = NotificationPhase::Hidden;
            state.pending.take()
        };
        drop(finished);
    }

    fn arm(&self, phase: NotificationPhase, timer: E::Timer) {
        let previous = {
            let mut state = self.state.borrow_mut();
            state.phase = phase;
            state.pending.replace(timer)
        };
        drop(previous);
    }

    fn banner(&self) -> Option<E::Element> {
        self.env.element_by_id(&self.config.element_id)
    }
}
