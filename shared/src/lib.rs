//! # sitekit-shared
//!
//! Page behaviors for the marketing site: theme toggle, mobile menu, navbar
//! scroll effect, reveal-on-scroll, notification banner, form feedback,
//! button loading state and anchor smooth scrolling.
//!
//! Everything here talks to the page through [`Environment`] and
//! [`KeyValueStore`], so it runs unchanged in the browser (see the
//! `sitekit-frontend` crate) and in host-side unit tests.

pub mod anchor_scroll;
pub mod config;
pub mod env;
pub mod error;
pub mod form_feedback;
pub mod loading_state;
pub mod nav_menu;
pub mod notification;
pub mod reveal;
pub mod scroll_effect;
pub mod site;
pub mod store;
pub mod theme;

#[cfg(test)]
mod fake;

pub use config::UiConfig;
pub use env::{DomEvent, Environment, EventKind, ListenTarget, VisibilityOptions};
pub use error::{Result, UiError};
pub use notification::Severity;
pub use site::SiteBehaviors;
pub use store::{KeyValueStore, MemoryStore};
pub use theme::Theme;
