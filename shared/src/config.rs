//! Configuration for the page behaviors.
//!
//! Every default mirrors the markup contract of the site templates. A page
//! can override any subset through a JSON document; fields it leaves out
//! keep their defaults.

use serde::Deserialize;

use crate::error::Result;

/// Storage key holding the persisted theme flag.
pub const THEME_STORAGE_KEY: &str = "theme";
/// Scroll offset (px) at which the navbar switches to its scrolled look.
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;
/// How long a notification stays visible.
pub const NOTIFICATION_DISPLAY_MS: u32 = 3000;
/// Exit transition length; the banner is reset after it.
pub const NOTIFICATION_FADE_MS: u32 = 300;
/// Length of the theme toggle press pulse.
pub const THEME_PULSE_MS: u32 = 150;

/// Reveal selectors used when the page does not supply its own.
pub const DEFAULT_REVEAL_SELECTORS: &[&str] = &[
    ".card",
    ".team-card",
    ".contact-info-section",
    ".contact-form-section",
    ".mission-section",
];

/// All behavior settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme toggle settings.
    pub theme: ThemeConfig,
    /// Mobile navigation menu settings.
    pub nav: NavConfig,
    /// Navbar scroll effect settings.
    pub scroll: ScrollConfig,
    /// Reveal-on-scroll settings.
    pub reveal: RevealConfig,
    /// Notification banner settings.
    pub notification: NotificationConfig,
    /// Form feedback settings.
    pub forms: FormConfig,
    /// Button loading state settings.
    pub loading: LoadingConfig,
    /// Anchor smooth scrolling settings.
    pub anchors: AnchorConfig,
}

impl UiConfig {
    /// Parse a (possibly partial) JSON configuration document.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Theme toggle settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Storage key for the persisted flag.
    pub storage_key: String,
    /// Id of the toggle control.
    pub toggle_id: String,
    /// Sun icon selector, scoped to the toggle.
    pub sun_icon: String,
    /// Moon icon selector, scoped to the toggle.
    pub moon_icon: String,
    /// Body class for the light theme.
    pub light_class: String,
    /// Body class for the dark theme.
    pub dark_class: String,
    /// Press pulse length in milliseconds.
    pub pulse_ms: u32,
    /// Transform applied while the pulse is held.
    pub pulse_transform: String,
    /// Transform restored once the pulse ends.
    pub rest_transform: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_string(),
            toggle_id: "themeToggle".to_string(),
            sun_icon: ".sun-icon".to_string(),
            moon_icon: ".moon-icon".to_string(),
            light_class: "light-theme".to_string(),
            dark_class: "dark-theme".to_string(),
            pulse_ms: THEME_PULSE_MS,
            pulse_transform: "scale(0.9)".to_string(),
            rest_transform: "scale(1)".to_string(),
        }
    }
}

/// Mobile navigation menu settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Id of the menu button.
    pub toggle_id: String,
    /// Selector of the menu container.
    pub menu: String,
    /// Class marking the menu as open.
    pub active_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_id: "mobileMenuToggle".to_string(),
            menu: ".nav-menu".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Navbar scroll effect settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Selector of the navigation bar.
    pub navbar: String,
    /// Class applied once scrolled past the threshold.
    pub scrolled_class: String,
    /// Vertical offset in px.
    pub threshold_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navbar: ".navbar".to_string(),
            scrolled_class: "scrolled".to_string(),
            threshold_px: SCROLL_THRESHOLD_PX,
        }
    }
}

/// Reveal-on-scroll settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Selectors of the revealable sections.
    pub selectors: Vec<String>,
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    /// Observer root margin, CSS shorthand.
    pub root_margin: String,
    /// Transition length in milliseconds.
    pub duration_ms: u32,
    /// Extra delay per element, in document order.
    pub stagger_ms: u32,
    /// Initial downward offset in px.
    pub offset_px: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_REVEAL_SELECTORS.iter().map(|s| s.to_string()).collect(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            duration_ms: 600,
            stagger_ms: 100,
            offset_px: 30,
        }
    }
}

/// Notification banner settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Id of the banner element.
    pub element_id: String,
    /// Base class the banner always carries.
    pub base_class: String,
    /// Class that triggers the entrance transition.
    pub visible_class: String,
    /// Time the banner stays up.
    pub display_ms: u32,
    /// Exit transition length.
    pub fade_ms: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            element_id: "notification".to_string(),
            base_class: "notification".to_string(),
            visible_class: "show".to_string(),
            display_ms: NOTIFICATION_DISPLAY_MS,
            fade_ms: NOTIFICATION_FADE_MS,
        }
    }
}

/// Form feedback settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Selector of the validated fields.
    pub fields: String,
    /// Class marking a field invalid.
    pub error_class: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            fields: "input, textarea".to_string(),
            error_class: "error".to_string(),
        }
    }
}

/// Button loading state settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Label sub-element selector.
    pub label: String,
    /// Spinner sub-element selector.
    pub loader: String,
    /// Class hiding a sub-element.
    pub hidden_class: String,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            label: ".btn-text".to_string(),
            loader: ".btn-loader".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

/// Anchor smooth scrolling settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Selector of in-page links.
    pub links: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            links: "a[href^=\"#\"]".to_string(),
        }
    }
}
