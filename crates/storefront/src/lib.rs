//! Multi-Theme Switcher storefront.
//!
//! Dioxus desktop front end over `storefront-core`: providers expose the
//! theme and cart controllers to the component tree, and pages render the
//! remote catalog in whichever layout the active theme selects.

use std::sync::OnceLock;

use storefront_core::{StorefrontConfig, ThemeId};

pub mod cart;
pub mod components;
pub mod fetch;
pub mod format;
pub mod pages;
pub mod state;
pub mod theme;

/// Storefront CSS, embedded at compile time.
pub const STYLES_CSS: &str = include_str!("../assets/styles.css");

/// Options the binary resolves before launching the window.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub config: StorefrontConfig,
    /// Keep state in memory only
    pub in_memory: bool,
    /// Theme to switch to once the session is open
    pub initial_theme: Option<ThemeId>,
    /// Page to open first
    pub start_path: Option<String>,
}

static LAUNCH_OPTIONS: OnceLock<LaunchOptions> = OnceLock::new();

/// Store the launch options. Only the first call has any effect.
pub fn set_launch_options(options: LaunchOptions) {
    if LAUNCH_OPTIONS.set(options).is_err() {
        tracing::warn!("Launch options already set, ignoring");
    }
}

/// Launch options, or the defaults when the binary set none.
pub fn launch_options() -> LaunchOptions {
    LAUNCH_OPTIONS.get().cloned().unwrap_or_default()
}
