//! Theme registry.
//!
//! Provides 3 themes: Minimalist, Dark Sidebar, and Colorful Cards. Each one
//! picks a different page layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Available themes for the storefront.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Theme1,
    Theme2,
    Theme3,
}

/// Page layout a theme renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Fixed header above the content
    Default,
    /// Collapsible navigation sidebar beside the content
    Sidebar,
    /// Header above a card grid
    Grid,
}

/// Display metadata for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeConfig {
    pub id: ThemeId,
    pub name: &'static str,
    pub description: &'static str,
    pub layout: LayoutKind,
}

const THEME_CONFIGS: [ThemeConfig; 3] = [
    ThemeConfig {
        id: ThemeId::Theme1,
        name: "Minimalist",
        description: "Clean light theme with modern typography",
        layout: LayoutKind::Default,
    },
    ThemeConfig {
        id: ThemeId::Theme2,
        name: "Dark Sidebar",
        description: "Professional dark theme with sidebar navigation",
        layout: LayoutKind::Sidebar,
    },
    ThemeConfig {
        id: ThemeId::Theme3,
        name: "Colorful Cards",
        description: "Vibrant theme with playful card-based layout",
        layout: LayoutKind::Grid,
    },
];

impl ThemeId {
    /// Returns the persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Theme1 => "theme1",
            ThemeId::Theme2 => "theme2",
            ThemeId::Theme3 => "theme3",
        }
    }

    /// Returns all available themes, in display order.
    pub fn all() -> &'static [ThemeId] {
        &[ThemeId::Theme1, ThemeId::Theme2, ThemeId::Theme3]
    }

    /// Returns the registry entry for this theme.
    pub fn config(&self) -> &'static ThemeConfig {
        match self {
            ThemeId::Theme1 => &THEME_CONFIGS[0],
            ThemeId::Theme2 => &THEME_CONFIGS[1],
            ThemeId::Theme3 => &THEME_CONFIGS[2],
        }
    }

    /// Returns the display name for the theme.
    pub fn display_name(&self) -> &'static str {
        self.config().name
    }

    pub fn layout(&self) -> LayoutKind {
        self.config().layout
    }

    /// Returns the `data-theme` attribute value, or `None` for the default
    /// theme which is styled without one.
    pub fn document_attribute(&self) -> Option<&'static str> {
        match self {
            ThemeId::Theme1 => None,
            other => Some(other.as_str()),
        }
    }

    /// Parses a persisted identifier, accepting only known themes.
    pub fn parse(value: &str) -> Option<ThemeId> {
        ThemeId::all().iter().copied().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme identifier: {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeId {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeId::parse(s).ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Returns the whole registry in display order.
pub fn theme_configs() -> &'static [ThemeConfig] {
    &THEME_CONFIGS
}
