//! Configuration for the storefront.
//!
//! Provides sensible defaults with the ability to customize behavior
//! through the builder pattern or a TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::CatalogEndpoint;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::theme_state::{DEFAULT_THEME_DELAY, DEFAULT_TRANSITION_MARKER, TransitionTimings};

/// Store key holding the active theme identifier.
pub const DEFAULT_THEME_KEY: &str = "app-theme";
/// Store key holding the serialized cart.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Errors that can occur while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Configuration for one storefront session.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Directory holding the persistent store.
    pub data_dir: PathBuf,
    /// Product listing endpoint.
    pub catalog_url: String,
    /// Products revealed per "view more".
    pub page_size: usize,
    /// Theme transition timing.
    pub timings: TransitionTimings,
    pub theme_key: String,
    pub cart_key: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("storefront"),
            catalog_url: CatalogEndpoint::default().url(),
            page_size: DEFAULT_PAGE_SIZE,
            timings: TransitionTimings::default(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

/// On-disk shape; every field is optional and falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    catalog_url: Option<String>,
    page_size: Option<usize>,
    theme_delay_ms: Option<u64>,
    transition_marker_ms: Option<u64>,
    theme_key: Option<String>,
    cart_key: Option<String>,
}

impl StorefrontConfig {
    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        let defaults = Self::default();
        Ok(Self {
            data_dir: file.data_dir.unwrap_or(defaults.data_dir),
            catalog_url: file.catalog_url.unwrap_or(defaults.catalog_url),
            page_size: file.page_size.unwrap_or(defaults.page_size),
            timings: TransitionTimings {
                delay: file
                    .theme_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_THEME_DELAY),
                marker: file
                    .transition_marker_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_TRANSITION_MARKER),
            },
            theme_key: file.theme_key.unwrap_or(defaults.theme_key),
            cart_key: file.cart_key.unwrap_or(defaults.cart_key),
        })
    }

    /// Load a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }
}

/// Builder for a [`StorefrontConfig`].
#[derive(Debug, Clone, Default)]
pub struct StorefrontConfigBuilder {
    config: StorefrontConfig,
}

impl StorefrontConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: StorefrontConfig) -> Self {
        Self { config }
    }

    /// Set the data directory for persistence.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    pub fn catalog(mut self, endpoint: CatalogEndpoint) -> Self {
        self.config.catalog_url = endpoint.url();
        self
    }

    pub fn catalog_url(mut self, url: impl Into<String>) -> Self {
        self.config.catalog_url = url.into();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Delay between a theme request and its commit.
    pub fn theme_delay(mut self, delay: Duration) -> Self {
        self.config.timings.delay = delay;
        self
    }

    /// How long the document transition marker stays on.
    pub fn transition_marker(mut self, duration: Duration) -> Self {
        self.config.timings.marker = duration;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> StorefrontConfig {
        self.config
    }
}

// Helper module for directory resolution
mod dirs {
    use std::path::PathBuf;

    pub fn data_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join("Library/Application Support"))
        }

        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|home| PathBuf::from(home).join(".local/share"))
                })
        }

        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.page_size, 9);
        assert_eq!(config.theme_key, "app-theme");
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.timings.delay, Duration::from_millis(100));
        assert_eq!(config.timings.marker, Duration::from_millis(600));
        assert!(config.data_dir.ends_with("storefront"));
    }

    #[test]
    fn test_builder() {
        let config = StorefrontConfigBuilder::new()
            .data_dir("/tmp/test")
            .catalog(CatalogEndpoint::Platzi)
            .page_size(12)
            .theme_delay(Duration::from_millis(10))
            .build();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/test"));
        assert_eq!(config.catalog_url, "https://api.escuelajs.co/api/v1/products");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.timings.delay, Duration::from_millis(10));
        assert_eq!(config.timings.marker, DEFAULT_TRANSITION_MARKER);
    }

    #[test]
    fn test_toml_partial_overrides() {
        let raw = r#"
            catalog_url = "https://fakestoreapi.com/products"
            theme_delay_ms = 250
        "#;
        let config = StorefrontConfig::from_toml_str(raw, Path::new("storefront.toml")).unwrap();
        assert_eq!(config.catalog_url, "https://fakestoreapi.com/products");
        assert_eq!(config.timings.delay, Duration::from_millis(250));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = StorefrontConfig::from_toml_str("colour = 1", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_toml_file_missing() {
        let err = StorefrontConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
