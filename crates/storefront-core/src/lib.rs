//! # Storefront Core
//!
//! State and data plumbing for the multi-theme storefront.
//!
//! ## Features
//!
//! - **ThemeController**: Active theme with a delayed, cancellable two-phase switch
//! - **CartController**: Cart entries with derived count and total, written through on change
//! - **KeyValueStore**: Pluggable persistence with in-memory and file backends
//! - **FetchSlot**: Keyed remote reads where the newest key always wins
//! - **normalize_product**: One canonical product shape from several catalog formats
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_core::{Session, StorefrontConfig, ThemeId, WatchDocument};
//!
//! #[tokio::main]
//! async fn main() {
//!     let document = Arc::new(WatchDocument::new());
//!     let session = Session::open_in_memory(StorefrontConfig::default(), document).unwrap();
//!
//!     session.theme().set_theme(ThemeId::Theme2);
//!     assert!(session.theme().is_transitioning());
//! }
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod document;
pub mod error;
pub mod fetch;
pub mod pagination;
pub mod product;
pub mod session;
pub mod store;
pub mod theme;
pub mod theme_state;

// Re-exports
pub use cart::{CartController, CartEntry, CartSummary};
pub use catalog::{CatalogClient, CatalogEndpoint, parse_catalog};
pub use config::{ConfigError, StorefrontConfig, StorefrontConfigBuilder};
pub use contact::{ContactField, ContactFieldError, ContactForm};
pub use document::{DocumentHook, DocumentMarkers, TRANSITION_CLASS, WatchDocument};
pub use error::{ScopeError, SessionError, StoreError};
pub use fetch::{
    FetchError, FetchSlot, FetchState, HttpSource, JsonSource, Loader, RequestGuard,
    RequestTicket,
};
pub use pagination::Paginator;
pub use product::{NormalizeError, Product, Rating, RecordShape, normalize_product};
pub use session::Session;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use theme::{LayoutKind, ThemeConfig, ThemeId, UnknownTheme, theme_configs};
pub use theme_state::{ThemeController, ThemePhase, ThemeSnapshot, TransitionTimings};
