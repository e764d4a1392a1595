//! One storefront session.
//!
//! A [`Session`] is the scope the presentation layer provides to its
//! descendants: it owns the theme and cart controllers, both opened against
//! the same store. Dropping the session cancels any pending theme timers.

use std::sync::Arc;

use tracing::info;

use crate::cart::CartController;
use crate::config::StorefrontConfig;
use crate::document::DocumentHook;
use crate::error::SessionError;
use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::theme_state::ThemeController;

/// Theme and cart state for one running storefront.
#[derive(Debug)]
pub struct Session {
    config: StorefrontConfig,
    theme: ThemeController,
    cart: CartController,
}

impl Session {
    /// Restore both controllers from `store`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn open(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
        document: Arc<dyn DocumentHook>,
    ) -> Result<Self, SessionError> {
        let theme = ThemeController::open(
            Arc::clone(&store),
            document,
            config.theme_key.clone(),
            config.timings,
        )?;
        let cart = CartController::open(store, config.cart_key.clone());

        info!(
            theme = %theme.current(),
            cart_items = cart.count(),
            "Session opened"
        );

        Ok(Self {
            config,
            theme,
            cart,
        })
    }

    /// Open a session backed by the file store in `config.data_dir`.
    pub fn open_persistent(
        config: StorefrontConfig,
        document: Arc<dyn DocumentHook>,
    ) -> Result<Self, SessionError> {
        let store = FileStore::open(&config.data_dir)?;
        Self::open(config, Arc::new(store), document)
    }

    /// Open a session that forgets everything when it ends.
    pub fn open_in_memory(
        config: StorefrontConfig,
        document: Arc<dyn DocumentHook>,
    ) -> Result<Self, SessionError> {
        Self::open(config, Arc::new(MemoryStore::new()), document)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn cart(&self) -> &CartController {
        &self.cart
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.theme.shutdown();
    }
}
