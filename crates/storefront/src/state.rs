//! Shared app state using Dioxus signals.

use std::sync::Arc;

use dioxus::prelude::*;
use storefront_core::{
    CartController, CartEntry, CartSummary, CatalogClient, DocumentMarkers, HttpSource, Product,
    ScopeError, StorefrontConfig, ThemeController, ThemeId, ThemeSnapshot,
};

/// Which page the app is displaying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Contact,
    Cart,
    /// Unknown path, kept for display
    NotFound(String),
}

impl Route {
    /// Links shown in the header and sidebar.
    pub const NAV: [Route; 3] = [Route::Home, Route::About, Route::Contact];

    pub fn from_path(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "" => Route::Home,
            "/about" => Route::About,
            "/contact" => Route::Contact,
            "/cart" => Route::Cart,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Cart => "/cart",
            Route::NotFound(path) => path,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Contact => "Contact",
            Route::Cart => "Cart",
            Route::NotFound(_) => "Not Found",
        }
    }
}

/// Theme state provided by `ThemeProvider`.
#[derive(Clone)]
pub struct ThemeContext {
    pub controller: ThemeController,
    /// Mirrors the controller's watch channel
    pub snapshot: Signal<ThemeSnapshot>,
}

impl ThemeContext {
    pub fn current(&self) -> ThemeId {
        self.snapshot.read().active
    }

    pub fn is_transitioning(&self) -> bool {
        self.snapshot.read().is_transitioning()
    }

    pub fn set_theme(&self, theme: ThemeId) {
        self.controller.set_theme(theme);
    }
}

/// Cart state provided by `CartProvider`.
#[derive(Clone)]
pub struct CartContext {
    pub controller: CartController,
    /// Mirrors the controller's watch channel
    pub entries: Signal<Arc<Vec<CartEntry>>>,
}

impl CartContext {
    pub fn entries(&self) -> Arc<Vec<CartEntry>> {
        self.entries.read().clone()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.entries.read())
    }

    pub fn add_one(&self, product: Product) {
        self.controller.add_item(product, std::num::NonZeroU32::MIN);
    }

    pub fn set_quantity(&self, product_id: u64, quantity: u32) {
        self.controller.set_quantity(product_id, quantity);
    }

    pub fn remove_item(&self, product_id: u64) {
        self.controller.remove_item(product_id);
    }

    pub fn clear(&self) {
        self.controller.clear();
    }
}

/// Document markers the root element renders.
#[derive(Clone, Copy)]
pub struct DocumentContext {
    pub markers: Signal<DocumentMarkers>,
}

/// Current page.
#[derive(Clone, Copy)]
pub struct NavContext {
    pub route: Signal<Route>,
}

impl NavContext {
    pub fn current(&self) -> Route {
        self.route.read().clone()
    }

    pub fn navigate(&self, route: Route) {
        let mut signal = self.route;
        if *signal.peek() != route {
            tracing::debug!(path = route.path(), "Navigate");
            signal.set(route);
        }
    }
}

/// Long-lived services shared by every page.
#[derive(Clone)]
pub struct AppServices {
    pub config: StorefrontConfig,
    pub catalog: Arc<CatalogClient<HttpSource>>,
}

/// Theme state, or an error outside a `ThemeProvider`.
pub fn try_use_theme() -> Result<ThemeContext, ScopeError> {
    try_use_context::<ThemeContext>().ok_or_else(|| ScopeError::outside("use_theme", "ThemeProvider"))
}

/// Theme state of the enclosing `ThemeProvider`.
///
/// # Panics
///
/// Panics when called outside a `ThemeProvider`.
pub fn use_theme() -> ThemeContext {
    try_use_theme().unwrap_or_else(|e| panic!("{e}"))
}

/// Cart state, or an error outside a `CartProvider`.
pub fn try_use_cart() -> Result<CartContext, ScopeError> {
    try_use_context::<CartContext>().ok_or_else(|| ScopeError::outside("use_cart", "CartProvider"))
}

/// Cart state of the enclosing `CartProvider`.
///
/// # Panics
///
/// Panics when called outside a `CartProvider`.
pub fn use_cart() -> CartContext {
    try_use_cart().unwrap_or_else(|e| panic!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/about/"), Route::About);
        assert_eq!(Route::from_path("/cart"), Route::Cart);
        assert_eq!(Route::from_path("/nope"), Route::NotFound("/nope".to_string()));

        for route in Route::NAV {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    static OUTCOME: Mutex<Vec<ScopeError>> = Mutex::new(Vec::new());

    #[component]
    fn Probe() -> Element {
        let mut outcome = OUTCOME.lock().unwrap();
        if let Err(e) = try_use_theme() {
            outcome.push(e);
        }
        if let Err(e) = try_use_cart() {
            outcome.push(e);
        }
        rsx! {}
    }

    #[test]
    fn test_hooks_outside_providers() {
        let mut dom = VirtualDom::new(Probe);
        dom.rebuild_in_place();

        let outcome = OUTCOME.lock().unwrap();
        let messages: Vec<String> = outcome.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "use_theme must be used within a ThemeProvider",
                "use_cart must be used within a CartProvider",
            ]
        );
    }
}
