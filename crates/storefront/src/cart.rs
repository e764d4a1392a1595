//! Cart provider.

use dioxus::prelude::*;
use storefront_core::CartController;

use crate::state::CartContext;

/// Expose `controller` to descendants through [`crate::state::use_cart`].
#[component]
pub fn CartProvider(controller: CartController, children: Element) -> Element {
    use_context_provider(|| {
        let mut rx = controller.subscribe();
        let mut entries = Signal::new(rx.borrow_and_update().clone());

        spawn(async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                entries.set(next);
            }
        });

        CartContext {
            controller: controller.clone(),
            entries,
        }
    });

    rsx! { {children} }
}
