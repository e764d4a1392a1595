//! Cart badge linking to the cart page.

use dioxus::prelude::*;

use crate::format::format_price;
use crate::state::{NavContext, Route, use_cart};

#[component]
pub fn CartPanel() -> Element {
    let cart = use_cart();
    let nav = use_context::<NavContext>();
    let summary = cart.summary();
    let total = format_price(summary.total);

    rsx! {
        button {
            class: "cart-panel",
            title: "View cart",
            onclick: move |_| nav.navigate(Route::Cart),
            span { class: "cart-panel-icon", "🛒" }
            if summary.count > 0 {
                span { class: "cart-panel-count", "{summary.count}" }
                span { class: "cart-panel-total", "{total}" }
            }
        }
    }
}
