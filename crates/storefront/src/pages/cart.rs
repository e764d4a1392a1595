//! Cart page.

use dioxus::prelude::*;

use crate::format::format_price;
use crate::state::{NavContext, Route, use_cart};

#[component]
pub fn CartPage() -> Element {
    let cart = use_cart();
    let nav = use_context::<NavContext>();
    let entries = cart.entries();
    let summary = cart.summary();

    if entries.is_empty() {
        return rsx! {
            div { class: "page animate-fade-in",
                div { class: "card empty-cart",
                    h1 { "Your cart is empty" }
                    p { class: "muted", "Add a few products from the home page." }
                    button {
                        class: "button-primary",
                        onclick: move |_| nav.navigate(Route::Home),
                        "Continue Shopping"
                    }
                }
            }
        };
    }

    let total = format_price(summary.total);
    let clear_cart = cart.clone();

    rsx! {
        div { class: "page animate-fade-in",
            h1 { class: "section-title", "Your Cart" }

            div { class: "card cart-list",
                for entry in entries.iter() {
                    {
                        let id = entry.product.id;
                        let quantity = entry.quantity.get();
                        let title = entry.product.title.clone();
                        let image = entry.product.image.clone();
                        let unit = format_price(entry.product.price);
                        let subtotal = format_price(entry.subtotal());
                        let dec = cart.clone();
                        let inc = cart.clone();
                        let remove = cart.clone();

                        rsx! {
                            div { key: "{id}", class: "cart-row",
                                img { class: "cart-thumb", src: "{image}", alt: "{title}" }
                                div { class: "cart-row-info",
                                    div { class: "cart-row-title", "{title}" }
                                    div { class: "muted", "{unit} each" }
                                }
                                div { class: "cart-quantity",
                                    button {
                                        class: "icon-button",
                                        onclick: move |_| dec.set_quantity(id, quantity - 1),
                                        "−"
                                    }
                                    span { "{quantity}" }
                                    button {
                                        class: "icon-button",
                                        onclick: move |_| inc.set_quantity(id, quantity.saturating_add(1)),
                                        "+"
                                    }
                                }
                                div { class: "cart-subtotal", "{subtotal}" }
                                button {
                                    class: "button-outline",
                                    onclick: move |_| remove.remove_item(id),
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }

            div { class: "card cart-summary",
                div { class: "cart-summary-row",
                    span { "Items" }
                    span { "{summary.count}" }
                }
                div { class: "cart-summary-row total",
                    span { "Total" }
                    span { "{total}" }
                }
                div { class: "cart-actions",
                    button {
                        class: "button-outline",
                        onclick: move |_| clear_cart.clear(),
                        "Clear Cart"
                    }
                    button {
                        class: "button-primary",
                        onclick: move |_| nav.navigate(Route::Home),
                        "Continue Shopping"
                    }
                }
            }
        }
    }
}
