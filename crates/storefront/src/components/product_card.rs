//! Product card for the home page grid.

use dioxus::prelude::*;
use storefront_core::Product;

use crate::format::{
    DESCRIPTION_LIMIT, TITLE_LIMIT, badge, features, format_price, original_price, star_fills,
    stock_label, truncate,
};
use crate::state::use_cart;

#[component]
pub fn ProductCard(product: Product, index: usize) -> Element {
    let cart = use_cart();

    let badge = badge(&product);
    let title = truncate(&product.title, TITLE_LIMIT);
    let description = truncate(&product.description, DESCRIPTION_LIMIT);
    let features = features(&product);
    let price = format_price(product.price);
    let was = product
        .discount_percentage
        .filter(|d| *d > 0.0)
        .map(|d| format_price(original_price(product.price, Some(d))));
    let stars = star_fills(product.rating.rate);
    let stock = stock_label(&product);
    let rating_count = product.rating.count;
    let delay = index * 100;
    let Product {
        title: full_title,
        category,
        image,
        ..
    } = product.clone();

    rsx! {
        div {
            class: "product-card animate-fade-in",
            style: "animation-delay: {delay}ms",

            div { class: "product-badge", "{badge}" }

            div { class: "product-image",
                img {
                    src: "{image}",
                    alt: "{full_title}",
                    loading: "lazy",
                }
            }

            div { class: "product-body",
                div { class: "product-category", "{category}" }
                h2 { class: "product-title", "{title}" }
                p { class: "product-description", "{description}" }

                if !features.is_empty() {
                    div { class: "product-features",
                        for feature in features {
                            span { class: "product-feature", "{feature}" }
                        }
                    }
                }

                div { class: "product-price-row",
                    div { class: "product-prices",
                        if let Some(was) = was {
                            span { class: "product-price-was", "{was}" }
                        }
                        span { class: "product-price-now", "{price}" }
                    }
                    button {
                        class: "product-add",
                        onclick: move |_| cart.add_one(product.clone()),
                        "🛒 Add"
                    }
                }

                div { class: "product-meta",
                    div { class: "product-rating",
                        for (i, filled) in stars.into_iter().enumerate() {
                            {
                                let star_class = if filled { "star filled" } else { "star" };
                                rsx! {
                                    span { key: "{i}", class: "{star_class}", "★" }
                                }
                            }
                        }
                        span { class: "product-rating-count", "({rating_count})" }
                    }
                    div { class: "product-stock", "{stock}" }
                }
            }
        }
    }
}
