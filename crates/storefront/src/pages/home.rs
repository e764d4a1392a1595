//! Home page: hero, selling points and the product grid.

use dioxus::prelude::*;
use storefront_core::{FetchState, Paginator, ThemeId};

use crate::components::ProductCard;
use crate::fetch::use_products;
use crate::state::{AppServices, use_theme};

use super::{Hero, HeroCopy};

fn hero_copy(theme: ThemeId) -> HeroCopy {
    match theme {
        ThemeId::Theme1 => HeroCopy {
            title: "Discover Amazing Products",
            subtitle: "Minimalist design meets powerful functionality",
            description: "Experience our carefully curated collection of premium products with clean, modern aesthetics.",
        },
        ThemeId::Theme2 => HeroCopy {
            title: "Premium Collection",
            subtitle: "Elegance redefined for the modern professional",
            description: "Indulge in our sophisticated selection of luxury items, crafted for those who appreciate timeless design and exceptional quality.",
        },
        ThemeId::Theme3 => HeroCopy {
            title: "Fun & Vibrant Shopping! 🎉",
            subtitle: "Where color meets creativity",
            description: "Dive into our playful world of colorful products that bring joy and excitement to your everyday life!",
        },
    }
}

const FEATURES: [(&str, &str, &str); 3] = [
    ("✦", "Premium Quality", "Only the finest products make it to our collection"),
    ("⚡", "Fast Shipping", "Lightning-fast delivery to your doorstep"),
    ("♥", "Customer Love", "Thousands of happy customers worldwide"),
];

#[component]
pub fn Home() -> Element {
    let theme = use_theme().current();
    let services = use_context::<AppServices>();
    let products = use_products();
    let mut pager = use_signal(|| Paginator::new(services.config.page_size));

    match products.state() {
        FetchState::Pending => rsx! {
            div { class: "status-screen",
                div { class: "spinner" }
                p { class: "status-text", "Loading amazing products..." }
            }
        },
        FetchState::Failed(message) => rsx! {
            div { class: "status-screen",
                div { class: "card error-card",
                    div { class: "error-icon", "⚠" }
                    h2 { "Oops! Something went wrong" }
                    p { class: "muted", "{message}" }
                    button {
                        class: "button-primary",
                        onclick: move |_| {
                            pager.write().reset();
                            products.reload();
                        },
                        "Try Again"
                    }
                }
            }
        },
        FetchState::Ready(list) => {
            let total = list.len();
            let visible = list[pager.read().visible_range(total)].to_vec();
            let has_more = pager.read().has_more(total);

            rsx! {
                div { class: "page animate-fade-in",
                    Hero { theme, copy: hero_copy(theme) }

                    section {
                        h2 { class: "section-title", "Why Choose Us" }
                        div { class: "feature-grid",
                            for (icon, title, description) in FEATURES {
                                div { key: "{title}", class: "card feature-card",
                                    div { class: "feature-icon", "{icon}" }
                                    h3 { "{title}" }
                                    p { class: "muted", "{description}" }
                                }
                            }
                        }
                    }

                    section {
                        h2 { class: "section-title", "Featured Products" }
                        div { class: "product-grid",
                            for (index, product) in visible.into_iter().enumerate() {
                                {
                                    let id = product.id;
                                    rsx! {
                                        ProductCard { key: "{id}", product, index }
                                    }
                                }
                            }
                        }

                        if has_more {
                            div { class: "view-more",
                                button {
                                    class: "button-outline",
                                    onclick: move |_| pager.write().show_more(),
                                    "View More Products"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
