//! Pages, one per route.

use dioxus::prelude::*;
use storefront_core::ThemeId;

pub mod about;
pub mod cart;
pub mod contact;
pub mod home;
pub mod not_found;

pub use about::About;
pub use cart::CartPage;
pub use contact::Contact;
pub use home::Home;
pub use not_found::NotFound;

/// Per-theme hero copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
}

/// Hero banner at the top of a page.
#[component]
pub fn Hero(theme: ThemeId, copy: HeroCopy) -> Element {
    rsx! {
        section { class: "hero hero-{theme}",
            h1 { class: "hero-title", "{copy.title}" }
            p { class: "hero-subtitle", "{copy.subtitle}" }
            p { class: "hero-description", "{copy.description}" }
        }
    }
}
