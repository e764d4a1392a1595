//! Fallback page for unknown routes.

use dioxus::prelude::*;
use storefront_core::ThemeId;

use crate::state::{NavContext, Route, use_theme};

#[component]
pub fn NotFound(path: String) -> Element {
    let theme = use_theme().current();
    let nav = use_context::<NavContext>();

    let logged = path.clone();
    use_effect(move || {
        tracing::error!(path = %logged, "404: no page at this path");
    });

    let (title, message, button) = match theme {
        ThemeId::Theme1 => (
            "404 - Page Not Found",
            "The page you're looking for doesn't exist.",
            "Return Home",
        ),
        ThemeId::Theme2 => (
            "Page Not Located",
            "We apologize, but the requested page could not be found.",
            "Return to Homepage",
        ),
        ThemeId::Theme3 => (
            "Oops! Lost in Space! 🚀",
            "This page went on an adventure and got lost! Let's get you back home.",
            "Take Me Home! 🏠",
        ),
    };

    rsx! {
        div { class: "status-screen",
            div { class: "card not-found animate-scale-in",
                div { class: "error-icon", "⚠" }
                h1 { "{title}" }
                p { class: "muted", "{message}" }
                p { class: "muted small",
                    "Requested path: "
                    code { "{path}" }
                }
                button {
                    class: "button-primary",
                    onclick: move |_| nav.navigate(Route::Home),
                    "{button}"
                }
            }
        }
    }
}
