//! Page chrome for the three layouts.

use dioxus::prelude::*;
use storefront_core::LayoutKind;

use crate::state::use_theme;

use super::{Header, Sidebar};

/// Wraps the page in the active theme's layout.
#[component]
pub fn Layout(children: Element) -> Element {
    let theme = use_theme();
    let current = theme.current();

    let shell_class = if theme.is_transitioning() {
        "app-shell animate-theme-switch"
    } else {
        "app-shell"
    };

    rsx! {
        div { class: "{shell_class}",
            match current.layout() {
                LayoutKind::Default => rsx! {
                    Header {}
                    main { class: "main main-default",
                        div { class: "container", {children} }
                    }
                },
                LayoutKind::Sidebar => rsx! {
                    div { class: "sidebar-shell",
                        Sidebar {}
                        main { class: "main main-sidebar",
                            div { class: "sidebar-content", {children} }
                        }
                    }
                },
                LayoutKind::Grid => rsx! {
                    Header {}
                    main { class: "main main-grid",
                        div { class: "grid-container", {children} }
                    }
                },
            }
        }
    }
}
