//! Collapsible navigation sidebar, shown only by the sidebar layout.

use dioxus::prelude::*;
use storefront_core::LayoutKind;

use crate::state::{NavContext, Route, use_theme};
use crate::theme::ThemeSwitcher;

use super::CartPanel;

fn icon(route: &Route) -> &'static str {
    match route {
        Route::Home => "⌂",
        Route::About => "☺",
        Route::Contact => "✉",
        Route::Cart => "🛒",
        Route::NotFound(_) => "?",
    }
}

#[component]
pub fn Sidebar() -> Element {
    let theme = use_theme();
    let nav = use_context::<NavContext>();
    let mut collapsed = use_signal(|| false);

    if theme.current().layout() != LayoutKind::Sidebar {
        return rsx! {};
    }

    let current = nav.current();
    let is_collapsed = collapsed();
    let aside_class = if is_collapsed {
        "sidebar collapsed"
    } else {
        "sidebar"
    };

    rsx! {
        aside { class: "{aside_class}",
            div { class: "sidebar-header",
                div { class: "sidebar-header-row",
                    if !is_collapsed {
                        div { class: "sidebar-brand",
                            div { class: "brand-mark", "◐" }
                            span { class: "brand-title", "Multi-Theme Switcher" }
                        }
                    }
                    button {
                        class: "icon-button",
                        onclick: move |_| collapsed.toggle(),
                        if is_collapsed { "☰" } else { "✕" }
                    }
                }

                if !is_collapsed {
                    div { class: "sidebar-switcher",
                        ThemeSwitcher { align_start: true }
                    }
                }
            }

            nav { class: "sidebar-nav",
                for route in Route::NAV.into_iter().chain([Route::Cart]) {
                    {
                        let item_class = if route == current {
                            "sidebar-link active"
                        } else {
                            "sidebar-link"
                        };
                        let glyph = icon(&route);
                        let label = route.label().to_string();
                        let key = route.path().to_string();
                        let target = route.clone();
                        rsx! {
                            button {
                                key: "{key}",
                                class: "{item_class}",
                                onclick: move |_| nav.navigate(target.clone()),
                                span { class: "sidebar-link-icon", "{glyph}" }
                                if !is_collapsed {
                                    span { class: "sidebar-link-label", "{label}" }
                                }
                            }
                        }
                    }
                }
            }

            if !is_collapsed {
                div { class: "sidebar-cart",
                    CartPanel {}
                }
                div { class: "sidebar-footer",
                    p { "Dark theme with elegant serif typography for a premium experience." }
                }
            }
        }
    }
}
