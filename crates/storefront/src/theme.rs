//! Theme provider and themed components.

use dioxus::prelude::*;
use storefront_core::{ThemeController, ThemeId, WatchDocument};

use crate::state::{DocumentContext, ThemeContext, use_theme};

/// Expose `controller` to descendants through [`use_theme`].
#[component]
pub fn ThemeProvider(controller: ThemeController, children: Element) -> Element {
    use_context_provider(|| {
        let mut rx = controller.subscribe();
        let mut snapshot = Signal::new(*rx.borrow_and_update());

        spawn(async move {
            while rx.changed().await.is_ok() {
                let next = *rx.borrow_and_update();
                snapshot.set(next);
            }
        });

        ThemeContext {
            controller: controller.clone(),
            snapshot,
        }
    });

    rsx! { {children} }
}

/// Mirror the document markers into a signal for [`ThemedRoot`].
pub fn use_document_provider(document: &WatchDocument) -> DocumentContext {
    use_context_provider(|| {
        let mut rx = document.subscribe();
        let mut markers = Signal::new(rx.borrow_and_update().clone());

        spawn(async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                markers.set(next);
            }
        });

        DocumentContext { markers }
    })
}

/// Themed root wrapper component.
///
/// Carries the `data-theme` attribute and the transition class.
#[component]
pub fn ThemedRoot(children: Element) -> Element {
    let document = use_context::<DocumentContext>();
    let markers = document.markers.read().clone();
    let class = markers.root_class("themed-root");

    rsx! {
        div {
            class: "{class}",
            "data-theme": markers.theme_attribute,
            {children}
        }
    }
}

/// Theme dropdown listing every registered theme.
#[component]
pub fn ThemeSwitcher(#[props(default = false)] align_start: bool) -> Element {
    let theme = use_theme();
    let mut open = use_signal(|| false);
    let current = theme.current();
    let current_name = current.display_name();

    let menu_class = if align_start {
        "theme-menu align-start"
    } else {
        "theme-menu"
    };

    rsx! {
        div { class: "theme-switcher",
            button {
                class: "theme-switcher-button",
                onclick: move |_| open.toggle(),
                span { class: "theme-switcher-icon", "◐" }
                "{current_name}"
                span { class: "theme-switcher-caret", "▾" }
            }

            if open() {
                div { class: "{menu_class}",
                    for id in ThemeId::all().iter().copied() {
                        {
                            let config = id.config();
                            let item_class = if id == current {
                                "theme-menu-item active"
                            } else {
                                "theme-menu-item"
                            };
                            let theme = theme.clone();
                            rsx! {
                                button {
                                    key: "{id}",
                                    class: "{item_class}",
                                    onclick: move |_| {
                                        theme.set_theme(id);
                                        open.set(false);
                                    },
                                    span { class: "theme-menu-name", "{config.name}" }
                                    span { class: "theme-menu-description", "{config.description}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
