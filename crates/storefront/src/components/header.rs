//! Fixed header with navigation, cart badge and theme switcher.

use dioxus::prelude::*;

use crate::state::{NavContext, Route};
use crate::theme::ThemeSwitcher;

use super::CartPanel;

#[component]
pub fn Header() -> Element {
    let nav = use_context::<NavContext>();
    let current = nav.current();

    rsx! {
        header { class: "header",
            div { class: "header-inner",
                button {
                    class: "brand",
                    onclick: move |_| nav.navigate(Route::Home),
                    div { class: "brand-mark", "◐" }
                    div { class: "brand-title", "Multi-Theme Switcher" }
                }

                nav { class: "header-nav",
                    for route in Route::NAV {
                        {
                            let link_class = if route == current {
                                "nav-link active"
                            } else {
                                "nav-link"
                            };
                            let label = route.label().to_string();
                            let key = route.path().to_string();
                            let target = route.clone();
                            rsx! {
                                button {
                                    key: "{key}",
                                    class: "{link_class}",
                                    onclick: move |_| nav.navigate(target.clone()),
                                    "{label}"
                                }
                            }
                        }
                    }
                }

                div { class: "header-actions",
                    CartPanel {}
                    ThemeSwitcher {}
                }
            }
        }
    }
}
