//! Root app component: opens the session and provides shared state.

use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use storefront_core::{CatalogClient, HttpSource, Session, WatchDocument};

use crate::cart::CartProvider;
use crate::pages::{About, CartPage, Contact, Home, NotFound};
use crate::state::{AppServices, NavContext, Route};
use crate::theme::{ThemeProvider, ThemedRoot, use_document_provider};
use crate::{LaunchOptions, launch_options};

use super::Layout;

/// Everything the storefront needs once it has started.
#[derive(Clone)]
pub struct Startup {
    session: Rc<Session>,
    services: AppServices,
}

/// Equality is by pointer identity.
impl PartialEq for Startup {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
    }
}

fn start(options: &LaunchOptions, document: Arc<WatchDocument>) -> Result<Startup, String> {
    let config = options.config.clone();

    let session = if options.in_memory {
        Session::open_in_memory(config.clone(), document)
    } else {
        Session::open_persistent(config.clone(), document)
    }
    .map_err(|e| e.to_string())?;

    if let Some(theme) = options.initial_theme {
        session.theme().set_theme(theme);
    }

    let source = HttpSource::new().map_err(|e| e.to_string())?;

    Ok(Startup {
        session: Rc::new(session),
        services: AppServices {
            config,
            catalog: Arc::new(CatalogClient::new(Arc::new(source))),
        },
    })
}

/// Root application component.
#[component]
pub fn App() -> Element {
    let options = use_hook(launch_options);
    let document = use_hook(|| Arc::new(WatchDocument::new()));
    use_document_provider(&document);

    use_context_provider(|| {
        let path = options.start_path.as_deref().unwrap_or("/");
        NavContext {
            route: Signal::new(Route::from_path(path)),
        }
    });

    let startup = use_hook(|| {
        start(&options, document.clone()).inspect_err(|e| {
            tracing::error!(error = %e, "Storefront failed to start");
        })
    });

    // Stop theme timers when the window closes
    let session = startup.as_ref().ok().map(|s| s.session.clone());
    use_drop(move || {
        if let Some(session) = &session {
            session.theme().shutdown();
        }
    });

    rsx! {
        ThemedRoot {
            match startup {
                Ok(startup) => rsx! {
                    Storefront { startup }
                },
                Err(message) => rsx! {
                    div { class: "startup-error",
                        h1 { "Storefront failed to start" }
                        p { "{message}" }
                    }
                },
            }
        }
    }
}

/// Providers plus the themed layout around the current page.
#[component]
fn Storefront(startup: Startup) -> Element {
    use_context_provider(|| startup.services.clone());

    rsx! {
        ThemeProvider { controller: startup.session.theme().clone(),
            CartProvider { controller: startup.session.cart().clone(),
                Layout {
                    CurrentPage {}
                }
            }
        }
    }
}

#[component]
fn CurrentPage() -> Element {
    let nav = use_context::<NavContext>();

    match nav.current() {
        Route::Home => rsx! { Home {} },
        Route::About => rsx! { About {} },
        Route::Contact => rsx! { Contact {} },
        Route::Cart => rsx! { CartPage {} },
        Route::NotFound(path) => rsx! { NotFound { path } },
    }
}
