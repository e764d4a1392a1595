//! Keyed remote reads as Dioxus hooks.

use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use storefront_core::{CatalogClient, FetchSlot, FetchState, HttpSource, Loader};
use tracing::error;

use crate::state::AppServices;

/// A component's view of one [`FetchSlot`].
pub struct ApiResource<L: Loader> {
    state: Signal<FetchState<L::Output>>,
    slot: Option<Rc<FetchSlot<L>>>,
}

impl<L: Loader> Clone for ApiResource<L> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            slot: self.slot.clone(),
        }
    }
}

impl<L: Loader> ApiResource<L>
where
    L::Output: Clone,
{
    /// Current state; subscribes the calling component to changes.
    pub fn state(&self) -> FetchState<L::Output> {
        self.state.read().clone()
    }

    /// Read the current key again.
    pub fn reload(&self) {
        if let Some(slot) = &self.slot {
            slot.reload();
        }
    }
}

/// Load `key` through `loader`, re-reading whenever `key` changes.
///
/// Results for a key that is no longer current are dropped, and the read
/// in flight is abandoned when the component unmounts.
pub fn use_api<L>(loader: impl FnOnce() -> Arc<L>, key: Memo<String>) -> ApiResource<L>
where
    L: Loader,
    L::Output: Clone,
{
    let resource = use_hook(|| match FetchSlot::new(loader()) {
        Ok(slot) => {
            let mut rx = slot.subscribe();
            let mut state = Signal::new(rx.borrow_and_update().clone());

            spawn(async move {
                while rx.changed().await.is_ok() {
                    let next = rx.borrow_and_update().clone();
                    state.set(next);
                }
            });

            ApiResource {
                state,
                slot: Some(Rc::new(slot)),
            }
        }
        Err(e) => {
            error!(error = %e, "Cannot start fetch");
            ApiResource {
                state: Signal::new(FetchState::Failed(e.to_string())),
                slot: None,
            }
        }
    });

    let requester = resource.clone();
    use_effect(move || {
        let key = key.read().clone();
        if let Some(slot) = &requester.slot {
            slot.request(key);
        }
    });

    resource
}

/// The configured product listing, normalized.
pub fn use_products() -> ApiResource<CatalogClient<HttpSource>> {
    let services = use_context::<AppServices>();
    let url = services.config.catalog_url.clone();
    let key = use_memo(move || url.clone());
    use_api(move || services.catalog, key)
}
