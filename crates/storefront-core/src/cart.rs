//! Shopping cart state controller.
//!
//! The cart is an ordered list of entries with at most one entry per
//! product id. It is restored once when the controller opens and written
//! through to the store after every mutation.

use std::num::NonZeroU32;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::product::{Product, validate};
use crate::store::KeyValueStore;

/// A product and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartEntry {
    pub fn new(product: Product, quantity: NonZeroU32) -> Self {
        Self { product, quantity }
    }

    /// `price * quantity`
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity.get())
    }
}

/// Derived aggregates over a set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartSummary {
    /// Sum of quantities
    pub count: u64,
    /// Sum of `price * quantity`, unrounded
    pub total: f64,
}

impl CartSummary {
    pub fn of(entries: &[CartEntry]) -> Self {
        entries.iter().fold(Self::default(), |acc, entry| Self {
            count: acc.count + u64::from(entry.quantity.get()),
            total: acc.total + entry.subtotal(),
        })
    }
}

/// Read the persisted cart. Absent or malformed values yield an empty cart.
///
/// Entries whose product breaks a range invariant are dropped. Duplicate ids
/// in the stored list are merged into the first occurrence.
pub fn restore_cart(store: &dyn KeyValueStore, key: &str) -> Vec<CartEntry> {
    let Some(raw) = store.get(key) else {
        debug!(key, "No persisted cart");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<CartEntry>>(&raw) {
        Ok(stored) => {
            let mut entries: Vec<CartEntry> = Vec::with_capacity(stored.len());
            for CartEntry { product, quantity } in stored {
                let id = product.id;
                let product = match validate(product) {
                    Ok(product) => product,
                    Err(e) => {
                        warn!(key, id, error = %e, "Dropping invalid persisted cart entry");
                        continue;
                    }
                };
                match entries.iter_mut().find(|e| e.product.id == id) {
                    Some(existing) => {
                        existing.quantity = existing.quantity.saturating_add(quantity.get());
                    }
                    None => entries.push(CartEntry::new(product, quantity)),
                }
            }
            entries
        }
        Err(e) => {
            warn!(key, error = %e, "Persisted cart is malformed, starting empty");
            Vec::new()
        }
    }
}

struct Inner {
    tx: watch::Sender<Arc<Vec<CartEntry>>>,
    store: Arc<dyn KeyValueStore>,
    key: String,
    /// Serializes mutations so each one persists the list it published
    write: Mutex<()>,
}

/// Handle to the cart of one session. Cloning is cheap.
#[derive(Clone)]
pub struct CartController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for CartController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartController")
            .field("entries", &self.inner.tx.borrow().len())
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CartController {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl CartController {
    /// Restore the persisted cart and start a controller.
    pub fn open(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = restore_cart(store.as_ref(), &key);
        info!(entries = entries.len(), "Cart restored");

        let (tx, _rx) = watch::channel(Arc::new(entries));
        Self {
            inner: Arc::new(Inner {
                tx,
                store,
                key,
                write: Mutex::new(()),
            }),
        }
    }

    /// Current entries, in insertion order.
    pub fn entries(&self) -> Arc<Vec<CartEntry>> {
        Arc::clone(&self.inner.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<CartEntry>>> {
        self.inner.tx.subscribe()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.entries())
    }

    /// Sum of quantities; 0 when empty.
    pub fn count(&self) -> u64 {
        self.summary().count
    }

    /// Sum of `price * quantity`; 0 when empty.
    pub fn total_price(&self) -> f64 {
        self.summary().total
    }

    pub fn is_empty(&self) -> bool {
        self.inner.tx.borrow().is_empty()
    }

    /// Add `quantity` of `product`, merging into an existing entry.
    pub fn add_item(&self, product: Product, quantity: NonZeroU32) {
        let id = product.id;
        self.mutate("add", |entries| {
            match entries.iter_mut().find(|e| e.product.id == id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(quantity.get());
                    existing.product = product;
                }
                None => entries.push(CartEntry::new(product, quantity)),
            }
            true
        });
    }

    /// Set the quantity of an entry. Zero removes it; unknown ids are ignored.
    pub fn set_quantity(&self, product_id: u64, quantity: u32) {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            self.remove_item(product_id);
            return;
        };

        self.mutate("set_quantity", |entries| {
            match entries.iter_mut().find(|e| e.product.id == product_id) {
                Some(entry) if entry.quantity != quantity => {
                    entry.quantity = quantity;
                    true
                }
                _ => false,
            }
        });
    }

    /// Remove the entry for `product_id`, if any.
    pub fn remove_item(&self, product_id: u64) {
        self.mutate("remove", |entries| {
            let before = entries.len();
            entries.retain(|e| e.product.id != product_id);
            entries.len() != before
        });
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.mutate("clear", |entries| {
            entries.clear();
            true
        });
    }

    /// Apply `f` to a copy of the entries; if it reports a change, persist
    /// and publish the copy as the new state.
    fn mutate(&self, op: &'static str, f: impl FnOnce(&mut Vec<CartEntry>) -> bool) {
        let _guard = self.inner.write.lock();

        let mut entries = Vec::clone(&self.inner.tx.borrow());
        if !f(&mut entries) {
            return;
        }

        self.persist(&entries);
        debug!(op, entries = entries.len(), "Cart updated");
        self.inner.tx.send_replace(Arc::new(entries));
    }

    fn persist(&self, entries: &[CartEntry]) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.inner.store.set(&self.inner.key, &json) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
