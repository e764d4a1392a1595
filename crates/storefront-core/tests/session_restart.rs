//! Restart tests for storefront-core
//!
//! These tests open a session on a file store, mutate it, drop it, and
//! open a fresh session on the same directory to check what survives.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use storefront_core::{
    FileStore, KeyValueStore, Session, StorefrontConfig, StorefrontConfigBuilder, ThemeId,
    WatchDocument, normalize_product,
};
use tempfile::TempDir;

// ============================================================================
// Helpers
// ============================================================================

fn config(dir: &TempDir) -> StorefrontConfig {
    StorefrontConfigBuilder::new().data_dir(dir.path()).build()
}

fn open(dir: &TempDir) -> (Session, Arc<WatchDocument>) {
    let document = Arc::new(WatchDocument::new());
    let session = Session::open_persistent(config(dir), document.clone())
        .expect("Failed to open session");
    (session, document)
}

async fn wait_for_commit() {
    tokio::time::sleep(Duration::from_millis(150)).await;
}

// ============================================================================
// Theme
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_theme_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let (session, _doc) = open(&dir);
        assert_eq!(session.theme().current(), ThemeId::Theme1);
        session.theme().set_theme(ThemeId::Theme2);
        wait_for_commit().await;
        assert_eq!(session.theme().current(), ThemeId::Theme2);
    }

    let (session, doc) = open(&dir);
    assert_eq!(session.theme().current(), ThemeId::Theme2);
    assert!(!session.theme().is_transitioning());
    assert_eq!(doc.markers().theme_attribute.as_deref(), Some("theme2"));
}

#[tokio::test(start_paused = true)]
async fn test_uncommitted_theme_is_not_persisted() {
    let dir = TempDir::new().unwrap();

    {
        let (session, _doc) = open(&dir);
        session.theme().set_theme(ThemeId::Theme3);
        // session ends inside the delay window
    }
    wait_for_commit().await;

    let (session, _doc) = open(&dir);
    assert_eq!(session.theme().current(), ThemeId::Theme1);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_persisted_theme_falls_back() {
    let dir = TempDir::new().unwrap();
    FileStore::open(dir.path())
        .unwrap()
        .set("app-theme", "theme7")
        .unwrap();

    let (session, doc) = open(&dir);
    assert_eq!(session.theme().current(), ThemeId::Theme1);
    assert_eq!(doc.markers().theme_attribute, None);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_cart_survives_restart() {
    let dir = TempDir::new().unwrap();
    let phone = normalize_product(&json!({
        "id": 1,
        "title": "Phone",
        "price": 10.0,
        "thumbnail": "phone.jpg",
        "rating": 4.2,
        "stock": 5
    }))
    .unwrap();
    let case = normalize_product(&json!({ "id": 2, "title": "Case", "price": 2.5 })).unwrap();

    {
        let (session, _doc) = open(&dir);
        let cart = session.cart();
        cart.add_item(phone.clone(), NonZeroU32::new(2).unwrap());
        cart.add_item(case.clone(), NonZeroU32::MIN);
        cart.set_quantity(2, 3);
        assert_eq!(cart.count(), 5);
    }

    let (session, _doc) = open(&dir);
    let cart = session.cart();
    let entries = cart.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].product, phone);
    assert_eq!(entries[1].quantity.get(), 3);
    assert_eq!(cart.count(), 5);
    assert!((cart.total_price() - 27.5).abs() < f64::EPSILON);

    cart.clear();
    drop(session);

    let (session, _doc) = open(&dir);
    assert!(session.cart().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_cart_starts_empty() {
    let dir = TempDir::new().unwrap();
    FileStore::open(dir.path())
        .unwrap()
        .set("cart", "{not json")
        .unwrap();

    let (session, _doc) = open(&dir);
    assert!(session.cart().is_empty());
    assert_eq!(session.cart().total_price(), 0.0);
}
