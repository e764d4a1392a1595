//! Theme state controller.
//!
//! Owns the active [`ThemeId`] and drives the two-phase transition between
//! themes: a request publishes [`ThemePhase::Pending`], and after a short
//! delay a cancellable timer task commits the new theme. Every commit is
//! written through to the store and mirrored onto the document markers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::document::DocumentHook;
use crate::error::SessionError;
use crate::store::KeyValueStore;
use crate::theme::ThemeId;

/// Default delay between a theme request and its commit.
pub const DEFAULT_THEME_DELAY: Duration = Duration::from_millis(100);

/// Default lifetime of the document transition marker after a commit.
pub const DEFAULT_TRANSITION_MARKER: Duration = Duration::from_millis(600);

/// Where the controller is in a theme change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePhase {
    /// No change in flight
    #[default]
    Idle,
    /// A change to the given theme has been requested but not committed
    Pending(ThemeId),
}

/// Observable theme state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeSnapshot {
    /// Committed theme; always a registry entry
    pub active: ThemeId,
    pub phase: ThemePhase,
}

impl ThemeSnapshot {
    /// True only between a request and its commit.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, ThemePhase::Pending(_))
    }
}

/// The two independent timing windows of a theme change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Request to commit
    pub delay: Duration,
    /// How long the document transition marker stays on after a commit
    pub marker: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            delay: DEFAULT_THEME_DELAY,
            marker: DEFAULT_TRANSITION_MARKER,
        }
    }
}

/// Read the persisted theme, falling back to the default for absent or
/// unrecognized values.
pub fn restore_theme(store: &dyn KeyValueStore, key: &str) -> ThemeId {
    let Some(raw) = store.get(key) else {
        debug!(key, "No persisted theme, using default");
        return ThemeId::default();
    };

    match ThemeId::parse(raw.trim()) {
        Some(theme) => theme,
        None => {
            warn!(key, value = %raw, "Persisted theme is not recognized, using default");
            ThemeId::default()
        }
    }
}

/// A scheduled timer plus the generation it was scheduled for.
struct Scheduled {
    generation: u64,
    task: JoinHandle<()>,
}

struct Inner {
    tx: watch::Sender<ThemeSnapshot>,
    store: Arc<dyn KeyValueStore>,
    document: Arc<dyn DocumentHook>,
    key: String,
    timings: TransitionTimings,
    runtime: Handle,
    pending: Mutex<Option<Scheduled>>,
    marker: Mutex<Option<JoinHandle<()>>>,
    generation: Mutex<u64>,
    closed: AtomicBool,
}

/// Handle to the theme state of one session.
///
/// Cloning is cheap; all clones share the same state. The only way to get
/// one is [`ThemeController::open`], so holding a controller proves the
/// state has been initialized.
#[derive(Clone)]
pub struct ThemeController {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("snapshot", &self.snapshot())
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ThemeController {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ThemeController {
    /// Restore the persisted theme and start a controller.
    ///
    /// Must be called inside a tokio runtime; the transition timers are
    /// spawned onto it.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        document: Arc<dyn DocumentHook>,
        key: impl Into<String>,
        timings: TransitionTimings,
    ) -> Result<Self, SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let key = key.into();
        let active = restore_theme(store.as_ref(), &key);

        document.set_theme_attribute(active.document_attribute());
        info!(theme = %active, "Theme restored");

        let (tx, _rx) = watch::channel(ThemeSnapshot {
            active,
            phase: ThemePhase::Idle,
        });

        Ok(Self {
            inner: Arc::new(Inner {
                tx,
                store,
                document,
                key,
                timings,
                runtime,
                pending: Mutex::new(None),
                marker: Mutex::new(None),
                generation: Mutex::new(0),
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// The committed theme.
    pub fn current(&self) -> ThemeId {
        self.inner.tx.borrow().active
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        *self.inner.tx.borrow()
    }

    pub fn is_transitioning(&self) -> bool {
        self.snapshot().is_transitioning()
    }

    /// Subscribe to every phase boundary: the pending state on request and
    /// the committed state after the delay.
    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Request a theme change. Never blocks.
    ///
    /// Requesting the committed theme is a no-op, except that it cancels a
    /// transition that is still pending. A new request replaces any pending
    /// one.
    pub fn set_theme(&self, target: ThemeId) {
        if self.inner.closed.load(Ordering::Acquire) {
            warn!(theme = %target, "Theme change requested after shutdown, ignoring");
            return;
        }

        let mut pending = self.inner.pending.lock();
        let snapshot = self.snapshot();

        if target == snapshot.active {
            if let Some(scheduled) = pending.take() {
                scheduled.task.abort();
                self.inner.publish(snapshot.active, ThemePhase::Idle);
                debug!(theme = %target, "Pending theme change cancelled");
            }
            return;
        }

        if snapshot.phase == ThemePhase::Pending(target) {
            return;
        }

        if let Some(scheduled) = pending.take() {
            scheduled.task.abort();
        }

        let generation = self.inner.next_generation();
        self.inner.publish(snapshot.active, ThemePhase::Pending(target));
        debug!(from = %snapshot.active, to = %target, "Theme change pending");

        let weak = Arc::downgrade(&self.inner);
        let delay = self.inner.timings.delay;
        let task = self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.commit(generation, target);
            }
        });

        *pending = Some(Scheduled { generation, task });
    }

    /// Cancel outstanding timers and refuse further changes.
    ///
    /// Called when the owning session ends so that no timer mutates state
    /// after teardown.
    pub fn shutdown(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(scheduled) = self.inner.pending.lock().take() {
            scheduled.task.abort();
            self.inner.publish(self.current(), ThemePhase::Idle);
        }
        self.inner.cancel_timers();
        debug!("Theme controller shut down");
    }
}

impl Inner {
    fn next_generation(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        *generation
    }

    fn publish(&self, active: ThemeId, phase: ThemePhase) {
        self.tx.send_replace(ThemeSnapshot { active, phase });
    }

    fn commit(self: &Arc<Self>, generation: u64, target: ThemeId) {
        {
            let mut pending = self.pending.lock();
            // superseded or cancelled after the timer fired
            if pending.as_ref().map(|s| s.generation) != Some(generation) {
                return;
            }
            pending.take();

            if self.closed.load(Ordering::Acquire) {
                return;
            }

            if let Err(e) = self.store.set(&self.key, target.as_str()) {
                warn!(theme = %target, error = %e, "Failed to persist theme");
            }
            self.publish(target, ThemePhase::Idle);
        }

        info!(theme = %target, "Theme committed");
        self.document.set_theme_attribute(target.document_attribute());
        self.raise_marker();
    }

    fn raise_marker(self: &Arc<Self>) {
        let mut marker = self.marker.lock();
        if let Some(task) = marker.take() {
            task.abort();
        }

        self.document.set_transition_marker(true);

        let weak: Weak<Inner> = Arc::downgrade(self);
        let duration = self.timings.marker;
        *marker = Some(self.runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = weak.upgrade()
                && !inner.closed.load(Ordering::Acquire)
            {
                inner.document.set_transition_marker(false);
            }
        }));
    }

    fn cancel_timers(&self) {
        if let Some(scheduled) = self.pending.lock().take() {
            scheduled.task.abort();
        }
        if let Some(task) = self.marker.lock().take() {
            task.abort();
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::WatchDocument;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use std::sync::atomic::AtomicUsize;

    const KEY: &str = "app-theme";

    /// Counts writes so tests can assert that no-ops do not touch the store.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: AtomicUsize,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    fn open(store: Arc<dyn KeyValueStore>) -> (ThemeController, Arc<WatchDocument>) {
        let document = Arc::new(WatchDocument::new());
        let controller =
            ThemeController::open(store, document.clone(), KEY, TransitionTimings::default())
                .unwrap();
        (controller, document)
    }

    async fn wait_past_window() {
        tokio::time::sleep(DEFAULT_THEME_DELAY + Duration::from_millis(50)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_theme_commits_every_theme() {
        let (controller, _doc) = open(Arc::new(MemoryStore::new()));

        for theme in [ThemeId::Theme2, ThemeId::Theme3, ThemeId::Theme1] {
            controller.set_theme(theme);
            assert!(controller.is_transitioning());
            assert_ne!(controller.current(), theme);

            wait_past_window().await;
            assert_eq!(controller.current(), theme);
            assert!(!controller.is_transitioning());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_observers_see_pending_then_commit() {
        let (controller, _doc) = open(Arc::new(MemoryStore::new()));
        let mut rx = controller.subscribe();

        controller.set_theme(ThemeId::Theme3);

        rx.changed().await.unwrap();
        let pending = *rx.borrow_and_update();
        assert_eq!(pending.active, ThemeId::Theme1);
        assert_eq!(pending.phase, ThemePhase::Pending(ThemeId::Theme3));

        rx.changed().await.unwrap();
        let committed = *rx.borrow_and_update();
        assert_eq!(committed.active, ThemeId::Theme3);
        assert_eq!(committed.phase, ThemePhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_setting_current_theme_is_noop() {
        let store = Arc::new(CountingStore::default());
        let (controller, _doc) = open(store.clone());
        let mut rx = controller.subscribe();

        controller.set_theme(ThemeId::Theme1);
        assert!(!controller.is_transitioning());
        assert!(!rx.has_changed().unwrap());

        wait_past_window().await;
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_persists_and_marks_document() {
        let store = Arc::new(MemoryStore::new());
        let (controller, doc) = open(store.clone());
        assert_eq!(doc.markers().theme_attribute, None);

        controller.set_theme(ThemeId::Theme2);
        wait_past_window().await;

        assert_eq!(store.get(KEY).as_deref(), Some("theme2"));
        let markers = doc.markers();
        assert_eq!(markers.theme_attribute.as_deref(), Some("theme2"));
        assert!(markers.transitioning);

        tokio::time::sleep(DEFAULT_TRANSITION_MARKER).await;
        assert!(!doc.markers().transitioning);

        controller.set_theme(ThemeId::Theme1);
        wait_past_window().await;
        assert_eq!(doc.markers().theme_attribute, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restore_from_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_values([(KEY, "theme3")]));
        let (controller, doc) = open(store);
        assert_eq!(controller.current(), ThemeId::Theme3);
        assert_eq!(doc.markers().theme_attribute.as_deref(), Some("theme3"));

        // only the plain identifier is accepted, not a JSON string
        for bad in ["theme9", "", "\"theme2\"", "{\"id\":\"theme2\"}"] {
            let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_values([(KEY, bad)]));
            let (controller, _doc) = open(store);
            assert_eq!(controller.current(), ThemeId::Theme1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_request_supersedes_pending() {
        let (controller, _doc) = open(Arc::new(MemoryStore::new()));

        controller.set_theme(ThemeId::Theme2);
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.set_theme(ThemeId::Theme3);
        assert_eq!(controller.snapshot().phase, ThemePhase::Pending(ThemeId::Theme3));

        wait_past_window().await;
        assert_eq!(controller.current(), ThemeId::Theme3);
        assert!(!controller.is_transitioning());
    }

    #[tokio::test(start_paused = true)]
    async fn test_requesting_active_theme_cancels_pending() {
        let store = Arc::new(CountingStore::default());
        let (controller, _doc) = open(store.clone());

        controller.set_theme(ThemeId::Theme2);
        controller.set_theme(ThemeId::Theme1);
        assert!(!controller.is_transitioning());

        wait_past_window().await;
        assert_eq!(controller.current(), ThemeId::Theme1);
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_commit() {
        let store = Arc::new(CountingStore::default());
        let (controller, _doc) = open(store.clone());

        controller.set_theme(ThemeId::Theme2);
        let mut rx = controller.subscribe();
        controller.shutdown();
        assert!(!controller.is_transitioning());
        assert_eq!(rx.borrow_and_update().phase, ThemePhase::Idle);

        wait_past_window().await;
        assert_eq!(controller.current(), ThemeId::Theme1);
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);

        controller.set_theme(ThemeId::Theme3);
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn test_open_outside_runtime_fails() {
        let result = ThemeController::open(
            Arc::new(MemoryStore::new()),
            Arc::new(WatchDocument::new()),
            KEY,
            TransitionTimings::default(),
        );
        assert!(matches!(result, Err(SessionError::NoRuntime)));
    }
}
