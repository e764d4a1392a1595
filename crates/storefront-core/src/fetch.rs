//! Remote reads with a tri-state result.
//!
//! A read is keyed by its URL. Changing the key or detaching starts a new
//! generation; results that come back for an older generation are dropped,
//! so the newest key always wins regardless of completion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::SessionError;

/// Default timeout for one outbound read.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Errors that can occur during a remote read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The response body could not be understood
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Result of a keyed read.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// In flight
    Pending,
    Ready(T),
    /// Human-readable failure message
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => FetchState::Ready(data),
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Pending => FetchState::Pending,
            FetchState::Ready(data) => FetchState::Ready(f(data)),
            FetchState::Failed(message) => FetchState::Failed(message),
        }
    }
}

/// Identifies one read issued through a [`RequestGuard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    pub key: String,
}

/// Generation counter enforcing last-key-wins.
///
/// Cloning shares the counter, so a clone moved into a task still sees
/// newer requests.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    generation: Arc<AtomicU64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new read for `key`; every earlier ticket becomes stale.
    pub fn begin(&self, key: impl Into<String>) -> RequestTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        RequestTicket {
            generation,
            key: key.into(),
        }
    }

    /// Whether `ticket` is still the newest read.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.generation
    }

    /// Make every outstanding ticket stale (consumer detached).
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

/// Source of JSON documents.
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// Perform one read of `url`.
    ///
    /// # Errors
    ///
    /// Network failures, non-success statuses and unparsable bodies.
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// [`JsonSource`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonSource for HttpSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl<S: JsonSource + ?Sized> JsonSource for Arc<S> {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        (**self).get_json(url).await
    }
}

/// Something a [`FetchSlot`] can load by key.
#[async_trait]
pub trait Loader: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    async fn load(&self, key: &str) -> Result<Self::Output, FetchError>;
}

struct SlotState {
    key: Option<String>,
    task: Option<JoinHandle<()>>,
}

struct SlotInner<L: Loader> {
    loader: Arc<L>,
    tx: watch::Sender<FetchState<L::Output>>,
    guard: RequestGuard,
    state: Mutex<SlotState>,
    runtime: Handle,
}

/// One consumer's keyed read.
///
/// Starts out [`FetchState::Pending`]. Each new key aborts the in-flight
/// read and issues exactly one new one.
pub struct FetchSlot<L: Loader> {
    inner: Arc<SlotInner<L>>,
}

impl<L: Loader> FetchSlot<L> {
    /// Must be called inside a tokio runtime.
    pub fn new(loader: Arc<L>) -> Result<Self, SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let (tx, _rx) = watch::channel(FetchState::Pending);
        Ok(Self {
            inner: Arc::new(SlotInner {
                loader,
                tx,
                guard: RequestGuard::new(),
                state: Mutex::new(SlotState {
                    key: None,
                    task: None,
                }),
                runtime,
            }),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<L::Output>> {
        self.inner.tx.subscribe()
    }

    /// Key of the newest read, if any.
    pub fn key(&self) -> Option<String> {
        self.inner.state.lock().key.clone()
    }

    /// Observe `key`. Re-observing the current key does nothing.
    pub fn request(&self, key: impl Into<String>) {
        let key = key.into();
        if self.inner.state.lock().key.as_deref() == Some(key.as_str()) {
            return;
        }
        self.start(key);
    }

    /// Issue a fresh read for the current key (user-initiated retry).
    pub fn reload(&self) {
        let Some(key) = self.key() else {
            return;
        };
        self.start(key);
    }

    /// Detach: drop the in-flight read and ignore its result.
    pub fn close(&self) {
        let mut state = self.inner.state.lock();
        self.inner.guard.invalidate();
        if let Some(task) = state.task.take() {
            task.abort();
        }
        state.key = None;
    }

    fn start(&self, key: String) {
        let mut state = self.inner.state.lock();
        if let Some(task) = state.task.take() {
            task.abort();
        }

        let ticket = self.inner.guard.begin(key.clone());
        self.inner.tx.send_replace(FetchState::Pending);
        debug!(key = %key, "Fetch started");

        let weak: Weak<SlotInner<L>> = Arc::downgrade(&self.inner);
        let loader = Arc::clone(&self.inner.loader);
        state.task = Some(self.inner.runtime.spawn(async move {
            let result = loader.load(&ticket.key).await;
            if let Some(inner) = weak.upgrade() {
                inner.commit(&ticket, result);
            }
        }));
        state.key = Some(key);
    }
}

impl<L: Loader> SlotInner<L> {
    fn commit(&self, ticket: &RequestTicket, result: Result<L::Output, FetchError>) {
        // held so a concurrent `start` cannot interleave check and send
        let _state = self.state.lock();
        if !self.guard.is_current(ticket) {
            debug!(key = %ticket.key, "Discarding stale fetch result");
            return;
        }
        if let Err(e) = &result {
            warn!(key = %ticket.key, error = %e, "Fetch failed");
        }
        self.tx.send_replace(FetchState::from_result(result));
    }
}

impl<L: Loader> Drop for FetchSlot<L> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Loader whose reads complete only when the test releases them.
    #[derive(Default)]
    struct GatedLoader {
        gates: Mutex<HashMap<String, oneshot::Receiver<Result<String, FetchError>>>>,
        calls: AtomicU64,
    }

    impl GatedLoader {
        fn gate(&self, key: &str) -> oneshot::Sender<Result<String, FetchError>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().insert(key.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl Loader for GatedLoader {
        type Output = String;

        async fn load(&self, key: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rx = self.gates.lock().remove(key);
            match rx {
                Some(rx) => rx.await.unwrap_or_else(|_| Err(FetchError::Network("dropped".into()))),
                None => Err(FetchError::Network(format!("no gate for {key}"))),
            }
        }
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_state_accessors() {
        let pending: FetchState<u32> = FetchState::Pending;
        assert!(pending.loading());
        assert!(pending.data().is_none() && pending.error().is_none());

        let ready = FetchState::from_result(Ok(3));
        assert_eq!(ready.data(), Some(&3));
        assert!(!ready.loading());

        let failed: FetchState<u32> = FetchState::from_result(Err(FetchError::Status(404)));
        assert_eq!(failed.error(), Some("HTTP error! status: 404"));
        assert!(!failed.loading());
    }

    #[test]
    fn test_guard_last_ticket_wins() {
        let guard = RequestGuard::new();
        let a = guard.begin("a");
        let b = guard.begin("b");
        assert!(!guard.is_current(&a));
        assert!(guard.is_current(&b));
        guard.invalidate();
        assert!(!guard.is_current(&b));
    }

    /// Same client settings as `HttpSource::new`, without proxies from the env.
    fn local_source() -> HttpSource {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .unwrap();
        HttpSource { client }
    }

    /// Answer one HTTP request on a local port with `status` and `body`.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/products")
    }

    #[tokio::test]
    async fn test_http_source_reads_json() {
        let url = serve_once("200 OK", r#"{"products":[{"id":1}]}"#).await;
        let value = local_source().get_json(&url).await.unwrap();
        assert_eq!(value["products"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_http_source_reports_status() {
        let url = serve_once("404 Not Found", r#"{"message":"nope"}"#).await;
        let err = local_source().get_json(&url).await.unwrap_err();
        assert_eq!(err, FetchError::Status(404));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[tokio::test]
    async fn test_http_source_rejects_non_json_body() {
        let url = serve_once("200 OK", "<html>maintenance</html>").await;
        let err = local_source().get_json(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_http_source_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = local_source()
            .get_json(&format!("http://{addr}/products"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_success_and_failure() {
        let loader = Arc::new(GatedLoader::default());
        let slot = FetchSlot::new(loader.clone()).unwrap();
        let mut rx = slot.subscribe();

        let gate = loader.gate("a");
        slot.request("a");
        assert!(rx.borrow_and_update().loading());

        gate.send(Ok("payload".to_string())).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().data().map(String::as_str), Some("payload"));

        let gate = loader.gate("b");
        slot.request("b");
        gate.send(Err(FetchError::Status(500))).unwrap();
        rx.wait_for(|s| !s.loading()).await.unwrap();
        assert_eq!(rx.borrow().error(), Some("HTTP error! status: 500"));
    }

    #[tokio::test]
    async fn test_stale_result_never_commits() {
        let loader = Arc::new(GatedLoader::default());
        let slot = FetchSlot::new(loader.clone()).unwrap();
        let mut rx = slot.subscribe();

        let gate_a = loader.gate("a");
        let gate_b = loader.gate("b");
        slot.request("a");
        settle().await;
        slot.request("b");

        // A resolves late, after B became active
        let _ = gate_a.send(Ok("from a".to_string()));
        settle().await;
        assert!(rx.borrow().loading());

        gate_b.send(Ok("from b".to_string())).unwrap();
        rx.wait_for(|s| !s.loading()).await.unwrap();
        assert_eq!(rx.borrow().data().map(String::as_str), Some("from b"));
    }

    #[tokio::test]
    async fn test_same_key_issues_one_read() {
        let loader = Arc::new(GatedLoader::default());
        let slot = FetchSlot::new(loader.clone()).unwrap();

        let gate = loader.gate("a");
        slot.request("a");
        slot.request("a");
        settle().await;
        gate.send(Ok("x".to_string())).unwrap();
        settle().await;
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);

        let _gate = loader.gate("a");
        slot.reload();
        settle().await;
        assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_close_discards_in_flight_result() {
        let loader = Arc::new(GatedLoader::default());
        let slot = FetchSlot::new(loader.clone()).unwrap();
        let rx = slot.subscribe();

        let gate = loader.gate("a");
        slot.request("a");
        settle().await;
        slot.close();

        let _ = gate.send(Ok("late".to_string()));
        settle().await;
        assert!(rx.borrow().loading());
        assert_eq!(slot.key(), None);
    }
}
