//! Staleness-gated resource cache.
//!
//! A [`ResourceCache`] wraps one remote fetch operation and answers "fetch now
//! or serve what I have?" from the time since the last successful fetch:
//!
//! - a request is served from memory when the entry is fresh (younger than the
//!   TTL), non-empty, and not forced
//! - otherwise the fetcher runs; success replaces the items and stamps the
//!   time, failure records a normalized message and keeps the old items
//! - concurrent requests with equal params share one in-flight fetch
//!
//! Fetch failures never escape [`ResourceCache::request`]; they are recorded
//! on the entry for the UI to show next to the last-known items.

pub mod busy;
pub mod clock;
pub mod entry;

pub use busy::{Busy, BusyGuard};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{reduce, CacheEntry, CacheEvent, Resource};

use crate::error::{ActionError, SdkError};

use futures_util::future::{BoxFuture, FutureExt, Shared, WeakShared};
use parking_lot::{Mutex, RwLock};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Remote fetch for one resource collection.
///
/// Implemented for any `Fn(P) -> impl Future<Output = Result<Vec<T>, SdkError>>`.
pub trait Fetch<T, P>: Send + Sync + 'static {
    fn fetch(&self, params: P) -> BoxFuture<'static, Result<Vec<T>, SdkError>>;
}

impl<T, P, F, Fut> Fetch<T, P> for F
where
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, SdkError>> + Send + 'static,
{
    fn fetch(&self, params: P) -> BoxFuture<'static, Result<Vec<T>, SdkError>> {
        Box::pin(self(params))
    }
}

/// Options for [`ResourceCache::request`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions<P> {
    /// Fetch even if the cached items are still fresh.
    pub force: bool,
    /// Resource-specific filter parameters passed to the fetcher.
    pub params: P,
}

impl<P> RequestOptions<P> {
    pub fn new(params: P) -> Self {
        Self {
            force: false,
            params,
        }
    }

    pub fn forced(params: P) -> Self {
        Self {
            force: true,
            params,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// What a request did. Callers are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Served from memory; no fetch issued.
    Cached,
    /// A fetch succeeded and its items are now held.
    Fetched,
    /// A fetch succeeded but a newer fetch had already been applied.
    Superseded,
    /// The fetch failed; the error is recorded on the entry.
    Failed,
}

type SharedFetch = Shared<BoxFuture<'static, Refresh>>;

struct InFlight<P> {
    seq: u64,
    params: P,
    fetch: WeakShared<BoxFuture<'static, Refresh>>,
}

struct Inner<T: Resource, P> {
    name: &'static str,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    fetcher: Arc<dyn Fetch<T, P>>,
    entry: RwLock<CacheEntry<T>>,
    in_flight: Mutex<Option<InFlight<P>>>,
}

/// Staleness-gated cache for one resource type.
///
/// Cloning is cheap and yields a handle to the same entry.
pub struct ResourceCache<T: Resource, P> {
    inner: Arc<Inner<T, P>>,
}

impl<T: Resource, P> Clone for ResourceCache<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, P> ResourceCache<T, P>
where
    T: Resource,
    P: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(name: &'static str, ttl: Duration, fetcher: impl Fetch<T, P>) -> Self {
        Self::with_clock(name, ttl, fetcher, Arc::new(SystemClock))
    }

    pub fn with_clock(
        name: &'static str,
        ttl: Duration,
        fetcher: impl Fetch<T, P>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                ttl,
                clock,
                fetcher: Arc::new(fetcher),
                entry: RwLock::new(CacheEntry::new()),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Fetch unless the held items are fresh, non-empty, and `force` is unset.
    pub async fn request(&self, options: RequestOptions<P>) -> Refresh {
        let RequestOptions { force, params } = options;

        if !force && self.is_valid() && !self.is_empty() {
            tracing::debug!(cache = self.inner.name, "Cache valid, skipping fetch");
            return Refresh::Cached;
        }

        self.join_or_start(params).await
    }

    /// Join the in-flight fetch for `params`, or start a new one.
    fn join_or_start(&self, params: P) -> SharedFetch {
        let mut slot = self.inner.in_flight.lock();

        if let Some(in_flight) = slot.as_ref() {
            if in_flight.params == params {
                if let Some(shared) = in_flight.fetch.upgrade() {
                    tracing::debug!(
                        cache = self.inner.name,
                        seq = in_flight.seq,
                        "Joining in-flight fetch"
                    );
                    return shared;
                }
            }
        }

        let guard = LoadingGuard::start(self.inner.clone());
        let seq = guard.seq;
        let fetch = self.inner.fetcher.fetch(params.clone());
        let inner = self.inner.clone();

        let shared = async move {
            let result = fetch.await;
            let refresh = inner.complete(seq, result);
            inner.clear_in_flight(seq);
            drop(guard);
            refresh
        }
        .boxed()
        .shared();

        if let Some(weak) = shared.downgrade() {
            *slot = Some(InFlight {
                seq,
                params,
                fetch: weak,
            });
        }

        shared
    }

    /// Read a single record alongside the list.
    ///
    /// `loading` is held and the error cleared for the duration, as for a
    /// fetch; the items are left alone. Failures are recorded and yield `None`.
    pub async fn lookup<R, Fut>(&self, read: Fut) -> Option<R>
    where
        Fut: Future<Output = Result<R, SdkError>>,
    {
        let _guard = LoadingGuard::lookup(self.inner.clone());
        match read.await {
            Ok(value) => Some(value),
            Err(err) => {
                let message = err.display_message();
                tracing::warn!(cache = self.inner.name, error = %message, "Lookup failed");
                self.record_error(message);
                None
            }
        }
    }

    /// Run a mutating action against the backend.
    ///
    /// On success, `apply` may turn the result into a local update of the
    /// items. On failure the normalized message is recorded and returned.
    pub async fn mutate<R, Fut, F>(&self, action: Fut, apply: F) -> Result<R, ActionError>
    where
        Fut: Future<Output = Result<R, SdkError>>,
        F: FnOnce(&R) -> Option<CacheEvent<T>>,
    {
        match action.await {
            Ok(value) => {
                if let Some(event) = apply(&value) {
                    self.inner.entry.write().apply(event);
                }
                Ok(value)
            }
            Err(err) => {
                let err = ActionError::from(err);
                tracing::warn!(cache = self.inner.name, error = %err.message, "Action failed");
                self.record_error(err.message.clone());
                Err(err)
            }
        }
    }
}

impl<T: Resource, P> ResourceCache<T, P> {
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// True if a fetch succeeded less than one TTL ago.
    pub fn is_valid(&self) -> bool {
        let last = self.inner.entry.read().last_fetched_at();
        match last {
            Some(at) => self.inner.clock.now().saturating_duration_since(at) < self.inner.ttl,
            None => false,
        }
    }

    /// Forget freshness so the next request fetches. Items stay visible.
    pub fn invalidate(&self) {
        self.inner.entry.write().apply(CacheEvent::Invalidated);
    }

    /// Record an error message without touching the items.
    pub fn record_error(&self, message: String) {
        self.inner
            .entry
            .write()
            .apply(CacheEvent::ErrorRecorded(message));
    }

    pub fn items(&self) -> Vec<T> {
        self.inner.entry.read().items().to_vec()
    }

    pub fn snapshot(&self) -> CacheEntry<T> {
        self.inner.entry.read().clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.entry.read().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.entry.read().error().map(str::to_string)
    }

    pub fn last_fetched_at(&self) -> Option<Instant> {
        self.inner.entry.read().last_fetched_at()
    }

    pub fn len(&self) -> usize {
        self.inner.entry.read().items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entry.read().is_empty()
    }

    /// Items matching `pred`, in order. Empty when nothing is held.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .entry
            .read()
            .items()
            .iter()
            .filter(|item| pred(item))
            .cloned()
            .collect()
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.inner
            .entry
            .read()
            .items()
            .iter()
            .find(|item| pred(item))
            .cloned()
    }
}

impl<T: Resource, P> Inner<T, P> {
    fn complete(&self, seq: u64, result: Result<Vec<T>, SdkError>) -> Refresh {
        let mut entry = self.entry.write();
        match result {
            Ok(items) => {
                let count = items.len();
                entry.apply(CacheEvent::Succeeded {
                    seq,
                    items,
                    at: self.clock.now(),
                });
                if entry.applied_seq() == seq {
                    tracing::debug!(cache = self.name, seq, count, "Fetched, cache updated");
                    Refresh::Fetched
                } else {
                    tracing::debug!(cache = self.name, seq, "Discarding superseded response");
                    Refresh::Superseded
                }
            }
            Err(err) => {
                let message = err.display_message();
                tracing::warn!(cache = self.name, seq, error = %message, "Fetch failed");
                entry.apply(CacheEvent::Failed { seq, message });
                Refresh::Failed
            }
        }
    }

    fn clear_in_flight(&self, seq: u64) {
        let mut slot = self.in_flight.lock();
        if slot.as_ref().is_some_and(|in_flight| in_flight.seq == seq) {
            *slot = None;
        }
    }
}

/// Marks a fetch as started on creation and finished on drop, so `loading`
/// is cleared on success, failure, and cancellation alike.
struct LoadingGuard<T: Resource, P> {
    inner: Arc<Inner<T, P>>,
    seq: u64,
}

impl<T: Resource, P> LoadingGuard<T, P> {
    fn start(inner: Arc<Inner<T, P>>) -> Self {
        let seq = {
            let mut entry = inner.entry.write();
            entry.apply(CacheEvent::Started);
            entry.issued_seq()
        };
        Self { inner, seq }
    }

    fn lookup(inner: Arc<Inner<T, P>>) -> Self {
        let seq = {
            let mut entry = inner.entry.write();
            entry.apply(CacheEvent::LookupStarted);
            entry.issued_seq()
        };
        Self { inner, seq }
    }
}

impl<T: Resource, P> Drop for LoadingGuard<T, P> {
    fn drop(&mut self) {
        self.inner.entry.write().apply(CacheEvent::Finished);
    }
}
