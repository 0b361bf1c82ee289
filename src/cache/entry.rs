//! Cache entry state and its reducer.
//!
//! Every change to a [`CacheEntry`] goes through [`reduce`], one
//! [`CacheEvent`] at a time, so each transition can be tested on its own.

use std::fmt;
use std::time::Instant;

/// A server-side record with a server-assigned identity.
pub trait Resource: Clone + Send + Sync + 'static {
    type Id: PartialEq + Clone + fmt::Debug + Send + Sync;

    fn id(&self) -> Self::Id;
}

/// Snapshot of one cached resource collection.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    items: Vec<T>,
    last_fetched_at: Option<Instant>,
    loading: bool,
    error: Option<String>,
    /// Fetches started but not yet finished.
    pending: u32,
    /// Sequence number handed to the most recently started fetch.
    issued_seq: u64,
    /// Sequence number of the fetch whose items are currently held.
    applied_seq: u64,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            last_fetched_at: None,
            loading: false,
            error: None,
            pending: 0,
            issued_seq: 0,
            applied_seq: 0,
        }
    }
}

impl<T> CacheEntry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn last_fetched_at(&self) -> Option<Instant> {
        self.last_fetched_at
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn issued_seq(&self) -> u64 {
        self.issued_seq
    }

    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Resource> CacheEntry<T> {
    /// Apply one event in place.
    pub fn apply(&mut self, event: CacheEvent<T>) {
        let entry = std::mem::take(self);
        *self = reduce(entry, event);
    }
}

/// A single state transition.
#[derive(Debug, Clone)]
pub enum CacheEvent<T: Resource> {
    /// A fetch was initiated. Allocates the next sequence number.
    Started,
    /// A single-record read alongside the list began. Holds `loading` like a
    /// fetch but takes no sequence number, since it never replaces items.
    LookupStarted,
    /// Fetch `seq` resolved with `items` at `at`.
    Succeeded { seq: u64, items: Vec<T>, at: Instant },
    /// Fetch `seq` failed with a normalized message.
    Failed { seq: u64, message: String },
    /// A fetch resolved (either way). Always the last event of a fetch.
    Finished,
    /// Forget freshness; items are kept.
    Invalidated,
    /// A mutating action failed; record its message.
    ErrorRecorded(String),
    /// A mutating action returned this record: replace by id, or append.
    Upserted(T),
    /// A mutating action returned this record: replace by id if held.
    Replaced(T),
    /// A mutating action deleted the record with this id.
    Removed(T::Id),
}

/// Pure transition: old entry + event → new entry.
pub fn reduce<T: Resource>(mut entry: CacheEntry<T>, event: CacheEvent<T>) -> CacheEntry<T> {
    match event {
        CacheEvent::Started => {
            entry.pending += 1;
            entry.issued_seq += 1;
            entry.loading = true;
            entry.error = None;
        }
        CacheEvent::LookupStarted => {
            entry.pending += 1;
            entry.loading = true;
            entry.error = None;
        }
        CacheEvent::Succeeded { seq, items, at } => {
            // An older response never overwrites a newer one.
            if seq >= entry.applied_seq {
                entry.items = items;
                entry.last_fetched_at = Some(at);
                entry.applied_seq = seq;
                entry.error = None;
            }
        }
        CacheEvent::Failed { seq, message } => {
            if seq >= entry.applied_seq {
                entry.error = Some(message);
            }
        }
        CacheEvent::Finished => {
            entry.pending = entry.pending.saturating_sub(1);
            entry.loading = entry.pending > 0;
        }
        CacheEvent::Invalidated => {
            entry.last_fetched_at = None;
        }
        CacheEvent::ErrorRecorded(message) => {
            entry.error = Some(message);
        }
        CacheEvent::Upserted(item) => {
            let id = item.id();
            match entry.items.iter_mut().find(|existing| existing.id() == id) {
                Some(existing) => *existing = item,
                None => entry.items.push(item),
            }
        }
        CacheEvent::Replaced(item) => {
            let id = item.id();
            if let Some(existing) = entry.items.iter_mut().find(|existing| existing.id() == id) {
                *existing = item;
            }
        }
        CacheEvent::Removed(id) => {
            entry.items.retain(|existing| existing.id() != id);
        }
    }
    entry
}
