// SPDX-License-Identifier: MPL-2.0
//! Process-wide decoded frame cache.
//!
//! One [`ImageCache`] is created by the application and handed to every viewer,
//! so mounting the same product twice never refetches its frames. Handles are
//! cheap clones over shared state.
//!
//! # Design
//!
//! - **URI-keyed**: entries record either the decoded frame or the load error
//! - **Unbounded by default**: entries are never evicted unless a capacity is
//!   configured, in which case the least recently used entry goes first
//! - **In-flight tracking**: a pending load is shared between every caller
//!   that asks for the same URI while it is outstanding
//! - **Never cleared by viewers**: unmounting a viewer leaves entries intact

use super::image::FrameImage;
use crate::error::{Error, Result};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Outcome of loading one URI.
#[derive(Debug, Clone)]
pub enum CacheStatus {
    Loaded(FrameImage),
    Failed(Error),
}

impl CacheStatus {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, CacheStatus::Loaded(_))
    }
}

impl From<&Result<FrameImage>> for CacheStatus {
    fn from(result: &Result<FrameImage>) -> Self {
        match result {
            Ok(image) => CacheStatus::Loaded(image.clone()),
            Err(err) => CacheStatus::Failed(err.clone()),
        }
    }
}

/// A cache lookup result.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub uri: String,
    pub status: CacheStatus,
}

impl CacheEntry {
    /// Returns the decoded frame if the load succeeded.
    #[must_use]
    pub fn image(&self) -> Option<&FrameImage> {
        match &self.status {
            CacheStatus::Loaded(image) => Some(image),
            CacheStatus::Failed(_) => None,
        }
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries currently held.
    pub entries: usize,

    /// Entries holding a decoded frame.
    pub loaded: usize,

    /// Entries holding a load error.
    pub failed: usize,

    /// Lookups that found an entry.
    pub hits: u64,

    /// Lookups that found nothing.
    pub misses: u64,

    /// Entries dropped to respect the capacity.
    pub evictions: u64,
}

/// A pending load that several callers can await.
pub type SharedLoad = Shared<BoxFuture<'static, Result<FrameImage>>>;

struct Inner {
    entries: LruCache<String, CacheStatus>,
    in_flight: HashMap<String, SharedLoad>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Inner {
    fn store(&mut self, uri: &str, status: CacheStatus) {
        if let Some((evicted, _)) = self.entries.push(uri.to_string(), status) {
            if evicted != uri {
                self.evictions += 1;
                tracing::debug!(uri = %evicted, "evicted frame from image cache");
            }
        }
    }

    fn stats(&self) -> CacheStats {
        let loaded = self.entries.iter().filter(|(_, s)| s.is_loaded()).count();
        CacheStats {
            entries: self.entries.len(),
            loaded,
            failed: self.entries.len() - loaded,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

/// Shared URI → decoded frame map.
#[derive(Clone)]
pub struct ImageCache {
    inner: Arc<Mutex<Inner>>,
    capacity: Option<NonZeroUsize>,
}

impl ImageCache {
    /// Creates a cache that never evicts.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_capacity(None)
    }

    /// Creates a cache holding at most `capacity` entries (LRU eviction).
    #[must_use]
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self::with_capacity(Some(capacity))
    }

    /// Creates a bounded cache when `capacity` is set, unbounded otherwise.
    #[must_use]
    pub fn with_capacity(capacity: Option<NonZeroUsize>) -> Self {
        let entries = match capacity {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries,
                in_flight: HashMap::new(),
                hits: 0,
                misses: 0,
                evictions: 0,
            })),
            capacity,
        }
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up a URI, refreshing its LRU position.
    pub fn get(&self, uri: &str) -> Option<CacheEntry> {
        let mut inner = self.lock();
        match inner.entries.get(uri).cloned() {
            Some(status) => {
                inner.hits += 1;
                Some(CacheEntry {
                    uri: uri.to_string(),
                    status,
                })
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Returns the decoded frame for `uri` if it loaded successfully.
    pub fn loaded(&self, uri: &str) -> Option<FrameImage> {
        self.get(uri).and_then(|entry| entry.image().cloned())
    }

    /// Checks for a successful entry without touching LRU order or stats.
    #[must_use]
    pub fn contains_loaded(&self, uri: &str) -> bool {
        self.lock()
            .entries
            .peek(uri)
            .is_some_and(CacheStatus::is_loaded)
    }

    /// Stores the outcome for `uri`, replacing any previous entry.
    pub fn put(&self, uri: &str, status: CacheStatus) {
        self.lock().store(uri, status);
    }

    /// Returns the pending load for `uri`, starting one with `start` if none
    /// is outstanding. `start` runs at most once per concurrent burst, and not
    /// at all if a load finished since the caller last looked.
    pub fn join_or_start<F>(&self, uri: &str, start: F) -> SharedLoad
    where
        F: FnOnce() -> BoxFuture<'static, Result<FrameImage>>,
    {
        let mut inner = self.lock();
        if let Some(CacheStatus::Loaded(image)) = inner.entries.peek(uri) {
            return futures_util::future::ready(Ok(image.clone()))
                .boxed()
                .shared();
        }
        if let Some(pending) = inner.in_flight.get(uri) {
            tracing::debug!(uri, "joining in-flight frame load");
            return pending.clone();
        }
        let pending = start().shared();
        inner.in_flight.insert(uri.to_string(), pending.clone());
        pending
    }

    /// Records a finished load and forgets its in-flight handle.
    pub fn complete(&self, uri: &str, result: &Result<FrameImage>) {
        let status = CacheStatus::from(result);
        // One guard, so a concurrent load sees either the pending handle or
        // the stored outcome.
        let mut inner = self.lock();
        inner.in_flight.remove(uri);
        inner.store(uri, status);
    }

    /// Number of loads currently outstanding.
    #[must_use]
    pub fn in_flight_len(&self) -> usize {
        self.lock().in_flight.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    #[must_use]
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Drops every settled entry. Outstanding loads are left running.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCache")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .field("in_flight", &self.in_flight_len())
            .finish()
    }
}
