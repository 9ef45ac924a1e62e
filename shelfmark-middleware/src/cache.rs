//! Time-bounded result cache with an LRU capacity bound.

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use lru::LruCache;
use tokio::time::Instant;

/// Build a cache key: `"<source name>:<identifier>"`.
#[must_use]
pub fn generate_key(source_name: &str, identifier: &str) -> String {
    format!("{source_name}:{identifier}")
}

// Expiry used when `now + ttl` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Key-value store where every entry expires a fixed time after insertion.
///
/// Expiry is lazy: an expired entry is dropped on the next `get` for its key. When more than
/// `capacity` live keys are stored the least recently used one is evicted.
pub struct ResultCache<V> {
    inner: Mutex<LruCache<String, Entry<V>>>,
    default_ttl: Duration,
}

impl<V: Clone> ResultCache<V> {
    /// Create a cache. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize, default_ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(cap)),
            default_ttl,
        }
    }

    /// Lifetime applied when `set` is called without one.
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// The stored value, if present and unexpired.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = guard.get(key)
            && Instant::now() < entry.expires_at
        {
            return Some(entry.value.clone());
        }
        guard.pop(key);
        None
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// A lifetime too long to represent is capped at roughly a century.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let now = Instant::now();
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.put(key.into(), Entry { value, expires_at });
    }

    /// Drop the entry for `key`. Returns true if one was stored.
    pub fn remove(&self, key: &str) -> bool {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.pop(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of stored entries, including expired ones not yet collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> std::fmt::Debug for ResultCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
