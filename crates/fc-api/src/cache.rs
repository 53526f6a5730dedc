use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Default count of responses kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Raw response bodies keyed by url.
///
/// Holds at most `capacity` entries and evicts the least recently used one when full. A capacity
/// of zero disables caching.
#[derive(Debug)]
pub struct ByteCache {
    /// `None` when caching is disabled.
    inner: Option<Mutex<LruCache<String, Vec<u8>>>>,
}

impl ByteCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|x| Mutex::new(LruCache::new(x))),
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<String, Vec<u8>>>> {
        // Poisoning is ignored, the lru never stays half updated.
        self.inner
            .as_ref()
            .map(|x| x.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.lock()?.get(key).cloned()?;
        trace!("cache hit on {key}");
        Some(value)
    }

    pub fn insert(&self, key: impl Into<String>, value: Vec<u8>) {
        let key = key.into();
        if let Some(mut inner) = self.lock() {
            match inner.push(key.clone(), value) {
                Some((oldest, _)) if oldest != key => trace!("cache evicts {oldest}"),
                _ => {}
            }
        }
    }

    pub fn clear(&self) {
        if let Some(mut inner) = self.lock() {
            inner.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|x| x.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().map(|x| x.cap().get()).unwrap_or_default()
    }
}

impl Default for ByteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
