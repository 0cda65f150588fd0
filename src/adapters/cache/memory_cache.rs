use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::{error, warn};

use crate::ports::cache::ListingCache;

const FALLBACK_CAPACITY: usize = 100;

struct Entry {
    payload: String,
    deadline: Instant,
}

impl Entry {
    fn fresh(&self) -> bool {
        Instant::now() <= self.deadline
    }
}

/// In-process LRU for serialized listing details. Expiry is checked lazily
/// on read; stale entries are dropped the first time they are seen.
pub struct MemoryCache {
    entries: RwLock<LruCache<String, Entry>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or_else(|| {
            warn!("cache capacity 0 is unusable, using {FALLBACK_CAPACITY}");
            NonZeroUsize::new(FALLBACK_CAPACITY).unwrap()
        });
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }
}

impl ListingCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        // get() bumps recency and expiry may evict, so this takes the write
        // lock even on the read path.
        let Ok(mut entries) = self.entries.write() else {
            error!(key, "cache lock poisoned, treating as miss");
            return None;
        };
        match entries.get(key) {
            Some(entry) if entry.fresh() => Some(entry.payload.clone()),
            Some(_) => {
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) {
        let Ok(mut entries) = self.entries.write() else {
            error!(key, "cache lock poisoned, dropping write");
            return;
        };
        entries.put(
            key.to_string(),
            Entry {
                payload: value.to_string(),
                deadline: Instant::now() + ttl,
            },
        );
    }

    fn invalidate(&self, key: &str) {
        let Ok(mut entries) = self.entries.write() else {
            error!(key, "cache lock poisoned, dropping invalidation");
            return;
        };
        entries.pop(key);
    }
}
