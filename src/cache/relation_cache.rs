use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::graph::ExtendedRelationInfo;

type CacheKey = (String, usize);

/// Thread-safe LRU cache of extended relation results
///
/// Keyed by root entity name and hop bound. Schema introspection asks for
/// the same roots over and over; entries are shared as `Arc`s so a hit never
/// copies the descriptor list.
pub struct RelationCache {
    cache: Mutex<LruCache<CacheKey, Arc<Vec<ExtendedRelationInfo>>>>,
}

impl RelationCache {
    /// Create a new relation cache with the specified capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of results to cache (0 is treated as 1)
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: Mutex::new(LruCache::new(cap)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, Arc<Vec<ExtendedRelationInfo>>>> {
        // Entries are immutable once inserted, so a poisoned lock is still consistent
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get cached relations for `entity` at `max_depth`
    pub fn get(&self, entity: &str, max_depth: usize) -> Option<Arc<Vec<ExtendedRelationInfo>>> {
        self.lock().get(&(entity.to_string(), max_depth)).cloned()
    }

    /// Store relations for `entity` at `max_depth`
    pub fn put(&self, entity: String, max_depth: usize, relations: Arc<Vec<ExtendedRelationInfo>>) {
        self.lock().put((entity, max_depth), relations);
    }

    /// Get the current number of cached entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        self.lock().clear();
    }
}
