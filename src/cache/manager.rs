//! In-memory session cache
//!
//! Provides a `SessionCache` that maps keys to immutable values for the
//! lifetime of the process, recording when each entry was stored.

use chrono::{DateTime, Utc};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

/// Wrapper struct for a stored value
#[derive(Debug)]
struct CacheEntry<V> {
    /// The cached data
    data: V,
    /// When the data was cached
    cached_at: DateTime<Utc>,
}

/// Result of reading from the cache
#[derive(Debug, Clone)]
pub struct CachedData<V> {
    /// The cached data
    pub data: V,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
}

/// Process-wide cache shared between the UI loop and fetch tasks
///
/// Cloning the cache hands out another handle to the same entries. Entries
/// are never evicted or expired; they disappear only with the process.
pub struct SessionCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
}

impl<K, V> Clone for SessionCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for SessionCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<K, V> fmt::Debug for SessionCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCache")
            .field("len", &self.len())
            .finish()
    }
}

impl<K, V> SessionCache<K, V> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> SessionCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Stores `data` under `key`, replacing any previous value
    pub fn write(&self, key: K, data: V) {
        let entry = CacheEntry {
            data,
            cached_at: Utc::now(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }

    /// Reads a copy of the value stored under `key`
    ///
    /// # Returns
    /// * `Some(CachedData<V>)` if the entry exists
    /// * `None` otherwise
    pub fn read<Q>(&self, key: &Q) -> Option<CachedData<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        entries.get(key).map(|entry| CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
        })
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}
