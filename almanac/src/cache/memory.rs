//! Bounded in-memory cache with per-entry TTL.
//!
//! One generic implementation backs every in-memory expiring map in the
//! crate: geocoding results, current-conditions readings, pollution
//! readings and forecasts all get the same semantics instead of each client
//! growing its own ad hoc variant.
//!
//! Expiry is lazy: an expired entry is removed when a read encounters it,
//! there is no background sweeper. When the capacity bound is reached the
//! oldest insertion is evicted to make room.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted: Instant,
}

/// Bounded TTL map.
///
/// Like the disk tier, this makes no single-flight guarantee: two callers
/// racing through [`ExpiringCache::get_or_fetch`] on the same missing key
/// will both invoke their fetch, and the last insert wins.
pub struct ExpiringCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
    capacity: usize,
    ttl: Duration,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries, each valid for
    /// `ttl` after insertion.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Get the value for `key` if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.inserted.elapsed() <= self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert `value` under `key`, overwriting any previous entry.
    ///
    /// At capacity, expired entries are dropped first; if the map is still
    /// full the oldest insertion is evicted.
    pub fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.inserted.elapsed() <= ttl);

            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.inserted)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            Entry {
                value,
                inserted: Instant::now(),
            },
        );
    }

    /// Number of entries currently stored, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached value for `key`, or fetch, store and return it.
    ///
    /// The lock is never held across the fetch, so concurrent callers may
    /// duplicate the work; the entry itself is replaced atomically.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache: ExpiringCache<&str, u32> = ExpiringCache::new(10, Duration::from_secs(60));
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));
    }

    #[test]
    fn test_miss() {
        let cache: ExpiringCache<&str, u32> = ExpiringCache::new(10, Duration::from_secs(60));
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let cache: ExpiringCache<&str, u32> = ExpiringCache::new(10, Duration::from_secs(60));
        cache.insert("a", 1);
        cache.insert("a", 2);
        assert_eq!(cache.get(&"a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_treated_as_absent_and_removed() {
        let cache: ExpiringCache<&str, u32> = ExpiringCache::new(10, Duration::from_millis(20));
        cache.insert("a", 1);
        std::thread::sleep(Duration::from_millis(50));

        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 0, "lazy expiry removes the entry on read");
    }

    #[test]
    fn test_capacity_evicts_oldest_insertion() {
        let cache: ExpiringCache<u32, u32> = ExpiringCache::new(3, Duration::from_secs(60));
        for i in 0..3 {
            cache.insert(i, i);
            std::thread::sleep(Duration::from_millis(5));
        }

        cache.insert(99, 99);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&0), None, "oldest insertion evicted");
        assert_eq!(cache.get(&2), Some(2));
        assert_eq!(cache.get(&99), Some(99));
    }

    #[test]
    fn test_capacity_prefers_dropping_expired_entries() {
        let cache: ExpiringCache<u32, u32> = ExpiringCache::new(2, Duration::from_millis(20));
        cache.insert(1, 1);
        cache.insert(2, 2);
        std::thread::sleep(Duration::from_millis(50));

        cache.insert(3, 3);
        assert_eq!(cache.get(&3), Some(3));
        assert_eq!(cache.len(), 1, "expired entries swept before eviction");
    }

    #[tokio::test]
    async fn test_get_or_fetch_hit_skips_fetch() {
        let cache: ExpiringCache<&str, u32> = ExpiringCache::new(10, Duration::from_secs(60));
        cache.insert("a", 1);

        let result: Result<u32, ()> = cache
            .get_or_fetch("a", || async { panic!("fetch must not run on a hit") })
            .await;
        assert_eq!(result, Ok(1));
    }

    #[tokio::test]
    async fn test_get_or_fetch_miss_fetches_and_stores() {
        let cache: ExpiringCache<&str, u32> = ExpiringCache::new(10, Duration::from_secs(60));

        let result: Result<u32, ()> = cache.get_or_fetch("a", || async { Ok(7) }).await;
        assert_eq!(result, Ok(7));
        assert_eq!(cache.get(&"a"), Some(7));
    }

    #[tokio::test]
    async fn test_get_or_fetch_error_not_cached() {
        let cache: ExpiringCache<&str, u32> = ExpiringCache::new(10, Duration::from_secs(60));

        let result: Result<u32, &str> = cache.get_or_fetch("a", || async { Err("boom") }).await;
        assert_eq!(result, Err("boom"));
        assert_eq!(cache.get(&"a"), None);
    }
}
