//! Disk cache with TTL-based freshness.
//!
//! Entries are plain files under a root directory; freshness is judged by
//! file modification time. A stale entry is deleted on read and reported as
//! a miss, so the next fetch replaces it wholesale. There is no background
//! sweeper and no size-based eviction: expiry is entirely lazy.

use crate::cache::types::CacheError;
use std::fs;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Persistent byte-blob cache keyed by relative path.
///
/// Concurrent fetches for the same key are not de-duplicated: two requests
/// racing on a miss will both hit the network and the last write wins.
/// That wastes bandwidth but never corrupts the entry, since `put` replaces
/// the whole file.
pub struct DiskCache {
    root: PathBuf,
    ttl: Duration,
}

impl DiskCache {
    /// Create a disk cache rooted at `root`, creating the directory if
    /// needed. Entries older than `ttl` are treated as absent.
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, ttl })
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the cached bytes for `key` if present and fresh.
    ///
    /// A stale entry is deleted before reporting the miss, so expired data
    /// never lingers on disk past its first post-expiry read.
    pub fn get(&self, key: &Path) -> Option<Vec<u8>> {
        let path = match self.resolve(key) {
            Ok(path) => path,
            Err(_) => return None,
        };

        let metadata = fs::metadata(&path).ok()?;
        let age = metadata.modified().ok()?.elapsed().unwrap_or_default();
        if age > self.ttl {
            debug!(key = %key.display(), age_secs = age.as_secs(), "evicting stale cache entry");
            if let Err(e) = fs::remove_file(&path) {
                warn!(key = %key.display(), error = %e, "failed to remove stale cache entry");
            }
            return None;
        }

        fs::read(&path).ok()
    }

    /// Store `bytes` under `key`, creating parent directories as needed.
    pub fn put(&self, key: &Path, bytes: &[u8]) -> Result<(), CacheError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        Ok(())
    }

    /// Whether a fresh entry exists for `key`.
    pub fn contains(&self, key: &Path) -> bool {
        self.get(key).is_some()
    }

    /// Return the cached value for `key`, or fetch, store and return it.
    ///
    /// A fresh hit never invokes `fetch`. On a miss the fetched bytes are
    /// written back before returning; a failed cache write is logged and
    /// otherwise ignored, since the fetched value is still correct.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: &Path, fetch: F) -> Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, E>>,
    {
        if let Some(bytes) = self.get(key) {
            debug!(key = %key.display(), "disk cache hit");
            return Ok(bytes);
        }

        let bytes = fetch().await?;
        if let Err(e) = self.put(key, &bytes) {
            warn!(key = %key.display(), error = %e, "failed to persist cache entry");
        }
        Ok(bytes)
    }

    /// Resolve a relative key against the cache root, rejecting keys that
    /// would escape it.
    fn resolve(&self, key: &Path) -> Result<PathBuf, CacheError> {
        let ok = !key.as_os_str().is_empty()
            && key
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !ok {
            return Err(CacheError::InvalidKey(key.display().to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_cache(ttl: Duration) -> (DiskCache, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::new(temp_dir.path(), ttl).unwrap();
        (cache, temp_dir)
    }

    #[test]
    fn test_disk_cache_put_and_get() {
        let (cache, _temp) = create_temp_cache(Duration::from_secs(60));
        let key = Path::new("clouds/8/75/96.png");
        let data = vec![1, 2, 3, 4, 5];

        cache.put(key, &data).unwrap();
        assert_eq!(cache.get(key), Some(data));
    }

    #[test]
    fn test_disk_cache_miss() {
        let (cache, _temp) = create_temp_cache(Duration::from_secs(60));
        assert_eq!(cache.get(Path::new("clouds/8/75/96.png")), None);
    }

    #[test]
    fn test_disk_cache_creates_parent_directories() {
        let (cache, temp) = create_temp_cache(Duration::from_secs(60));
        let key = Path::new("hybrid/16/19295/24640.jpg");

        cache.put(key, &[7, 7, 7]).unwrap();
        assert!(temp.path().join("hybrid/16/19295").is_dir());
    }

    #[test]
    fn test_disk_cache_expired_entry_deleted_on_read() {
        let (cache, temp) = create_temp_cache(Duration::from_millis(20));
        let key = Path::new("clouds/8/75/96.png");

        cache.put(key, &[1, 2, 3]).unwrap();
        std::thread::sleep(Duration::from_millis(50));

        assert_eq!(cache.get(key), None);
        assert!(
            !temp.path().join(key).exists(),
            "stale entry should be removed from disk"
        );
    }

    #[test]
    fn test_disk_cache_fresh_entry_survives_read() {
        let (cache, temp) = create_temp_cache(Duration::from_secs(3600));
        let key = Path::new("clouds/8/75/96.png");

        cache.put(key, &[1, 2, 3]).unwrap();
        assert_eq!(cache.get(key), Some(vec![1, 2, 3]));
        assert!(temp.path().join(key).exists());
    }

    #[test]
    fn test_disk_cache_replace_existing() {
        let (cache, _temp) = create_temp_cache(Duration::from_secs(60));
        let key = Path::new("clouds/8/75/96.png");

        cache.put(key, &[1, 2, 3]).unwrap();
        cache.put(key, &[9, 9]).unwrap();
        assert_eq!(cache.get(key), Some(vec![9, 9]));
    }

    #[test]
    fn test_disk_cache_persistence_across_instances() {
        let temp = TempDir::new().unwrap();
        {
            let cache = DiskCache::new(temp.path(), Duration::from_secs(3600)).unwrap();
            cache.put(Path::new("a/b.bin"), &[1, 2, 3]).unwrap();
        }
        {
            let cache = DiskCache::new(temp.path(), Duration::from_secs(3600)).unwrap();
            assert_eq!(cache.get(Path::new("a/b.bin")), Some(vec![1, 2, 3]));
        }
    }

    #[test]
    fn test_disk_cache_rejects_escaping_key() {
        let (cache, _temp) = create_temp_cache(Duration::from_secs(60));
        assert!(cache.put(Path::new("../escape.bin"), &[1]).is_err());
        assert_eq!(cache.get(Path::new("../escape.bin")), None);
    }

    #[tokio::test]
    async fn test_get_or_fetch_hit_skips_fetch() {
        let (cache, _temp) = create_temp_cache(Duration::from_secs(60));
        let key = Path::new("clouds/8/75/96.png");
        cache.put(key, &[1, 2, 3]).unwrap();

        let result: Result<Vec<u8>, CacheError> = cache
            .get_or_fetch(key, || async { panic!("fetch must not run on a hit") })
            .await;
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_or_fetch_miss_fetches_and_stores() {
        let (cache, _temp) = create_temp_cache(Duration::from_secs(60));
        let key = Path::new("clouds/8/75/96.png");

        let result: Result<Vec<u8>, CacheError> =
            cache.get_or_fetch(key, || async { Ok(vec![4, 5, 6]) }).await;
        assert_eq!(result.unwrap(), vec![4, 5, 6]);
        assert_eq!(cache.get(key), Some(vec![4, 5, 6]));
    }

    #[tokio::test]
    async fn test_get_or_fetch_propagates_fetch_error() {
        let (cache, _temp) = create_temp_cache(Duration::from_secs(60));
        let key = Path::new("clouds/8/75/96.png");

        let result: Result<Vec<u8>, String> = cache
            .get_or_fetch(key, || async { Err("boom".to_string()) })
            .await;
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(cache.get(key), None, "failed fetches are not cached");
    }
}
