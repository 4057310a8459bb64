//! Base-map tile client.
//!
//! Fetches satellite-hybrid and hillshade tiles from the map tile API.
//! Base imagery rarely changes, so tiles persist in a 7-day disk cache.
//!
//! # URL patterns
//!
//! - Satellite: `https://api.maptiler.com/maps/hybrid/256/{z}/{x}/{y}.jpg?key={token}`
//! - Hillshade: `https://api.maptiler.com/tiles/hillshades/{z}/{x}/{y}.png?key={token}`

use crate::cache::{tile_path, CacheError, DiskCache};
use crate::coord::TileCoord;
use crate::http::AsyncHttpClient;
use crate::imagery::ImageryError;
use std::path::Path;
use std::time::Duration;

const BASEMAP_HOST: &str = "https://api.maptiler.com";

/// Base imagery stays fresh for a week.
const BASEMAP_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Client for satellite and hillshade base tiles.
pub struct BasemapClient<C> {
    http: C,
    token: String,
    cache: DiskCache,
}

impl<C: AsyncHttpClient> BasemapClient<C> {
    /// Create a client caching under `cache_root`.
    pub fn new(
        http: C,
        token: impl Into<String>,
        cache_root: &Path,
    ) -> Result<Self, CacheError> {
        Ok(Self {
            http,
            token: token.into(),
            cache: DiskCache::new(cache_root.join("maptiler"), BASEMAP_TTL)?,
        })
    }

    /// One 256×256 satellite-hybrid tile (JPEG bytes).
    pub async fn satellite_tile(&self, tile: TileCoord) -> Result<Vec<u8>, ImageryError> {
        let url = format!(
            "{}/maps/hybrid/256/{}/{}/{}.jpg?key={}",
            BASEMAP_HOST, tile.zoom, tile.x, tile.y, self.token
        );
        let key = tile_path("hybrid", &tile, "jpg");
        self.cache
            .get_or_fetch(&key, || async { Ok(self.http.get(&url).await?) })
            .await
    }

    /// One 256×256 hillshade tile (PNG bytes).
    pub async fn hillshade_tile(&self, tile: TileCoord) -> Result<Vec<u8>, ImageryError> {
        let url = format!(
            "{}/tiles/hillshades/{}/{}/{}.png?key={}",
            BASEMAP_HOST, tile.zoom, tile.x, tile.y, self.token
        );
        let key = tile_path("hillshades", &tile, "png");
        self.cache
            .get_or_fetch(&key, || async { Ok(self.http.get(&url).await?) })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::MockHttpClient;
    use crate::http::HttpError;
    use tempfile::TempDir;

    fn tile() -> TileCoord {
        TileCoord {
            x: 75,
            y: 96,
            zoom: 8,
        }
    }

    #[tokio::test]
    async fn test_satellite_tile_fetch() {
        let temp = TempDir::new().unwrap();
        let mock = MockHttpClient::new().with_route("/maps/hybrid/256/8/75/96.jpg", Ok(vec![1, 2]));
        let client = BasemapClient::new(mock, "token", temp.path()).unwrap();

        assert_eq!(client.satellite_tile(tile()).await.unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_satellite_tile_served_from_cache() {
        let temp = TempDir::new().unwrap();
        let mock = MockHttpClient::new().with_route("/maps/hybrid", Ok(vec![1, 2]));
        let client = BasemapClient::new(mock.clone(), "token", temp.path()).unwrap();

        client.satellite_tile(tile()).await.unwrap();
        client.satellite_tile(tile()).await.unwrap();
        assert_eq!(mock.request_count(), 1, "second request hits the disk cache");
    }

    #[tokio::test]
    async fn test_hillshade_and_satellite_cached_separately() {
        let temp = TempDir::new().unwrap();
        let mock = MockHttpClient::new()
            .with_route("/maps/hybrid", Ok(vec![1]))
            .with_route("/tiles/hillshades", Ok(vec![2]));
        let client = BasemapClient::new(mock.clone(), "token", temp.path()).unwrap();

        assert_eq!(client.satellite_tile(tile()).await.unwrap(), vec![1]);
        assert_eq!(client.hillshade_tile(tile()).await.unwrap(), vec![2]);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_tile_unavailable() {
        let temp = TempDir::new().unwrap();
        let mock = MockHttpClient::new()
            .with_route("/maps/hybrid", Err(HttpError::Transport("down".into())));
        let client = BasemapClient::new(mock, "token", temp.path()).unwrap();

        let err = client.satellite_tile(tile()).await.unwrap_err();
        assert!(matches!(err, ImageryError::TileUnavailable(_)));
    }
}
