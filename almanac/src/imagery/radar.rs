//! Weather overlay tile client.
//!
//! Fetches radar-style weather layers (clouds, precipitation, pressure,
//! wind, temperature) from the weather tile server. Weather moves fast, so
//! these go through a 15-minute disk cache.
//!
//! # URL pattern
//!
//! `https://tile.openweathermap.org/map/{layer}/{z}/{x}/{y}.png?appid={token}`

use crate::cache::{tile_path, CacheError, DiskCache};
use crate::coord::TileCoord;
use crate::http::AsyncHttpClient;
use crate::imagery::{ImageryError, TileLayer};
use std::path::Path;
use std::time::Duration;

const RADAR_HOST: &str = "https://tile.openweathermap.org";

/// Weather layers stay fresh for 15 minutes.
const RADAR_TTL: Duration = Duration::from_secs(15 * 60);

/// Client for weather overlay tiles.
pub struct RadarClient<C> {
    http: C,
    token: String,
    cache: DiskCache,
}

impl<C: AsyncHttpClient> RadarClient<C> {
    /// Create a client caching under `cache_root`.
    pub fn new(
        http: C,
        token: impl Into<String>,
        cache_root: &Path,
    ) -> Result<Self, CacheError> {
        Ok(Self {
            http,
            token: token.into(),
            cache: DiskCache::new(cache_root.join("radar"), RADAR_TTL)?,
        })
    }

    /// One 256×256 overlay tile (PNG bytes) for a layer.
    pub async fn layer_tile(
        &self,
        layer: TileLayer,
        tile: TileCoord,
    ) -> Result<Vec<u8>, ImageryError> {
        let url = format!(
            "{}/map/{}/{}/{}/{}.png?appid={}",
            RADAR_HOST,
            layer.as_str(),
            tile.zoom,
            tile.x,
            tile.y,
            self.token
        );
        let key = tile_path(layer.as_str(), &tile, "png");
        self.cache
            .get_or_fetch(&key, || async { Ok(self.http.get(&url).await?) })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::MockHttpClient;
    use tempfile::TempDir;

    fn tile() -> TileCoord {
        TileCoord {
            x: 75,
            y: 96,
            zoom: 8,
        }
    }

    #[tokio::test]
    async fn test_layer_tile_fetch() {
        let temp = TempDir::new().unwrap();
        let mock = MockHttpClient::new().with_route("/map/clouds/8/75/96.png", Ok(vec![3, 4]));
        let client = RadarClient::new(mock, "token", temp.path()).unwrap();

        let bytes = client.layer_tile(TileLayer::Clouds, tile()).await.unwrap();
        assert_eq!(bytes, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_layers_cached_separately() {
        let temp = TempDir::new().unwrap();
        let mock = MockHttpClient::new()
            .with_route("/map/clouds", Ok(vec![1]))
            .with_route("/map/wind", Ok(vec![2]));
        let client = RadarClient::new(mock.clone(), "token", temp.path()).unwrap();

        assert_eq!(client.layer_tile(TileLayer::Clouds, tile()).await.unwrap(), vec![1]);
        assert_eq!(client.layer_tile(TileLayer::Wind, tile()).await.unwrap(), vec![2]);
        assert_eq!(client.layer_tile(TileLayer::Clouds, tile()).await.unwrap(), vec![1]);
        assert_eq!(mock.request_count(), 2, "repeat layer request is a cache hit");
    }

    #[tokio::test]
    async fn test_missing_tile_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let client = RadarClient::new(MockHttpClient::new(), "token", temp.path()).unwrap();

        let err = client.layer_tile(TileLayer::Wind, tile()).await.unwrap_err();
        assert!(matches!(err, ImageryError::TileUnavailable(_)));
    }
}
