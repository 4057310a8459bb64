//! Map assembly service.
//!
//! Ties the coordinate mapper, tile clients and mosaic assembler together:
//! resolve the 2×2 tile neighborhood for a point, fetch each layer's four
//! tiles through its cache, assemble per-layer mosaics and composite them
//! into the final view.

use crate::coord::{tiles_for, GeoPoint, TileCoord, TileNeighborhood};
use crate::http::AsyncHttpClient;
use crate::imagery::{BasemapClient, ImageryError, RadarClient, TileLayer};
use crate::mosaic::{assemble, composite_over, composite_radar, decode_tile, encode_png};
use image::RgbaImage;
use std::future::Future;
use std::path::Path;
use tracing::debug;

/// Assembles weather maps from base and overlay tiles.
///
/// The four fetches per layer are issued concurrently and joined before
/// assembly begins; any tile failure aborts the whole map rather than
/// producing a partial image.
pub struct MapService<C> {
    basemap: BasemapClient<C>,
    radar: RadarClient<C>,
}

impl<C: AsyncHttpClient + Clone> MapService<C> {
    /// Create a service with both tile caches rooted under `cache_root`.
    pub fn new(
        http: C,
        maptiler_token: impl Into<String>,
        radar_token: impl Into<String>,
        cache_root: &Path,
    ) -> Result<Self, ImageryError> {
        Ok(Self {
            basemap: BasemapClient::new(http.clone(), maptiler_token, cache_root)?,
            radar: RadarClient::new(http, radar_token, cache_root)?,
        })
    }

    /// A 256×256 PNG of satellite + hillshade imagery centered on a point.
    pub async fn base_map(&self, point: GeoPoint, zoom: u8) -> Result<Vec<u8>, ImageryError> {
        let hood = tiles_for(point, zoom)?;
        debug!(point = %point, zoom = zoom, "assembling base map");

        let (satellite, hillshade) = tokio::try_join!(
            self.layer_mosaic(&hood, |tile| self.basemap.satellite_tile(tile)),
            self.layer_mosaic(&hood, |tile| self.basemap.hillshade_tile(tile)),
        )?;

        let mut map = satellite;
        composite_over(&mut map, &hillshade);
        Ok(encode_png(&map)?)
    }

    /// A 256×256 PNG with a weather overlay composited over the base map.
    pub async fn weather_map(
        &self,
        point: GeoPoint,
        zoom: u8,
        layer: TileLayer,
    ) -> Result<Vec<u8>, ImageryError> {
        let hood = tiles_for(point, zoom)?;
        debug!(point = %point, zoom = zoom, layer = %layer, "assembling weather map");

        let (satellite, hillshade, overlay) = tokio::try_join!(
            self.layer_mosaic(&hood, |tile| self.basemap.satellite_tile(tile)),
            self.layer_mosaic(&hood, |tile| self.basemap.hillshade_tile(tile)),
            self.layer_mosaic(&hood, |tile| self.radar.layer_tile(layer, tile)),
        )?;

        let mut map = satellite;
        composite_over(&mut map, &hillshade);
        composite_radar(&mut map, &overlay);
        Ok(encode_png(&map)?)
    }

    /// Fetches one layer's four tiles concurrently and assembles them.
    async fn layer_mosaic<F, Fut>(
        &self,
        hood: &TileNeighborhood,
        fetch: F,
    ) -> Result<RgbaImage, ImageryError>
    where
        F: Fn(TileCoord) -> Fut,
        Fut: Future<Output = Result<Vec<u8>, ImageryError>>,
    {
        let [a, b, c, d] = hood.corners();
        let (ta, tb, tc, td) = tokio::try_join!(fetch(a), fetch(b), fetch(c), fetch(d))?;

        let tiles = [
            decode_tile(&ta)?,
            decode_tile(&tb)?,
            decode_tile(&tc)?,
            decode_tile(&td)?,
        ];
        Ok(assemble(&tiles, hood.pixel))
    }
}
