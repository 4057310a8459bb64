//! Map imagery pipeline.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       MapService                        │
//! │        weather_map / base_map (point, zoom, layer)      │
//! └─────────────────────────────────────────────────────────┘
//!      │                    │                     │
//!      ▼                    ▼                     ▼
//! ┌──────────┐      ┌──────────────┐      ┌──────────────┐
//! │ coord    │      │ BasemapClient│      │ RadarClient  │
//! │ tiles_for│      │ 7 day cache  │      │ 15 min cache │
//! └──────────┘      └──────────────┘      └──────────────┘
//! ```
//!
//! Each map is four adjacent tiles per source layer, fetched through the
//! disk cache, assembled into a 512×512 canvas and cropped to a 256×256
//! view centered on the requested point.

mod basemap;
mod radar;
mod service;

pub use basemap::BasemapClient;
pub use radar::RadarClient;
pub use service::MapService;

use crate::cache::CacheError;
use crate::coord::CoordError;
use crate::http::HttpError;
use crate::mosaic::MosaicError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Weather overlay layers served by the radar tile upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileLayer {
    Clouds,
    Precipitation,
    Pressure,
    Wind,
    Temperature,
}

impl TileLayer {
    pub const ALL: [TileLayer; 5] = [
        TileLayer::Clouds,
        TileLayer::Precipitation,
        TileLayer::Pressure,
        TileLayer::Wind,
        TileLayer::Temperature,
    ];

    /// Path segment used in tile URLs and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            TileLayer::Clouds => "clouds",
            TileLayer::Precipitation => "precipitation",
            TileLayer::Pressure => "pressure",
            TileLayer::Wind => "wind",
            TileLayer::Temperature => "temperature",
        }
    }
}

impl fmt::Display for TileLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileLayer {
    type Err = ImageryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileLayer::ALL
            .iter()
            .find(|layer| layer.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ImageryError::UnknownLayer(s.to_string()))
    }
}

/// Errors from the map imagery pipeline.
#[derive(Debug, Error)]
pub enum ImageryError {
    /// A requested tile could not be fetched. Aborts the whole mosaic.
    #[error("Map tile unavailable: {0}")]
    TileUnavailable(String),

    /// A fetched tile could not be decoded, or the mosaic could not be
    /// encoded.
    #[error(transparent)]
    Image(#[from] MosaicError),

    /// Requested point or zoom is outside the supported range.
    #[error(transparent)]
    InvalidCoordinates(#[from] CoordError),

    /// Unknown overlay layer name.
    #[error("Unknown map layer: {0}")]
    UnknownLayer(String),

    /// Disk cache failure.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<HttpError> for ImageryError {
    fn from(e: HttpError) -> Self {
        ImageryError::TileUnavailable(e.to_string())
    }
}
