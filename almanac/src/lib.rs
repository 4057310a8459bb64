//! Almanac - weather, pollution and map-mosaic aggregation
//!
//! This library is the core of a chat bot that answers weather and map
//! queries by aggregating third-party HTTP APIs: current conditions and
//! air pollution, a forward geocoder, and satellite/weather tile imagery
//! assembled into point-centered mosaics.
//!
//! # High-Level API
//!
//! ```ignore
//! use almanac::geocode::HttpGeocoder;
//! use almanac::http::ReqwestClient;
//! use almanac::imagery::{MapService, TileLayer};
//! use almanac::settings::UserSettings;
//! use almanac::weather::{WeatherClient, WeatherService};
//!
//! let http = ReqwestClient::new()?;
//! let geocoder = HttpGeocoder::new(http.clone(), geocode_token);
//! let weather = WeatherService::new(WeatherClient::new(http.clone(), owm_token), geocoder);
//! let maps = MapService::new(http, maptiler_token, owm_token, cache_root)?;
//!
//! let summary = weather.current_summary("new york", &settings).await?;
//! let png = maps.weather_map(point, 8, TileLayer::Clouds).await?;
//! ```
//!
//! Collaborators are constructed once at startup and passed in explicitly;
//! nothing in the crate reaches for ambient globals.

pub mod cache;
pub mod coord;
pub mod geocode;
pub mod http;
pub mod imagery;
pub mod logging;
pub mod mosaic;
pub mod settings;
pub mod weather;

/// Version of the almanac library and CLI.
///
/// Synchronized across the workspace; injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
