//! Location resolution.
//!
//! User-supplied location text is resolved to a [`GeoPoint`] in two steps:
//! a direct latitude/longitude parse (with optional degree signs and
//! N/S/E/W suffixes), then a forward-geocoding API call. Geocoded results
//! are cached for 12 hours, since place-name coordinates effectively never
//! change within a session.

use crate::cache::ExpiringCache;
use crate::coord::GeoPoint;
use crate::http::{AsyncHttpClient, HttpError};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Cache bound for geocoded place names.
const CACHE_CAPACITY: usize = 10_000;

/// Geocoded results stay valid for 12 hours.
const CACHE_TTL: Duration = Duration::from_secs(12 * 60 * 60);

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Errors from location resolution.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeocodeError {
    /// The text could not be parsed or geocoded to a location.
    #[error("Location not found")]
    LocationNotFound,

    /// The geocoding service failed or answered with garbage.
    #[error("Geocoding service unavailable: {0}")]
    Upstream(String),
}

impl From<HttpError> for GeocodeError {
    fn from(e: HttpError) -> Self {
        if e.is_not_found() {
            GeocodeError::LocationNotFound
        } else {
            GeocodeError::Upstream(e.to_string())
        }
    }
}

/// Trait for resolving location text to coordinates.
pub trait Geocoder: Send + Sync {
    /// Resolve free-form location text to a point.
    fn resolve(&self, query: &str) -> impl Future<Output = Result<GeoPoint, GeocodeError>> + Send;
}

/// Parses a direct latitude/longitude string.
///
/// Accepts `"40.7, -74.0"`, `"40.7 -74.0"`, `"40.7N 74.0W"` and degree
/// signs. Returns `None` if the text is not a coordinate pair; out-of-range
/// values also yield `None` so the caller can fall through to geocoding.
pub fn parse_lat_lon(text: &str) -> Option<GeoPoint> {
    let cleaned = text.replace(['°', ','], " ").to_lowercase();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() != 2 {
        return None;
    }

    let lat = parse_axis(tokens[0], 's', 'n')?;
    let lon = parse_axis(tokens[1], 'w', 'e')?;
    GeoPoint::new(lat, lon).ok()
}

/// Parses one coordinate token with an optional hemisphere suffix.
fn parse_axis(token: &str, negative: char, positive: char) -> Option<f64> {
    let (body, sign) = match token.chars().last() {
        Some(c) if c == negative => (&token[..token.len() - 1], -1.0),
        Some(c) if c == positive => (&token[..token.len() - 1], 1.0),
        _ => (token, 1.0),
    };
    body.parse::<f64>().ok().map(|v| v * sign)
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    lat: f64,
    lng: f64,
}

/// Forward-geocoding client over the maps geocode API.
pub struct HttpGeocoder<C> {
    http: C,
    token: String,
    cache: ExpiringCache<String, GeoPoint>,
}

impl<C: AsyncHttpClient> HttpGeocoder<C> {
    pub fn new(http: C, token: impl Into<String>) -> Self {
        Self {
            http,
            token: token.into(),
            cache: ExpiringCache::new(CACHE_CAPACITY, CACHE_TTL),
        }
    }

    async fn geocode(&self, query: &str) -> Result<GeoPoint, GeocodeError> {
        let url = Url::parse_with_params(
            GEOCODE_URL,
            &[("address", query), ("key", self.token.as_str())],
        )
        .map_err(|e| GeocodeError::Upstream(e.to_string()))?;

        let body = self.http.get(url.as_str()).await?;
        let response: GeocodeResponse = serde_json::from_slice(&body)
            .map_err(|e| GeocodeError::Upstream(format!("Invalid geocode response: {}", e)))?;

        let location = match response.results.first() {
            Some(result) if response.status == "OK" => &result.geometry.location,
            _ => {
                debug!(query = query, status = %response.status, "geocoder returned no results");
                return Err(GeocodeError::LocationNotFound);
            }
        };

        GeoPoint::new(location.lat, location.lng)
            .map_err(|e| GeocodeError::Upstream(format!("Geocoder returned invalid point: {}", e)))
    }
}

impl<C: AsyncHttpClient> Geocoder for HttpGeocoder<C> {
    async fn resolve(&self, query: &str) -> Result<GeoPoint, GeocodeError> {
        // Literal coordinates skip both the cache and the network.
        if let Some(point) = parse_lat_lon(query) {
            return Ok(point);
        }

        let key = query.trim().to_lowercase();
        self.cache
            .get_or_fetch(key, || self.geocode(query))
            .await
    }
}

/// Fixed-table geocoder for tests and offline use.
pub struct StaticGeocoder {
    entries: Vec<(String, GeoPoint)>,
}

impl StaticGeocoder {
    pub fn new(entries: Vec<(String, GeoPoint)>) -> Self {
        Self { entries }
    }
}

impl Geocoder for StaticGeocoder {
    async fn resolve(&self, query: &str) -> Result<GeoPoint, GeocodeError> {
        if let Some(point) = parse_lat_lon(query) {
            return Ok(point);
        }
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(query.trim()))
            .map(|(_, point)| *point)
            .ok_or(GeocodeError::LocationNotFound)
    }
}
