//! Weather upstream client.
//!
//! Fetches current conditions, air pollution and the daily forecast for a
//! point. Each endpoint is memoized in its own [`ExpiringCache`] keyed by
//! the point rounded to 3 decimals, so nearby queries within the TTL
//! window never touch the network twice. Conditions change quickly enough
//! that nothing here is persisted to disk.

use crate::cache::ExpiringCache;
use crate::coord::{GeoPoint, RoundedPoint};
use crate::http::AsyncHttpClient;
use crate::weather::models::{CurrentConditions, Forecast, PollutionReading, PollutionResponse};
use crate::weather::WeatherError;
use std::time::Duration;
use tracing::debug;

const API_HOST: &str = "https://api.openweathermap.org";

/// Readings cache bound; ample for per-guild query volume.
const CACHE_CAPACITY: usize = 1_000;

/// Conditions and pollution readings stay fresh for 15 minutes.
const READING_TTL: Duration = Duration::from_secs(15 * 60);

/// Daily forecasts change slowly; cache for an hour.
const FORECAST_TTL: Duration = Duration::from_secs(60 * 60);

/// Client for the weather/pollution/forecast endpoints.
pub struct WeatherClient<C> {
    http: C,
    token: String,
    conditions: ExpiringCache<RoundedPoint, CurrentConditions>,
    pollution: ExpiringCache<RoundedPoint, PollutionReading>,
    forecast: ExpiringCache<RoundedPoint, Forecast>,
}

impl<C: AsyncHttpClient> WeatherClient<C> {
    pub fn new(http: C, token: impl Into<String>) -> Self {
        Self {
            http,
            token: token.into(),
            conditions: ExpiringCache::new(CACHE_CAPACITY, READING_TTL),
            pollution: ExpiringCache::new(CACHE_CAPACITY, READING_TTL),
            forecast: ExpiringCache::new(CACHE_CAPACITY, FORECAST_TTL),
        }
    }

    /// Current conditions at a point, cached for 15 minutes.
    pub async fn current_conditions(
        &self,
        point: GeoPoint,
    ) -> Result<CurrentConditions, WeatherError> {
        let key = point.rounded();
        self.conditions
            .get_or_fetch(key, || async move {
                let url = format!(
                    "{}/data/2.5/weather?appid={}&lat={}&lon={}&units=imperial",
                    API_HOST,
                    self.token,
                    key.latitude(),
                    key.longitude()
                );
                debug!(lat = key.latitude(), lon = key.longitude(), "fetching current conditions");
                let body = self.http.get(&url).await?;
                serde_json::from_slice(&body)
                    .map_err(|e| WeatherError::InvalidResponse(e.to_string()))
            })
            .await
    }

    /// Air-pollution reading at a point, cached for 15 minutes.
    pub async fn pollution(&self, point: GeoPoint) -> Result<PollutionReading, WeatherError> {
        let key = point.rounded();
        self.pollution
            .get_or_fetch(key, || async move {
                let url = format!(
                    "{}/data/2.5/air_pollution?appid={}&lat={}&lon={}",
                    API_HOST,
                    self.token,
                    key.latitude(),
                    key.longitude()
                );
                debug!(lat = key.latitude(), lon = key.longitude(), "fetching pollution");
                let body = self.http.get(&url).await?;
                let response: PollutionResponse = serde_json::from_slice(&body)
                    .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
                response
                    .list
                    .first()
                    .map(|entry| PollutionReading {
                        aqi: entry.main.aqi,
                        components: entry.components,
                    })
                    .ok_or_else(|| {
                        WeatherError::InvalidResponse("empty pollution reading list".into())
                    })
            })
            .await
    }

    /// Daily forecast at a point, cached for an hour.
    pub async fn forecast(&self, point: GeoPoint) -> Result<Forecast, WeatherError> {
        let key = point.rounded();
        self.forecast
            .get_or_fetch(key, || async move {
                let url = format!(
                    "{}/data/2.5/onecall?appid={}&lat={}&lon={}&units=imperial&exclude=minutely,hourly,alerts",
                    API_HOST,
                    self.token,
                    key.latitude(),
                    key.longitude()
                );
                debug!(lat = key.latitude(), lon = key.longitude(), "fetching forecast");
                let body = self.http.get(&url).await?;
                serde_json::from_slice(&body)
                    .map_err(|e| WeatherError::InvalidResponse(e.to_string()))
            })
            .await
    }
}
