//! Weather and pollution aggregation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   WeatherService                    │
//! │     current_summary / forecast_summary (caller API) │
//! └─────────────────────────────────────────────────────┘
//!          │                          │
//!          ▼                          ▼
//! ┌──────────────────┐      ┌──────────────────────────┐
//! │     Geocoder     │      │      WeatherClient       │
//! │ (text → GeoPoint)│      │ conditions / pollution / │
//! │                  │      │ forecast, 15 min caches  │
//! └──────────────────┘      └──────────────────────────┘
//! ```
//!
//! The service produces structured text summaries; everything
//! platform-specific (embeds, attachments, error-text customization) stays
//! with the caller.

mod client;
mod models;
mod summary;
mod units;

pub use client::WeatherClient;
pub use models::{
    Clouds, ConditionTag, CurrentConditions, DailyEntry, DailyTemp, Forecast,
    PollutionComponents, PollutionReading, PrecipDepths, SysData, Thermals, Wind,
};
pub use summary::{
    icon_url_for, ConditionsSummary, ForecastSummary, SummaryField, WeatherService,
};
pub use units::{
    cloud_coverage_label, direction_for, Precipitation, Speed, Temperature, TemperatureUnit,
};

use crate::geocode::GeocodeError;
use crate::http::HttpError;
use thiserror::Error;

/// Errors surfaced by weather lookups.
///
/// `LocationNotFound` is the one the caller turns into a user-facing
/// "city not found" message; everything else is a generic try-again-later.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The location could not be geocoded or the upstream has no data for it.
    #[error("Location not found")]
    LocationNotFound,

    /// Transient upstream or network failure.
    #[error("Weather service unavailable: {0}")]
    Upstream(String),

    /// The upstream answered with a body we could not interpret.
    #[error("Malformed upstream response: {0}")]
    InvalidResponse(String),

    /// The request was rejected before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<HttpError> for WeatherError {
    fn from(e: HttpError) -> Self {
        if e.is_not_found() {
            WeatherError::LocationNotFound
        } else {
            WeatherError::Upstream(e.to_string())
        }
    }
}

impl From<GeocodeError> for WeatherError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::LocationNotFound => WeatherError::LocationNotFound,
            GeocodeError::Upstream(msg) => WeatherError::Upstream(msg),
        }
    }
}
