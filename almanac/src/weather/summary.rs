//! Weather aggregation and summary building.
//!
//! [`WeatherService`] is the seam the chat layer calls: it resolves a
//! location string, fans out to the conditions and pollution endpoints,
//! converts units per the user's settings and derives the presentation
//! fields. The output is plain structured text; rendering it as an embed,
//! a terminal block or anything else is the caller's job.

use crate::geocode::Geocoder;
use crate::http::AsyncHttpClient;
use crate::settings::{UnitSystem, UserSettings};
use crate::weather::client::WeatherClient;
use crate::weather::models::{CurrentConditions, PollutionReading, PrecipDepths};
use crate::weather::units::{
    cloud_coverage_label, direction_for, Precipitation, Speed, Temperature,
};
use crate::weather::WeatherError;
use chrono::DateTime;
use tracing::{info, warn};

/// A named field in a summary (e.g. "Rainfall" → "0.02 in (1h)").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    pub name: String,
    pub value: String,
}

/// Structured current-conditions summary.
///
/// All values are already converted to the user's unit system and
/// formatted; the presentation layer only arranges them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionsSummary {
    /// e.g. `Conditions for New York, US`
    pub title: String,
    /// Description lines: condition, temperature, cloud cover, sunrise,
    /// sunset, wind.
    pub description: Vec<String>,
    /// Rainfall/snowfall fields, present only when the upstream reported
    /// precipitation.
    pub precipitation: Vec<SummaryField>,
    /// Air-quality field, absent when the pollution fetch failed.
    pub pollution: Option<SummaryField>,
    /// Upstream icon URL for the primary condition.
    pub icon_url: Option<String>,
    /// e.g. `Powered by OpenWeatherMap | 40.7128 -74.0060`
    pub attribution: String,
}

/// Structured daily-forecast summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastSummary {
    pub title: String,
    /// One formatted line per forecast day.
    pub days: Vec<String>,
}

/// Aggregates the geocoding and weather collaborators behind one call.
pub struct WeatherService<C, G> {
    client: WeatherClient<C>,
    geocoder: G,
}

impl<C: AsyncHttpClient, G: Geocoder> WeatherService<C, G> {
    pub fn new(client: WeatherClient<C>, geocoder: G) -> Self {
        Self { client, geocoder }
    }

    /// Current conditions plus pollution for a location string.
    ///
    /// The two upstream reads are independent and issued concurrently. A
    /// failed pollution read degrades the summary (the field is omitted)
    /// rather than failing it; a failed conditions read is fatal.
    pub async fn current_summary(
        &self,
        location: &str,
        settings: &UserSettings,
    ) -> Result<ConditionsSummary, WeatherError> {
        if location.trim().is_empty() {
            return Err(WeatherError::InvalidInput("empty location".into()));
        }

        let point = self.geocoder.resolve(location).await?;
        info!(location = location, point = %point, "resolved location");

        let (conditions, pollution) = tokio::join!(
            self.client.current_conditions(point),
            self.client.pollution(point)
        );
        let conditions = conditions?;
        let pollution = match pollution {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!(error = %e, "pollution lookup failed, omitting from summary");
                None
            }
        };

        Ok(build_conditions_summary(
            &conditions,
            pollution,
            settings.unit_system(),
            point.to_string(),
        ))
    }

    /// Daily forecast for a location string.
    pub async fn forecast_summary(
        &self,
        location: &str,
        settings: &UserSettings,
    ) -> Result<ForecastSummary, WeatherError> {
        if location.trim().is_empty() {
            return Err(WeatherError::InvalidInput("empty location".into()));
        }

        let point = self.geocoder.resolve(location).await?;
        let forecast = self.client.forecast(point).await?;
        let system = settings.unit_system();

        let days = forecast
            .daily
            .iter()
            .map(|day| {
                let label = format_local(day.dt, forecast.timezone_offset, "%a %b %-d");
                let low = Temperature::fahrenheit(day.temp.min).format(system);
                let high = Temperature::fahrenheit(day.temp.max).format(system);
                let condition = day
                    .condition()
                    .map(|tag| title_case(&tag.description))
                    .unwrap_or_else(|| cloud_coverage_label(day.clouds).to_string());
                let precip = (day.pop * 100.0).round() as i64;
                format!("{}: {} / {}, {}, {}% precip", label, low, high, condition, precip)
            })
            .collect();

        Ok(ForecastSummary {
            title: format!("Forecast for {}", point),
            days,
        })
    }
}

fn build_conditions_summary(
    conditions: &CurrentConditions,
    pollution: Option<PollutionReading>,
    system: UnitSystem,
    point_label: String,
) -> ConditionsSummary {
    let mut description = Vec::new();

    if let Some(tag) = conditions.condition() {
        description.push(title_case(&tag.description));
    }

    let temp = Temperature::fahrenheit(conditions.main.temp).format(system);
    let feels = Temperature::fahrenheit(conditions.main.feels_like).format(system);
    description.push(format!("{} (feels like {})", temp, feels));

    description.push(format!(
        "{} ({}% cloud cover)",
        cloud_coverage_label(conditions.clouds.all),
        conditions.clouds.all.round() as i64
    ));

    description.push(format!(
        "Sunrise: {}",
        format_local(conditions.sys.sunrise, conditions.timezone, "%-I:%M %p")
    ));
    description.push(format!(
        "Sunset: {}",
        format_local(conditions.sys.sunset, conditions.timezone, "%-I:%M %p")
    ));

    description.push(format!(
        "Wind: {} from {}",
        Speed::mph(conditions.wind.speed).format(system),
        direction_for(conditions.wind.direction)
    ));

    let mut precipitation = Vec::new();
    if let Some(rain) = &conditions.rain {
        precipitation.push(precip_field("Rainfall", rain, system));
    }
    if let Some(snow) = &conditions.snow {
        precipitation.push(precip_field("Snowfall", snow, system));
    }

    let pollution = pollution.map(|reading| SummaryField {
        name: "Air Quality".into(),
        value: format!(
            "{} (PM2.5 {:.1} µg/m³)",
            reading.aqi_label(),
            reading.components.pm2_5
        ),
    });

    let title = if conditions.sys.country.is_empty() {
        format!("Conditions for {}", conditions.city_name)
    } else {
        format!(
            "Conditions for {}, {}",
            conditions.city_name, conditions.sys.country
        )
    };

    ConditionsSummary {
        title,
        description,
        precipitation,
        pollution,
        icon_url: conditions.condition().map(|tag| icon_url_for(&tag.icon)),
        attribution: format!("Powered by OpenWeatherMap | {}", point_label),
    }
}

fn precip_field(name: &str, depths: &PrecipDepths, system: UnitSystem) -> SummaryField {
    let one = Precipitation::millimeters(depths.one_hour);
    let three = Precipitation::millimeters(depths.three_hour);
    let value = match (one.is_zero(), three.is_zero()) {
        (false, false) => format!("1 hour: {}, 3 hour: {}", one.format(system), three.format(system)),
        (false, true) => format!("1 hour: {}", one.format(system)),
        (true, false) => format!("3 hour: {}", three.format(system)),
        (true, true) => "trace".to_string(),
    };
    SummaryField {
        name: name.to_string(),
        value,
    }
}

/// Icon URL for an upstream condition icon code.
pub fn icon_url_for(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", icon)
}

/// Formats a UTC timestamp in the location's local time using the
/// provider's UTC offset.
fn format_local(timestamp: i64, offset_secs: i32, fmt: &str) -> String {
    match DateTime::from_timestamp(timestamp + offset_secs as i64, 0) {
        Some(moment) => moment.format(fmt).to_string(),
        None => "unknown".to_string(),
    }
}

/// Uppercases the first letter of each word ("broken clouds" → "Broken Clouds").
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
