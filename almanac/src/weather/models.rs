//! Upstream weather API response models.
//!
//! These mirror the JSON shapes of the current-conditions, air-pollution
//! and one-call endpoints. Values arrive in the upstream's units
//! (imperial temperatures and wind, millimeter precipitation depths) and
//! are converted at presentation time.

use serde::Deserialize;

/// One weather-condition tag (description + icon code).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConditionTag {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Thermal and atmospheric readings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Thermals {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: u8,
}

/// Wind readings. `direction` is a bearing in degrees.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Wind {
    pub speed: f64,
    #[serde(rename = "deg", default)]
    pub direction: f64,
    #[serde(default)]
    pub gust: Option<f64>,
}

/// Cloud coverage percentage.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Clouds {
    pub all: f64,
}

/// Precipitation depths in millimeters over trailing windows.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Default)]
pub struct PrecipDepths {
    #[serde(rename = "1h", default)]
    pub one_hour: f64,
    #[serde(rename = "3h", default)]
    pub three_hour: f64,
}

/// Sunrise/sunset and country metadata.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SysData {
    pub sunrise: i64,
    pub sunset: i64,
    #[serde(default)]
    pub country: String,
}

/// Current conditions for one location.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub weather: Vec<ConditionTag>,
    pub main: Thermals,
    #[serde(default)]
    pub visibility: Option<f64>,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Observation time, unix seconds UTC.
    pub dt: i64,
    pub sys: SysData,
    /// Local UTC offset in seconds.
    pub timezone: i32,
    #[serde(rename = "name")]
    pub city_name: String,
    #[serde(default)]
    pub rain: Option<PrecipDepths>,
    #[serde(default)]
    pub snow: Option<PrecipDepths>,
}

impl CurrentConditions {
    /// The primary condition tag, if the upstream sent any.
    pub fn condition(&self) -> Option<&ConditionTag> {
        self.weather.first()
    }
}

/// Air-pollution endpoint envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PollutionResponse {
    #[serde(default)]
    pub list: Vec<PollutionEntry>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PollutionEntry {
    pub main: AqiIndex,
    pub components: PollutionComponents,
}

/// Air-quality index, 1 (good) to 5 (very poor).
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct AqiIndex {
    pub aqi: u8,
}

/// Pollutant concentrations in µg/m³.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Default)]
pub struct PollutionComponents {
    #[serde(default)]
    pub co: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub o3: f64,
    #[serde(default)]
    pub pm2_5: f64,
    #[serde(default)]
    pub pm10: f64,
}

/// One location's pollution reading, flattened from the list envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollutionReading {
    pub aqi: u8,
    pub components: PollutionComponents,
}

impl PollutionReading {
    /// Human-readable label for the 1-5 index.
    pub fn aqi_label(&self) -> &'static str {
        match self.aqi {
            1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            _ => "Very Poor",
        }
    }
}

/// One-call endpoint envelope, trimmed to the daily forecast.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Forecast {
    /// Local UTC offset in seconds.
    pub timezone_offset: i32,
    pub daily: Vec<DailyEntry>,
}

/// Daily min/max temperatures.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct DailyTemp {
    pub min: f64,
    pub max: f64,
}

/// One day of forecast data.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DailyEntry {
    /// Forecast day, unix seconds UTC.
    pub dt: i64,
    pub temp: DailyTemp,
    pub weather: Vec<ConditionTag>,
    /// Probability of precipitation, 0.0-1.0.
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub clouds: f64,
}

impl DailyEntry {
    pub fn condition(&self) -> Option<&ConditionTag> {
        self.weather.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONDITIONS_JSON: &str = r#"{
        "coord": {"lon": -74.006, "lat": 40.7128},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 72.5, "feels_like": 71.2, "temp_min": 68.0, "temp_max": 76.1,
                 "pressure": 1014, "humidity": 52},
        "visibility": 10000,
        "wind": {"speed": 8.05, "deg": 320, "gust": 12.4},
        "clouds": {"all": 75},
        "rain": {"1h": 0.5},
        "dt": 1622145600,
        "sys": {"country": "US", "sunrise": 1622107200, "sunset": 1622160000},
        "timezone": -14400,
        "id": 5128581,
        "name": "New York",
        "cod": 200
    }"#;

    #[test]
    fn test_parse_current_conditions() {
        let conditions: CurrentConditions = serde_json::from_str(CONDITIONS_JSON).unwrap();

        assert_eq!(conditions.city_name, "New York");
        assert_eq!(conditions.sys.country, "US");
        assert_eq!(conditions.timezone, -14400);
        assert_eq!(conditions.main.humidity, 52);
        assert_eq!(conditions.condition().unwrap().description, "broken clouds");
        assert_eq!(conditions.rain.unwrap().one_hour, 0.5);
        assert_eq!(conditions.rain.unwrap().three_hour, 0.0);
        assert!(conditions.snow.is_none());
    }

    #[test]
    fn test_parse_conditions_without_optional_fields() {
        let minimal = r#"{
            "weather": [],
            "main": {"temp": 50.0, "feels_like": 49.0, "temp_min": 45.0, "temp_max": 55.0,
                     "pressure": 1020, "humidity": 80},
            "wind": {"speed": 3.0},
            "clouds": {"all": 10},
            "dt": 1622145600,
            "sys": {"sunrise": 1622107200, "sunset": 1622160000},
            "timezone": 0,
            "name": "Somewhere"
        }"#;

        let conditions: CurrentConditions = serde_json::from_str(minimal).unwrap();
        assert!(conditions.condition().is_none());
        assert_eq!(conditions.wind.direction, 0.0);
        assert_eq!(conditions.sys.country, "");
        assert!(conditions.visibility.is_none());
    }

    #[test]
    fn test_parse_pollution_response() {
        let json = r#"{
            "coord": {"lon": -74.006, "lat": 40.713},
            "list": [{
                "main": {"aqi": 3},
                "components": {"co": 250.3, "no": 0.1, "no2": 15.8, "o3": 68.7,
                               "so2": 2.8, "pm2_5": 12.3, "pm10": 18.0, "nh3": 0.9},
                "dt": 1622145600
            }]
        }"#;

        let response: PollutionResponse = serde_json::from_str(json).unwrap();
        let entry = &response.list[0];
        assert_eq!(entry.main.aqi, 3);
        assert_eq!(entry.components.pm2_5, 12.3);
    }

    #[test]
    fn test_aqi_labels() {
        let reading = |aqi| PollutionReading {
            aqi,
            components: PollutionComponents::default(),
        };
        assert_eq!(reading(1).aqi_label(), "Good");
        assert_eq!(reading(3).aqi_label(), "Moderate");
        assert_eq!(reading(5).aqi_label(), "Very Poor");
    }

    #[test]
    fn test_parse_forecast() {
        let json = r#"{
            "lat": 40.71, "lon": -74.01, "timezone": "America/New_York",
            "timezone_offset": -14400,
            "daily": [{
                "dt": 1622127600,
                "sunrise": 1622107200, "sunset": 1622160000,
                "temp": {"day": 70.0, "min": 58.2, "max": 75.9, "night": 60.0, "eve": 68.0, "morn": 59.0},
                "pressure": 1014, "humidity": 50,
                "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
                "clouds": 40,
                "pop": 0.4
            }]
        }"#;

        let forecast: Forecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.timezone_offset, -14400);
        assert_eq!(forecast.daily.len(), 1);
        assert_eq!(forecast.daily[0].temp.min, 58.2);
        assert_eq!(forecast.daily[0].pop, 0.4);
        assert_eq!(
            forecast.daily[0].condition().unwrap().description,
            "scattered clouds"
        );
    }
}
