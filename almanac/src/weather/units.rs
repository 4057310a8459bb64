//! Unit-bearing value types and presentation helpers.
//!
//! Each quantity carries its unit explicitly and converts through pure,
//! idempotent functions: converting a value already in the target system
//! is a no-op, and the linear conversions round-trip within float
//! tolerance.

use crate::settings::UnitSystem;

const KPH_PER_MPH: f64 = 1.60934;
const MM_PER_INCH: f64 = 25.4;

/// A temperature with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    degrees: f64,
    unit: TemperatureUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
}

impl Temperature {
    pub fn fahrenheit(degrees: f64) -> Self {
        Self {
            degrees,
            unit: TemperatureUnit::Fahrenheit,
        }
    }

    pub fn celsius(degrees: f64) -> Self {
        Self {
            degrees,
            unit: TemperatureUnit::Celsius,
        }
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Convert into the system's temperature unit. Idempotent.
    pub fn convert(self, system: UnitSystem) -> Self {
        match (self.unit, system) {
            (TemperatureUnit::Fahrenheit, UnitSystem::Metric) => {
                Self::celsius((self.degrees - 32.0) / 1.8)
            }
            (TemperatureUnit::Celsius, UnitSystem::Imperial) => {
                Self::fahrenheit(self.degrees * 1.8 + 32.0)
            }
            _ => self,
        }
    }

    /// Format for display, e.g. `72°F`.
    pub fn format(self, system: UnitSystem) -> String {
        let converted = self.convert(system);
        let suffix = match converted.unit {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        };
        format!("{}{}", converted.degrees.round() as i64, suffix)
    }
}

/// A speed with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    value: f64,
    unit: SpeedUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    MilesPerHour,
    KilometersPerHour,
}

impl Speed {
    pub fn mph(value: f64) -> Self {
        Self {
            value,
            unit: SpeedUnit::MilesPerHour,
        }
    }

    pub fn kph(value: f64) -> Self {
        Self {
            value,
            unit: SpeedUnit::KilometersPerHour,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Convert into the system's speed unit. Idempotent.
    pub fn convert(self, system: UnitSystem) -> Self {
        match (self.unit, system) {
            (SpeedUnit::MilesPerHour, UnitSystem::Metric) => Self::kph(self.value * KPH_PER_MPH),
            (SpeedUnit::KilometersPerHour, UnitSystem::Imperial) => {
                Self::mph(self.value / KPH_PER_MPH)
            }
            _ => self,
        }
    }

    /// Format for display, e.g. `8 mph`.
    pub fn format(self, system: UnitSystem) -> String {
        let converted = self.convert(system);
        let suffix = match converted.unit {
            SpeedUnit::MilesPerHour => "mph",
            SpeedUnit::KilometersPerHour => "km/h",
        };
        format!("{} {}", converted.value.round() as i64, suffix)
    }
}

/// A precipitation depth with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precipitation {
    depth: f64,
    unit: PrecipitationUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationUnit {
    Millimeters,
    Inches,
}

impl Precipitation {
    pub fn millimeters(depth: f64) -> Self {
        Self {
            depth,
            unit: PrecipitationUnit::Millimeters,
        }
    }

    pub fn inches(depth: f64) -> Self {
        Self {
            depth,
            unit: PrecipitationUnit::Inches,
        }
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn is_zero(&self) -> bool {
        self.depth <= 0.0
    }

    /// Convert into the system's depth unit. Idempotent.
    pub fn convert(self, system: UnitSystem) -> Self {
        match (self.unit, system) {
            (PrecipitationUnit::Millimeters, UnitSystem::Imperial) => {
                Self::inches(self.depth / MM_PER_INCH)
            }
            (PrecipitationUnit::Inches, UnitSystem::Metric) => {
                Self::millimeters(self.depth * MM_PER_INCH)
            }
            _ => self,
        }
    }

    /// Format for display: two decimals for inches, whole millimeters.
    pub fn format(self, system: UnitSystem) -> String {
        let converted = self.convert(system);
        match converted.unit {
            PrecipitationUnit::Inches => format!("{:.2} in", converted.depth),
            PrecipitationUnit::Millimeters => format!("{:.0} mm", converted.depth),
        }
    }
}

/// 16-point compass rose, clockwise from north.
const DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Compass direction for a bearing in degrees.
pub fn direction_for(deg: f64) -> &'static str {
    let ix = (deg / (360.0 / DIRECTIONS.len() as f64)).round() as i64;
    DIRECTIONS[ix.rem_euclid(DIRECTIONS.len() as i64) as usize]
}

/// Human-readable label for a cloud-coverage percentage.
pub fn cloud_coverage_label(coverage: f64) -> &'static str {
    if coverage < 12.0 {
        "Clear"
    } else if coverage < 40.0 {
        "Mostly Sunny"
    } else if coverage < 65.0 {
        "Partly Cloudy"
    } else if coverage < 90.0 {
        "Mostly Cloudy"
    } else {
        "Overcast"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_conversion() {
        let freezing = Temperature::fahrenheit(32.0).convert(UnitSystem::Metric);
        assert!((freezing.degrees() - 0.0).abs() < 1e-9);
        assert_eq!(freezing.unit(), TemperatureUnit::Celsius);

        let boiling = Temperature::celsius(100.0).convert(UnitSystem::Imperial);
        assert!((boiling.degrees() - 212.0).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_convert_idempotent() {
        let temp = Temperature::fahrenheit(72.5);
        let once = temp.convert(UnitSystem::Metric);
        let twice = once.convert(UnitSystem::Metric);
        assert_eq!(once, twice);

        // Already in the target system: no-op.
        assert_eq!(temp.convert(UnitSystem::Imperial), temp);
    }

    #[test]
    fn test_temperature_roundtrip() {
        let original = Temperature::fahrenheit(72.5);
        let back = original
            .convert(UnitSystem::Metric)
            .convert(UnitSystem::Imperial);
        assert!((back.degrees() - 72.5).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_format() {
        assert_eq!(Temperature::fahrenheit(72.4).format(UnitSystem::Imperial), "72°F");
        assert_eq!(Temperature::fahrenheit(32.0).format(UnitSystem::Metric), "0°C");
    }

    #[test]
    fn test_speed_conversion_roundtrip() {
        let original = Speed::mph(10.0);
        let metric = original.convert(UnitSystem::Metric);
        assert!((metric.value() - 16.0934).abs() < 1e-9);

        let back = metric.convert(UnitSystem::Imperial);
        assert!((back.value() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_convert_idempotent() {
        let speed = Speed::kph(50.0);
        assert_eq!(speed.convert(UnitSystem::Metric), speed);
        assert_eq!(
            speed.convert(UnitSystem::Imperial).convert(UnitSystem::Imperial),
            speed.convert(UnitSystem::Imperial)
        );
    }

    #[test]
    fn test_speed_format() {
        assert_eq!(Speed::mph(8.05).format(UnitSystem::Imperial), "8 mph");
        assert_eq!(Speed::mph(10.0).format(UnitSystem::Metric), "16 km/h");
    }

    #[test]
    fn test_precipitation_conversion() {
        let depth = Precipitation::millimeters(25.4).convert(UnitSystem::Imperial);
        assert!((depth.depth() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_precipitation_convert_idempotent() {
        let depth = Precipitation::millimeters(5.0);
        assert_eq!(depth.convert(UnitSystem::Metric), depth);
    }

    #[test]
    fn test_precipitation_format() {
        assert_eq!(
            Precipitation::millimeters(12.7).format(UnitSystem::Imperial),
            "0.50 in"
        );
        assert_eq!(
            Precipitation::millimeters(12.7).format(UnitSystem::Metric),
            "13 mm"
        );
    }

    #[test]
    fn test_direction_cardinal_points() {
        assert_eq!(direction_for(0.0), "N");
        assert_eq!(direction_for(90.0), "E");
        assert_eq!(direction_for(180.0), "S");
        assert_eq!(direction_for(270.0), "W");
    }

    #[test]
    fn test_direction_wraps_at_north() {
        assert_eq!(direction_for(359.0), "N");
        assert_eq!(direction_for(360.0), "N");
        assert_eq!(direction_for(348.75), "N");
    }

    #[test]
    fn test_direction_intermediate_points() {
        assert_eq!(direction_for(22.5), "NNE");
        assert_eq!(direction_for(320.0), "NW");
    }

    #[test]
    fn test_cloud_coverage_labels() {
        assert_eq!(cloud_coverage_label(5.0), "Clear");
        assert_eq!(cloud_coverage_label(11.9), "Clear");
        assert_eq!(cloud_coverage_label(12.0), "Mostly Sunny");
        assert_eq!(cloud_coverage_label(50.0), "Partly Cloudy");
        assert_eq!(cloud_coverage_label(70.0), "Mostly Cloudy");
        assert_eq!(cloud_coverage_label(95.0), "Overcast");
    }
}
