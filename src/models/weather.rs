//! Current weather conditions attached to an air-quality record

use serde::{Deserialize, Serialize};

/// Current conditions at the record's coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Relative humidity, 0-100
    pub humidity_percent: f64,
    /// Wind speed at 10 m in km/h
    pub wind_speed_kph: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let snapshot = WeatherSnapshot {
            temperature_celsius: 20.0,
            humidity_percent: 55.0,
            wind_speed_kph: 10.0,
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["temperatureCelsius"], 20.0);
        assert_eq!(value["humidityPercent"], 55.0);
        assert_eq!(value["windSpeedKph"], 10.0);
    }
}
