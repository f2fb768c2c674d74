use crate::domain::temperature::Temperatures;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressResult {
    pub place_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSample {
    pub celsius: f64,
}

/// Current temperature of a city, as returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReport {
    #[serde(default)]
    pub city: String,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl TemperatureReport {
    pub fn new(city: impl Into<String>, temperatures: Temperatures) -> Self {
        Self {
            city: city.into(),
            temp_c: temperatures.celsius,
            temp_f: temperatures.fahrenheit,
            temp_k: temperatures.kelvin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::temperature::convert;

    #[test]
    fn test_report_wire_names() {
        let report = TemperatureReport::new("São Paulo", convert(20.0));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"city": "São Paulo", "temp_C": 20.0, "temp_F": 68.0, "temp_K": 293.0})
        );
    }

    #[test]
    fn test_report_city_defaults_to_empty() {
        let report: TemperatureReport =
            serde_json::from_str(r#"{"temp_C": 1.0, "temp_F": 33.8, "temp_K": 274.0}"#).unwrap();
        assert_eq!(report.city, "");
        assert_eq!(report.temp_k, 274.0);
    }
}
