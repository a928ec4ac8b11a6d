use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::units::UnitSystem;

/// A resolved place. Two locations are equal when their coordinates are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(display_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            display_name: display_name.into(),
            region: None,
            country: None,
            latitude,
            longitude,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// "Name, Region, Country", skipping empty parts.
    pub fn label(&self) -> String {
        [
            Some(self.display_name.as_str()),
            self.region.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
    /// Degrees, 0–360, direction the wind comes from.
    pub wind_direction_deg: Option<f64>,
    pub weather_code: Option<i64>,
    /// When the response was parsed, not a server timestamp.
    pub observed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub weather_code: Option<i64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub precipitation_sum: Option<f64>,
    pub max_wind_speed: Option<f64>,
}

/// Everything displayed for one location, fetched in one unit system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location: Location,
    pub units: UnitSystem,
    pub current: CurrentConditions,
    /// Ascending by date.
    pub daily: Vec<DailyForecastEntry>,
}

/// User preferences that survive restarts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub units: UnitSystem,
    pub last_location: Option<Location>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_skips_missing_parts() {
        let full = Location::new("Springfield", 39.8, -89.64)
            .with_region("Illinois")
            .with_country("United States");
        assert_eq!(full.label(), "Springfield, Illinois, United States");

        let bare = Location::new("My Location", 1.0, 2.0);
        assert_eq!(bare.label(), "My Location");

        let empty_region = Location::new("Paris", 48.85, 2.35)
            .with_region("")
            .with_country("France");
        assert_eq!(empty_region.label(), "Paris, France");
    }

    #[test]
    fn location_identity_is_coordinates() {
        let a = Location::new("Chicago", 41.88, -87.62).with_country("United States");
        let b = Location::new("Chi-town", 41.88, -87.62);
        let c = Location::new("Chicago", 41.89, -87.62);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn location_serializes_display_name_as_name() {
        let loc = Location::new("Chicago", 41.88, -87.62);
        let json = serde_json::to_value(&loc).unwrap();

        assert_eq!(json["name"], "Chicago");
        assert!(json.get("region").is_none());
        assert!(json.get("country").is_none());
    }

    #[test]
    fn default_preferences() {
        let prefs = Preferences::default();
        assert_eq!(prefs.units, UnitSystem::Metric);
        assert!(prefs.last_location.is_none());
    }
}
