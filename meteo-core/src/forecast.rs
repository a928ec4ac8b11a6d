//! Forecast request construction and response normalization.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, DailyForecastEntry, ForecastResult, Location},
    units::UnitSystem,
};

pub const CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "precipitation",
    "weather_code",
    "wind_speed_10m",
    "wind_direction_10m",
];

pub const DAILY_FIELDS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "wind_speed_10m_max",
];

/// Query parameters for one combined current + daily request.
pub fn forecast_query(
    location: &Location,
    units: UnitSystem,
    forecast_days: Option<u8>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("latitude", location.latitude.to_string()),
        ("longitude", location.longitude.to_string()),
        ("timezone", "auto".to_string()),
        ("current", CURRENT_FIELDS.join(",")),
        ("daily", DAILY_FIELDS.join(",")),
    ];
    params.extend(
        units
            .query_params()
            .into_iter()
            .map(|(k, v)| (k, v.to_string())),
    );
    if let Some(days) = forecast_days {
        params.push(("forecast_days", days.to_string()));
    }
    params
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<serde_json::Value>,
    #[serde(default)]
    daily: Option<Daily>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Current {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    precipitation: Option<f64>,
    weather_code: Option<i64>,
    wind_speed_10m: Option<f64>,
    wind_direction_10m: Option<f64>,
}

/// Parallel arrays indexed by day offset.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Daily {
    time: Vec<String>,
    weather_code: Vec<Option<i64>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    wind_speed_10m_max: Vec<Option<f64>>,
}

fn at<T: Copy>(values: &[Option<T>], idx: usize) -> Option<T> {
    values.get(idx).copied().flatten()
}

impl Daily {
    fn into_entries(self) -> Result<Vec<DailyForecastEntry>, WeatherError> {
        self.time
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .map_err(|e| WeatherError::Parse(format!("daily time '{day}': {e}")))?;

                Ok(DailyForecastEntry {
                    date,
                    weather_code: at(&self.weather_code, i),
                    high: at(&self.temperature_2m_max, i),
                    low: at(&self.temperature_2m_min, i),
                    precipitation_sum: at(&self.precipitation_sum, i),
                    max_wind_speed: at(&self.wind_speed_10m_max, i),
                })
            })
            .collect()
    }
}

/// Turn a forecast response body into a [`ForecastResult`].
///
/// The `current` block is required; a missing `daily` block yields an empty
/// forecast. `observed_at` is stamped with `now`.
pub fn parse_forecast(
    body: &str,
    location: &Location,
    units: UnitSystem,
    now: DateTime<Utc>,
) -> Result<ForecastResult, WeatherError> {
    let parsed: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::Parse(format!("forecast response: {e}")))?;

    let current = match parsed.current {
        Some(value @ serde_json::Value::Object(_)) => serde_json::from_value::<Current>(value)
            .map_err(|e| WeatherError::Parse(format!("current block: {e}")))?,
        Some(_) => {
            return Err(WeatherError::Parse("current block is not an object".into()));
        }
        None => return Err(WeatherError::Parse("response has no current block".into())),
    };

    let daily = parsed
        .daily
        .map(Daily::into_entries)
        .transpose()?
        .unwrap_or_default();

    Ok(ForecastResult {
        location: location.clone(),
        units,
        current: CurrentConditions {
            temperature: current.temperature_2m,
            apparent_temperature: current.apparent_temperature,
            humidity_pct: current.relative_humidity_2m,
            precipitation: current.precipitation,
            wind_speed: current.wind_speed_10m,
            wind_direction_deg: current.wind_direction_10m,
            weather_code: current.weather_code,
            observed_at: now,
        },
        daily,
    })
}
