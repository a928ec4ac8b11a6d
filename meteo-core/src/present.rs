//! Display strings for forecasts and candidate lists.
//!
//! Everything here is a pure function of core records; nothing feeds back
//! into application state.

use chrono::{DateTime, Local, NaiveDate};

use crate::{
    condition::classify_opt,
    model::{ForecastResult, Location},
    units::{Quantity, UnitSystem},
};

/// Rendered in place of any absent value.
pub const MISSING: &str = "–";

const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];

/// Round half up (ties go toward +∞).
fn round_half_up(v: f64) -> f64 {
    let floor = v.floor();
    if v - floor >= 0.5 { floor + 1.0 } else { floor }
}

fn whole(v: f64) -> i64 {
    round_half_up(v) as i64
}

pub fn fmt_temp(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING.to_string(), |t| format!("{}°", whole(t)))
}

pub fn fmt_pct(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING.to_string(), |p| format!("{}%", whole(p)))
}

/// Speed with unit, followed by a direction arrow when the direction is known.
pub fn fmt_wind(speed: Option<f64>, direction: Option<f64>, units: UnitSystem) -> String {
    let Some(speed) = speed else {
        return MISSING.to_string();
    };

    let unit = units.suffix(Quantity::WindSpeed);
    match direction {
        Some(deg) => format!("{} {unit} {}", whole(speed), deg_to_arrow(deg)),
        None => format!("{} {unit}", whole(speed)),
    }
}

pub fn fmt_precip(v: Option<f64>, units: UnitSystem) -> String {
    v.map_or_else(
        || MISSING.to_string(),
        |p| {
            let tenths = round_half_up(p * 10.0) / 10.0;
            format!("{tenths:.1} {}", units.suffix(Quantity::Precipitation))
        },
    )
}

/// One of eight arrows, from `round(deg / 45) mod 8`.
pub fn deg_to_arrow(deg: f64) -> &'static str {
    let sector = whole(deg / 45.0).rem_euclid(8);
    ARROWS[sector as usize]
}

/// Short weekday name, e.g. "Mon".
pub fn day_name(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// One line per candidate for a disambiguation list.
pub fn candidate_labels(candidates: &[Location]) -> Vec<String> {
    candidates.iter().map(Location::label).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub place: String,
    pub as_of: String,
    pub icon: &'static str,
    pub summary: &'static str,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub day: String,
    pub icon: &'static str,
    pub label: &'static str,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastView {
    pub current: CurrentView,
    pub days: Vec<DayView>,
}

/// Every display string for `result`, in the units it was fetched in.
pub fn render(result: &ForecastResult) -> ForecastView {
    let units = result.units;
    let c = &result.current;
    let condition = classify_opt(c.weather_code);

    let current = CurrentView {
        place: result.location.label(),
        as_of: fmt_observed(c.observed_at),
        icon: condition.icon,
        summary: condition.label,
        temperature: fmt_temp(c.temperature),
        feels_like: fmt_temp(c.apparent_temperature),
        humidity: fmt_pct(c.humidity_pct),
        wind: fmt_wind(c.wind_speed, c.wind_direction_deg, units),
        precipitation: fmt_precip(c.precipitation, units),
    };

    let days = result
        .daily
        .iter()
        .map(|d| {
            let condition = classify_opt(d.weather_code);
            DayView {
                day: day_name(d.date),
                icon: condition.icon,
                label: condition.label,
                high: fmt_temp(d.high),
                low: fmt_temp(d.low),
            }
        })
        .collect();

    ForecastView { current, days }
}

fn fmt_observed(at: DateTime<chrono::Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
