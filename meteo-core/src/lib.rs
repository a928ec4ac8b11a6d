//! Core library for the `meteo` weather lookup client.
//!
//! This crate defines:
//! - Unit systems and WMO weather code classification
//! - Geocoding, forecast requests and response normalization (Open-Meteo)
//! - Preference persistence and configuration
//! - Device geolocation with timeout and freshness rules
//! - Display formatting
//! - The [`App`] controller tying these together
//!
//! It is used by `meteo-cli`, but the controller and formatter have no
//! terminal dependencies and can back any front end.

pub mod app;
pub mod condition;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod locate;
pub mod model;
pub mod prefs;
pub mod present;
pub mod provider;
pub mod units;

pub use app::{App, AppState, Outcome};
pub use condition::{Category, Condition, classify};
pub use config::{Config, DeviceConfig};
pub use error::{GeolocationError, WeatherError};
pub use geocode::{Resolution, disambiguate};
pub use locate::{Geolocator, GeolocationOptions};
pub use model::{CurrentConditions, DailyForecastEntry, ForecastResult, Location, Preferences};
pub use prefs::PreferenceStore;
pub use provider::{WeatherProvider, openmeteo::OpenMeteoProvider, provider_from_config};
pub use units::{Quantity, UnitSystem};
