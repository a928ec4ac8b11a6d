use crate::{
    Config, ForecastResult, Location, UnitSystem, error::WeatherError,
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

/// Source of geocoding and forecast data.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Candidate locations for `query`, ranked by the source, at most
    /// [`crate::geocode::MAX_CANDIDATES`].
    async fn search(&self, query: &str) -> Result<Vec<Location>, WeatherError>;

    /// Current conditions and daily forecast for `location` in `units`.
    async fn forecast(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<ForecastResult, WeatherError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn search(&self, query: &str) -> Result<Vec<Location>, WeatherError> {
        (**self).search(query).await
    }

    async fn forecast(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<ForecastResult, WeatherError> {
        (**self).forecast(location, units).await
    }
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::from_config(config)?;
    Ok(Box::new(provider))
}
