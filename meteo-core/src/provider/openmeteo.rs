use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::{
    config::Config,
    error::WeatherError,
    forecast::{forecast_query, parse_forecast},
    geocode::{parse_search, search_query},
    model::{ForecastResult, Location},
    units::UnitSystem,
};

use super::WeatherProvider;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const USER_AGENT: &str = concat!("meteo/", env!("CARGO_PKG_VERSION"));

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: Url,
    forecast_url: Url,
    forecast_days: Option<u8>,
}

impl OpenMeteoProvider {
    pub fn new(geocoding_url: Url, forecast_url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            geocoding_url,
            forecast_url,
            forecast_days: None,
        })
    }

    pub fn with_forecast_days(mut self, days: Option<u8>) -> Self {
        self.forecast_days = days;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let geocoding_url = Url::parse(&config.geocoding_url)
            .with_context(|| format!("Invalid geocoding_url: {}", config.geocoding_url))?;
        let forecast_url = Url::parse(&config.forecast_url)
            .with_context(|| format!("Invalid forecast_url: {}", config.forecast_url))?;

        Ok(Self::new(geocoding_url, forecast_url, config.timeout())?
            .with_forecast_days(config.forecast_days))
    }

    /// GET `url` with `query` and return the body of a successful response.
    async fn get_text(
        &self,
        what: &str,
        url: &Url,
        query: &[(&str, String)],
    ) -> Result<String, WeatherError> {
        tracing::debug!(url = %url, "Requesting Open-Meteo {what}");

        let res = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::Network(format!("{what} request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Network(format!("failed to read {what} body: {e}")))?;

        if !status.is_success() {
            return Err(WeatherError::Network(format!(
                "Open-Meteo {what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn search(&self, query: &str) -> Result<Vec<Location>, WeatherError> {
        let body = self
            .get_text("geocoding", &self.geocoding_url, &search_query(query))
            .await?;
        let locations = parse_search(&body)?;

        tracing::debug!(query, matches = locations.len(), "Geocoding finished");
        Ok(locations)
    }

    async fn forecast(
        &self,
        location: &Location,
        units: UnitSystem,
    ) -> Result<ForecastResult, WeatherError> {
        let query = forecast_query(location, units, self.forecast_days);
        let body = self.get_text("forecast", &self.forecast_url, &query).await?;

        parse_forecast(&body, location, units, Utc::now())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
