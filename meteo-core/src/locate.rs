//! Device position acquisition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{fmt::Debug, time::Duration};

use crate::{config::DeviceConfig, error::GeolocationError, model::Location};

/// Label used for a location derived from the device position.
pub const DEVICE_LOCATION_LABEL: &str = "My Location";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    /// Give up on the locator after this long.
    pub timeout: Duration,
    /// Reuse a previously acquired position up to this age.
    pub maximum_age: Duration,
    pub high_accuracy: bool,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
            high_accuracy: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
    pub acquired_at: DateTime<Utc>,
}

impl Position {
    pub fn to_location(&self) -> Location {
        Location::new(DEVICE_LOCATION_LABEL, self.latitude, self.longitude)
    }
}

/// Platform hook that reports where the device is.
#[async_trait]
pub trait DeviceLocator: Send + Sync + Debug {
    async fn current_position(&self, high_accuracy: bool) -> Result<Position, GeolocationError>;
}

/// Locator for platforms without a location service.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLocator;

#[async_trait]
impl DeviceLocator for UnsupportedLocator {
    async fn current_position(&self, _high_accuracy: bool) -> Result<Position, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Reports a configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    latitude: f64,
    longitude: f64,
}

impl FixedLocator {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<DeviceConfig> for FixedLocator {
    fn from(device: DeviceConfig) -> Self {
        Self::new(device.latitude, device.longitude)
    }
}

#[async_trait]
impl DeviceLocator for FixedLocator {
    async fn current_position(&self, _high_accuracy: bool) -> Result<Position, GeolocationError> {
        Ok(Position {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy_meters: None,
            acquired_at: Utc::now(),
        })
    }
}

/// Wraps a [`DeviceLocator`] with a timeout and a freshness cache.
#[derive(Debug)]
pub struct Geolocator {
    locator: Box<dyn DeviceLocator>,
    options: GeolocationOptions,
    cached: Option<Position>,
}

impl Geolocator {
    pub fn new(locator: Box<dyn DeviceLocator>) -> Self {
        Self::with_options(locator, GeolocationOptions::default())
    }

    pub fn with_options(locator: Box<dyn DeviceLocator>, options: GeolocationOptions) -> Self {
        Self {
            locator,
            options,
            cached: None,
        }
    }

    /// Locator chosen from configuration: a fixed position when one is set.
    pub fn from_device_config(device: Option<DeviceConfig>) -> Self {
        match device {
            Some(device) => Self::new(Box::new(FixedLocator::from(device))),
            None => Self::new(Box::new(UnsupportedLocator)),
        }
    }

    pub async fn locate(&mut self) -> Result<Position, GeolocationError> {
        self.locate_at(Utc::now()).await
    }

    async fn locate_at(&mut self, now: DateTime<Utc>) -> Result<Position, GeolocationError> {
        if let Some(cached) = self.cached.filter(|p| self.is_fresh(p, now)) {
            tracing::debug!("Reusing cached device position");
            return Ok(cached);
        }

        let position = tokio::time::timeout(
            self.options.timeout,
            self.locator.current_position(self.options.high_accuracy),
        )
        .await
        .map_err(|_| GeolocationError::Timeout)??;

        tracing::debug!(
            accuracy_meters = ?position.accuracy_meters,
            "Acquired device position"
        );
        self.cached = Some(position);
        Ok(position)
    }

    fn is_fresh(&self, position: &Position, now: DateTime<Utc>) -> bool {
        match (now - position.acquired_at).to_std() {
            Ok(age) => age <= self.options.maximum_age,
            // acquired "in the future": clock skew, treat as fresh
            Err(_) => true,
        }
    }
}
