use thiserror::Error;

/// Failure modes of device position acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location request timed out")]
    Timeout,
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised along a resolve → fetch chain.
///
/// None of these leave the controller: [`crate::app::App`] turns each one into
/// a short status message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    /// Transport failure or a non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be turned into the domain model.
    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    /// Geocoding returned zero matches for the query.
    #[error("no locations matched '{0}'")]
    EmptyResult(String),
}
