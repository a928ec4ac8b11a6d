use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Measurement system a forecast is requested and displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// Physical quantities whose unit depends on the active [`UnitSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Temperature,
    WindSpeed,
    Precipitation,
}

impl Quantity {
    pub const fn all() -> &'static [Quantity] {
        &[Quantity::Temperature, Quantity::WindSpeed, Quantity::Precipitation]
    }

    /// Query parameter carrying this quantity's unit on a forecast request.
    pub fn api_param(&self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature_unit",
            Quantity::WindSpeed => "wind_speed_unit",
            Quantity::Precipitation => "precipitation_unit",
        }
    }
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }

    /// Suffix appended to a displayed value of `quantity`.
    pub fn suffix(&self, quantity: Quantity) -> &'static str {
        match (self, quantity) {
            (UnitSystem::Metric, Quantity::Temperature) => "°C",
            (UnitSystem::Imperial, Quantity::Temperature) => "°F",
            (UnitSystem::Metric, Quantity::WindSpeed) => "km/h",
            (UnitSystem::Imperial, Quantity::WindSpeed) => "mph",
            (UnitSystem::Metric, Quantity::Precipitation) => "mm",
            (UnitSystem::Imperial, Quantity::Precipitation) => "in",
        }
    }

    /// Unit identifier the forecast source expects for `quantity`.
    pub fn api_unit(&self, quantity: Quantity) -> &'static str {
        match (self, quantity) {
            (UnitSystem::Metric, Quantity::Temperature) => "celsius",
            (UnitSystem::Imperial, Quantity::Temperature) => "fahrenheit",
            (UnitSystem::Metric, Quantity::WindSpeed) => "kmh",
            (UnitSystem::Imperial, Quantity::WindSpeed) => "mph",
            (UnitSystem::Metric, Quantity::Precipitation) => "mm",
            (UnitSystem::Imperial, Quantity::Precipitation) => "inch",
        }
    }

    /// `(parameter, identifier)` pairs for every quantity, in request order.
    pub fn query_params(&self) -> Vec<(&'static str, &'static str)> {
        Quantity::all()
            .iter()
            .map(|q| (q.api_param(), self.api_unit(*q)))
            .collect()
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported unit systems: metric, imperial."
            )),
        }
    }
}
