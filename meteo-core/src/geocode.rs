//! Forward geocoding: free text to ranked candidate locations.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use serde::Deserialize;

use crate::{error::WeatherError, model::Location};

/// Most candidates requested from, and kept from, a lookup.
pub const MAX_CANDIDATES: usize = 5;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: String,
    #[serde(default)]
    admin1: Option<String>,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<Place> for Location {
    fn from(place: Place) -> Self {
        Location {
            display_name: place.name,
            region: place.admin1,
            country: place.country,
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

/// Query parameters for a name search.
pub fn search_query(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("count", MAX_CANDIDATES.to_string()),
        ("language", "en".to_string()),
        ("format", "json".to_string()),
    ]
}

/// Decode a search response body, keeping the source's ranking.
pub fn parse_search(body: &str) -> Result<Vec<Location>, WeatherError> {
    let parsed: SearchResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::Parse(format!("geocoding response: {e}")))?;

    Ok(parsed
        .results
        .into_iter()
        .take(MAX_CANDIDATES)
        .map(Location::from)
        .collect())
}

/// What the caller should do with a candidate list.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Empty,
    /// Unambiguous: proceed straight to fetching.
    Selected(Location),
    /// Ambiguous: the user picks one.
    Choose(Vec<Location>),
}

/// Auto-select when there is a single candidate or every candidate shares a
/// country; otherwise hand the whole list back. Never re-ranks.
pub fn disambiguate(mut candidates: Vec<Location>) -> Resolution {
    let Some(first) = candidates.first() else {
        return Resolution::Empty;
    };

    let same_country = candidates.iter().all(|c| c.country == first.country);
    if same_country {
        Resolution::Selected(candidates.swap_remove(0))
    } else {
        Resolution::Choose(candidates)
    }
}
