//! Application controller: owns all mutable state and drives the
//! resolve → fetch → render chains.

use crate::{
    error::{GeolocationError, WeatherError},
    geocode::{Resolution, disambiguate},
    locate::Geolocator,
    model::{ForecastResult, Location, Preferences},
    prefs::PreferenceStore,
    provider::WeatherProvider,
    units::UnitSystem,
};

pub const SEARCH_FAILED: &str = "Search failed. Try again.";
pub const NO_MATCHES: &str = "No matches found.";
pub const FETCH_FAILED: &str = "Could not load weather. Try again.";
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation not supported.";
pub const GEOLOCATION_FAILED: &str = "Location blocked or unavailable.";

/// Result of one user action, after every error has been turned into a
/// status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new forecast replaced the previous one.
    Forecast,
    /// The query was ambiguous; candidates await a pick.
    Candidates,
    /// Nothing to do.
    Idle,
    /// A newer request was dispatched before this one completed.
    Stale,
    Failed(String),
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Search,
    Fetch,
}

fn status_message(err: &WeatherError, action: Action) -> &'static str {
    match (err, action) {
        (WeatherError::EmptyResult(_), _) => NO_MATCHES,
        (WeatherError::Geolocation(GeolocationError::Unsupported), _) => GEOLOCATION_UNSUPPORTED,
        (WeatherError::Geolocation(_), _) => GEOLOCATION_FAILED,
        (_, Action::Search) => SEARCH_FAILED,
        (_, Action::Fetch) => FETCH_FAILED,
    }
}

/// Identifies one dispatched forecast request. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
pub struct AppState {
    pub preferences: Preferences,
    pub forecast: Option<ForecastResult>,
    /// Pending disambiguation list, in source ranking.
    pub candidates: Vec<Location>,
    pub status: Option<String>,
    latest: u64,
}

impl AppState {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }

    /// Take a ticket for a fetch about to be dispatched.
    ///
    /// [`App`] awaits each fetch before starting the next, so its own tickets
    /// are never superseded. Front ends that keep several fetches in flight
    /// (one task per user action) take tickets here and hand each completion
    /// to [`AppState::finish_request`].
    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply a completed fetch unless a newer one has been dispatched since.
    ///
    /// Returns [`Outcome::Stale`] for a superseded ticket and leaves the
    /// state untouched.
    pub fn finish_request(
        &mut self,
        ticket: RequestTicket,
        result: Result<ForecastResult, WeatherError>,
    ) -> Outcome {
        if !self.is_latest(ticket) {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.latest,
                "Discarding response to superseded request"
            );
            return Outcome::Stale;
        }

        match result {
            Ok(forecast) => {
                tracing::info!(place = %forecast.location.label(), units = %forecast.units, "Forecast loaded");
                self.preferences.last_location = Some(forecast.location.clone());
                self.forecast = Some(forecast);
                self.status = None;
                Outcome::Forecast
            }
            Err(e) => self.fail(&e, Action::Fetch),
        }
    }

    fn fail(&mut self, err: &WeatherError, action: Action) -> Outcome {
        tracing::warn!("{err}");
        let msg = status_message(err, action).to_string();
        self.status = Some(msg.clone());
        Outcome::Failed(msg)
    }
}

/// Top-level controller over a [`WeatherProvider`] and a [`PreferenceStore`].
#[derive(Debug)]
pub struct App<P> {
    provider: P,
    store: PreferenceStore,
    seed: Location,
    state: AppState,
}

impl<P: WeatherProvider> App<P> {
    /// Load preferences and build the controller. `seed` is shown when no
    /// location has ever been resolved.
    pub fn start(provider: P, store: PreferenceStore, seed: Location) -> Self {
        let preferences = store.load();
        Self {
            provider,
            store,
            seed,
            state: AppState::new(preferences),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn units(&self) -> UnitSystem {
        self.state.preferences.units
    }

    /// Show the last resolved location, or the seed on first run.
    pub async fn restore(&mut self) -> Outcome {
        let location = self
            .state
            .preferences
            .last_location
            .clone()
            .unwrap_or_else(|| self.seed.clone());
        self.fetch(location).await
    }

    pub async fn search(&mut self, query: &str) -> Outcome {
        let query = query.trim();
        if query.is_empty() {
            return Outcome::Idle;
        }

        let candidates = match self.provider.search(query).await {
            Ok(candidates) => candidates,
            Err(e) => return self.state.fail(&e, Action::Search),
        };

        match disambiguate(candidates) {
            Resolution::Empty => {
                self.state.candidates.clear();
                self.state
                    .fail(&WeatherError::EmptyResult(query.to_string()), Action::Search)
            }
            Resolution::Selected(location) => {
                tracing::info!(place = %location.label(), "Resolved location");
                self.state.candidates.clear();
                self.fetch(location).await
            }
            Resolution::Choose(candidates) => {
                tracing::debug!(count = candidates.len(), "Ambiguous query");
                self.state.candidates = candidates;
                self.state.status = None;
                Outcome::Candidates
            }
        }
    }

    /// Fetch a location picked from the candidate list.
    pub async fn select(&mut self, location: Location) -> Outcome {
        self.state.candidates.clear();
        self.fetch(location).await
    }

    /// Persist the new unit system and re-fetch the current location in it.
    pub async fn set_units(&mut self, units: UnitSystem) -> Outcome {
        self.state.preferences.units = units;
        self.store.save(&self.state.preferences);

        match self.state.preferences.last_location.clone() {
            Some(location) => self.fetch(location).await,
            None => Outcome::Idle,
        }
    }

    pub async fn use_device_location(&mut self, geolocator: &mut Geolocator) -> Outcome {
        match geolocator.locate().await {
            Ok(position) => self.fetch(position.to_location()).await,
            Err(e) => self.state.fail(&e.into(), Action::Fetch),
        }
    }

    async fn fetch(&mut self, location: Location) -> Outcome {
        let units = self.units();
        let ticket = self.state.begin_request();
        tracing::debug!(ticket = ticket.0, place = %location.label(), %units, "Fetching forecast");

        let result = self.provider.forecast(&location, units).await;
        let outcome = self.state.finish_request(ticket, result);

        if outcome == Outcome::Forecast {
            self.store.save(&self.state.preferences);
        }
        outcome
    }
}
