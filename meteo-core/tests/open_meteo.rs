//! Integration tests for the Open-Meteo provider and controller using wiremock.

use std::time::Duration;

use meteo_core::{
    App, Location, OpenMeteoProvider, Outcome, PreferenceStore, UnitSystem, WeatherError,
    WeatherProvider, app::FETCH_FAILED,
};
use reqwest::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> OpenMeteoProvider {
    let geocoding = Url::parse(&format!("{}/v1/search", server.uri())).unwrap();
    let forecast = Url::parse(&format!("{}/v1/forecast", server.uri())).unwrap();
    OpenMeteoProvider::new(geocoding, forecast, Duration::from_secs(5)).unwrap()
}

fn chicago_search() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 4887398,
            "name": "Chicago",
            "latitude": 41.85003,
            "longitude": -87.65005,
            "country_code": "US",
            "admin1": "Illinois",
            "country": "United States"
        }],
        "generationtime_ms": 0.9
    })
}

/// A forecast body with seven days, values scaled so metric and imperial
/// responses are easy to tell apart.
fn forecast_body(temperature: f64) -> serde_json::Value {
    let days: Vec<String> = (13..20).map(|d| format!("2026-10-{d}")).collect();
    let highs: Vec<f64> = (0..7).map(|i| temperature + f64::from(i)).collect();
    let lows: Vec<f64> = (0..7).map(|i| temperature - 10.0 + f64::from(i)).collect();

    serde_json::json!({
        "latitude": 41.85,
        "longitude": -87.65,
        "timezone": "America/Chicago",
        "current": {
            "time": "2026-10-13T09:00",
            "interval": 900,
            "temperature_2m": temperature,
            "relative_humidity_2m": 72,
            "apparent_temperature": temperature - 1.5,
            "precipitation": 0.3,
            "weather_code": 61,
            "wind_speed_10m": 17.3,
            "wind_direction_10m": 200
        },
        "daily": {
            "time": days,
            "weather_code": [61, 3, 0, 1, 2, 80, 95],
            "temperature_2m_max": highs,
            "temperature_2m_min": lows,
            "precipitation_sum": [2.1, 0.0, 0.0, 0.0, 0.4, 6.8, 12.5],
            "wind_speed_10m_max": [25.0, 18.2, 9.4, 11.0, 14.3, 30.1, 41.7]
        }
    })
}

#[tokio::test]
async fn search_sends_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Chicago"))
        .and(query_param("count", "5"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chicago_search()))
        .expect(1)
        .mount(&server)
        .await;

    let locations = provider(&server).search("Chicago").await.unwrap();

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].label(), "Chicago, Illinois, United States");
    assert_eq!(locations[0].latitude, 41.85003);
}

#[tokio::test]
async fn search_without_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generationtime_ms": 0.1})),
        )
        .mount(&server)
        .await;

    let locations = provider(&server).search("Xyzzy").await.unwrap();
    assert!(locations.is_empty());
}

#[tokio::test]
async fn search_error_status_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = provider(&server).search("Chicago").await.unwrap_err();
    match err {
        WeatherError::Network(msg) => {
            assert!(msg.contains("503"));
            assert!(msg.contains("upstream down"));
        }
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn forecast_sends_units_and_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "41.88"))
        .and(query_param("longitude", "-87.62"))
        .and(query_param("timezone", "auto"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m,wind_direction_10m",
        ))
        .and(query_param(
            "daily",
            "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max",
        ))
        .and(query_param("temperature_unit", "fahrenheit"))
        .and(query_param("wind_speed_unit", "mph"))
        .and(query_param("precipitation_unit", "inch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(55.0)))
        .expect(1)
        .mount(&server)
        .await;

    let location = Location::new("Chicago", 41.88, -87.62);
    let result = provider(&server)
        .forecast(&location, UnitSystem::Imperial)
        .await
        .unwrap();

    assert_eq!(result.units, UnitSystem::Imperial);
    assert_eq!(result.current.temperature, Some(55.0));
    assert_eq!(result.daily.len(), 7);
}

#[tokio::test]
async fn forecast_without_current_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"daily": {"time": []}})),
        )
        .mount(&server)
        .await;

    let location = Location::new("Chicago", 41.88, -87.62);
    let err = provider(&server)
        .forecast(&location, UnitSystem::Metric)
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn chicago_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Chicago"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chicago_search()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "41.85003"))
        .and(query_param("temperature_unit", "celsius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(12.7)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path().join("preferences.toml"));
    let seed = Location::new("Seed", 0.0, 0.0);
    let mut app = App::start(provider(&server), store.clone(), seed);

    assert_eq!(app.search("Chicago").await, Outcome::Forecast);

    let forecast = app.state().forecast.as_ref().unwrap();
    assert_eq!(forecast.location.label(), "Chicago, Illinois, United States");
    assert_eq!(forecast.current.temperature, Some(12.7));
    assert_eq!(forecast.current.apparent_temperature, Some(11.2));
    assert_eq!(forecast.current.humidity_pct, Some(72.0));
    assert_eq!(forecast.current.weather_code, Some(61));

    assert_eq!(forecast.daily.len(), 7);
    let highs: Vec<Option<f64>> = forecast.daily.iter().map(|d| d.high).collect();
    let expected: Vec<Option<f64>> = (0..7).map(|i| Some(12.7 + f64::from(i))).collect();
    assert_eq!(highs, expected);
    assert_eq!(forecast.daily[6].precipitation_sum, Some(12.5));
    assert!(forecast.daily.windows(2).all(|w| w[0].date < w[1].date));

    let saved = store.load();
    assert_eq!(saved.units, UnitSystem::Metric);
    assert_eq!(
        saved.last_location.map(|l| l.label()),
        Some("Chicago, Illinois, United States".to_string())
    );
}

#[tokio::test]
async fn unit_switch_issues_one_imperial_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("temperature_unit", "celsius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(20.0)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .and(query_param("wind_speed_unit", "mph"))
        .and(query_param("precipitation_unit", "inch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(68.0)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path().join("preferences.toml"));
    let seed = Location::new("Chicago", 41.881832, -87.623177);
    let mut app = App::start(provider(&server), store, seed);

    assert_eq!(app.restore().await, Outcome::Forecast);
    assert_eq!(
        app.state().forecast.as_ref().unwrap().current.temperature,
        Some(20.0)
    );

    assert_eq!(app.set_units(UnitSystem::Imperial).await, Outcome::Forecast);

    let forecast = app.state().forecast.as_ref().unwrap();
    assert_eq!(forecast.units, UnitSystem::Imperial);
    assert_eq!(forecast.current.temperature, Some(68.0));
    assert_eq!(forecast.daily[0].high, Some(68.0));
}

#[tokio::test]
async fn server_error_becomes_status_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path().join("preferences.toml"));
    let mut app = App::start(provider(&server), store, Location::new("Chicago", 41.88, -87.62));

    assert_eq!(app.restore().await, Outcome::Failed(FETCH_FAILED.into()));
    assert_eq!(app.state().status.as_deref(), Some(FETCH_FAILED));
    assert!(app.state().forecast.is_none());
}
