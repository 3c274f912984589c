//! End-to-end tests for the widget loop using wiremock.
//!
//! These drive `WidgetApp` the way the binary does: actions in, fetch results
//! back through the channel, panel lines out.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{timeout, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxglance_core::{KeyValueStore, Language, MemoryStore, SettingsStore, Theme};
use wxglance_ui::{Action, WidgetApp};
use wxglance_weather::{FetchOutcome, WeatherProvider};

const WAIT: Duration = Duration::from_secs(5);

fn weather_body(name: &str, kelvin: f64, condition: &str) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [{ "id": 800, "main": condition, "description": "test", "icon": "01d" }],
        "main": { "temp": kelvin, "feels_like": kelvin, "humidity": 60 },
        "name": name,
        "cod": 200
    })
}

async fn mount_city(server: &MockServer, city: &str, body: serde_json::Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

fn widget(server: &MockServer, storage: MemoryStore, debounce: Duration) -> WidgetApp<MemoryStore> {
    let provider =
        WeatherProvider::with_base_url(&server.uri(), "test-key", Duration::from_secs(5)).unwrap();
    WidgetApp::new(
        SettingsStore::load(storage),
        Arc::new(provider),
        "London",
        debounce,
    )
}

async fn next_outcome(app: &mut WidgetApp<MemoryStore>) -> FetchOutcome {
    let message = timeout(WAIT, app.next_message())
        .await
        .expect("fetch result within timeout")
        .expect("channel open");
    app.apply(message)
}

#[tokio::test]
async fn test_default_load_fetches_london_once() {
    let server = MockServer::start().await;
    mount_city(&server, "London", weather_body("London", 300.0, "Clear"), 1).await;

    let mut app = widget(&server, MemoryStore::new(), Duration::from_millis(400));
    assert!(app.session().snapshot().is_none());

    app.start();
    assert!(app.session().is_fetching());
    assert_eq!(next_outcome(&mut app).await, FetchOutcome::Applied);

    let lines = app.panel().lines();
    assert!(lines.contains(&"City: London".to_string()), "{lines:?}");
    assert!(lines.contains(&"Temperature: 26.85°C".to_string()), "{lines:?}");
    assert!(lines.contains(&"Description: ☀️".to_string()), "{lines:?}");
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_snapshot() {
    let server = MockServer::start().await;
    mount_city(&server, "London", weather_body("London", 283.15, "Rain"), 1).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = widget(&server, MemoryStore::new(), Duration::ZERO);
    app.start();
    assert_eq!(next_outcome(&mut app).await, FetchOutcome::Applied);

    let now = Instant::now();
    app.handle(Action::SetCity("Atlantis".into()), now);
    assert!(app.fire_debounced(now));
    assert_eq!(next_outcome(&mut app).await, FetchOutcome::Failed);

    let snapshot = app.session().snapshot().unwrap();
    assert_eq!(snapshot.city_display_name, "London");
    assert_eq!(app.city(), "Atlantis");
    assert!(app
        .panel()
        .lines()
        .contains(&"Temperature: 10.00°C".to_string()));
}

#[tokio::test]
async fn test_keystroke_burst_fetches_only_final_city() {
    let server = MockServer::start().await;
    mount_city(&server, "London", weather_body("London", 280.0, "Clouds"), 1).await;
    mount_city(&server, "Tallinn", weather_body("Tallinn", 268.15, "Snow"), 1).await;
    for partial in ["T", "Ta", "Tal"] {
        mount_city(&server, partial, weather_body(partial, 300.0, "Clear"), 0).await;
    }

    let mut app = widget(&server, MemoryStore::new(), Duration::from_millis(300));
    app.start();
    assert_eq!(next_outcome(&mut app).await, FetchOutcome::Applied);

    let start = Instant::now();
    for (i, text) in ["T", "Ta", "Tal", "Tallinn"].into_iter().enumerate() {
        let at = start + Duration::from_millis(50 * i as u64);
        app.handle(Action::SetCity(text.into()), at);
        assert!(!app.fire_debounced(at));
    }

    let deadline = app.debounce_deadline().unwrap();
    assert_eq!(deadline, start + Duration::from_millis(150 + 300));
    assert!(app.fire_debounced(deadline));
    assert_eq!(next_outcome(&mut app).await, FetchOutcome::Applied);

    let snapshot = app.session().snapshot().unwrap();
    assert_eq!(snapshot.city_display_name, "Tallinn");
    assert_eq!(snapshot.emoji(), "❄️");
}

#[tokio::test]
async fn test_slow_stale_response_never_overwrites_newer_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(weather_body("London", 290.0, "Clear"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    mount_city(&server, "Paris", weather_body("Paris", 295.0, "Clouds"), 1).await;

    let mut app = widget(&server, MemoryStore::new(), Duration::ZERO);
    app.start();

    let now = Instant::now();
    app.handle(Action::SetCity("Paris".into()), now);
    assert!(app.fire_debounced(now));

    assert_eq!(next_outcome(&mut app).await, FetchOutcome::Applied);
    assert_eq!(app.session().snapshot().unwrap().city_display_name, "Paris");

    // The London request was cancelled, so nothing else may arrive.
    let late = timeout(Duration::from_millis(800), app.next_message()).await;
    assert!(late.is_err(), "unexpected late message");
    assert_eq!(app.session().snapshot().unwrap().city_display_name, "Paris");
}

#[tokio::test]
async fn test_settings_changes_persist_and_relabel_panel() {
    let server = MockServer::start().await;
    mount_city(&server, "London", weather_body("London", 273.15, "Mist"), 1).await;

    let storage = MemoryStore::new();
    let mut app = widget(&server, storage.clone(), Duration::from_millis(400));
    app.start();
    assert_eq!(next_outcome(&mut app).await, FetchOutcome::Applied);

    let now = Instant::now();
    app.handle(Action::SetLanguage(Language::Ru), now);
    app.handle(Action::SetTheme(Theme::Dark), now);

    let lines = app.panel().lines();
    assert!(lines.contains(&"Город: London".to_string()), "{lines:?}");
    assert!(lines.contains(&"Температура: 0.00°C".to_string()), "{lines:?}");
    assert!(lines.contains(&"Описание: 🌫️".to_string()), "{lines:?}");

    assert_eq!(storage.get("language").as_deref(), Some("ru"));
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));

    let reloaded = SettingsStore::load(storage);
    assert_eq!(reloaded.language(), Language::Ru);
    assert_eq!(reloaded.theme(), Theme::Dark);
}
