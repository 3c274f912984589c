use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use wxglance_core::{KeyValueStore, Settings, SettingsStore};
use wxglance_weather::{Debouncer, FetchOutcome, WeatherProvider, WeatherSession};

use crate::action::Action;
use crate::error_mapping::to_app_error;
use crate::services::{request_fetch, WeatherServiceMessage};
use crate::view::PanelView;

/// Widget state and lifecycle: settings, the city field, and the weather
/// fetch cycle.
///
/// All state lives here and is mutated only by the loop that owns the
/// `WidgetApp`; fetches run on spawned tasks and report back through
/// [`WidgetApp::next_message`].
pub struct WidgetApp<S: KeyValueStore> {
    settings: SettingsStore<S>,
    city: String,
    session: WeatherSession,
    debouncer: Debouncer<String>,
    provider: Arc<WeatherProvider>,
    in_flight: Option<CancellationToken>,
    tx: UnboundedSender<WeatherServiceMessage>,
    rx: UnboundedReceiver<WeatherServiceMessage>,
}

impl<S: KeyValueStore> WidgetApp<S> {
    pub fn new(
        settings: SettingsStore<S>,
        provider: Arc<WeatherProvider>,
        initial_city: &str,
        debounce: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            settings,
            city: initial_city.to_string(),
            session: WeatherSession::new(),
            debouncer: Debouncer::new(debounce),
            provider,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Fetch the initial city right away. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        tracing::info!("Starting widget with city {:?}", self.city);
        let city = self.city.clone();
        self.issue_fetch(&city);
    }

    /// Apply one user action. Returns `false` when the app should exit.
    pub fn handle(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::SetLanguage(language) => self.settings.set_language(language),
            Action::SetTheme(theme) => self.settings.set_theme(theme),
            Action::SetCity(city) => {
                if city != self.city {
                    self.city = city.clone();
                    self.debouncer.push(city, now);
                }
            }
            Action::Quit => {
                self.shutdown();
                return false;
            }
        }
        true
    }

    /// When the pending city edit becomes due.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Issue the debounced fetch if its quiet period is over. Returns whether one was issued.
    pub fn fire_debounced(&mut self, now: Instant) -> bool {
        match self.debouncer.take_ready(now) {
            Some(city) => {
                self.issue_fetch(&city);
                true
            }
            None => false,
        }
    }

    /// Wait for the next fetch result.
    pub async fn next_message(&mut self) -> Option<WeatherServiceMessage> {
        self.rx.recv().await
    }

    /// Fold a fetch result into the session.
    pub fn apply(&mut self, message: WeatherServiceMessage) -> FetchOutcome {
        let WeatherServiceMessage::FetchDone {
            generation,
            city,
            result,
        } = message;

        if let Err(e) = &result {
            let app_err = to_app_error(e);
            tracing::debug!("Fetch for {:?} failed: {}", city, app_err.user_message());
        }

        let outcome = self.session.complete(generation, result);
        if outcome != FetchOutcome::Superseded {
            self.in_flight = None;
        }
        outcome
    }

    pub fn settings(&self) -> Settings {
        self.settings.settings()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn session(&self) -> &WeatherSession {
        &self.session
    }

    pub fn panel(&self) -> PanelView<'_> {
        PanelView {
            settings: self.settings.settings(),
            city: &self.city,
            snapshot: self.session.snapshot(),
            fetching: self.session.is_fetching(),
        }
    }

    /// Cancel pending work.
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    fn issue_fetch(&mut self, city: &str) {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        let ticket = self.session.begin(city);
        let token = CancellationToken::new();
        request_fetch(&self.tx, self.provider.clone(), ticket, token.clone());
        self.in_flight = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxglance_core::{Language, MemoryStore, Theme};
    use wxglance_weather::WeatherError;

    fn app() -> WidgetApp<MemoryStore> {
        let provider = Arc::new(
            WeatherProvider::with_base_url("http://127.0.0.1:9", "k", Duration::from_secs(1))
                .unwrap(),
        );
        WidgetApp::new(
            SettingsStore::load(MemoryStore::new()),
            provider,
            "London",
            Duration::from_millis(400),
        )
    }

    #[test]
    fn test_settings_actions_update_settings() {
        let mut app = app();
        let now = Instant::now();
        assert!(app.handle(Action::SetLanguage(Language::Et), now));
        assert!(app.handle(Action::SetTheme(Theme::Dark), now));
        assert_eq!(app.settings().language, Language::Et);
        assert_eq!(app.settings().theme, Theme::Dark);
        assert_eq!(app.panel().lines()[0], "Ilmaprognoos");
    }

    #[test]
    fn test_city_edit_waits_for_quiet_period() {
        let mut app = app();
        let now = Instant::now();
        app.handle(Action::SetCity("Paris".into()), now);

        assert_eq!(app.city(), "Paris");
        assert_eq!(app.debounce_deadline(), Some(now + Duration::from_millis(400)));
        assert!(!app.fire_debounced(now + Duration::from_millis(100)));
        assert_eq!(app.session().latest_generation(), 0);
    }

    #[test]
    fn test_unchanged_city_does_not_schedule_fetch() {
        let mut app = app();
        app.handle(Action::SetCity("London".into()), Instant::now());
        assert_eq!(app.debounce_deadline(), None);
    }

    #[test]
    fn test_quit_stops_loop_and_drops_pending_edit() {
        let mut app = app();
        let now = Instant::now();
        app.handle(Action::SetCity("Paris".into()), now);
        assert!(!app.handle(Action::Quit, now));
        assert_eq!(app.debounce_deadline(), None);
    }

    #[tokio::test]
    async fn test_superseded_result_keeps_newer_fetch_in_flight() {
        let mut app = app();
        let now = Instant::now();
        app.start();
        app.handle(Action::SetCity("Paris".into()), now);
        assert!(app.fire_debounced(now + Duration::from_millis(400)));
        assert_eq!(app.session().latest_generation(), 2);

        // Result of the first fetch, queued before it could be cancelled.
        let outcome = app.apply(WeatherServiceMessage::FetchDone {
            generation: 1,
            city: "London".into(),
            result: Err(WeatherError::Parse("late".into())),
        });

        assert_eq!(outcome, FetchOutcome::Superseded);
        assert!(app.session().is_fetching());
        let token = app.in_flight.as_ref().expect("newer fetch still tracked");
        assert!(!token.is_cancelled());
    }
}
