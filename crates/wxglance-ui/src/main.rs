use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};
use wxglance_core::{
    AppError, Config, ConfigError, JsonFileStore, KeyValueStore, MemoryStore, SettingsStore,
};
use wxglance_ui::{parse, WeatherServiceMessage, WidgetApp, USAGE};
use wxglance_weather::WeatherProvider;

enum Event {
    Input(Option<String>),
    Fetched(WeatherServiceMessage),
    DebounceElapsed,
}

#[tokio::main]
async fn main() -> Result<()> {
    wxglance_core::init()?;

    let (config, _validation) = Config::load_validated().map_err(report_config_error)?;

    match JsonFileStore::open_or_reset(config.settings_path()) {
        Ok(storage) => run(&config, storage).await,
        Err(e) => {
            let app_err = AppError::Storage(e);
            tracing::warn!("{} ({})", app_err.user_message(), app_err);
            run(&config, MemoryStore::new()).await
        }
    }
}

fn report_config_error(err: anyhow::Error) -> anyhow::Error {
    match err.downcast::<ConfigError>() {
        Ok(config_err) => {
            let app_err = AppError::Config(config_err);
            tracing::error!("{}", app_err.user_message());
            app_err.into()
        }
        Err(other) => other,
    }
}

async fn run<S: KeyValueStore>(config: &Config, storage: S) -> Result<()> {
    let provider = WeatherProvider::with_base_url(
        &config.weather.api_base_url,
        &config.weather.api_key,
        Duration::from_secs(config.weather.request_timeout_secs),
    )
    .context("Failed to build HTTP client")?;

    let mut app = WidgetApp::new(
        SettingsStore::load(storage),
        Arc::new(provider),
        &config.weather.default_city,
        Duration::from_millis(config.weather.debounce_ms),
    );
    app.start();

    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    app.panel().draw(&mut stdout)?;

    loop {
        let deadline = app.debounce_deadline();

        let event = tokio::select! {
            line = lines.next_line() => Event::Input(line.context("Failed to read input")?),
            Some(message) = app.next_message() => Event::Fetched(message),
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                Event::DebounceElapsed
            }
        };

        match event {
            Event::Input(None) => {
                tracing::debug!("Input closed");
                app.shutdown();
                break;
            }
            Event::Input(Some(line)) => match parse(&line) {
                Ok(action) => {
                    if !app.handle(action, Instant::now()) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    app.panel().draw(&mut stdout)?;
                    writeln!(stdout, "{e}\r\n{USAGE}")?;
                    continue;
                }
            },
            Event::Fetched(message) => {
                app.apply(message);
            }
            Event::DebounceElapsed => {
                app.fire_debounced(Instant::now());
            }
        }

        app.panel().draw(&mut stdout)?;
    }

    tracing::info!("wxglance exiting");
    Ok(())
}
