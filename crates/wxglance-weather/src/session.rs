//! Holds the single displayed snapshot and decides which fetch results may
//! replace it.
//!
//! Every issued fetch gets a generation number. Only the result carrying the
//! latest generation is applied; anything older is dropped on arrival, so a
//! slow response for an earlier city can't overwrite a newer one.

use crate::types::{WeatherError, WeatherSnapshot};

/// Handle for one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub city: String,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Latest fetch succeeded; the snapshot was replaced.
    Applied,
    /// A newer fetch was issued since; the result was discarded.
    Superseded,
    /// Latest fetch failed; the previous snapshot (if any) stays.
    Failed,
}

#[derive(Debug, Default)]
pub struct WeatherSession {
    snapshot: Option<WeatherSnapshot>,
    latest_generation: u64,
    pending: Option<u64>,
}

impl WeatherSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new fetch for `city`, superseding any in flight.
    pub fn begin(&mut self, city: &str) -> FetchTicket {
        self.latest_generation += 1;
        self.pending = Some(self.latest_generation);
        tracing::debug!("Issuing fetch #{} for {:?}", self.latest_generation, city);
        FetchTicket {
            generation: self.latest_generation,
            city: city.to_string(),
        }
    }

    /// Record the result of the fetch issued as `generation`.
    ///
    /// Never returns an error: failures are logged and leave the snapshot as it was.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<WeatherSnapshot, WeatherError>,
    ) -> FetchOutcome {
        if generation != self.latest_generation {
            tracing::debug!("Dropping fetch #{generation}, latest is #{}", self.latest_generation);
            return FetchOutcome::Superseded;
        }

        self.pending = None;

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    "Weather updated: {} {}",
                    snapshot.city_display_name,
                    snapshot.condition_code
                );
                self.snapshot = Some(snapshot);
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Error fetching weather data: {}", e);
                FetchOutcome::Failed
            }
        }
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    /// True while the latest issued fetch has not completed.
    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }
}
