//! Weather backend: async weather fetching.
//! Network work runs on spawned tasks; results come back to the UI loop via mpsc.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use wxglance_weather::{FetchTicket, WeatherError, WeatherProvider, WeatherSnapshot};

/// Messages sent from async operations back to the UI loop
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of the fetch issued as `generation`
    FetchDone {
        generation: u64,
        city: String,
        result: Result<WeatherSnapshot, WeatherError>,
    },
}

/// Fetch weather for `ticket.city` on a spawned task.
///
/// Sends `FetchDone` when the request finishes. If `cancel` fires first the
/// task ends without sending anything.
pub fn request_fetch(
    tx: &UnboundedSender<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    ticket: FetchTicket,
    cancel: CancellationToken,
) {
    let tx = tx.clone();

    tokio::spawn(async move {
        let FetchTicket { generation, city } = ticket;

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Fetch #{} for {:?} cancelled", generation, city);
                return;
            }
            result = provider.fetch(&city) => result,
        };

        if tx
            .send(WeatherServiceMessage::FetchDone {
                generation,
                city,
                result,
            })
            .is_err()
        {
            tracing::debug!("Fetch #{} finished after the UI loop closed", generation);
        }
    });
}
