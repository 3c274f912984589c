//! Weather lookup for wxglance
//!
//! Fetches current conditions for a city from the OpenWeatherMap API and
//! keeps the single snapshot the interface displays.

pub mod debounce;
pub mod provider;
pub mod session;
pub mod types;

pub use debounce::Debouncer;
pub use provider::WeatherProvider;
pub use session::{FetchOutcome, FetchTicket, WeatherSession};
pub use types::*;
