use wxglance_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use wxglance_weather::WeatherError as ProviderError;

/// Convert a provider error into the shared application error.
pub(crate) fn to_app_error(e: &ProviderError) -> AppError {
    match e {
        ProviderError::Network(err) => AppError::Network(err.to_network_error()),
        ProviderError::CityNotFound(city) => {
            AppError::Weather(WeatherError::LocationNotFound(city.clone()))
        }
        ProviderError::Unauthorized => AppError::Weather(WeatherError::InvalidApiKey),
        ProviderError::Api { status, .. } if *status >= 500 => {
            AppError::Weather(WeatherError::ServiceUnavailable)
        }
        ProviderError::Api { status, message } => {
            AppError::Weather(WeatherError::ApiError(format!("{status}: {message}")))
        }
        ProviderError::Parse(msg) => AppError::Network(NetworkError::InvalidResponse(msg.clone())),
    }
}
