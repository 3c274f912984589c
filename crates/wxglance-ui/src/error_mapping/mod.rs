//! Maps weather crate errors to wxglance_core::AppError for consistent user-facing messages.

mod weather;

pub(crate) use weather::to_app_error;
