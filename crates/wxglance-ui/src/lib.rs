pub mod action;
pub mod app;
pub mod error_mapping;
pub mod services;
pub mod view;

pub use action::{parse, Action, CommandError, USAGE};
pub use app::WidgetApp;
pub use services::WeatherServiceMessage;
pub use view::{Palette, PanelView};
