//! Forecast panel: turns a weather payload into the content of a fixed
//! set of UI slots, and drives the fetch flows that produce payloads.

pub mod background;
pub mod cards;
pub mod display;
pub mod error;
pub mod error_mapping;
pub mod icons;
pub mod panel;
pub mod port;
pub mod renderer;
pub mod services;
pub mod widget;
pub mod window;

pub use background::{select_gradient, Gradient};
pub use cards::{map_cards, weekday_name, WeekdayCard};
pub use display::{format_temp, whole_degrees, DisplayModel, HourlySlot};
pub use error::{RenderError, ServiceError};
pub use icons::{resolve_icon, resolve_tag, IconAsset};
pub use panel::TextPanel;
pub use port::UiPort;
pub use renderer::ForecastRenderer;
pub use services::{FetchOrigin, FetchedForecast, WeatherServiceMessage, WidgetServices};
pub use widget::WeatherWidget;
pub use window::{select_window, window_label, WINDOW_LEN};
