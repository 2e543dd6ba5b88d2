pub mod dialog;
pub mod forecast_row;
pub mod search_overlay;
pub mod weather_body;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use dialog::{MessageDialog, MessageDialogProps};
pub use forecast_row::{ForecastRow, ForecastRowProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};
