//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::glyphs;

/// Default prompt shown in the empty, unfocused city field
pub const PLACEHOLDER: &str = "Enter city";

/// Spinner timing for the loading indicator.
pub const LOADING_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Pick the spinner frame for a tick counter
pub fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNER_FRAMES[tick_count as usize % SPINNER_FRAMES.len()]
}

// ============================================================================
// Weather report
// ============================================================================

/// Current conditions from wttr.in. Values stay as the strings the API
/// returns (`"18"`, `"60"`, ...) - we format, never parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurrentConditions {
    pub description: String,
    pub temp_c: String,
    pub humidity: String,
    pub wind_kmph: String,
}

impl CurrentConditions {
    /// Multi-line text block for the current-conditions panel
    pub fn display(&self) -> String {
        format!(
            "{}  {}\n\nTemperature: {} °C\nHumidity: {}%\nWind: {} km/h",
            glyphs::classify(&self.description),
            self.description,
            self.temp_c,
            self.humidity,
            self.wind_kmph,
        )
    }
}

/// One forecast day with its representative hourly description
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastDay {
    pub date: String,
    pub description: String,
    pub max_temp_c: String,
    pub min_temp_c: String,
}

impl ForecastDay {
    /// Multi-line text block for one forecast card
    pub fn display(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n{}° / {}°",
            glyphs::classify(&self.description),
            self.date,
            self.description,
            self.max_temp_c,
            self.min_temp_c,
        )
    }
}

/// Everything one successful fetch produces
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    /// City the report was fetched for
    pub city: String,
    pub current: CurrentConditions,
    /// Up to three days, in order
    pub forecast: Vec<ForecastDay>,
}

// ============================================================================
// City input
// ============================================================================

/// The search field. Either the muted placeholder prompt or user text;
/// never an empty string while unfocused.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum CityInput {
    #[default]
    Placeholder,
    UserText(String),
}

impl CityInput {
    /// Focus gained: the placeholder clears to an editable empty string
    pub fn focus_gained(&mut self) {
        if matches!(self, CityInput::Placeholder) {
            *self = CityInput::UserText(String::new());
        }
    }

    /// Focus lost: an empty field reverts to the placeholder, text persists
    pub fn focus_lost(&mut self) {
        if matches!(self, CityInput::UserText(text) if text.is_empty()) {
            *self = CityInput::Placeholder;
        }
    }

    pub fn set_text(&mut self, text: String) {
        *self = CityInput::UserText(text);
    }

    /// Back to the placeholder state (after a successful fetch)
    pub fn reset(&mut self) {
        *self = CityInput::Placeholder;
    }

    /// Text currently shown in the field
    pub fn display_text(&self) -> &str {
        match self {
            CityInput::Placeholder => PLACEHOLDER,
            CityInput::UserText(text) => text,
        }
    }

    /// Placeholder text renders in a muted color
    pub fn is_muted(&self) -> bool {
        matches!(self, CityInput::Placeholder)
    }

    /// Validated query: trimmed user text that is neither empty nor the
    /// placeholder prompt itself
    pub fn query(&self) -> Option<&str> {
        let trimmed = self.display_text().trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER {
            None
        } else {
            Some(trimmed)
        }
    }
}

// ============================================================================
// Dialogs
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum DialogKind {
    Warning,
    Error,
}

/// A modal message box, dismissed with Enter or Esc
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Warning,
            title: "Input Error".into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: "Error".into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// App state
// ============================================================================

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// City of the last submitted query, if any
    #[debug(section = "Weather", label = "City", debug_fmt)]
    pub city: Option<String>,

    /// Weather report lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Report", debug_fmt)]
    pub weather: DataResource<WeatherReport>,

    /// Whether a refresh is in progress (keeps showing current data during fetch)
    #[debug(section = "Weather", label = "Refreshing")]
    pub is_refreshing: bool,

    // --- Input (skipped) ---
    /// Placeholder / user-text state of the search field
    #[debug(skip)]
    pub input: CityInput,

    /// Whether the search overlay is open (field focused)
    #[debug(skip)]
    pub search_mode: bool,

    /// Pending modal message box, if any
    #[debug(skip)]
    pub dialog: Option<Dialog>,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state with an optional initial city (from the CLI)
    pub fn new(city: Option<String>) -> Self {
        Self {
            city,
            weather: DataResource::Empty,
            is_refreshing: false,
            input: CityInput::Placeholder,
            search_mode: false,
            dialog: None,
            tick_count: 0,
        }
    }

    pub fn spinner_active(&self) -> bool {
        self.weather.is_loading() || self.is_refreshing
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_gained_clears_placeholder() {
        let mut input = CityInput::Placeholder;
        input.focus_gained();
        assert_eq!(input, CityInput::UserText(String::new()));
        assert!(!input.is_muted());
    }

    #[test]
    fn test_focus_gained_keeps_user_text() {
        let mut input = CityInput::UserText("Lon".into());
        input.focus_gained();
        assert_eq!(input.display_text(), "Lon");
    }

    #[test]
    fn test_focus_lost_restores_placeholder_when_empty() {
        let mut input = CityInput::UserText(String::new());
        input.focus_lost();
        assert_eq!(input, CityInput::Placeholder);
        assert_eq!(input.display_text(), PLACEHOLDER);
        assert!(input.is_muted());
    }

    #[test]
    fn test_focus_lost_keeps_content() {
        let mut input = CityInput::UserText("Tokyo".into());
        input.focus_lost();
        assert_eq!(input, CityInput::UserText("Tokyo".into()));
    }

    #[test]
    fn test_query_rejects_placeholder_and_empty() {
        assert_eq!(CityInput::Placeholder.query(), None);
        assert_eq!(CityInput::UserText("".into()).query(), None);
        assert_eq!(CityInput::UserText("   ".into()).query(), None);
        assert_eq!(CityInput::UserText(PLACEHOLDER.into()).query(), None);
    }

    #[test]
    fn test_query_trims() {
        let input = CityInput::UserText("  Paris  ".into());
        assert_eq!(input.query(), Some("Paris"));
    }

    #[test]
    fn test_current_display_contains_units() {
        let current = CurrentConditions {
            description: "Partly cloudy".into(),
            temp_c: "18".into(),
            humidity: "60".into(),
            wind_kmph: "10".into(),
        };

        let text = current.display();
        assert!(text.contains("18 °C"));
        assert!(text.contains("60%"));
        assert!(text.contains("10 km/h"));
        assert!(text.contains("Partly cloudy"));
    }

    #[test]
    fn test_forecast_display_has_date_and_range() {
        let day = ForecastDay {
            date: "2026-08-29".into(),
            description: "Light rain".into(),
            max_temp_c: "24".into(),
            min_temp_c: "15".into(),
        };

        let text = day.display();
        assert!(text.contains("2026-08-29"));
        assert!(text.contains("24° / 15°"));
        assert!(text.contains("Light rain"));
    }

    #[test]
    fn test_spinner_frame_wraps() {
        let frames = SPINNER_FRAMES.len() as u32;
        assert_eq!(spinner_frame(0), spinner_frame(frames));
        assert_eq!(spinner_frame(3), spinner_frame(frames + 3));
    }
}
