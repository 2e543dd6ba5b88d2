//! Actions - every event the reducer can process

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: (re-)fetch weather for the current city
    WeatherFetch,

    /// Result: report loaded successfully
    WeatherDidLoad(WeatherReport),

    /// Result: fetch failed (timeout, DNS, non-2xx, malformed payload)
    WeatherDidError(String),

    // ===== Search category =====
    /// Open the search overlay (the city field gains focus)
    SearchOpen,

    /// Close the overlay without submitting (the field loses focus)
    SearchClose,

    /// City field text changed
    SearchInputChange(String),

    /// Submit the city field
    SearchSubmit,

    // ===== Dialog category =====
    /// Dismiss the open warning/error dialog
    DialogDismiss,

    // ===== Uncategorized (global) =====
    /// Force a re-render
    Render,

    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
