//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Dialog};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetch => {
            let Some(city) = state.city.clone() else {
                // Nothing to refresh until a city has been submitted
                return DispatchResult::unchanged();
            };
            start_fetch(state);
            DispatchResult::changed_with(Effect::FetchWeather { city })
        }

        Action::WeatherDidLoad(report) => {
            state.weather = DataResource::Loaded(report);
            state.is_refreshing = false;
            // Successful fetch resets the field to its placeholder state
            state.input.reset();
            DispatchResult::changed()
        }

        Action::WeatherDidError(msg) => {
            state.is_refreshing = false;
            // A failed refresh keeps the last report on screen; only an
            // initial fetch moves the body into the error rendering
            if state.weather.is_loading() {
                state.weather = DataResource::Failed(msg.clone());
            }
            state.dialog = Some(Dialog::error(msg));
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchOpen => {
            state.search_mode = true;
            state.input.focus_gained();
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_mode = false;
            state.input.focus_lost();
            DispatchResult::changed()
        }

        Action::SearchInputChange(text) => {
            state.input.set_text(text);
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            let Some(query) = state.input.query().map(str::to_string) else {
                state.dialog = Some(Dialog::warning("Please enter a city"));
                return DispatchResult::changed();
            };

            state.city = Some(query.clone());
            state.search_mode = false;
            // Typed text survives until the fetch succeeds, so a failed
            // lookup can be corrected instead of retyped
            state.input.focus_lost();
            start_fetch(state);
            DispatchResult::changed_with(Effect::FetchWeather { city: query })
        }

        // ===== Dialog actions =====
        Action::DialogDismiss => {
            if state.dialog.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.spinner_active() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Shared fetch kickoff: keep showing loaded data during a refresh,
/// otherwise enter the loading state
fn start_fetch(state: &mut AppState) {
    if state.weather.is_loaded() {
        state.is_refreshing = true;
    } else {
        state.weather = DataResource::Loading;
    }
    state.tick_count = 0;
}
