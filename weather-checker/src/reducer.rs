//! Reducer - (state, action) -> state + effects
//!
//! Pattern: Reducer
//! - fn(state: &mut S, action: A) -> DispatchResult
//! - `changed` tells the runtime to re-render
//! - All state mutations happen here, on the UI loop
//! - Side effects are only declared, never performed

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::report;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult {
    match action {
        // ===== City actions =====
        Action::CityDropdownToggle => {
            state.dropdown_open = !state.dropdown_open;
            DispatchResult::changed()
        }

        Action::CityDropdownClose => {
            let was_open = state.dropdown_open;
            state.dropdown_open = false;
            DispatchResult::from_changed(was_open)
        }

        Action::CitySelect(index) => {
            if index >= state.cities.len() || index == state.selected {
                return DispatchResult::unchanged();
            }
            state.selected = index;
            DispatchResult::changed()
        }

        // ===== Weather actions =====
        Action::WeatherFetch => {
            let Some(city) = state.selected_city().map(str::to_owned) else {
                return DispatchResult::unchanged();
            };

            state.dropdown_open = false;
            let request = state.begin_request();
            DispatchResult::changed_with(Effect::FetchWeather { request, city })
        }

        Action::WeatherDidFetch { request, result } => {
            if state.pending != Some(request) {
                debug!(%request, pending = ?state.pending, "dropping stale weather result");
                return DispatchResult::unchanged();
            }
            state.pending = None;

            // Labels only change on a fully decoded report
            match result.map(|body| report::decode(&body)) {
                Ok(Ok(report)) => {
                    info!(%request, city = %report.city_name, "weather updated");
                    state.labels.city = Some(report.city_name);
                    state.labels.description = Some(report.description);
                    state.status = None;
                }
                Ok(Err(e)) => {
                    warn!(%request, error = %e, "failed to decode weather response");
                    state.status = Some(e.to_string());
                }
                Err(e) => {
                    state.status = Some(e.to_string());
                }
            }
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // only re-render if loading (for spinner animation)
            DispatchResult::from_changed(state.is_loading())
        }

        Action::Quit => {
            // Quit is handled in the runtime loop, not here
            DispatchResult::unchanged()
        }
    }
}
