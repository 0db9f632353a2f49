//! Actions
//!
//! Pattern: Action naming convention
//! - Prefix groups related actions: CityDropdownToggle, CitySelect -> "city"
//! - "Did" prefix indicates async result
//! - Verbs at end: Fetch, Toggle, Close, Select, Quit

use crate::api::FetchError;
use crate::state::RequestId;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== City category =====
    /// Open or close the city dropdown
    CityDropdownToggle,

    /// Close the dropdown, keeping the current selection
    CityDropdownClose,

    /// Select the city at this index
    CitySelect(usize),

    // ===== Weather category =====
    /// Intent: fetch weather for the selected city (the "button press")
    WeatherFetch,

    /// Result: a fetch finished, successfully or not
    WeatherDidFetch {
        request: RequestId,
        result: Result<String, FetchError>,
    },

    // ===== Uncategorized (global) =====
    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}

impl Action {
    /// Variant name for logging and filtering
    pub fn name(&self) -> &'static str {
        match self {
            Action::CityDropdownToggle => "CityDropdownToggle",
            Action::CityDropdownClose => "CityDropdownClose",
            Action::CitySelect(_) => "CitySelect",
            Action::WeatherFetch => "WeatherFetch",
            Action::WeatherDidFetch { .. } => "WeatherDidFetch",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    /// Concise one-line form for the action log.
    /// Response bodies are summarized by size instead of printed.
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherDidFetch {
                request,
                result: Ok(body),
            } => format!("WeatherDidFetch {{ {request}, ok: {} bytes }}", body.len()),
            Action::WeatherDidFetch {
                request,
                result: Err(e),
            } => {
                let msg = e.to_string();
                let msg = if msg.chars().count() > 40 {
                    format!("{}...", msg.chars().take(37).collect::<String>())
                } else {
                    msg
                };
                format!("WeatherDidFetch {{ {request}, err: {msg:?} }}")
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_hides_body() {
        let action = Action::WeatherDidFetch {
            request: RequestId(3),
            result: Ok(r#"{"name":"Kobe","weather":[]}"#.into()),
        };
        let summary = action.summary();
        assert!(summary.contains("#3"));
        assert!(summary.contains("28 bytes"));
        assert!(!summary.contains("Kobe"));
    }

    #[test]
    fn test_summary_truncates_errors() {
        let action = Action::WeatherDidFetch {
            request: RequestId(1),
            result: Err(FetchError::Transport("x".repeat(100))),
        };
        assert!(action.summary().contains("..."));
    }
}
