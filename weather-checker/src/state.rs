//! Application state - single source of truth
//!
//! Pattern: State is immutable from component perspective
//! - Components receive `&AppState` as props
//! - Only the reducer mutates state
//! - The reducer runs on the UI loop, so labels are never touched from a fetch task

use crate::permission::PermissionStatus;

/// Loading spinner frame interval
pub const LOADING_ANIM_TICK_MS: u64 = 80;

/// Identifies one fetch. Results carrying an older id are stale and dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        RequestId(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two presenter labels
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherLabels {
    /// City name as resolved by the weather API
    pub city: Option<String>,
    /// Weather description of the first `weather` entry
    pub description: Option<String>,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug)]
pub struct AppState {
    /// Cities offered by the dropdown (never empty)
    pub cities: Vec<String>,

    /// Index into `cities`
    pub selected: usize,

    /// Whether the dropdown list is expanded
    pub dropdown_open: bool,

    /// Presenter output
    pub labels: WeatherLabels,

    /// Fetch currently awaited by the presenter
    pub pending: Option<RequestId>,

    /// Last id handed out
    pub last_request: RequestId,

    /// Short description of the last failure, cleared on success
    pub status: Option<String>,

    /// Location permission observed at startup (not used by the fetch flow)
    pub permission: PermissionStatus,

    /// Animation frame counter (for loading spinner)
    pub tick_count: u32,
}

impl AppState {
    /// Create state for the given city list. An empty list falls back to the
    /// bundled cities.
    pub fn new(cities: Vec<String>) -> Self {
        let cities = if cities.is_empty() {
            crate::cities::bundled()
        } else {
            cities
        };

        Self {
            cities,
            selected: 0,
            dropdown_open: false,
            labels: WeatherLabels::default(),
            pending: None,
            last_request: RequestId::default(),
            status: None,
            permission: PermissionStatus::default(),
            tick_count: 0,
        }
    }

    /// Currently chosen city
    pub fn selected_city(&self) -> Option<&str> {
        self.cities.get(self.selected).map(String::as_str)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Hand out a fresh request id and mark it pending.
    pub fn begin_request(&mut self) -> RequestId {
        self.last_request = self.last_request.next();
        self.pending = Some(self.last_request);
        self.last_request
    }

    /// Select the city matching `name` (case-insensitive). Returns false when
    /// the name is not in the list.
    pub fn preselect(&mut self, name: &str) -> bool {
        let name = name.trim();
        match self
            .cities
            .iter()
            .position(|city| city.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
