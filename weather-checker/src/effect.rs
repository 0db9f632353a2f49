//! Effects - side effects declared by the reducer
//!
//! Effects are returned from the reducer and handled by the runtime.
//! This keeps the reducer pure while making async operations explicit.

use tracing::{info, warn};

use crate::action::Action;
use crate::api::WeatherClient;
use crate::state::RequestId;
use crate::tasks::TaskManager;

/// Key under which the weather fetch runs. A new fetch replaces the old one.
pub const WEATHER_TASK: &str = "weather";

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch current weather for the city
    FetchWeather { request: RequestId, city: String },
}

/// Result of dispatching an action: whether state changed, plus effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl Default for DispatchResult {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl DispatchResult {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// State changed and one effect to run.
    #[inline]
    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Build from a plain "did it change" flag.
    #[inline]
    pub fn from_changed(changed: bool) -> Self {
        Self {
            changed,
            effects: vec![],
        }
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Turns effects into tasks.
#[derive(Clone, Debug)]
pub struct EffectHandler {
    client: WeatherClient,
}

impl EffectHandler {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    pub fn handle(&self, effect: Effect, tasks: &mut TaskManager) {
        match effect {
            Effect::FetchWeather { request, city } => {
                let client = self.client.clone();
                info!(%request, city = %city, url = %client.redacted_url(&city), "fetching weather");

                tasks.spawn(WEATHER_TASK, async move {
                    let result = client.fetch_weather(&city).await;
                    if let Err(e) = &result {
                        warn!(%request, city = %city, error = %e, "weather fetch failed");
                    }
                    Action::WeatherDidFetch { request, result }
                });
            }
        }
    }
}
