//! Decoding of the current-weather response into the two presenter labels

use serde::Deserialize;
use thiserror::Error;

/// Raw response from the OpenWeatherMap current weather endpoint.
/// Only the fields the presenter reads are declared.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: String,
    weather: Vec<WeatherEntry>,
}

#[derive(Debug, Deserialize)]
struct WeatherEntry {
    description: String,
}

/// What the presenter shows for one fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherReport {
    pub city_name: String,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed JSON, missing fields or wrong field types
    #[error("invalid weather response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("weather response has no conditions")]
    EmptyWeather,
}

/// Decode a response body. Only the first `weather` entry is read.
pub fn decode(body: &str) -> Result<WeatherReport, DecodeError> {
    let response: WeatherResponse = serde_json::from_str(body)?;

    let first = response
        .weather
        .into_iter()
        .next()
        .ok_or(DecodeError::EmptyWeather)?;

    Ok(WeatherReport {
        city_name: response.name,
        description: first.description,
    })
}
