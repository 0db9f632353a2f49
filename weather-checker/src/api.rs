//! OpenWeatherMap client
//!
//! Pattern: Async Side Effects
//! - `WeatherFetch` intent makes the reducer emit a `FetchWeather` effect
//! - The effect handler spawns `fetch_weather` as a task
//! - The task result comes back as a `WeatherDidFetch` action
//! - No async in reducer or component - side effects are isolated

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::ApiConfig;

/// Why a fetch produced no body
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("server answered {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
    lang: String,
}

impl WeatherClient {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim().to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            lang: config.lang.clone(),
        })
    }

    /// Request URL for `city`. The city and language are percent-encoded.
    pub fn request_url(&self, city: &str) -> String {
        format!(
            "{}?lang={}&q={}&APPID={}",
            self.base_url,
            urlencoding::encode(&self.lang),
            urlencoding::encode(city),
            urlencoding::encode(&self.api_key)
        )
    }

    /// Same as `request_url` with the key masked, for logs.
    pub fn redacted_url(&self, city: &str) -> String {
        format!(
            "{}?lang={}&q={}&APPID=***",
            self.base_url,
            urlencoding::encode(&self.lang),
            urlencoding::encode(city)
        )
    }

    /// Perform one GET and read the whole body as UTF-8 text.
    ///
    /// No retry. The response is dropped (and the connection released) on
    /// every exit path, including task cancellation.
    pub async fn fetch_weather(&self, city: &str) -> Result<String, FetchError> {
        let url = reqwest::Url::parse(&self.request_url(city))
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        debug!(url = %self.redacted_url(city), "start HTTP request");

        let response = self.http.get(url).send().await?.error_for_status()?;
        // Always UTF-8, whatever charset the server declares
        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(bytes = body.len(), "weather response received");
        Ok(body)
    }
}
