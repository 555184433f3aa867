use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    config::{ApiKey, Endpoints},
    error::LookupError,
    model::{CurrentWeather, ForecastResponse, GeocodeMatch, ResolvedLocation, Units},
};

use super::WeatherProvider;

/// HTTP client for the OpenWeather geocoding, current-weather and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: ApiKey,
    endpoints: Endpoints,
    timeout: Duration,
    http: Client,
}

impl OpenWeatherProvider {
    /// Fails with [`LookupError::ApiKeyMissing`] before any request is made
    /// when the key is not a well-formed OpenWeather key.
    pub fn new(api_key: ApiKey, endpoints: Endpoints, timeout: Duration) -> Result<Self, LookupError> {
        if !api_key.is_valid_format() {
            warn!(placeholder = api_key.is_placeholder(), "refusing to use malformed API key");
            return Err(LookupError::ApiKeyMissing);
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { api_key, endpoints, timeout, http })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        what: &str,
    ) -> Result<T, LookupError> {
        let res = self
            .http
            .get(url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "{what} request failed");
                if e.is_timeout() {
                    LookupError::Network(format!(
                        "{what} request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    LookupError::Network(format!("failed to send {what} request: {e}"))
                }
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LookupError::Network(format!("failed to read {what} response body: {e}")))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("{what} request rate limited");
            return Err(LookupError::RateLimited);
        }

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "{what} request failed");
            return Err(LookupError::Api { status: status.as_u16() });
        }

        debug!(%status, bytes = body.len(), "{what} response received");

        serde_json::from_str(&body)
            .map_err(|e| LookupError::Malformed(format!("failed to parse {what} JSON: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<ResolvedLocation, LookupError> {
        let matches: Vec<GeocodeMatch> = self
            .get_json(
                &self.endpoints.geocoding,
                &[("q", query.to_string()), ("limit", "1".to_string())],
                "geocoding",
            )
            .await?;

        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound { query: query.to_string() })?;

        debug!(lat = first.lat, lon = first.lon, name = ?first.name, "location resolved");
        Ok(first.into())
    }

    #[instrument(skip(self))]
    async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<CurrentWeather, LookupError> {
        let weather: CurrentWeather = self
            .get_json(&self.endpoints.current_weather, &coord_params(lat, lon, units), "current weather")
            .await?;

        if weather.weather.is_empty() {
            return Err(LookupError::Malformed(
                "current weather response contained no condition".to_string(),
            ));
        }

        Ok(weather)
    }

    #[instrument(skip(self))]
    async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<ForecastResponse, LookupError> {
        let forecast: ForecastResponse = self
            .get_json(&self.endpoints.forecast, &coord_params(lat, lon, units), "forecast")
            .await?;

        debug!(entries = forecast.list.len(), "forecast decoded");
        Ok(forecast)
    }
}

fn coord_params(lat: f64, lon: f64, units: Units) -> [(&'static str, String); 3] {
    [
        ("lat", lat.to_string()),
        ("lon", lon.to_string()),
        ("units", units.as_str().to_string()),
    ]
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PLACEHOLDER_API_KEY, REQUEST_TIMEOUT};

    #[test]
    fn placeholder_key_is_a_configuration_error() {
        let err = OpenWeatherProvider::new(
            ApiKey::new(PLACEHOLDER_API_KEY),
            Endpoints::default(),
            REQUEST_TIMEOUT,
        )
        .unwrap_err();
        assert_eq!(err, LookupError::ApiKeyMissing);
    }

    #[test]
    fn well_formed_key_builds_client() {
        let provider = OpenWeatherProvider::new(
            ApiKey::new("0123456789abcdef0123456789abcdef"),
            Endpoints::default(),
            REQUEST_TIMEOUT,
        );
        assert!(provider.is_ok());
    }

    #[test]
    fn coord_params_carry_units() {
        let params = coord_params(48.8566, 2.3522, Units::Imperial);
        assert_eq!(params[0], ("lat", "48.8566".to_string()));
        assert_eq!(params[1], ("lon", "2.3522".to_string()));
        assert_eq!(params[2], ("units", "imperial".to_string()));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
