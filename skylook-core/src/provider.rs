use crate::{
    Config, LookupError,
    config::{Endpoints, REQUEST_TIMEOUT},
    model::{CurrentWeather, ForecastResponse, ResolvedLocation, Units},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The three read-only upstream calls a lookup needs.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// First geocoding match for `query`, or [`LookupError::NotFound`].
    async fn geocode(&self, query: &str) -> Result<ResolvedLocation, LookupError>;

    async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<CurrentWeather, LookupError>;

    /// Up to five days of 3-hour entries, oldest first.
    async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<ForecastResponse, LookupError>;
}

/// Construct the OpenWeather provider from config, resolving the API key
/// from the environment first.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, LookupError> {
    let provider =
        OpenWeatherProvider::new(config.api_key(), Endpoints::default(), REQUEST_TIMEOUT)?;
    Ok(Box::new(provider))
}

/// Stand-in for a missing or malformed API key. Every call fails with
/// [`LookupError::ApiKeyMissing`] without touching the network, so a session
/// keeps running and reports the problem on each lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unconfigured;

#[async_trait]
impl WeatherProvider for Unconfigured {
    async fn geocode(&self, _query: &str) -> Result<ResolvedLocation, LookupError> {
        Err(LookupError::ApiKeyMissing)
    }

    async fn current_weather(
        &self,
        _lat: f64,
        _lon: f64,
        _units: Units,
    ) -> Result<CurrentWeather, LookupError> {
        Err(LookupError::ApiKeyMissing)
    }

    async fn forecast(
        &self,
        _lat: f64,
        _lon: f64,
        _units: Units,
    ) -> Result<ForecastResponse, LookupError> {
        Err(LookupError::ApiKeyMissing)
    }
}
