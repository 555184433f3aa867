//! Core library for the `skylook` weather lookup tool.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - A short-lived lookup cache and the event-driven session
//! - Pure presentation helpers (icons, compass, units, grouping) and the view model
//!
//! It is used by `skylook-cli`, but can also be reused by other front ends.

pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod icons;
pub mod model;
pub mod provider;
pub mod session;
pub mod view;

pub use cache::LookupCache;
pub use config::{ApiKey, Config, Endpoints};
pub use error::LookupError;
pub use model::{CurrentWeather, ForecastEntry, ForecastResponse, ResolvedLocation, Settings, Units};
pub use provider::{
    Unconfigured, WeatherProvider, openweather::OpenWeatherProvider, provider_from_config,
};
pub use session::{Event, Screen, Session, WeatherReport};
pub use view::{ScreenView, screen_view};
