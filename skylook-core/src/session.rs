//! Interactive lookup state.
//!
//! Every user action is an [`Event`]; [`Session::handle`] applies it and
//! returns the [`Screen`] to render. Lookups go through the session's own
//! [`LookupCache`], and all upstream calls of one pass run one after another.

use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::{
    cache::{CoordKey, LookupCache},
    error::LookupError,
    model::{CurrentWeather, ForecastResponse, ResolvedLocation, Settings},
    provider::WeatherProvider,
};

/// A canned search offered on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub emoji: &'static str,
    pub city: &'static str,
    pub query: &'static str,
}

const fn suggestion(emoji: &'static str, city: &'static str, query: &'static str) -> Suggestion {
    Suggestion { emoji, city, query }
}

pub const SUGGESTIONS: [Suggestion; 12] = [
    suggestion("🗽", "New York", "New York, USA"),
    suggestion("🏛️", "London", "London, GB"),
    suggestion("🗼", "Tokyo", "Tokyo, Japan"),
    suggestion("🥖", "Paris", "Paris, France"),
    suggestion("🕌", "Istanbul", "Istanbul, Turkey"),
    suggestion("🏖️", "Sydney", "Sydney, Australia"),
    suggestion("🏔️", "Denver", "Denver, USA"),
    suggestion("🌴", "Miami", "Miami, USA"),
    suggestion("🍁", "Toronto", "Toronto, Canada"),
    suggestion("🗻", "Zurich", "Zurich, Switzerland"),
    suggestion("🏜️", "Dubai", "Dubai, UAE"),
    suggestion("🎭", "Rio de Janeiro", "Rio de Janeiro, Brazil"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Location text entered by the user.
    Submit(String),
    /// Index into [`SUGGESTIONS`].
    SelectSuggestion(usize),
    /// New preferences; the current query is looked up again.
    ChangeSettings(Settings),
    /// Forget the query and every cached response.
    Reset,
}

/// Result of a lookup pass. The two sections fail independently.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub query: String,
    pub location: ResolvedLocation,
    pub settings: Settings,
    pub current: Result<CurrentWeather, LookupError>,
    pub forecast: Result<ForecastResponse, LookupError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// No query yet: tips and suggestions.
    Home,
    NotFound { query: String },
    Failed(LookupError),
    Weather(Box<WeatherReport>),
}

#[derive(Debug)]
pub struct Session {
    provider: Box<dyn WeatherProvider>,
    cache: LookupCache,
    settings: Settings,
    input: String,
    selected_suggestion: Option<usize>,
}

impl Session {
    pub fn new(provider: Box<dyn WeatherProvider>, settings: Settings, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache: LookupCache::new(cache_ttl),
            settings,
            input: String::new(),
            selected_suggestion: None,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Current location text.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected_suggestion(&self) -> Option<usize> {
        self.selected_suggestion
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    #[instrument(skip(self))]
    pub async fn handle(&mut self, event: Event) -> Screen {
        match event {
            Event::Submit(text) => {
                self.selected_suggestion = None;
                self.input = text.trim().to_string();
            }
            Event::SelectSuggestion(index) => {
                if let Some(s) = SUGGESTIONS.get(index) {
                    self.selected_suggestion = Some(index);
                    self.input = s.query.to_string();
                }
            }
            Event::ChangeSettings(settings) => {
                self.settings = settings;
            }
            Event::Reset => {
                info!("resetting session");
                self.input.clear();
                self.selected_suggestion = None;
                self.cache.clear();
                return Screen::Home;
            }
        }

        let screen = self.render().await;
        // a suggestion only seeds the input once
        self.selected_suggestion = None;
        screen
    }

    async fn render(&mut self) -> Screen {
        if self.input.is_empty() {
            return Screen::Home;
        }

        let query = self.input.clone();
        let location = match self.resolve(&query).await {
            Ok(location) => location,
            Err(LookupError::NotFound { query }) => return Screen::NotFound { query },
            Err(e) => return Screen::Failed(e),
        };

        let current = self.current_weather(&location).await;
        let forecast = self.forecast(&location).await;

        Screen::Weather(Box::new(WeatherReport {
            query,
            location,
            settings: self.settings,
            current,
            forecast,
        }))
    }

    async fn resolve(&mut self, query: &str) -> Result<ResolvedLocation, LookupError> {
        if let Some(hit) = self.cache.locations.get(query) {
            debug!(query, "geocode cache hit");
            return Ok(hit);
        }

        let location = self.provider.geocode(query).await?;
        self.cache.locations.insert(query.to_string(), location.clone());
        Ok(location)
    }

    async fn current_weather(
        &mut self,
        location: &ResolvedLocation,
    ) -> Result<CurrentWeather, LookupError> {
        let units = self.settings.units;
        let key = CoordKey::new(location.latitude, location.longitude, units);
        if let Some(hit) = self.cache.current.get(&key) {
            debug!("current weather cache hit");
            return Ok(hit);
        }

        let weather = self
            .provider
            .current_weather(location.latitude, location.longitude, units)
            .await?;
        self.cache.current.insert(key, weather.clone());
        Ok(weather)
    }

    async fn forecast(
        &mut self,
        location: &ResolvedLocation,
    ) -> Result<ForecastResponse, LookupError> {
        let units = self.settings.units;
        let key = CoordKey::new(location.latitude, location.longitude, units);
        if let Some(hit) = self.cache.forecasts.get(&key) {
            debug!("forecast cache hit");
            return Ok(hit);
        }

        let forecast = self
            .provider
            .forecast(location.latitude, location.longitude, units)
            .await?;
        self.cache.forecasts.insert(key, forecast.clone());
        Ok(forecast)
    }
}
