use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unit system passed through to the upstream `units` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_unit(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    pub fn distance_unit(&self) -> &'static str {
        match self {
            Units::Metric => "km",
            Units::Imperial => "mi",
        }
    }

    /// Label used in settings prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Units::Metric => "°C (Celsius)",
            Units::Imperial => "°F (Fahrenheit)",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// User-facing display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub units: Units,
    pub forecast_hours: u32,
    pub show_details: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            units: crate::config::DEFAULT_UNITS,
            forecast_hours: crate::config::DEFAULT_FORECAST_HOURS,
            show_details: true,
        }
    }
}

/// First match of a geocoding query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl ResolvedLocation {
    /// "City, State, Country", skipping unknown parts and a state equal to the city.
    pub fn label(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();

        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            parts.push(city);
        }
        if let Some(state) = self
            .state
            .as_deref()
            .filter(|s| !s.is_empty() && self.city.as_deref() != Some(*s))
        {
            parts.push(state);
        }
        if let Some(country) = self.country.as_deref().filter(|c| !c.is_empty()) {
            parts.push(country);
        }

        if parts.is_empty() {
            "Unknown Location".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// One element of the geocoding `direct` response list.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeMatch {
    pub lat: f64,
    pub lon: f64,
    pub name: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl From<GeocodeMatch> for ResolvedLocation {
    fn from(m: GeocodeMatch) -> Self {
        Self {
            latitude: m.lat,
            longitude: m.lon,
            city: m.name,
            country: m.country,
            state: m.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionInfo {
    pub id: u32,
    pub description: String,
    pub icon: String,
}

impl ConditionInfo {
    /// Icon codes end in `d` for day and `n` for night, e.g. `01d`.
    pub fn is_day(&self) -> bool {
        self.icon.contains('d')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Response of the current-weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub main: MainReadings,
    pub weather: Vec<ConditionInfo>,
    pub wind: Option<Wind>,
    /// Meters.
    pub visibility: Option<f64>,
    pub sys: Option<SunTimes>,
    /// Shift in seconds from UTC.
    pub timezone: Option<i64>,
}

impl CurrentWeather {
    pub fn condition(&self) -> Option<&ConditionInfo> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloud cover, percent.
    #[serde(default)]
    pub all: u8,
}

/// One 3-hour record of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// `YYYY-MM-DD HH:MM:SS`, UTC.
    pub dt_txt: String,
    pub main: MainReadings,
    pub weather: Vec<ConditionInfo>,
    pub wind: Option<Wind>,
    pub clouds: Option<Clouds>,
    /// Probability of precipitation, 0..=1.
    #[serde(default)]
    pub pop: f64,
}

impl ForecastEntry {
    pub fn condition(&self) -> Option<&ConditionInfo> {
        self.weather.first()
    }
}

/// Response of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}
