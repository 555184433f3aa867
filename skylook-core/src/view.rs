//! Display-ready view of a [`Screen`].
//!
//! All strings are already formatted for the selected units; the CLI only
//! lays them out (or dumps them as JSON).

use serde::Serialize;

use crate::{
    error::{LookupError, SEARCH_FORMAT_HINTS},
    format::{
        clock_time, forecast_entry_count, format_datetime, group_by_day, is_daytime,
        precipitation_percent, timezone_label, title_case, visibility, wind_direction,
    },
    icons::{FALLBACK_GLYPH, FALLBACK_GRADIENT, condition_style},
    model::{CurrentWeather, ForecastEntry, ForecastResponse, ResolvedLocation, Units},
    session::{SUGGESTIONS, Screen, WeatherReport},
};

pub const HOME_TIPS: &[&str] = &[
    "City names: New York, London, Tokyo",
    "City with country: Paris, France",
    "ZIP codes: 10001, 90210",
    "Airport codes: JFK, LAX",
    "Coordinates: 40.7128,-74.0060",
];

pub const PRO_TIPS: &[&str] = &[
    "Include country names for better accuracy (e.g., \"Birmingham, UK\" vs \"Birmingham, AL\")",
    "Use major landmarks or airports for quick access",
    "ZIP codes work great for US locations",
    "Weather data updates every 10 minutes",
];

/// A section either renders or explains why it cannot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionView {
    pub label: String,
    pub query: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub location: String,
    pub glyph: &'static str,
    pub background: String,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub pressure: String,
    pub wind: Option<String>,
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntryView {
    pub time: String,
    pub glyph: &'static str,
    pub summary: String,
    pub range: String,
    pub wind: String,
    pub clouds: String,
    pub precipitation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDayView {
    pub heading: String,
    pub entries: Vec<ForecastEntryView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastView {
    pub title: String,
    pub days: Vec<ForecastDayView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsView {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub daylight: Option<&'static str>,
    pub coordinates: String,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub query: String,
    pub current: Section<CurrentView>,
    pub forecast: Section<ForecastView>,
    /// `None` when details are switched off.
    pub details: Option<Section<DetailsView>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenView {
    Home {
        tips: &'static [&'static str],
        suggestions: Vec<SuggestionView>,
        pro_tips: &'static [&'static str],
    },
    NotFound {
        message: String,
        hints: &'static [&'static str],
    },
    Error {
        message: String,
        hints: &'static [&'static str],
        retriable: bool,
    },
    Weather(ReportView),
}

/// `now` is a unix timestamp, used for the daytime indicator.
pub fn screen_view(screen: &Screen, now: i64) -> ScreenView {
    match screen {
        Screen::Home => ScreenView::Home {
            tips: HOME_TIPS,
            suggestions: SUGGESTIONS
                .iter()
                .map(|s| SuggestionView { label: format!("{} {}", s.emoji, s.city), query: s.query })
                .collect(),
            pro_tips: PRO_TIPS,
        },
        Screen::NotFound { query } => ScreenView::NotFound {
            message: LookupError::NotFound { query: query.clone() }.to_string(),
            hints: SEARCH_FORMAT_HINTS,
        },
        Screen::Failed(err) => ScreenView::Error {
            message: err.to_string(),
            hints: err.hints(),
            retriable: err.is_retriable(),
        },
        Screen::Weather(report) => ScreenView::Weather(report_view(report, now)),
    }
}

pub fn report_view(report: &WeatherReport, now: i64) -> ReportView {
    let units = report.settings.units;

    let current = match &report.current {
        Ok(weather) => Section::Ready(current_view(weather, &report.location, units)),
        Err(e) => Section::Unavailable(format!("Could not retrieve current weather data. {e}")),
    };

    let forecast = match &report.forecast {
        Ok(forecast) => Section::Ready(forecast_view(forecast, units, report.settings.forecast_hours)),
        Err(e) => Section::Unavailable(format!("Could not retrieve forecast data. {e}")),
    };

    let details = report.settings.show_details.then(|| match &report.current {
        Ok(weather) => Section::Ready(details_view(weather, &report.location, now)),
        Err(_) => Section::Unavailable("Details need current weather data.".to_string()),
    });

    ReportView { query: report.query.clone(), current, forecast, details }
}

pub fn current_view(weather: &CurrentWeather, location: &ResolvedLocation, units: Units) -> CurrentView {
    let symbol = units.temperature_symbol();

    let (glyph, background, description) = match weather.condition() {
        Some(c) => {
            let style = condition_style(c.id, c.is_day());
            (style.glyph, style.gradient.css(), title_case(&c.description))
        }
        None => (FALLBACK_GLYPH, FALLBACK_GRADIENT.css(), "Unknown".to_string()),
    };

    let wind = weather.wind.as_ref().map(|w| {
        format!(
            "{} {:.1} {}",
            wind_direction(w.deg.unwrap_or(0.0)),
            w.speed,
            units.speed_unit()
        )
    });

    let visibility = weather.visibility.map(|meters| {
        let (value, unit) = visibility(meters, units);
        format!("{value:.1} {unit}")
    });

    CurrentView {
        location: location.label(),
        glyph,
        background,
        temperature: format!("{:.1}{symbol}", weather.main.temp),
        description,
        feels_like: format!("Feels like {:.0}{symbol}", weather.main.feels_like),
        humidity: format!("{}%", weather.main.humidity),
        pressure: format!("{} hPa", weather.main.pressure),
        wind,
        visibility,
    }
}

/// Truncated to `hours` worth of 3-hour entries, grouped by day.
pub fn forecast_view(forecast: &ForecastResponse, units: Units, hours: u32) -> ForecastView {
    let shown = forecast_entry_count(hours, forecast.list.len());

    let days = group_by_day(&forecast.list[..shown])
        .into_iter()
        .map(|group| ForecastDayView {
            heading: group.heading(),
            entries: group.entries.into_iter().map(|e| forecast_entry_view(e, units)).collect(),
        })
        .collect();

    ForecastView { title: format!("{hours}-Hour Detailed Forecast"), days }
}

fn forecast_entry_view(entry: &ForecastEntry, units: Units) -> ForecastEntryView {
    let (_, time) = format_datetime(&entry.dt_txt);

    let (glyph, description) = match entry.condition() {
        Some(c) => (condition_style(c.id, c.is_day()).glyph, title_case(&c.description)),
        None => (FALLBACK_GLYPH, "Unknown".to_string()),
    };

    let high = entry.main.temp_max.unwrap_or(entry.main.temp);
    let low = entry.main.temp_min.unwrap_or(entry.main.temp);
    let speed = entry.wind.as_ref().map_or(0.0, |w| w.speed);
    let clouds = entry.clouds.as_ref().map_or(0, |c| c.all);
    let pop = precipitation_percent(entry.pop);

    ForecastEntryView {
        time,
        glyph,
        summary: format!("{:.1}{} - {description}", entry.main.temp, units.temperature_symbol()),
        range: format!("H: {high:.0}° L: {low:.0}° | 💧 {}%", entry.main.humidity),
        wind: format!("💨 {speed:.1} {}", units.speed_unit()),
        clouds: format!("☁️ {clouds}%"),
        precipitation: (pop > 0.0).then(|| format!("☔ {pop:.0}%")),
    }
}

pub fn details_view(weather: &CurrentWeather, location: &ResolvedLocation, now: i64) -> DetailsView {
    let offset = weather.timezone.unwrap_or(0);
    let sunrise = weather.sys.as_ref().and_then(|s| s.sunrise);
    let sunset = weather.sys.as_ref().and_then(|s| s.sunset);

    let daylight = match (sunrise, sunset) {
        (Some(rise), Some(set)) => Some(if is_daytime(now, rise, set) { "Daytime" } else { "Nighttime" }),
        _ => None,
    };

    DetailsView {
        sunrise: sunrise.and_then(|t| clock_time(t, offset)),
        sunset: sunset.and_then(|t| clock_time(t, offset)),
        daylight,
        coordinates: format!("{:.4}, {:.4}", location.latitude, location.longitude),
        timezone: weather.timezone.map(timezone_label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Clouds, ConditionInfo, MainReadings, Settings, SunTimes, Wind};

    fn paris() -> ResolvedLocation {
        ResolvedLocation {
            latitude: 48.8566,
            longitude: 2.3522,
            city: Some("Paris".into()),
            country: Some("FR".into()),
            state: None,
        }
    }

    fn main(temp: f64) -> MainReadings {
        MainReadings {
            temp,
            feels_like: temp - 1.0,
            humidity: 81,
            pressure: 1012,
            temp_min: Some(temp - 2.0),
            temp_max: Some(temp + 2.0),
        }
    }

    fn current() -> CurrentWeather {
        CurrentWeather {
            main: main(15.3),
            weather: vec![ConditionInfo {
                id: 800,
                description: "clear sky".into(),
                icon: "01d".into(),
            }],
            wind: Some(Wind { speed: 3.6, deg: Some(180.0) }),
            visibility: Some(10_000.0),
            sys: Some(SunTimes { sunrise: Some(1_714_537_800), sunset: Some(1_714_591_800) }),
            timezone: Some(7200),
        }
    }

    fn entry(dt_txt: &str, pop: f64) -> ForecastEntry {
        ForecastEntry {
            dt_txt: dt_txt.into(),
            main: main(12.0),
            weather: vec![ConditionInfo {
                id: 500,
                description: "light rain".into(),
                icon: "10n".into(),
            }],
            wind: Some(Wind { speed: 4.0, deg: None }),
            clouds: Some(Clouds { all: 75 }),
            pop,
        }
    }

    #[test]
    fn current_view_formats_metric_values() {
        let view = current_view(&current(), &paris(), Units::Metric);

        assert_eq!(view.location, "Paris, FR");
        assert_eq!(view.glyph, "☀️");
        assert_eq!(view.background, "linear-gradient(135deg, #f39c12, #e67e22)");
        assert_eq!(view.temperature, "15.3°C");
        assert_eq!(view.description, "Clear Sky");
        assert_eq!(view.humidity, "81%");
        assert_eq!(view.pressure, "1012 hPa");
        assert_eq!(view.wind.as_deref(), Some("S 3.6 m/s"));
        assert_eq!(view.visibility.as_deref(), Some("10.0 km"));
    }

    #[test]
    fn current_view_converts_visibility_to_miles() {
        let view = current_view(&current(), &paris(), Units::Imperial);
        assert_eq!(view.visibility.as_deref(), Some("6.2 mi"));
        assert!(view.temperature.ends_with("°F"));
        assert!(view.wind.unwrap().ends_with("mph"));
    }

    #[test]
    fn current_view_without_optional_sections() {
        let mut weather = current();
        weather.wind = None;
        weather.visibility = None;

        let view = current_view(&weather, &paris(), Units::Metric);
        assert!(view.wind.is_none());
        assert!(view.visibility.is_none());
    }

    #[test]
    fn forecast_view_truncates_and_groups() {
        let forecast = ForecastResponse {
            list: vec![
                entry("2024-05-01 18:00:00", 0.0),
                entry("2024-05-01 21:00:00", 0.4),
                entry("2024-05-02 00:00:00", 0.0),
                entry("2024-05-02 03:00:00", 0.0),
            ],
        };

        let view = forecast_view(&forecast, Units::Metric, 24);
        assert_eq!(view.title, "24-Hour Detailed Forecast");
        assert_eq!(view.days.len(), 2);
        assert_eq!(view.days[0].heading, "Wednesday, May 01");
        assert_eq!(view.days[0].entries.len(), 2);
        assert_eq!(view.days[0].entries[0].time, "06:00 PM");
        assert_eq!(view.days[0].entries[0].glyph, "🌧️");
        assert_eq!(view.days[0].entries[0].precipitation, None);
        assert_eq!(view.days[0].entries[1].precipitation.as_deref(), Some("☔ 40%"));
        assert_eq!(view.days[0].entries[0].range, "H: 14° L: 10° | 💧 81%");
        assert_eq!(view.days[0].entries[0].clouds, "☁️ 75%");
    }

    #[test]
    fn forecast_view_shows_only_requested_hours() {
        let list = (0..40)
            .map(|i| entry(&format!("2024-05-{:02} {:02}:00:00", 1 + i / 8, (i % 8) * 3), 0.0))
            .collect();
        let view = forecast_view(&ForecastResponse { list }, Units::Metric, 24);

        let shown: usize = view.days.iter().map(|d| d.entries.len()).sum();
        assert_eq!(shown, 8);
        assert_eq!(view.days.len(), 1);
    }

    #[test]
    fn details_use_location_offset() {
        // sunrise 04:30 UTC, sunset 19:30 UTC
        let view = details_view(&current(), &paris(), 1_714_560_000);

        assert_eq!(view.sunrise.as_deref(), Some("06:30 AM"));
        assert_eq!(view.sunset.as_deref(), Some("09:30 PM"));
        assert_eq!(view.daylight, Some("Daytime"));
        assert_eq!(view.coordinates, "48.8566, 2.3522");
        assert_eq!(view.timezone.as_deref(), Some("UTC+2"));
    }

    #[test]
    fn details_at_night() {
        let view = details_view(&current(), &paris(), 1_714_600_000);
        assert_eq!(view.daylight, Some("Nighttime"));
    }

    fn report(current: Result<CurrentWeather, LookupError>, show_details: bool) -> WeatherReport {
        WeatherReport {
            query: "Paris".into(),
            location: paris(),
            settings: Settings { show_details, ..Settings::default() },
            current,
            forecast: Err(LookupError::Network("timed out".into())),
        }
    }

    #[test]
    fn report_sections_degrade_independently() {
        let view = report_view(&report(Ok(current()), true), 0);

        assert!(matches!(view.current, Section::Ready(_)));
        match view.forecast {
            Section::Unavailable(msg) => {
                assert!(msg.contains("Could not retrieve forecast data"));
                assert!(msg.contains("timed out"));
            }
            Section::Ready(_) => panic!("forecast should be unavailable"),
        }
        assert!(matches!(view.details, Some(Section::Ready(_))));
    }

    #[test]
    fn details_unavailable_without_current_weather() {
        let view = report_view(&report(Err(LookupError::RateLimited), true), 0);
        assert!(matches!(view.current, Section::Unavailable(_)));
        assert!(matches!(view.details, Some(Section::Unavailable(_))));
    }

    #[test]
    fn details_hidden_when_disabled() {
        let view = report_view(&report(Ok(current()), false), 0);
        assert!(view.details.is_none());
    }

    #[test]
    fn home_screen_lists_all_suggestions() {
        match screen_view(&Screen::Home, 0) {
            ScreenView::Home { suggestions, .. } => {
                assert_eq!(suggestions.len(), 12);
                assert_eq!(suggestions[3].query, "Paris, France");
                assert_eq!(suggestions[3].label, "🥖 Paris");
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn screen_view_serializes_with_tags() {
        let json = serde_json::to_value(screen_view(
            &Screen::NotFound { query: "Atlantis".into() },
            0,
        ))
        .unwrap();

        assert_eq!(json["screen"], "not_found");
        assert!(json["message"].as_str().unwrap().contains("Atlantis"));
        assert!(json["hints"].as_array().unwrap().len() > 1);
    }
}
