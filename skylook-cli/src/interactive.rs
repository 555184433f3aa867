//! Prompt loop: each answered prompt becomes one session event.

use std::fmt;

use inquire::{Confirm, InquireError, Select, Text};
use skylook_core::{
    Config, Event, LookupError, Screen, Session, Settings, Unconfigured, Units, WeatherProvider,
    config::{CACHE_TTL, FORECAST_HOUR_OPTIONS},
    provider_from_config,
    session::SUGGESTIONS,
};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Suggestions,
    Settings,
    Reset,
    Quit,
}

impl Action {
    const fn all() -> [Action; 5] {
        [Action::Search, Action::Suggestions, Action::Settings, Action::Reset, Action::Quit]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "🔍 Enter a location",
            Action::Suggestions => "🌍 Popular destinations",
            Action::Settings => "⚙️  Settings",
            Action::Reset => "🏠 Reset to home",
            Action::Quit => "Quit",
        })
    }
}

/// Esc or Ctrl-C on a prompt.
fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let (mut session, first) = open_session(provider_from_config(config), config.settings());
    render::print(&first, false)?;

    loop {
        let action = match Select::new("What next?", Action::all().to_vec()).prompt() {
            Ok(action) => action,
            Err(e) if is_cancel(&e) => break,
            Err(e) => return Err(e.into()),
        };

        let event = match next_event(action, &session) {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(e) if is_cancel(&e) => continue,
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(?event, "handling event");
        let screen = session.handle(event).await;
        render::print(&screen, false)?;
    }

    Ok(())
}

/// A session plus the screen to show first. Without a usable key the loop
/// still runs; each lookup then renders the configuration error.
fn open_session(
    provider: Result<Box<dyn WeatherProvider>, LookupError>,
    settings: Settings,
) -> (Session, Screen) {
    let (provider, first): (Box<dyn WeatherProvider>, Screen) = match provider {
        Ok(provider) => (provider, Screen::Home),
        Err(e) => {
            tracing::warn!(error = %e, "no usable API key, lookups will fail until configured");
            (Box::new(Unconfigured), Screen::Failed(e))
        }
    };

    (Session::new(provider, settings, CACHE_TTL), first)
}

/// `Ok(None)` means quit.
fn next_event(action: Action, session: &Session) -> Result<Option<Event>, InquireError> {
    let event = match action {
        Action::Search => {
            let text = Text::new("Location:")
                .with_placeholder("e.g., New York, London, Tokyo, 10001")
                .with_help_message("Include the country for better results, e.g. 'Paris, France'")
                .with_initial_value(session.input())
                .prompt()?;
            Event::Submit(text)
        }
        Action::Suggestions => {
            let labels: Vec<String> =
                SUGGESTIONS.iter().map(|s| format!("{} {}", s.emoji, s.query)).collect();
            let choice = Select::new("Popular destinations:", labels).raw_prompt()?;
            Event::SelectSuggestion(choice.index)
        }
        Action::Settings => Event::ChangeSettings(prompt_settings(session.settings())?),
        Action::Reset => Event::Reset,
        Action::Quit => return Ok(None),
    };

    Ok(Some(event))
}

/// Ask for units, forecast period and the details toggle, starting from `current`.
pub fn prompt_settings(current: Settings) -> Result<Settings, InquireError> {
    let unit_labels: Vec<&str> = Units::all().iter().map(Units::label).collect();
    let unit_cursor = Units::all().iter().position(|u| *u == current.units).unwrap_or(0);
    let units = Select::new("Temperature units:", unit_labels)
        .with_starting_cursor(unit_cursor)
        .raw_prompt()?;

    let hour_labels: Vec<String> =
        FORECAST_HOUR_OPTIONS.iter().map(|h| format!("Next {h} hours")).collect();
    let hour_cursor = FORECAST_HOUR_OPTIONS
        .iter()
        .position(|h| *h == current.forecast_hours)
        .unwrap_or(0);
    let hours = Select::new("Forecast period:", hour_labels)
        .with_starting_cursor(hour_cursor)
        .raw_prompt()?;

    let show_details = Confirm::new("Show detailed metrics?")
        .with_default(current.show_details)
        .prompt()?;

    Ok(Settings {
        units: Units::all()[units.index],
        forecast_hours: FORECAST_HOUR_OPTIONS[hours.index],
        show_details,
    })
}
