use skylook_core::{
    Screen,
    view::{CurrentView, DetailsView, ForecastView, ReportView, ScreenView, Section, screen_view},
};

const RULE: &str = "────────────────────────────────────────";

/// Print a screen to stdout, as text or pretty JSON.
pub fn print(screen: &Screen, json: bool) -> anyhow::Result<()> {
    let view = screen_view(screen, chrono::Utc::now().timestamp());
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_text(&view));
    }
    Ok(())
}

pub fn render_text(view: &ScreenView) -> String {
    let mut out = Vec::new();

    match view {
        ScreenView::Home { tips, suggestions, pro_tips } => {
            out.push("🌤️  Weather Forecast".to_string());
            out.push("Get accurate weather forecasts for any location worldwide".to_string());
            out.push(String::new());
            out.push("👆 Enter a location to get started. You can search using:".to_string());
            bullets(&mut out, tips);
            out.push(String::new());
            out.push("🌍 Popular Destinations".to_string());
            for chunk in suggestions.chunks(4) {
                let row: Vec<&str> = chunk.iter().map(|s| s.label.as_str()).collect();
                out.push(format!("  {}", row.join("   ")));
            }
            out.push(String::new());
            out.push("💡 Pro Tips:".to_string());
            bullets(&mut out, pro_tips);
        }
        ScreenView::NotFound { message, hints } => {
            out.push(format!("🔍 {message}"));
            out.push(String::new());
            out.push("❓ Need help finding your location? Try these search formats:".to_string());
            bullets(&mut out, hints);
        }
        ScreenView::Error { message, hints, retriable } => {
            out.push(format!("❌ {message}"));
            bullets(&mut out, hints);
            if *retriable {
                out.push("Please try again in a moment.".to_string());
            }
        }
        ScreenView::Weather(report) => render_report(&mut out, report),
    }

    out.join("\n")
}

fn bullets(out: &mut Vec<String>, lines: &[&str]) {
    out.extend(lines.iter().map(|l| format!("  • {l}")));
}

fn render_report(out: &mut Vec<String>, report: &ReportView) {
    out.push("🌤️  Current Weather".to_string());
    out.push(RULE.to_string());
    match &report.current {
        Section::Ready(current) => render_current(out, current),
        Section::Unavailable(msg) => out.push(format!("❌ {msg}")),
    }

    out.push(String::new());
    match &report.forecast {
        Section::Ready(forecast) => render_forecast(out, forecast),
        Section::Unavailable(msg) => {
            out.push("📅 Forecast".to_string());
            out.push(RULE.to_string());
            out.push(format!("❌ {msg}"));
        }
    }

    out.push(String::new());
    out.push("📊 Details".to_string());
    out.push(RULE.to_string());
    match &report.details {
        Some(Section::Ready(details)) => render_details(out, details),
        Some(Section::Unavailable(msg)) => out.push(format!("ℹ️  {msg}")),
        None => out.push(
            "ℹ️  Enable 'Show detailed metrics' in settings to see more information.".to_string(),
        ),
    }
}

fn render_current(out: &mut Vec<String>, current: &CurrentView) {
    out.push(current.location.clone());
    out.push(format!(
        "{}  {}  {}",
        current.glyph, current.temperature, current.description
    ));
    out.push(current.feels_like.clone());
    out.push(String::new());
    out.push("📊 Current Conditions".to_string());
    out.push(format!("  💧 Humidity     {}", current.humidity));
    out.push(format!("  🌡️  Pressure     {}", current.pressure));
    if let Some(wind) = &current.wind {
        out.push(format!("  💨 Wind         {wind}"));
    }
    if let Some(visibility) = &current.visibility {
        out.push(format!("  👁️  Visibility   {visibility}"));
    }
}

fn render_forecast(out: &mut Vec<String>, forecast: &ForecastView) {
    out.push(format!("📅 {}", forecast.title));
    out.push(RULE.to_string());

    if forecast.days.is_empty() {
        out.push("No forecast entries available.".to_string());
    }

    for day in &forecast.days {
        out.push(format!("#### {}", day.heading));
        for entry in &day.entries {
            let mut extras = vec![entry.wind.as_str(), entry.clouds.as_str()];
            if let Some(pop) = &entry.precipitation {
                extras.push(pop.as_str());
            }
            out.push(format!("  {} {:>8}  {}", entry.glyph, entry.time, entry.summary));
            out.push(format!("             {}", entry.range));
            out.push(format!("             {}", extras.join("  ")));
        }
        out.push(String::new());
    }
}

fn render_details(out: &mut Vec<String>, details: &DetailsView) {
    out.push("🌅 Sun & Moon".to_string());
    if let Some(sunrise) = &details.sunrise {
        out.push(format!("  🌅 Sunrise: {sunrise}"));
    }
    if let Some(sunset) = &details.sunset {
        out.push(format!("  🌇 Sunset: {sunset}"));
    }
    match details.daylight {
        Some("Daytime") => out.push("  🌞 Currently: Daytime".to_string()),
        Some(other) => out.push(format!("  🌙 Currently: {other}")),
        None => {}
    }
    out.push("📍 Location Details".to_string());
    out.push(format!("  📍 Coordinates: {}", details.coordinates));
    if let Some(tz) = &details.timezone {
        out.push(format!("  🕐 Timezone: {tz}"));
    }
}
