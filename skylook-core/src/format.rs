//! Pure display formatting: compass labels, unit conversion, timestamps and
//! forecast grouping.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::model::{ForecastEntry, Units};

pub const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const KM_TO_MILES: f64 = 0.621371;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Degrees to one of 16 compass points, `round(deg / 22.5) mod 16`.
/// Halfway values round to even.
pub fn wind_direction(deg: f64) -> &'static str {
    let index = (deg / 22.5).round_ties_even().rem_euclid(16.0) as usize;
    // rem_euclid may return exactly 16.0 for tiny negative inputs
    COMPASS_POINTS[index % COMPASS_POINTS.len()]
}

/// Visibility from meters to km, or miles under imperial units.
pub fn visibility(meters: f64, units: Units) -> (f64, &'static str) {
    let km = meters / 1000.0;
    let value = match units {
        Units::Metric => km,
        Units::Imperial => km * KM_TO_MILES,
    };
    (value, units.distance_unit())
}

pub fn parse_dt_txt(dt_txt: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(dt_txt, DT_TXT_FORMAT).ok()
}

/// `("Wed, May 01", "03:00 PM")`, or the raw input and `""` if it does not parse.
pub fn format_datetime(dt_txt: &str) -> (String, String) {
    match parse_dt_txt(dt_txt) {
        Some(dt) => (
            dt.format("%a, %b %d").to_string(),
            dt.format("%I:%M %p").to_string(),
        ),
        None => (dt_txt.to_string(), String::new()),
    }
}

/// Number of 3-hour entries covering `hours`, capped at what is available.
pub fn forecast_entry_count(hours: u32, available: usize) -> usize {
    usize::try_from(hours / 3).map_or(available, |wanted| wanted.min(available))
}

/// Entries of one calendar day, in upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    /// `YYYY-MM-DD`, or the date portion of an unparseable timestamp.
    pub key: String,
    pub entries: Vec<&'a ForecastEntry>,
}

impl DayGroup<'_> {
    /// `"Wednesday, May 01"`.
    pub fn heading(&self) -> String {
        NaiveDate::parse_from_str(&self.key, "%Y-%m-%d")
            .map(|d| d.format("%A, %B %d").to_string())
            .unwrap_or_else(|_| self.key.clone())
    }
}

fn day_key(dt_txt: &str) -> String {
    match parse_dt_txt(dt_txt) {
        Some(dt) => dt.date().format("%Y-%m-%d").to_string(),
        None => dt_txt.split_whitespace().next().unwrap_or_default().to_string(),
    }
}

/// Partition entries by calendar day. Groups come in order of first
/// appearance and keep the source order inside.
pub fn group_by_day(entries: &[ForecastEntry]) -> Vec<DayGroup<'_>> {
    let mut groups: Vec<DayGroup<'_>> = Vec::new();

    for entry in entries {
        let key = day_key(&entry.dt_txt);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DayGroup { key, entries: vec![entry] }),
        }
    }

    groups
}

/// `"UTC+2"`, `"UTC-5"`; partial hours floor towards negative infinity.
pub fn timezone_label(offset_secs: i64) -> String {
    format!("UTC{:+}", offset_secs.div_euclid(3600))
}

/// Wall-clock time of a unix timestamp at the given UTC offset, `"06:12 AM"`.
pub fn clock_time(unix: i64, offset_secs: i64) -> Option<String> {
    let offset = FixedOffset::east_opt(i32::try_from(offset_secs).ok()?)?;
    let utc = DateTime::<Utc>::from_timestamp(unix, 0)?;
    Some(utc.with_timezone(&offset).format("%I:%M %p").to_string())
}

pub fn is_daytime(now: i64, sunrise: i64, sunset: i64) -> bool {
    (sunrise..=sunset).contains(&now)
}

/// Probability of precipitation (0..=1) as a percentage.
pub fn precipitation_percent(pop: f64) -> f64 {
    pop * 100.0
}

/// Capitalise the first letter of each word, lower-case the rest.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
