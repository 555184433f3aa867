//! Condition code to glyph and background gradient.
//!
//! Codes follow OpenWeather's condition table
//! (<https://openweathermap.org/weather-conditions>). Codes outside the
//! known groups get [`FALLBACK_GLYPH`] and [`FALLBACK_GRADIENT`], since
//! upstream may add new ones.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionGroup {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

impl ConditionGroup {
    pub fn from_code(code: u32) -> Self {
        match code {
            200..=232 => Self::Thunderstorm,
            300..=321 => Self::Drizzle,
            500..=531 => Self::Rain,
            600..=622 => Self::Snow,
            701..=781 => Self::Atmosphere,
            800 => Self::Clear,
            801..=804 => Self::Clouds,
            _ => Self::Unknown,
        }
    }
}

/// Two-stop diagonal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: &'static str,
    pub to: &'static str,
}

impl Gradient {
    const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }

    pub fn css(&self) -> String {
        format!("linear-gradient(135deg, {}, {})", self.from, self.to)
    }
}

pub const FALLBACK_GLYPH: &str = "🌤️";
pub const FALLBACK_GRADIENT: Gradient = Gradient::new("#1e90ff", "#4dabf7");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionStyle {
    pub group: ConditionGroup,
    pub glyph: &'static str,
    pub gradient: Gradient,
}

impl ConditionStyle {
    pub fn is_fallback(&self) -> bool {
        self.group == ConditionGroup::Unknown
    }
}

pub fn condition_style(code: u32, is_day: bool) -> ConditionStyle {
    ConditionStyle {
        group: ConditionGroup::from_code(code),
        glyph: weather_glyph(code, is_day),
        gradient: weather_gradient(code, is_day),
    }
}

pub fn weather_glyph(code: u32, is_day: bool) -> &'static str {
    match ConditionGroup::from_code(code) {
        ConditionGroup::Thunderstorm => "⛈️",
        ConditionGroup::Drizzle => "🌦️",
        ConditionGroup::Rain => match code {
            500..=504 => "🌧️",
            // shower rain
            _ => "🌦️",
        },
        ConditionGroup::Snow => "❄️",
        ConditionGroup::Atmosphere => match code {
            711 | 731 | 751 | 761 | 771 => "💨",
            781 => "🌪️",
            // mist, haze, fog and the rest
            _ => "🌫️",
        },
        ConditionGroup::Clear => {
            if is_day {
                "☀️"
            } else {
                "🌙"
            }
        }
        ConditionGroup::Clouds => match code {
            801 if is_day => "🌤️",
            801 => "🌙",
            802 => "⛅",
            _ => "☁️",
        },
        ConditionGroup::Unknown => FALLBACK_GLYPH,
    }
}

pub fn weather_gradient(code: u32, is_day: bool) -> Gradient {
    match ConditionGroup::from_code(code) {
        ConditionGroup::Thunderstorm => Gradient::new("#2c3e50", "#3498db"),
        ConditionGroup::Drizzle | ConditionGroup::Rain => Gradient::new("#3498db", "#2980b9"),
        ConditionGroup::Snow => Gradient::new("#ecf0f1", "#bdc3c7"),
        ConditionGroup::Atmosphere => Gradient::new("#95a5a6", "#7f8c8d"),
        ConditionGroup::Clear if is_day => Gradient::new("#f39c12", "#e67e22"),
        ConditionGroup::Clear => Gradient::new("#2c3e50", "#34495e"),
        ConditionGroup::Clouds => Gradient::new("#bdc3c7", "#95a5a6"),
        ConditionGroup::Unknown => FALLBACK_GRADIENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DOCUMENTED: &[(u32, u32)] = &[
        (200, 232),
        (300, 321),
        (500, 531),
        (600, 622),
        (701, 781),
        (800, 800),
        (801, 804),
    ];

    fn documented(code: u32) -> bool {
        DOCUMENTED.iter().any(|&(lo, hi)| (lo..=hi).contains(&code))
    }

    #[test]
    fn non_fallback_exactly_within_documented_ranges() {
        for code in 200..=804 {
            for is_day in [true, false] {
                let style = condition_style(code, is_day);
                assert_eq!(!style.is_fallback(), documented(code), "code {code}, day {is_day}");
                assert_eq!(
                    style.gradient != FALLBACK_GRADIENT,
                    documented(code),
                    "gradient for code {code}, day {is_day}"
                );
            }
        }
    }

    #[rstest]
    #[case(0)]
    #[case(199)]
    #[case(233)]
    #[case(400)]
    #[case(532)]
    #[case(700)]
    #[case(782)]
    #[case(805)]
    #[case(999)]
    fn codes_outside_ranges_use_fallback(#[case] code: u32) {
        for is_day in [true, false] {
            assert_eq!(weather_glyph(code, is_day), FALLBACK_GLYPH);
            assert_eq!(weather_gradient(code, is_day), FALLBACK_GRADIENT);
        }
    }

    #[rstest]
    #[case(211, true, "⛈️")]
    #[case(310, true, "🌦️")]
    #[case(500, true, "🌧️")]
    #[case(502, false, "🌧️")]
    #[case(521, true, "🌦️")]
    #[case(601, true, "❄️")]
    #[case(701, true, "🌫️")]
    #[case(711, true, "💨")]
    #[case(741, true, "🌫️")]
    #[case(761, true, "💨")]
    #[case(781, true, "🌪️")]
    #[case(762, true, "🌫️")]
    #[case(800, true, "☀️")]
    #[case(800, false, "🌙")]
    #[case(801, true, "🌤️")]
    #[case(801, false, "🌙")]
    #[case(802, false, "⛅")]
    #[case(804, true, "☁️")]
    fn glyph_table(#[case] code: u32, #[case] is_day: bool, #[case] expected: &str) {
        assert_eq!(weather_glyph(code, is_day), expected);
    }

    #[test]
    fn clear_sky_gradient_depends_on_daylight() {
        assert_ne!(weather_gradient(800, true), weather_gradient(800, false));
        assert_eq!(weather_gradient(803, true), weather_gradient(803, false));
    }

    #[test]
    fn gradient_renders_as_css() {
        assert_eq!(FALLBACK_GRADIENT.css(), "linear-gradient(135deg, #1e90ff, #4dabf7)");
    }
}
