use thiserror::Error;

/// Everything that can go wrong while looking up weather for a location.
///
/// Each variant renders as the message shown to the user; none of them is
/// fatal, the caller always returns to the location input afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// API key unset, still the placeholder, or not shaped like a real key.
    #[error(
        "OpenWeather API key is not configured. Please set OPENWEATHER_API_KEY environment variable \
         or run `skylook configure`."
    )]
    ApiKeyMissing,

    /// Geocoding returned zero matches.
    #[error("Location not found: '{query}'. Please try a different search term.")]
    NotFound { query: String },

    /// The request failed to complete or exceeded the timeout.
    #[error("Network error occurred. Please check your internet connection. ({0})")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("Unexpected response from the weather service. ({0})")]
    Malformed(String),

    /// HTTP 429.
    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimited,

    /// Any other non-success HTTP status.
    #[error("Unable to fetch weather data. Please try again later. (HTTP {status})")]
    Api { status: u16 },
}

impl LookupError {
    /// Whether simply trying again later may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            LookupError::Network(_) | LookupError::RateLimited | LookupError::Api { .. }
        )
    }

    /// Extra guidance lines shown under the message.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            LookupError::NotFound { .. } => SEARCH_FORMAT_HINTS,
            LookupError::ApiKeyMissing => &[
                "Get a free key at https://openweathermap.org/api",
                "Then export OPENWEATHER_API_KEY=<key> or run `skylook configure`.",
            ],
            _ => &[],
        }
    }
}

/// Search formats the geocoder understands.
pub const SEARCH_FORMAT_HINTS: &[&str] = &[
    "City names: \"Paris\", \"New York\", \"Tokyo\"",
    "City with country: \"Paris, France\" or \"London, GB\"",
    "US ZIP codes: \"10001\", \"90210\", \"60601\"",
    "Airport codes: \"JFK\", \"LAX\", \"LHR\"",
    "State abbreviations: \"Miami, FL\" or \"Denver, CO\"",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_query_and_has_guidance() {
        let err = LookupError::NotFound { query: "Atlantis".into() };
        assert!(err.to_string().contains("Atlantis"));
        assert!(!err.hints().is_empty());
        assert!(!err.is_retriable());
    }

    #[test]
    fn configuration_error_is_distinct_from_network_error() {
        let cfg = LookupError::ApiKeyMissing.to_string();
        let net = LookupError::Network("timed out".into()).to_string();

        assert!(cfg.contains("OPENWEATHER_API_KEY"));
        assert!(net.contains("Network error"));
        assert_ne!(cfg, net);
    }

    #[test]
    fn transient_failures_are_retriable() {
        assert!(LookupError::Network("x".into()).is_retriable());
        assert!(LookupError::RateLimited.is_retriable());
        assert!(LookupError::Api { status: 503 }.is_retriable());
        assert!(!LookupError::Malformed("x".into()).is_retriable());
        assert!(!LookupError::ApiKeyMissing.is_retriable());
    }
}
