use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

const EVENT_TOML: &str = include_str!("../event.toml");

/// Static event details shown across the site.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct EventConfig {
    pub name: String,
    pub tagline: String,
    pub venue: String,
    pub starts_at: Option<DateTime<FixedOffset>>,
    /// Base URL of the creature API, without a trailing `/`.
    pub creature_api: String,
    pub fetch_timeout_ms: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: "Codegate".into(),
            tagline: String::new(),
            venue: String::new(),
            starts_at: None,
            creature_api: "https://pokeapi.co/api/v2".into(),
            fetch_timeout_ms: 5000,
        }
    }
}

impl EventConfig {
    pub(crate) fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// The embedded event file, or built-in defaults if it does not parse.
    pub(crate) fn load() -> Self {
        Self::parse(EVENT_TOML).unwrap_or_else(|err| {
            log::error!("invalid event.toml, using defaults: {}", err);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_event_file_parses() {
        let config = EventConfig::parse(EVENT_TOML).unwrap();
        assert_eq!(config.name, "Codegate 2026");
        assert!(config.starts_at.is_some());
        assert!(!config.creature_api.ends_with('/'));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = EventConfig::parse("name = \"Mini\"").unwrap();
        assert_eq!(config.name, "Mini");
        assert_eq!(config.fetch_timeout_ms, 5000);
        assert_eq!(config.starts_at, None);
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        assert!(EventConfig::parse("starts_at = \"next friday\"").is_err());
    }
}
