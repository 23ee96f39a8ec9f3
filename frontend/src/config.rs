//! Build-time configuration.
//!
//! The app is a static bundle, so settings are baked in when it is compiled:
//!
//! - `SPENDWISELY_API_URL`: base URL of the REST API (default `http://localhost:2020`).
//! - `SPENDWISELY_LOG_LEVEL`: one of `trace`, `debug`, `info`, `warn`, `error` (default `info`).

use tracing::Level;

const DEFAULT_API_URL: &str = "http://localhost:2020";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub log_level: Level,
}

impl Config {
    /// Read the configuration captured at compile time.
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("SPENDWISELY_API_URL"),
            option_env!("SPENDWISELY_LOG_LEVEL"),
        )
    }

    fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let log_level = log_level
            .and_then(|level| level.trim().parse::<Level>().ok())
            .unwrap_or(Level::INFO);

        Self {
            api_base_url,
            log_level,
        }
    }

    /// Join `path` onto the API base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

#[cfg(test)]
mod config_tests {
    use tracing::Level;

    use super::Config;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_values(None, None);

        assert_eq!(config.api_base_url, "http://localhost:2020");
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let config = Config::from_values(Some("https://api.example.com/"), None);

        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(
            config.endpoint("/transactions"),
            "https://api.example.com/transactions"
        );
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = Config::from_values(Some("   "), None);

        assert_eq!(config.api_base_url, "http://localhost:2020");
    }

    #[test]
    fn parses_log_level_case_insensitively() {
        let config = Config::from_values(None, Some("DEBUG"));

        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = Config::from_values(None, Some("loud"));

        assert_eq!(config.log_level, Level::INFO);
    }
}
