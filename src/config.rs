use log::LevelFilter;
use std::str::FromStr;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Settings baked into the bundle at build time.
///
/// A wasm bundle has no process environment at runtime, so values come from
/// `SUBSCRIPTION_API_URL` and `SUBSCRIPTION_LOG_LEVEL` as seen by the compiler.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("SUBSCRIPTION_API_URL"),
            option_env!("SUBSCRIPTION_LOG_LEVEL"),
        )
    }

    pub fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let log_level = log_level
            .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            log_level,
        }
    }

    /// Joins an endpoint path (with leading `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let config = AppConfig::from_values(None, None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn base_url_drops_trailing_slashes() {
        let config = AppConfig::from_values(Some("https://api.example.com//"), None);
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(
            config.endpoint("/subscriptions"),
            "https://api.example.com/subscriptions"
        );
    }

    #[test]
    fn blank_base_url_falls_back() {
        let config = AppConfig::from_values(Some("   "), None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn log_level_is_parsed_case_insensitively() {
        assert_eq!(
            AppConfig::from_values(None, Some("DEBUG")).log_level,
            LevelFilter::Debug
        );
        assert_eq!(
            AppConfig::from_values(None, Some("shouting")).log_level,
            LevelFilter::Info
        );
    }
}
