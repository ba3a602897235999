//! API endpoint configuration.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://localhost:7115";
pub const BASE_URL_ENV: &str = "PORT_TRACKER_API_BASE_URL";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("base URL must use http or https, got `{0}`")]
    UnsupportedScheme(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Resolves the base URL: user override, runtime environment, build-time
    /// environment, then the default.
    pub fn resolve(user_override: Option<&str>) -> Result<Self, ConfigError> {
        let runtime = std::env::var(BASE_URL_ENV).ok();
        let raw = pick_base_url(
            user_override,
            runtime.as_deref(),
            option_env!("PORT_TRACKER_API_BASE_URL"),
        );
        Ok(Self {
            base_url: parse_base_url(raw)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }
}

fn pick_base_url<'a>(
    user_override: Option<&'a str>,
    runtime: Option<&'a str>,
    compiled: Option<&'a str>,
) -> &'a str {
    [user_override, runtime, compiled]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
}

/// Parses an absolute http(s) URL and normalizes it to end with `/` so that
/// relative joins keep any path prefix.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_beats_environment() {
        assert_eq!(
            pick_base_url(Some("https://a.example"), Some("https://b.example"), None),
            "https://a.example"
        );
        assert_eq!(
            pick_base_url(Some("  "), Some("https://b.example"), Some("https://c.example")),
            "https://b.example"
        );
        assert_eq!(pick_base_url(None, None, Some("https://c.example")), "https://c.example");
        assert_eq!(pick_base_url(None, None, None), DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("https://tracking.example.com/backend").unwrap();
        assert_eq!(url.as_str(), "https://tracking.example.com/backend/");
        assert_eq!(
            url.join("api/Tracking/getAllTerminalInformation")
                .unwrap()
                .as_str(),
            "https://tracking.example.com/backend/api/Tracking/getAllTerminalInformation"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            parse_base_url("ftp://files.example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
