//! Bot configuration from environment variables.
//!
//! A `.env` file in the working directory is loaded first if present.
//! Credentials are required; endpoints, bind address and timeout have defaults.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clients::luis::DEFAULT_LUIS_ENDPOINT;
use clients::sentiment::DEFAULT_TEXT_ANALYTICS_ENDPOINT;
use clients::tmdb::DEFAULT_TMDB_BASE_URL;
use clients::{LuisSettings, SentimentSettings, TmdbSettings};
use tracing::debug;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3978";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bind_addr: SocketAddr,
    pub http_timeout: Duration,
    pub luis: LuisSettings,
    pub tmdb: TmdbSettings,
    pub sentiment: SentimentSettings,
}

impl BotConfig {
    /// Load from the process environment (after `.env`)
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; the first listed name that is set wins
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };
        let require = |keys: &[&str]| {
            get(keys).ok_or_else(|| anyhow!("Missing required setting {}", keys.join(" or ")))
        };

        let bind_addr = get(&["BIND_ADDR"])
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("Invalid BIND_ADDR")?;

        let timeout_secs = match get(&["HTTP_TIMEOUT_SECS"]) {
            Some(raw) => raw.parse().context("Invalid HTTP_TIMEOUT_SECS")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            http_timeout: Duration::from_secs(timeout_secs),
            luis: LuisSettings {
                endpoint: get(&["LUIS_ENDPOINT"]).unwrap_or_else(|| DEFAULT_LUIS_ENDPOINT.to_string()),
                app_id: require(&["LUIS_APP_ID"])?,
                api_key: require(&["LUIS_API_KEY"])?,
            },
            tmdb: TmdbSettings {
                base_url: get(&["TMDB_BASE_URL"]).unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
                api_key: require(&["MOVIEDB_KEY", "moviedb_key"])?,
            },
            sentiment: SentimentSettings {
                endpoint: get(&["TEXT_ANALYTICS_ENDPOINT"])
                    .unwrap_or_else(|| DEFAULT_TEXT_ANALYTICS_ENDPOINT.to_string()),
                api_key: require(&["TEXT_ANALYTICS_KEY", "Ocp_Apim_Key"])?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("LUIS_APP_ID", "app"),
        ("LUIS_API_KEY", "luis"),
        ("MOVIEDB_KEY", "tmdb"),
        ("TEXT_ANALYTICS_KEY", "ta"),
    ];

    #[test]
    fn test_defaults_apply() {
        let config = BotConfig::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3978".parse::<SocketAddr>().unwrap());
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.luis.endpoint, DEFAULT_LUIS_ENDPOINT);
        assert_eq!(config.tmdb.base_url, DEFAULT_TMDB_BASE_URL);
        assert_eq!(config.tmdb.api_key, "tmdb");
        assert_eq!(config.sentiment.api_key, "ta");
    }

    #[test]
    fn test_legacy_key_names_are_accepted() {
        let config = BotConfig::from_lookup(lookup(&[
            ("LUIS_APP_ID", "app"),
            ("LUIS_API_KEY", "luis"),
            ("moviedb_key", "old-tmdb"),
            ("Ocp_Apim_Key", "old-ta"),
        ]))
        .unwrap();

        assert_eq!(config.tmdb.api_key, "old-tmdb");
        assert_eq!(config.sentiment.api_key, "old-ta");
    }

    #[test]
    fn test_missing_credential_is_an_error() {
        let err = BotConfig::from_lookup(lookup(&[("LUIS_APP_ID", "app")])).unwrap_err();
        assert!(err.to_string().contains("LUIS_API_KEY"));
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("BIND_ADDR", "127.0.0.1:8080"));
        pairs.push(("HTTP_TIMEOUT_SECS", "3"));
        let config = BotConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.http_timeout, Duration::from_secs(3));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("HTTP_TIMEOUT_SECS", "soon"));
        assert!(BotConfig::from_lookup(lookup(&pairs)).is_err());
    }
}
