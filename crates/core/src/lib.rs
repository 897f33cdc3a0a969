pub mod domain;
pub mod flow;
pub mod market;
pub mod sentiment;
pub mod storage;
pub mod time;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_DATABASE_URL: &str = "sqlite://sentiment_history.db";
    pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://finnhub.io/api/v1";
    pub const DEFAULT_MARKET_DATA_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub database_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub market_data_base_url: Option<String>,
        pub market_data_api_key: Option<String>,
        pub market_data_timeout_secs: u64,
        pub port: u16,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from `lookup`. Blank values count as unset.
        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

            let market_data_timeout_secs = match var("MARKET_DATA_TIMEOUT_SECS") {
                Some(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("MARKET_DATA_TIMEOUT_SECS is not a number: {s}"))?,
                None => DEFAULT_MARKET_DATA_TIMEOUT_SECS,
            };
            anyhow::ensure!(
                market_data_timeout_secs > 0,
                "MARKET_DATA_TIMEOUT_SECS must be at least 1"
            );

            let port = match var("PORT") {
                Some(s) => s
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT is not a valid port: {s}"))?,
                None => DEFAULT_PORT,
            };

            Ok(Self {
                database_url: var("DATABASE_URL"),
                sentry_dsn: var("SENTRY_DSN"),
                market_data_base_url: var("MARKET_DATA_BASE_URL"),
                market_data_api_key: var("MARKET_DATA_API_KEY"),
                market_data_timeout_secs,
                port,
            })
        }

        pub fn database_url(&self) -> &str {
            self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
        }

        pub fn market_data_base_url(&self) -> &str {
            self.market_data_base_url
                .as_deref()
                .unwrap_or(DEFAULT_MARKET_DATA_BASE_URL)
        }

        pub fn require_market_data_api_key(&self) -> anyhow::Result<&str> {
            self.market_data_api_key
                .as_deref()
                .context("MARKET_DATA_API_KEY is required")
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                database_url: None,
                sentry_dsn: None,
                market_data_base_url: None,
                market_data_api_key: None,
                market_data_timeout_secs: DEFAULT_MARKET_DATA_TIMEOUT_SECS,
                port: DEFAULT_PORT,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn defaults_apply_when_unset() {
            let settings = Settings::default();
            assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
            assert_eq!(settings.market_data_base_url(), DEFAULT_MARKET_DATA_BASE_URL);
            assert_eq!(settings.market_data_timeout_secs, 10);
            assert_eq!(settings.port, 3000);
        }

        fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
            let map: std::collections::HashMap<String, String> = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            move |key: &str| map.get(key).cloned()
        }

        #[test]
        fn blank_values_count_as_unset() {
            let settings = Settings::from_lookup(env(&[
                ("PORT", ""),
                ("MARKET_DATA_TIMEOUT_SECS", "  "),
                ("DATABASE_URL", ""),
                ("MARKET_DATA_API_KEY", " "),
            ]))
            .unwrap();
            assert_eq!(settings.port, DEFAULT_PORT);
            assert_eq!(settings.market_data_timeout_secs, DEFAULT_MARKET_DATA_TIMEOUT_SECS);
            assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
            assert!(settings.market_data_api_key.is_none());
        }

        #[test]
        fn parses_explicit_values() {
            let settings = Settings::from_lookup(env(&[
                ("PORT", "8080"),
                ("MARKET_DATA_TIMEOUT_SECS", "15"),
                ("MARKET_DATA_API_KEY", "k"),
            ]))
            .unwrap();
            assert_eq!(settings.port, 8080);
            assert_eq!(settings.market_data_timeout_secs, 15);
            assert_eq!(settings.require_market_data_api_key().unwrap(), "k");
        }

        #[test]
        fn rejects_zero_or_garbage_timeout() {
            let err = Settings::from_lookup(env(&[("MARKET_DATA_TIMEOUT_SECS", "0")])).unwrap_err();
            assert!(err.to_string().contains("at least 1"), "{err}");
            assert!(Settings::from_lookup(env(&[("MARKET_DATA_TIMEOUT_SECS", "ten")])).is_err());
            assert!(Settings::from_lookup(env(&[("PORT", "70000")])).is_err());
        }

        #[test]
        fn api_key_is_required() {
            let err = Settings::default()
                .require_market_data_api_key()
                .unwrap_err();
            assert!(err.to_string().contains("MARKET_DATA_API_KEY"));

            let settings = Settings {
                market_data_api_key: Some("k".to_string()),
                ..Settings::default()
            };
            assert_eq!(settings.require_market_data_api_key().unwrap(), "k");
        }
    }
}
