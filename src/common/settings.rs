//! Process configuration read from the environment.

use crate::common::client::DEFAULT_TIMEOUT;
use crate::price::{DEFAULT_PRICE_API_BASE, DEFAULT_PRICE_TIMEOUT};
use std::time::Duration;

pub const DEFAULT_SWAP_API_BASE: &str = "https://api.cyphergoat.com";

/// Read in order; the first non-blank value wins.
pub const API_KEY_ENVS: [&str; 3] = ["CYPHERGOAT_API_KEY", "SWAP_API_KEY", "API_KEY"];
pub const SWAP_API_URL_ENV: &str = "SWAP_API_URL";
pub const PRICE_API_URL_ENV: &str = "PRICE_API_URL";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Bearer token for the aggregator. `None` when unset or blank.
    pub api_key: Option<String>,
    pub swap_api_base: String,
    pub swap_timeout: Duration,
    pub price_api_base: String,
    pub price_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            swap_api_base: DEFAULT_SWAP_API_BASE.to_string(),
            swap_timeout: DEFAULT_TIMEOUT,
            price_api_base: DEFAULT_PRICE_API_BASE.to_string(),
            price_timeout: DEFAULT_PRICE_TIMEOUT,
        }
    }
}

impl Settings {
    /// Loads `.env` (if any) and reads settings from the process environment.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = Self::default();
        Self {
            api_key: API_KEY_ENVS.into_iter().find_map(|key| read(key)),
            swap_api_base: read(SWAP_API_URL_ENV)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.swap_api_base),
            price_api_base: read(PRICE_API_URL_ENV).unwrap_or(defaults.price_api_base),
            ..defaults
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_swap_api_base(mut self, base: impl Into<String>) -> Self {
        self.swap_api_base = base.into();
        self
    }

    pub fn with_price_api_base(mut self, base: impl Into<String>) -> Self {
        self.price_api_base = base.into();
        self
    }
}

/// Loads `.env` from the current or project directory. Call before reading env vars.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(lookup_from(&[]));
        assert!(settings.api_key.is_none());
        assert_eq!(settings.swap_api_base, DEFAULT_SWAP_API_BASE);
        assert_eq!(settings.price_api_base, DEFAULT_PRICE_API_BASE);
    }

    #[test]
    fn cyphergoat_key_wins_over_aliases() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("CYPHERGOAT_API_KEY", "cyphergoat"),
            ("SWAP_API_KEY", "alias"),
            ("API_KEY", "fallback"),
        ]));
        assert_eq!(settings.api_key.as_deref(), Some("cyphergoat"));

        let settings = Settings::from_lookup(lookup_from(&[
            ("CYPHERGOAT_API_KEY", "cyphergoat"),
            ("API_KEY", "fallback"),
        ]));
        assert_eq!(settings.api_key.as_deref(), Some("cyphergoat"));
    }

    #[test]
    fn blank_keys_fall_through_in_order() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("CYPHERGOAT_API_KEY", "  "),
            ("SWAP_API_KEY", "alias"),
            ("API_KEY", "fallback"),
        ]));
        assert_eq!(settings.api_key.as_deref(), Some("alias"));

        let settings = Settings::from_lookup(lookup_from(&[
            ("CYPHERGOAT_API_KEY", ""),
            ("API_KEY", "fallback"),
        ]));
        assert_eq!(settings.api_key.as_deref(), Some("fallback"));
    }

    #[test]
    fn swap_url_trailing_slash_is_stripped() {
        let settings =
            Settings::from_lookup(lookup_from(&[(SWAP_API_URL_ENV, "http://localhost:9000/")]));
        assert_eq!(settings.swap_api_base, "http://localhost:9000");
    }
}
