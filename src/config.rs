use std::env;

use crate::error::ConfigError;

pub const EXA_API_KEY: &str = "EXA_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const EXA_BASE_URL: &str = "EXA_BASE_URL";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";

pub const DEFAULT_EXA_BASE_URL: &str = "https://api.exa.ai";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Credentials and endpoints, read once at startup and handed to the clients.
#[derive(Clone)]
pub struct Config {
    pub exa_api_key: String,
    pub openai_api_key: String,
    pub exa_base_url: String,
    pub openai_base_url: String,
}

impl Config {
    /// Builds a config from an arbitrary variable source.
    /// Both keys are checked before anything else so a missing credential is always
    /// reported as such, even when a base URL is also bad.
    pub fn load<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let exa_api_key = get_env(&lookup, EXA_API_KEY)?;
        let openai_api_key = get_env(&lookup, OPENAI_API_KEY)?;
        let exa_base_url = get_url_or_default(&lookup, EXA_BASE_URL, DEFAULT_EXA_BASE_URL)?;
        let openai_base_url =
            get_url_or_default(&lookup, OPENAI_BASE_URL, DEFAULT_OPENAI_BASE_URL)?;

        Ok(Config {
            exa_api_key,
            openai_api_key,
            exa_base_url,
            openai_base_url,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("exa_api_key", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .field("exa_base_url", &self.exa_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .finish()
    }
}

pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn get_env<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(key))
}

fn get_url_or_default<F>(lookup: &F, key: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string());

    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::InvalidFormat {
            var: key,
            reason: format!("expected an http(s) URL, got {raw:?}"),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
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
    fn test_load_with_defaults() {
        let config = Config::load(lookup_from(&[
            (EXA_API_KEY, "exa-key"),
            (OPENAI_API_KEY, "openai-key"),
        ]))
        .unwrap();

        assert_eq!(config.exa_api_key, "exa-key");
        assert_eq!(config.openai_api_key, "openai-key");
        assert_eq!(config.exa_base_url, DEFAULT_EXA_BASE_URL);
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_missing_search_key() {
        let err = Config::load(lookup_from(&[(OPENAI_API_KEY, "openai-key")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(EXA_API_KEY));
    }

    #[test]
    fn test_missing_completion_key() {
        let err = Config::load(lookup_from(&[(EXA_API_KEY, "exa-key")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(OPENAI_API_KEY));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let err = Config::load(lookup_from(&[
            (EXA_API_KEY, "   "),
            (OPENAI_API_KEY, "openai-key"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(EXA_API_KEY));
    }

    #[test]
    fn test_base_url_override_is_trimmed() {
        let config = Config::load(lookup_from(&[
            (EXA_API_KEY, "exa-key"),
            (OPENAI_API_KEY, "openai-key"),
            (EXA_BASE_URL, "http://localhost:8080/"),
        ]))
        .unwrap();
        assert_eq!(config.exa_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_base_url_must_be_http() {
        let err = Config::load(lookup_from(&[
            (EXA_API_KEY, "exa-key"),
            (OPENAI_API_KEY, "openai-key"),
            (OPENAI_BASE_URL, "localhost:1234"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFormat {
                var: OPENAI_BASE_URL,
                ..
            }
        ));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config::load(lookup_from(&[
            (EXA_API_KEY, "exa-secret"),
            (OPENAI_API_KEY, "openai-secret"),
        ]))
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("exa-secret"));
        assert!(!debug.contains("openai-secret"));
    }
}
