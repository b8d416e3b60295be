//! Application configuration embedded in the bundle.
//!
//! `config.toml` is compiled in with `include_str!`; the backend host is chosen
//! by the build-time `PETCAART_ENV` variable.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

const EMBEDDED_CONFIG: &str = include_str!("../config.toml");

/// Environment selected when `PETCAART_ENV` is not set at build time.
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("environment `{0}` is not defined in config.toml")]
    UnknownEnvironment(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    tunnel_header: String,
    storage_secret: String,
    #[serde(default = "default_per_page")]
    default_per_page: usize,
    #[serde(default = "default_per_page_options")]
    per_page_options: Vec<usize>,
    environments: HashMap<String, EnvironmentConfig>,
}

fn default_per_page() -> usize {
    10
}

fn default_per_page_options() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub environment: String,
    pub api_base_url: String,
    /// Header sent with every request so the tunnel skips its interstitial page.
    pub tunnel_header: String,
    pub storage_secret: String,
    pub default_per_page: usize,
    pub per_page_options: Vec<usize>,
}

impl AppConfig {
    /// Loads the embedded configuration for the build's environment.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = option_env!("PETCAART_ENV").unwrap_or(DEFAULT_ENVIRONMENT);
        Self::from_toml(EMBEDDED_CONFIG, environment)
    }

    /// Like [`AppConfig::load`], but never fails: falls back to the
    /// development backend and logs why.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => {
                log::info!(
                    "Using {} backend at {}",
                    config.environment,
                    config.api_base_url
                );
                config
            }
            Err(e) => {
                log::warn!("Falling back to default configuration: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_toml(source: &str, environment: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(source)?;
        let env = raw
            .environments
            .get(environment)
            .ok_or_else(|| ConfigError::UnknownEnvironment(environment.to_string()))?;

        let per_page_options = if raw.per_page_options.is_empty() {
            default_per_page_options()
        } else {
            raw.per_page_options
        };

        Ok(Self {
            environment: environment.to_string(),
            api_base_url: env.api_base_url.clone(),
            tunnel_header: raw.tunnel_header,
            storage_secret: raw.storage_secret,
            default_per_page: raw.default_per_page.max(1),
            per_page_options,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            api_base_url: "https://petcaart-dev.ngrok.app/".to_string(),
            tunnel_header: "ngrok-skip-browser-warning".to_string(),
            storage_secret: "petcaart-admin-session".to_string(),
            default_per_page: default_per_page(),
            per_page_options: default_per_page_options(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_has_both_environments() {
        let prod = AppConfig::from_toml(EMBEDDED_CONFIG, "production").unwrap();
        let dev = AppConfig::from_toml(EMBEDDED_CONFIG, "development").unwrap();
        assert_ne!(prod.api_base_url, dev.api_base_url);
        assert_eq!(prod.tunnel_header, "ngrok-skip-browser-warning");
        assert_eq!(dev.per_page_options, vec![10, 25, 50, 100]);
    }

    #[test]
    fn test_unknown_environment() {
        let err = AppConfig::from_toml(EMBEDDED_CONFIG, "staging").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(ref e) if e == "staging"));
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let source = r#"
tunnel_header = "x-skip"
storage_secret = "s"

[environments.development]
api_base_url = "http://localhost:8080"
"#;
        let config = AppConfig::from_toml(source, "development").unwrap();
        assert_eq!(config.default_per_page, 10);
        assert_eq!(config.per_page_options, vec![10, 25, 50, 100]);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml("tunnel_header = ", "development"),
            Err(ConfigError::Parse(_))
        ));
    }
}
