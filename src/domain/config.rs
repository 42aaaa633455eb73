//! CLI configuration loaded from `labquote.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::price_table::PriceTable;

const CONFIG_FILE: &str = "labquote.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteConfig {
    /// Submission gateway configuration.
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Optional JSON price table overriding the embedded catalog.
    #[serde(default)]
    pub price_table: Option<PathBuf>,
}

/// Submission gateway endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Mail-relay endpoint receiving the quote payload.
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { endpoint: default_endpoint(), timeout_secs: default_timeout_secs() }
    }
}

fn default_endpoint() -> Url {
    Url::parse("https://formsubmit.co/ajax/quotes@rivallabs.com")
        .expect("Default gateway endpoint must be valid")
}

fn default_timeout_secs() -> u64 {
    30
}

impl QuoteConfig {
    /// Load configuration from an explicit path.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        let config: QuoteConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the given path, from `labquote.toml` in the working
    /// directory, or fall back to defaults when neither is present. An
    /// explicitly named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.gateway.timeout_secs == 0 {
            return Err(AppError::config_error("gateway.timeout_secs must be greater than 0"));
        }
        let scheme = self.gateway.endpoint.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(AppError::config_error(format!(
                "gateway.endpoint must use http or https, got '{}'",
                scheme
            )));
        }
        Ok(())
    }

    /// Resolve the active price table: the configured override or the
    /// embedded catalog.
    pub fn price_table(&self) -> Result<PriceTable, AppError> {
        match &self.price_table {
            Some(path) => PriceTable::from_path(path),
            None => Ok(PriceTable::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = QuoteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gateway.timeout_secs, 30);
        assert!(config.price_table.is_none());
    }

    #[test]
    fn parses_full_config() {
        let config: QuoteConfig = toml::from_str(
            r#"
            price_table = "formulas.json"

            [gateway]
            endpoint = "https://relay.example.com/quotes"
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.endpoint.as_str(), "https://relay.example.com/quotes");
        assert_eq!(config.gateway.timeout_secs, 10);
        assert_eq!(config.price_table.as_deref(), Some(Path::new("formulas.json")));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config: QuoteConfig = toml::from_str(
            r#"
            [gateway]
            timeout_secs = 0
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config: QuoteConfig = toml::from_str(
            r#"
            [gateway]
            endpoint = "ftp://relay.example.com/quotes"
            "#,
        )
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<QuoteConfig, _> = toml::from_str("unexpected = true");
        assert!(result.is_err());
    }

    #[test]
    fn load_fails_for_missing_explicit_path() {
        let result = QuoteConfig::load_or_default(Some(Path::new("/nonexistent/labquote.toml")));
        assert!(result.is_err());
    }
}
