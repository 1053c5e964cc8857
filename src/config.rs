use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the module whose first ticker is the momentum reference.
pub const DEFAULT_MODULE: &str = "default";

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
    #[serde(default = "default_fetch_months")]
    pub fetch_months: u32,
    /// Module name -> tickers, iterated in lexicographic module order.
    pub modules: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

fn default_base_url() -> String {
    "https://api.intrinio.com".to_string()
}

fn default_frequency() -> String {
    "daily".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_fetch_months() -> u32 {
    13
}

impl AppConfig {
    /// Tickers of every module, first occurrence wins.
    pub fn all_tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = Vec::new();
        for ticker in self.modules.values().flatten() {
            if !tickers.contains(ticker) {
                tickers.push(ticker.clone());
            }
        }
        tickers
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.modules.get(DEFAULT_MODULE) {
            Some(tickers) if !tickers.is_empty() => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "module \"{}\" with at least one ticker is required",
                    DEFAULT_MODULE
                )));
            }
        }

        for (name, tickers) in &self.modules {
            if tickers.iter().any(|t| t.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("module \"{}\" has a blank ticker", name)));
            }
        }

        if self.fetch_months == 0 {
            return Err(ConfigError::Invalid("fetch_months must be positive".into()));
        }

        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "database": { "path": "prices.db" },
        "provider": { "api_key": "secret" },
        "modules": {
            "tech": ["BBB", "CCC"],
            "default": ["AAA", "BBB"]
        }
    }"#;

    #[test]
    fn test_parse_applies_defaults() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.provider.base_url, "https://api.intrinio.com");
        assert_eq!(config.provider.frequency, "daily");
        assert_eq!(config.provider.page_size, 100);
        assert_eq!(config.fetch_months, 13);
        assert_eq!(
            config.modules.keys().collect::<Vec<_>>(),
            vec!["default", "tech"]
        );
    }

    #[test]
    fn test_all_tickers_deduplicated_in_module_order() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.all_tickers(), vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn test_missing_default_module_rejected() {
        let content = r#"{
            "database": { "path": "prices.db" },
            "provider": { "api_key": "secret" },
            "modules": { "tech": ["BBB"] }
        }"#;
        assert!(matches!(parse_config(content), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_default_module_rejected() {
        let content = r#"{
            "database": { "path": "prices.db" },
            "provider": { "api_key": "secret" },
            "modules": { "default": [] }
        }"#;
        assert!(matches!(parse_config(content), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(parse_config("{"), Err(ConfigError::Parse(_))));
    }
}
