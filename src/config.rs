//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults, so a partial file (or no file at all) is
//! valid. Secrets (API keys) are referenced by env-var name in the config
//! and resolved at runtime via `std::env::var`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::types::BottomError;

/// Earliest resolvable date when `app.min_date` is not configured.
pub const DEFAULT_MIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2010, 1, 1) {
    Some(date) => date,
    None => panic!("invalid default min_date"),
};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: GeneralConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    pub name: String,
    /// Earliest date that can be resolved (YYYY-MM-DD).
    pub min_date: String,
    /// Dates within this many calendar months of today use live data.
    pub live_window_months: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: "BOTTOM-GAUGE".to_string(),
            min_date: DEFAULT_MIN_DATE.to_string(),
            live_window_months: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub enabled: bool,
    /// "gemini" | "openrouter"
    pub provider: String,
    pub model: String,
    /// Fallback model for OpenRouter (used when primary model fails).
    pub fallback_model: Option<String>,
    pub api_key_env: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            fallback_model: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            max_tokens: 1024,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from a file if it exists, otherwise use defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            warn!(path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.min_date()?;
        Ok(config)
    }

    /// The configured earliest resolvable date.
    pub fn min_date(&self) -> Result<NaiveDate, BottomError> {
        NaiveDate::parse_from_str(&self.app.min_date, "%Y-%m-%d")
            .map_err(|_| BottomError::Config(format!("invalid app.min_date: {}", self.app.min_date)))
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.app.live_window_months, 1);
        assert_eq!(cfg.llm.provider, "gemini");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.app.min_date, "2010-01-01");
        assert_eq!(cfg.min_date().unwrap(), DEFAULT_MIN_DATE);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [llm]
            provider = "openrouter"
            model = "google/gemini-2.5-flash"
            fallback_model = "perplexity/sonar"
            api_key_env = "OPENROUTER_API_KEY"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.llm.provider, "openrouter");
        assert_eq!(cfg.llm.fallback_model.as_deref(), Some("perplexity/sonar"));
        assert_eq!(cfg.llm.timeout_secs, 30);
        assert_eq!(cfg.app.name, "BOTTOM-GAUGE");
    }

    #[test]
    fn test_invalid_min_date_rejected() {
        let err = AppConfig::from_toml("[app]\nmin_date = \"01/01/2010\"\n").unwrap_err();
        assert!(err.to_string().contains("min_date"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let cfg = AppConfig::load_or_default("/nonexistent/bottom_gauge_config.toml").unwrap();
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn test_load_repo_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml");
        let cfg = AppConfig::load(path).unwrap();
        assert_eq!(cfg.app.name, "BOTTOM-GAUGE");
        assert_eq!(cfg.min_date().unwrap(), DEFAULT_MIN_DATE);
        assert!(cfg.app.live_window_months >= 1);
        assert!(cfg.llm.timeout_secs > 0);
    }

    #[test]
    fn test_resolve_env_missing() {
        assert!(AppConfig::resolve_env("BOTTOM_GAUGE_TEST_UNSET_VAR").is_err());
    }
}
