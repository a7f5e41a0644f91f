//! Search-grounded LLM integration.
//!
//! Defines the `SearchClient` trait and provides implementations for
//! Google Gemini (with the Google Search tool) and OpenRouter (with the
//! web plugin). Both return raw model text; parsing happens in
//! `data::live`.

pub mod gemini;
pub mod openrouter;

use anyhow::Result;
use async_trait::async_trait;
use secrecy::SecretString;
use tracing::{info, warn};

use crate::config::{AppConfig, LlmConfig};

/// Abstraction over LLMs that can answer with web-search grounding.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Send a prompt and return the model's text response.
    async fn search(&self, prompt: &str) -> Result<String>;

    /// Model identifier string.
    fn model_name(&self) -> &str;
}

/// Build the configured client, or `None` when live data is disabled or
/// no API key is available.
pub fn build_client(cfg: &LlmConfig) -> Result<Option<Box<dyn SearchClient>>> {
    if !cfg.enabled {
        info!("Live data disabled in config");
        return Ok(None);
    }

    let api_key = match AppConfig::resolve_env(&cfg.api_key_env) {
        Ok(k) if !k.is_empty() => SecretString::new(k),
        _ => {
            warn!(env = %cfg.api_key_env, "No LLM API key configured, live data unavailable");
            return Ok(None);
        }
    };

    let client: Box<dyn SearchClient> = match cfg.provider.as_str() {
        "gemini" => {
            info!(model = %cfg.model, "Using Gemini search provider");
            Box::new(gemini::GeminiClient::new(
                api_key,
                Some(cfg.model.clone()),
                Some(cfg.max_tokens),
                cfg.timeout_secs,
            )?)
        }
        "openrouter" => {
            info!(
                model = %cfg.model,
                fallback = ?cfg.fallback_model,
                "Using OpenRouter search provider"
            );
            Box::new(openrouter::OpenRouterClient::new(
                api_key,
                Some(cfg.model.clone()),
                cfg.fallback_model.clone(),
                Some(cfg.max_tokens),
                cfg.timeout_secs,
            )?)
        }
        other => {
            warn!(provider = other, "Unknown LLM provider, defaulting to Gemini");
            Box::new(gemini::GeminiClient::new(
                api_key,
                None,
                Some(cfg.max_tokens),
                cfg.timeout_secs,
            )?)
        }
    };

    Ok(Some(client))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
