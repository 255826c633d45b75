use std::time::Duration;

use anyhow::{Context, Result};

use crate::applications::notifier::GoldStarNotifier;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every webhook call is independent.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub notifier: GoldStarNotifier,
    pub config: Config,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let llm = LlmClient::new(
            config.anthropic_api_key.clone(),
            config.anthropic_api_url.clone(),
            Duration::from_secs(config.upstream_timeout_secs),
        )
        .context("Failed to build LLM HTTP client")?;
        let notifier =
            GoldStarNotifier::new(&config).context("Failed to build email HTTP client")?;

        Ok(AppState {
            llm,
            notifier,
            config,
        })
    }
}
