use std::time::Duration;

use anyhow::{Context, Result};

/// Pipeline configuration loaded from environment variables.
/// The API key is optional — without one the AI path is simply disabled and
/// every stage runs its deterministic heuristics.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub anthropic_api_key: Option<String>,
    pub ai_enabled: bool,
    /// Per-section model calls on top of the skill categorizer's.
    pub enhanced: bool,
    /// Deadline for each individual classifier call.
    pub ai_timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            ai_enabled: true,
            enhanced: false,
            ai_timeout: Duration::from_secs(20),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = std::env::var("ANALYSIS_AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<u64>()
            .context("ANALYSIS_AI_TIMEOUT_SECS must be a number of seconds")?;

        Ok(AnalysisConfig {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            ai_enabled: env_flag("ANALYSIS_AI_ENABLED", true)?,
            enhanced: env_flag("ANALYSIS_ENHANCED", false)?,
            ai_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Deterministic configuration: no AI path anywhere.
    pub fn heuristic_only() -> Self {
        Self {
            ai_enabled: false,
            ..Self::default()
        }
    }
}

fn env_flag(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<bool>()
            .with_context(|| format!("{key} must be 'true' or 'false'")),
        Err(_) => Ok(default),
    }
}
