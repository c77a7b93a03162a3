use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const MISSING_API_KEY: &str =
    "GROQ_API_KEY not found in environment variables. Please set it and restart the app.";

#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let groq_api_key = lookup("GROQ_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config(MISSING_API_KEY.to_string()))?;

        let base_url = lookup("GROQ_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = lookup("GROQ_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        let max_retries = lookup("GROQ_MAX_RETRIES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let retry_base_ms = lookup("GROQ_RETRY_BASE_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        Ok(Self {
            groq_api_key,
            base_url,
            timeout_secs,
            max_retries,
            retry_base_ms,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Budget for single-call modes and the response step of advance-steps.
    pub max_output_tokens: u32,
    /// Budget for the refine, review and summarize steps.
    pub step_max_tokens: u32,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 1000,
            step_max_tokens: 500,
            show_progress: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl From<&Config> for RetryConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay_ms: config.retry_base_ms,
        }
    }
}
