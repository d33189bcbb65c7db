use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const PRIMARY_LABEL: &str = "groq";
pub const SECONDARY_LABEL: &str = "openai";

const DEFAULT_PRIMARY_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_PRIMARY_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_SECONDARY_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_SECONDARY_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DOCUMENT_CHAR_BUDGET: usize = 15_000;

/// What the orchestrator does when neither provider answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalFailurePolicy {
    /// Surface `AllProvidersUnavailableError` to the caller.
    #[default]
    Raise,
    /// Answer with a fixed apology instead.
    Apologize,
}

impl FromStr for TotalFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" => Ok(Self::Raise),
            "apologize" | "apologise" => Ok(Self::Apologize),
            other => Err(anyhow::anyhow!(
                "unknown total failure policy '{}', expected 'raise' or 'apologize'",
                other
            )),
        }
    }
}

/// Connection settings for one chat-completion provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub label: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

// Hand-written so the key never reaches a log line.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("label", &self.label)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub primary: ProviderConfig,
    pub secondary: ProviderConfig,
    pub document_char_budget: usize,
    pub on_total_failure: TotalFailurePolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let temperature = parse_or(&lookup, "LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        let max_tokens = parse_or(&lookup, "LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let timeout = Duration::from_secs(parse_or(
            &lookup,
            "PROVIDER_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);

        let primary = ProviderConfig {
            label: PRIMARY_LABEL.to_string(),
            base_url: lookup("GROQ_BASE_URL").unwrap_or_else(|| DEFAULT_PRIMARY_BASE_URL.to_string()),
            api_key: non_empty(lookup("GROQ_API_KEY")),
            model: lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_PRIMARY_MODEL.to_string()),
            temperature,
            max_tokens,
            timeout,
        };

        let secondary = ProviderConfig {
            label: SECONDARY_LABEL.to_string(),
            base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SECONDARY_BASE_URL.to_string()),
            api_key: non_empty(lookup("OPENAI_API_KEY")),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_SECONDARY_MODEL.to_string()),
            temperature,
            max_tokens,
            timeout,
        };

        let on_total_failure = match lookup("ON_TOTAL_FAILURE") {
            Some(value) => value.parse()?,
            None => TotalFailurePolicy::default(),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8000)?,
            primary,
            secondary,
            document_char_budget: parse_or(
                &lookup,
                "DOCUMENT_CHAR_BUDGET",
                DEFAULT_DOCUMENT_CHAR_BUDGET,
            )?,
            on_total_failure,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
