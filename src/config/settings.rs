//! Runtime configuration types.

use std::env;

use serde::{Deserialize, Serialize};

use crate::domain::ProviderId;
use crate::normalize::NormalizerOptions;

/// Default model for Groq requests.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Default model for OpenAI requests.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Default model for Anthropic requests.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";

/// Sampling temperature shared by all active providers.
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Token limit shared by all active providers.
const DEFAULT_MAX_TOKENS: usize = 500;

/// Top-level runtime configuration.
///
/// Built once at process start via [`Config::from_env`] and treated as
/// read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Groq provider configuration.
    pub groq: ProviderSettings,
    /// OpenAI provider configuration.
    pub openai: ProviderSettings,
    /// Anthropic provider configuration.
    pub anthropic: ProviderSettings,
    /// Response normalization thresholds.
    pub normalizer: NormalizerOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq: ProviderSettings::with_model(DEFAULT_GROQ_MODEL),
            openai: ProviderSettings::with_model(DEFAULT_OPENAI_MODEL),
            anthropic: ProviderSettings::with_model(DEFAULT_ANTHROPIC_MODEL),
            normalizer: NormalizerOptions::default(),
        }
    }
}

impl Config {
    /// Reads credentials from the process environment.
    ///
    /// One variable gates each active provider; an absent or blank variable
    /// leaves that provider disabled at the configuration-check stage rather
    /// than at call time.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.groq.api_key = read_env_key(ProviderId::Groq);
        config.openai.api_key = read_env_key(ProviderId::OpenAi);
        config.anthropic.api_key = read_env_key(ProviderId::Anthropic);
        config
    }

    /// Settings for an active provider; `None` for stubbed placeholders.
    pub fn provider(&self, id: ProviderId) -> Option<&ProviderSettings> {
        match id {
            ProviderId::Groq => Some(&self.groq),
            ProviderId::OpenAi => Some(&self.openai),
            ProviderId::Anthropic => Some(&self.anthropic),
            ProviderId::Mistral | ProviderId::Qwen => None,
        }
    }
}

/// Configuration for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key, environment-supplied. Never serialized.
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Model identifier used in requests.
    pub model: String,
    /// Custom endpoint override (for compatible proxies).
    pub base_url: Option<String>,
    /// Sampling temperature (0.0 to 1.0).
    pub temperature: f32,
    /// Maximum tokens in a response.
    pub max_tokens: usize,
}

impl ProviderSettings {
    fn with_model(model: &str) -> Self {
        Self {
            api_key: None,
            model: model.to_string(),
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// True when a credential was supplied for this provider.
    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::with_model("")
    }
}

fn read_env_key(id: ProviderId) -> Option<String> {
    env::var(id.env_var())
        .ok()
        .filter(|value| !value.trim().is_empty())
}
