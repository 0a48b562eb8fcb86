//! Suggestion service: the provider dispatcher.
//!
//! The [`SuggestionService`] owns one client handle per configured provider,
//! constructed once at startup and read-only afterwards. Each call builds a
//! prompt from the email context, dispatches to the selected backend, and
//! normalizes whatever comes back into a uniform suggestions list.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{EmailContext, ProviderId, Suggestions};
use crate::normalize::{normalize, NormalizerOptions};
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::providers::{
    AnthropicProvider, CompletionRequest, LlmError, LlmProvider, Message,
    OpenAiCompatibleProvider,
};

/// Errors surfaced by the suggestion pipeline.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Neither a subject nor an email body was supplied.
    #[error("Either subject or email body is required")]
    EmptyContext,

    /// The provider identifier is outside the known set.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// The provider is known but its integration is stubbed.
    #[error("{0} integration is not yet implemented")]
    NotImplemented(ProviderId),

    /// The selected provider's credential was absent at startup.
    #[error("{provider} API key not configured. Set {env_var} in the environment")]
    MissingCredential {
        provider: ProviderId,
        env_var: &'static str,
    },

    /// The outbound call failed; the underlying message is surfaced as-is.
    #[error("Provider call failed: {0}")]
    ProviderCall(#[from] LlmError),
}

/// Per-provider state assembled at construction time.
struct ProviderHandle {
    client: Arc<dyn LlmProvider>,
    temperature: f32,
    max_tokens: usize,
}

/// Dispatches suggestion requests to the configured LLM backends.
pub struct SuggestionService {
    handles: HashMap<ProviderId, ProviderHandle>,
    normalizer: NormalizerOptions,
}

impl SuggestionService {
    /// Builds the service from configuration.
    ///
    /// Only providers whose credential was supplied get a client handle;
    /// the rest fail the configuration check in [`Self::generate`].
    pub fn new(config: &Config) -> Self {
        let mut service = Self {
            handles: HashMap::new(),
            normalizer: config.normalizer,
        };

        if let Some(key) = &config.groq.api_key {
            let settings = &config.groq;
            let client = match &settings.base_url {
                Some(url) => {
                    OpenAiCompatibleProvider::custom(ProviderId::Groq, url, key, &settings.model)
                }
                None => OpenAiCompatibleProvider::groq(key, &settings.model),
            };
            service.insert(ProviderId::Groq, Arc::new(client), settings);
        }

        if let Some(key) = &config.openai.api_key {
            let settings = &config.openai;
            let client = match &settings.base_url {
                Some(url) => {
                    OpenAiCompatibleProvider::custom(ProviderId::OpenAi, url, key, &settings.model)
                }
                None => OpenAiCompatibleProvider::openai(key, &settings.model),
            };
            service.insert(ProviderId::OpenAi, Arc::new(client), settings);
        }

        if let Some(key) = &config.anthropic.api_key {
            let settings = &config.anthropic;
            let mut client = AnthropicProvider::new(key, &settings.model);
            if let Some(url) = &settings.base_url {
                client = client.with_api_url(url);
            }
            service.insert(ProviderId::Anthropic, Arc::new(client), settings);
        }

        service
    }

    fn insert(
        &mut self,
        id: ProviderId,
        client: Arc<dyn LlmProvider>,
        settings: &crate::config::ProviderSettings,
    ) {
        self.handles.insert(
            id,
            ProviderHandle {
                client,
                temperature: settings.temperature,
                max_tokens: settings.max_tokens,
            },
        );
    }

    /// Registers a provider client directly. Used by tests to inject stubs.
    pub fn with_provider(mut self, id: ProviderId, client: Arc<dyn LlmProvider>) -> Self {
        self.handles.insert(
            id,
            ProviderHandle {
                client,
                temperature: 0.7,
                max_tokens: 500,
            },
        );
        self
    }

    /// Providers that are both implemented and configured.
    pub fn available_providers(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.handles.contains_key(id))
            .collect()
    }

    /// Generates reply suggestions for an email context.
    ///
    /// Fails before any network attempt when the provider is stubbed or its
    /// credential is missing. A transport or API failure propagates as
    /// [`SuggestError::ProviderCall`]; no retries, no partial results.
    pub async fn generate(
        &self,
        context: &EmailContext,
        provider: ProviderId,
    ) -> Result<Suggestions, SuggestError> {
        if !provider.is_implemented() {
            return Err(SuggestError::NotImplemented(provider));
        }

        let handle = self
            .handles
            .get(&provider)
            .ok_or(SuggestError::MissingCredential {
                provider,
                env_var: provider.env_var(),
            })?;

        let prompt = build_prompt(context);
        debug!(provider = %provider, prompt_len = prompt.len(), "dispatching suggestion request");

        let request = CompletionRequest::new(vec![Message::user(prompt)])
            .with_system_prompt(SYSTEM_PROMPT)
            .with_temperature(handle.temperature)
            .with_max_tokens(handle.max_tokens);

        let response = handle.client.complete(&request).await?;

        let normalized = normalize(&response.text, &self.normalizer);
        if normalized.is_degraded() {
            warn!(
                provider = %provider,
                stage = normalized.stage(),
                "provider response was not a clean JSON array"
            );
        }

        let suggestions = normalized.into_suggestions();
        info!(
            provider = %provider,
            count = suggestions.len(),
            "generated reply suggestions"
        );

        Ok(Suggestions {
            suggestions,
            provider: handle.client.display_label().to_string(),
        })
    }
}
