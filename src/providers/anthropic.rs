//! Anthropic Claude API provider implementation.
//!
//! Same request/response exchange as the OpenAI-compatible backends, but the
//! messages API differs in field names: `max_tokens` is mandatory, the system
//! prompt rides in a top-level `system` field, and authentication uses an
//! `x-api-key` header instead of a bearer token.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::traits::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, LlmResult, Message, Role,
};
use crate::domain::ProviderId;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Ceiling applied when a request carries no explicit token limit.
const DEFAULT_MAX_TOKENS: usize = 500;

/// Messages API request body.
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

impl From<&Message> for AnthropicMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: match msg.role {
                Role::User => "user".to_string(),
                Role::Assistant => "assistant".to_string(),
                // System messages are hoisted into the top-level field
                Role::System => "user".to_string(),
            },
            content: msg.content.clone(),
        }
    }
}

/// Messages API response body.
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

/// Messages API error body.
#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Provider for Anthropic's Claude API.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: ANTHROPIC_API_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Overrides the endpoint URL (for compatible proxies).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Overrides the HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers
    }

    fn build_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        // System messages cannot appear in the messages array
        let messages: Vec<AnthropicMessage> = request
            .messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(AnthropicMessage::from)
            .collect();

        let system_prompt = {
            let system_messages: Vec<&str> = request
                .messages
                .iter()
                .filter(|m| m.role == Role::System)
                .map(|m| m.content.as_str())
                .collect();

            match (&request.system_prompt, system_messages.is_empty()) {
                (Some(prompt), true) => Some(prompt.clone()),
                (Some(prompt), false) => {
                    Some(format!("{}\n\n{}", prompt, system_messages.join("\n\n")))
                }
                (None, false) => Some(system_messages.join("\n\n")),
                (None, true) => None,
            }
        };

        AnthropicRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system: system_prompt,
            temperature: Some(request.temperature),
        }
    }

    async fn handle_error_response(&self, response: reqwest::Response) -> LlmError {
        let status = response.status().as_u16();

        if let Ok(body) = response.json::<AnthropicErrorBody>().await {
            if status == 401 || body.error.error_type == "authentication_error" {
                return LlmError::Auth(body.error.message);
            }
            return LlmError::Api {
                status,
                message: body.error.message,
            };
        }

        LlmError::Api {
            status,
            message: format!("HTTP {status}"),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        ProviderId::Anthropic.code()
    }

    fn display_label(&self) -> &str {
        ProviderId::Anthropic.display_label()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> LlmResult<CompletionResponse> {
        let body = self.build_request(request);

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.build_headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let text = api_response
            .content
            .iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        Ok(CompletionResponse { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_rides_in_top_level_field() {
        let request = CompletionRequest::new(vec![Message::user("Hello")])
            .with_system_prompt("Reply in English.");

        let provider = AnthropicProvider::new("key", "claude-3-5-haiku-20241022");
        let body = provider.build_request(&request);

        assert_eq!(body.system, Some("Reply in English.".to_string()));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
    }

    #[test]
    fn system_messages_are_hoisted() {
        let request = CompletionRequest::new(vec![
            Message::system("Extra instruction"),
            Message::user("Hello"),
        ]);

        let provider = AnthropicProvider::new("key", "claude-3-5-haiku-20241022");
        let body = provider.build_request(&request);

        assert_eq!(body.system, Some("Extra instruction".to_string()));
        assert_eq!(body.messages.len(), 1);
    }

    #[test]
    fn max_tokens_is_always_present() {
        let request = CompletionRequest::new(vec![Message::user("Hi")]);
        let provider = AnthropicProvider::new("key", "claude-3-5-haiku-20241022");
        let body = provider.build_request(&request);

        assert_eq!(body.max_tokens, DEFAULT_MAX_TOKENS);

        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"max_tokens\":500"));
    }

    #[test]
    fn response_text_blocks_are_joined() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "[\"A\","},
                {"type": "text", "text": "\"B\"]"}
            ],
            "stop_reason": "end_turn"
        }"#;

        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        let text = response
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        assert_eq!(text, "[\"A\",\"B\"]");
    }

    #[test]
    fn trait_metadata() {
        let provider = AnthropicProvider::new("key", "claude-3-5-haiku-20241022");
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.display_label(), "Anthropic (Claude 3.5 Haiku)");
        assert_eq!(provider.model(), "claude-3-5-haiku-20241022");
    }
}
