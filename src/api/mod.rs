//! Inbound request boundary.
//!
//! Wire-level request and response types plus the handler that validates
//! input, resolves the provider identifier, and invokes the suggestion
//! service. The transport itself (HTTP framework, CLI) stays outside this
//! module; anything that can deliver a [`SuggestionRequest`] and render a
//! [`Suggestions`] or [`ApiError`] can serve as a front end.

use serde::{Deserialize, Serialize};

use crate::domain::{EmailContext, ProviderId, Suggestions};
use crate::services::{SuggestError, SuggestionService};

/// Provider used when the request does not name one.
pub const DEFAULT_PROVIDER: ProviderId = ProviderId::Groq;

/// One inbound suggestion request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionRequest {
    /// Subject of the email being replied to.
    pub subject: Option<String>,
    /// Body of the email being replied to.
    pub email_body: Option<String>,
    /// Prior thread messages, oldest first.
    pub thread_history: Vec<String>,
    /// Short provider code ("groq", "openai", "anthropic"). Defaults to groq.
    pub provider: Option<String>,
}

impl SuggestionRequest {
    fn into_parts(self) -> (EmailContext, Option<String>) {
        let context = EmailContext {
            subject: self.subject,
            body: self.email_body,
            thread_history: self.thread_history,
        };
        (context, self.provider)
    }
}

/// Error reported back to the caller.
///
/// `status` distinguishes caller mistakes (400) from upstream failures (502)
/// so transports can map it onto their own status mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    /// Wire shape of an error response: `{"error": "..."}`.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message.clone(),
        }
    }

    /// True when the caller can fix the request themselves.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

/// Serialized error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<SuggestError> for ApiError {
    fn from(err: SuggestError) -> Self {
        let status = match &err {
            SuggestError::EmptyContext
            | SuggestError::UnsupportedProvider(_)
            | SuggestError::NotImplemented(_)
            | SuggestError::MissingCredential { .. } => 400,
            SuggestError::ProviderCall(_) => 502,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handles one suggestion request end to end.
///
/// Validation failures never reach the provider layer: an empty context or
/// an unknown provider code is rejected before any dispatch.
pub async fn handle(
    service: &SuggestionService,
    request: SuggestionRequest,
) -> Result<Suggestions, ApiError> {
    let (context, provider_code) = request.into_parts();

    if context.is_empty() {
        return Err(SuggestError::EmptyContext.into());
    }

    let provider = match provider_code {
        Some(code) => ProviderId::from_code(&code)
            .ok_or_else(|| ApiError::from(SuggestError::UnsupportedProvider(code)))?,
        None => DEFAULT_PROVIDER,
    };

    service
        .generate(&context, provider)
        .await
        .map_err(ApiError::from)
}
