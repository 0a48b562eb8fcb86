//! LLM provider implementations.
//!
//! This module provides a unified interface for the supported completion
//! backends. All providers implement [`LlmProvider`]: one request in, one
//! raw text response out, errors propagated without retries.
//!
//! # Supported backends
//!
//! - **Groq**: OpenAI-compatible chat completions at api.groq.com
//! - **OpenAI**: chat completions at api.openai.com
//! - **Anthropic**: Claude models via the messages API

mod anthropic;
mod openai;
mod traits;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiCompatibleProvider;
pub use traits::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, LlmResult, Message, Role,
};
