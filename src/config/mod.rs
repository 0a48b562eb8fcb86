//! Configuration management.
//!
//! Runtime configuration is read once from the process environment at
//! startup; there is no on-disk settings file. Each provider's availability
//! is an explicit optional credential, so "credential missing" is
//! independently testable without touching the environment.

mod settings;

pub use settings::{
    Config, ProviderSettings, DEFAULT_ANTHROPIC_MODEL, DEFAULT_GROQ_MODEL, DEFAULT_OPENAI_MODEL,
};
