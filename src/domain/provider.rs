//! Provider identifiers and their fixed metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of known LLM backends.
///
/// Three are active; [`ProviderId::Mistral`] and [`ProviderId::Qwen`] are
/// placeholders whose integration is stubbed. Adding a backend means adding
/// a variant here, which makes every dispatch site a compile error until it
/// is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Groq,
    OpenAi,
    Anthropic,
    Mistral,
    Qwen,
}

impl ProviderId {
    /// All known identifiers, active and stubbed.
    pub const ALL: [ProviderId; 5] = [
        ProviderId::Groq,
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::Mistral,
        ProviderId::Qwen,
    ];

    /// Parses the short wire code used in requests ("groq", "openai", ...).
    ///
    /// Returns `None` for anything outside the known set.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "groq" => Some(Self::Groq),
            "openai" => Some(Self::OpenAi),
            "anthropic" => Some(Self::Anthropic),
            "mistral" => Some(Self::Mistral),
            "qwen" => Some(Self::Qwen),
            _ => None,
        }
    }

    /// The short wire code for this provider.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Mistral => "mistral",
            Self::Qwen => "qwen",
        }
    }

    /// Human-readable label reported back to callers.
    ///
    /// Fixed constants, independent of the model id used in requests.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Groq => "Groq (Llama 3.3)",
            Self::OpenAi => "OpenAI (GPT-4o mini)",
            Self::Anthropic => "Anthropic (Claude 3.5 Haiku)",
            Self::Mistral => "Mistral",
            Self::Qwen => "Qwen",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Mistral => "MISTRAL_API_KEY",
            Self::Qwen => "DASHSCOPE_API_KEY",
        }
    }

    /// Whether a working integration exists for this provider.
    pub fn is_implemented(&self) -> bool {
        matches!(self, Self::Groq | Self::OpenAi | Self::Anthropic)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_round_trips() {
        for id in ProviderId::ALL {
            assert_eq!(ProviderId::from_code(id.code()), Some(id));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(ProviderId::from_code("gemini"), None);
        assert_eq!(ProviderId::from_code("GROQ"), None);
        assert_eq!(ProviderId::from_code(""), None);
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&ProviderId::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");

        let parsed: ProviderId = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(parsed, ProviderId::Anthropic);
    }

    #[test]
    fn placeholders_are_not_implemented() {
        assert!(ProviderId::Groq.is_implemented());
        assert!(!ProviderId::Mistral.is_implemented());
        assert!(!ProviderId::Qwen.is_implemented());
    }

    #[test]
    fn display_labels_are_stable() {
        assert_eq!(ProviderId::Groq.display_label(), "Groq (Llama 3.3)");
        assert_eq!(ProviderId::Anthropic.env_var(), "ANTHROPIC_API_KEY");
    }
}
