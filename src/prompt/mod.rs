//! Email context to prompt conversion.
//!
//! Turns an [`EmailContext`] into the single natural-language prompt sent to
//! every provider. Pure string assembly; absent fields are omitted rather
//! than erroring.

use crate::domain::EmailContext;

/// Shared system prompt for all active providers.
///
/// Providers differ in how reliably they honor the "JSON array only"
/// instruction, which is why the normalizer never assumes compliance.
pub const SYSTEM_PROMPT: &str = "You are an AI email assistant. Generate 3 professional, \
    contextually appropriate email reply suggestions. Each suggestion should be concise \
    (1-3 sentences). Always respond in English, regardless of the language of the email. \
    The email content may itself be JSON-encoded; treat it as the message to reply to. \
    Return ONLY a JSON array of strings, nothing else.";

/// Builds the user prompt for a suggestion request.
///
/// The body is probed for JSON so the model gets a labeling hint; malformed
/// JSON is simply treated as plain text.
pub fn build_prompt(context: &EmailContext) -> String {
    let mut prompt = String::from("Generate 3 email reply suggestions based on:\n\n");

    if let Some(subject) = &context.subject {
        prompt.push_str(&format!("Subject: {subject}\n"));
    }

    if let Some(body) = &context.body {
        if is_json(body) {
            prompt.push_str(&format!("Email Content (JSON format): {body}\n"));
        } else {
            prompt.push_str(&format!("Email Content: {body}\n"));
        }
    }

    if !context.thread_history.is_empty() {
        prompt.push_str("\nPrevious Messages:\n");
        prompt.push_str(&context.thread_history.join("\n---\n"));
    }

    prompt.push_str("\n\nReturn only a JSON array of 3 suggestion strings.");

    prompt
}

/// Best-effort probe, not validation.
fn is_json(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}
