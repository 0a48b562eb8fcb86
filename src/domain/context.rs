//! The email context supplied with a suggestion request.

use serde::{Deserialize, Serialize};

/// The draft email a caller wants reply suggestions for.
///
/// Immutable once constructed; lives only for the duration of one request.
/// Absent fields are simply omitted from the generated prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContext {
    /// Subject line, if any.
    pub subject: Option<String>,
    /// Body text of the email being replied to. May itself be JSON-encoded.
    pub body: Option<String>,
    /// Prior messages in the thread, oldest first.
    pub thread_history: Vec<String>,
}

impl EmailContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_thread_history(mut self, history: Vec<String>) -> Self {
        self.thread_history = history;
        self
    }

    /// True when neither a subject nor a body carries any text.
    ///
    /// Whitespace-only fields count as empty; thread history alone is not
    /// enough context to generate a reply for.
    pub fn is_empty(&self) -> bool {
        let blank = |field: &Option<String>| {
            field
                .as_deref()
                .map_or(true, |text| text.trim().is_empty())
        };
        blank(&self.subject) && blank(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let context = EmailContext::new()
            .with_subject("Re: Invoice")
            .with_body("Please find attached.")
            .with_thread_history(vec!["First message".to_string()]);

        assert_eq!(context.subject, Some("Re: Invoice".to_string()));
        assert_eq!(context.body, Some("Please find attached.".to_string()));
        assert_eq!(context.thread_history.len(), 1);
    }

    #[test]
    fn default_context_is_empty() {
        assert!(EmailContext::new().is_empty());
    }

    #[test]
    fn whitespace_only_fields_count_as_empty() {
        let context = EmailContext::new().with_subject("   ").with_body("\n\t");
        assert!(context.is_empty());
    }

    #[test]
    fn subject_alone_is_enough() {
        let context = EmailContext::new().with_subject("Meeting");
        assert!(!context.is_empty());
    }

    #[test]
    fn thread_history_alone_is_not_enough() {
        let context =
            EmailContext::new().with_thread_history(vec!["Earlier message".to_string()]);
        assert!(context.is_empty());
    }
}
