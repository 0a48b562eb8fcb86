//! Provider response normalization.
//!
//! Active providers are all instructed to return a bare JSON array of three
//! strings, but they differ in how reliably they comply: some return clean
//! JSON, some wrap the array in prose, some ignore the instruction entirely
//! and answer freeform. This module folds all of those shapes into a uniform
//! suggestions list through a deterministic fallback chain, never assuming
//! structural compliance and never failing.

use serde::{Deserialize, Serialize};

/// Canned reply used when nothing usable can be recovered from a response.
pub const FALLBACK_MESSAGE: &str = "Unable to generate suggestions. Please try again.";

/// Tunable thresholds for the line-splitting fallback.
///
/// The defaults mirror long-standing heuristics (lines under 10 characters
/// are assumed to be salutations or filler, and only the first 3 survivors
/// are kept); they are carried in configuration rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerOptions {
    /// Minimum character count for a line to count as a real suggestion.
    pub min_line_len: usize,
    /// Maximum number of lines kept by the line-splitting fallback.
    pub max_suggestions: usize,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            min_line_len: 10,
            max_suggestions: 3,
        }
    }
}

/// Outcome of normalizing one raw provider response.
///
/// The variant records which stage of the fallback chain produced the list,
/// so callers (and tests) can tell a compliant response from a rescued one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The whole response parsed as a JSON array of strings.
    Structured(Vec<String>),
    /// A JSON array was recovered from surrounding prose.
    Extracted(Vec<String>),
    /// Suggestions were split out of freeform lines.
    LineSplit(Vec<String>),
    /// Nothing structured was found; the whole trimmed text is one entry.
    RawText(Vec<String>),
    /// The response yielded nothing usable; the canned message stands in.
    EmptyFallback,
}

impl Normalized {
    /// Short stage name, used in logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Structured(_) => "structured",
            Self::Extracted(_) => "extracted",
            Self::LineSplit(_) => "line_split",
            Self::RawText(_) => "raw_text",
            Self::EmptyFallback => "empty_fallback",
        }
    }

    /// True when the chain fell through past the two JSON stages.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            Self::LineSplit(_) | Self::RawText(_) | Self::EmptyFallback
        )
    }

    /// Final suggestions list. Never empty.
    pub fn into_suggestions(self) -> Vec<String> {
        match self {
            Self::Structured(list)
            | Self::Extracted(list)
            | Self::LineSplit(list)
            | Self::RawText(list) => list,
            Self::EmptyFallback => vec![FALLBACK_MESSAGE.to_string()],
        }
    }
}

/// Normalizes a raw provider response into a suggestions list.
///
/// Stages are attempted in a fixed priority order:
///
/// 1. parse the entire text as a JSON array of strings, used verbatim;
/// 2. parse the greedy bracketed substring (first `[` to last `]`, spanning
///    newlines) as a JSON array of strings;
/// 3. split into lines, drop lines shorter than
///    [`NormalizerOptions::min_line_len`], keep the first
///    [`NormalizerOptions::max_suggestions`];
/// 4. fall back to the whole trimmed text as a single suggestion.
///
/// An empty outcome at any terminal stage resolves to
/// [`Normalized::EmptyFallback`], so the result list is never empty.
pub fn normalize(text: &str, options: &NormalizerOptions) -> Normalized {
    let trimmed = text.trim();

    // Stage 1: the whole response is a JSON array of strings.
    if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
        return if list.is_empty() {
            Normalized::EmptyFallback
        } else {
            Normalized::Structured(list)
        };
    }

    // Stage 2: a JSON array embedded in prose.
    if let Some(list) = extract_embedded_array(text) {
        return if list.is_empty() {
            Normalized::EmptyFallback
        } else {
            Normalized::Extracted(list)
        };
    }

    // Stage 3: freeform text, one suggestion per sufficiently long line.
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= options.min_line_len)
        .take(options.max_suggestions)
        .map(str::to_string)
        .collect();
    if !lines.is_empty() {
        return Normalized::LineSplit(lines);
    }

    // Stage 4: last resort, the entire response as one suggestion.
    if trimmed.is_empty() {
        Normalized::EmptyFallback
    } else {
        Normalized::RawText(vec![trimmed.to_string()])
    }
}

/// Greedy bracket extraction: first `[` through last `]`, newlines included.
fn extract_embedded_array(text: &str) -> Option<Vec<String>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Vec<String>>(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn defaults() -> NormalizerOptions {
        NormalizerOptions::default()
    }

    #[test]
    fn direct_parse_is_verbatim() {
        let text = r#"["Sure, Friday works.","Let me check my calendar.","Friday is fine, see you then."]"#;
        let result = normalize(text, &defaults());

        assert_eq!(
            result,
            Normalized::Structured(vec![
                "Sure, Friday works.".to_string(),
                "Let me check my calendar.".to_string(),
                "Friday is fine, see you then.".to_string(),
            ])
        );
    }

    #[test]
    fn direct_parse_tolerates_surrounding_whitespace() {
        let result = normalize("\n  [\"A\", \"B\"]  \n", &defaults());
        assert_eq!(
            result,
            Normalized::Structured(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn embedded_array_is_extracted_from_prose() {
        let text = "Sure! Here you go: [\"A\",\"B\",\"C\"] Hope that helps.";
        let result = normalize(text, &defaults());

        assert_eq!(
            result,
            Normalized::Extracted(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn embedded_array_spans_newlines() {
        let text = "Here are your suggestions:\n[\n  \"First reply\",\n  \"Second reply\"\n]\nEnjoy!";
        let result = normalize(text, &defaults());

        assert_eq!(
            result,
            Normalized::Extracted(vec![
                "First reply".to_string(),
                "Second reply".to_string()
            ])
        );
    }

    #[test]
    fn line_split_discards_short_lines() {
        let text = "Hi\nThanks for reaching out regarding the invoice\nLet me check and get back to you\nBest regards";
        let result = normalize(text, &defaults());

        assert_eq!(
            result,
            Normalized::LineSplit(vec![
                "Thanks for reaching out regarding the invoice".to_string(),
                "Let me check and get back to you".to_string(),
                "Best regards".to_string(),
            ])
        );
    }

    #[test]
    fn line_split_keeps_at_most_three_by_default() {
        let text = "A first long suggestion line\nA second long suggestion line\nA third long suggestion line\nA fourth long suggestion line";
        let result = normalize(text, &defaults());

        match result {
            Normalized::LineSplit(lines) => assert_eq!(lines.len(), 3),
            other => panic!("expected LineSplit, got {other:?}"),
        }
    }

    #[test]
    fn line_split_thresholds_are_configurable() {
        let options = NormalizerOptions {
            min_line_len: 3,
            max_suggestions: 2,
        };
        let result = normalize("one\ntwo\nthree\nfour", &options);

        assert_eq!(
            result,
            Normalized::LineSplit(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn short_prose_falls_back_to_raw_text() {
        // Single line under the length threshold, no brackets anywhere.
        let result = normalize("Okay.", &defaults());
        assert_eq!(result, Normalized::RawText(vec!["Okay.".to_string()]));
    }

    #[test]
    fn malformed_brackets_fall_through_to_lines() {
        let text = "Here you go: [\"A\", \"B\"\nSorry, that got cut off mid-answer";
        let result = normalize(text, &defaults());

        // No closing bracket, so extraction finds nothing and line-splitting
        // takes over.
        assert_eq!(
            result,
            Normalized::LineSplit(vec![
                "Here you go: [\"A\", \"B\"".to_string(),
                "Sorry, that got cut off mid-answer".to_string(),
            ])
        );
    }

    #[test]
    fn array_of_non_strings_is_not_structured() {
        let result = normalize("[1, 2, 3]", &defaults());
        assert_eq!(result, Normalized::RawText(vec!["[1, 2, 3]".to_string()]));
    }

    #[test]
    fn empty_input_yields_fallback() {
        assert_eq!(normalize("", &defaults()), Normalized::EmptyFallback);
        assert_eq!(normalize("  \n\t ", &defaults()), Normalized::EmptyFallback);
    }

    #[test]
    fn empty_json_array_yields_fallback() {
        assert_eq!(normalize("[]", &defaults()), Normalized::EmptyFallback);
    }

    #[test]
    fn fallback_still_produces_one_suggestion() {
        let suggestions = Normalized::EmptyFallback.into_suggestions();
        assert_eq!(suggestions, vec![FALLBACK_MESSAGE.to_string()]);
    }

    #[test]
    fn stage_names_match_variants() {
        assert_eq!(Normalized::Structured(vec![]).stage(), "structured");
        assert_eq!(Normalized::EmptyFallback.stage(), "empty_fallback");
        assert!(!Normalized::Extracted(vec![]).is_degraded());
        assert!(Normalized::RawText(vec![]).is_degraded());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: NormalizerOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.min_line_len, 10);
        assert_eq!(options.max_suggestions, 3);

        let options: NormalizerOptions =
            serde_json::from_str(r#"{"min_line_len":5}"#).unwrap();
        assert_eq!(options.min_line_len, 5);
        assert_eq!(options.max_suggestions, 3);
    }
}
