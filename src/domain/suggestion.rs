//! The suggestions payload returned to callers.

use serde::{Deserialize, Serialize};

/// Reply suggestions produced by one provider for one request.
///
/// `suggestions` is expected to hold 3 entries but the length is not
/// enforced; `provider` carries the producing backend's display label.
/// Produced fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggestions: Vec<String>,
    pub provider: String,
}
