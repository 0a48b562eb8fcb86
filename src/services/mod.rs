//! Business services layer.
//!
//! Sits between the inbound boundary and the provider infrastructure:
//!
//! ```text
//! Boundary (API types, CLI)
//!          |
//!          v
//!    Services Layer  <-- You are here
//!          |
//!          v
//! Infrastructure (LLM providers)
//! ```

mod suggestion_service;

pub use suggestion_service::{SuggestError, SuggestionService};
