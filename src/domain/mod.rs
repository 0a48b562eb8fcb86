//! Domain layer types for replykit.
//!
//! This module contains the core types shared across the crate: the email
//! context a caller supplies, the closed set of provider identifiers, and
//! the suggestions payload returned to the caller.

mod context;
mod provider;
mod suggestion;

pub use context::EmailContext;
pub use provider::ProviderId;
pub use suggestion::Suggestions;
