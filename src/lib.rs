//! replykit - AI-generated email reply suggestions
//!
//! This crate normalizes heterogeneous LLM APIs into a single contract:
//! given an email context, return a fixed-size list of reply suggestion
//! strings tagged with the provider that produced them.

pub mod api;
pub mod config;
pub mod domain;
pub mod normalize;
pub mod prompt;
pub mod providers;
pub mod services;

pub use config::Config;
pub use domain::{EmailContext, ProviderId, Suggestions};
pub use services::{SuggestError, SuggestionService};
