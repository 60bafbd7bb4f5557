//! Logprob Translator - LLM translation with per-token probabilities
//!
//! This library sends a translation prompt to an OpenAI-compatible
//! chat-completion service and reports how likely the model found each
//! generated token.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::ProbabilityTranslator,
    config::TranslatorConfig,
    errors::{Result, TranslationError},
    models::{Provider, TokenProbability, TranslationRequest, TranslationResult},
    prompt::PromptStyle,
    transport::{ChatTransport, HttpTransport},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
