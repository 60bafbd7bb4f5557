//! Core data models for translation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hosted chat-completion provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI: gpt-3.5-turbo on the default endpoint
    #[value(name = "openai")]
    OpenAi,
    /// DeepSeek: deepseek-chat behind a custom base URL
    #[value(name = "deepseek")]
    DeepSeek,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "OpenAI"),
            Provider::DeepSeek => write!(f, "DeepSeek"),
        }
    }
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// One generated token and how likely the model found it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenProbability {
    pub token: String,
    /// Natural-log probability as returned by the service
    pub logprob: f64,
    /// `e^logprob`, capped at 1
    pub probability: f64,
}

impl TokenProbability {
    /// The raw `logprob` is kept as given; service-side rounding can make it
    /// slightly positive, so only the linear value is clamped.
    pub fn from_logprob(token: impl Into<String>, logprob: f64) -> Self {
        Self {
            token: token.into(),
            logprob,
            probability: logprob.min(0.0).exp(),
        }
    }
}

/// Translation result
///
/// `token_probabilities` is kept in generation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation_text: String,
    pub token_probabilities: Vec<TokenProbability>,
    pub model_used: Option<String>,
    pub request_id: Option<String>,
    pub tokens_used: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TranslationResult {
    pub fn new(translation_text: impl Into<String>, token_probabilities: Vec<TokenProbability>) -> Self {
        Self {
            translation_text: translation_text.into(),
            token_probabilities,
            model_used: None,
            request_id: None,
            tokens_used: None,
            created_at: None,
        }
    }

    /// Product of all token probabilities; `1.0` when there are no tokens.
    ///
    /// Underflows to zero on long sequences, see [`Self::sequence_logprob`].
    pub fn sequence_probability(&self) -> f64 {
        self.token_probabilities
            .iter()
            .map(|t| t.probability)
            .product()
    }

    /// Sum of token log-probabilities
    pub fn sequence_logprob(&self) -> f64 {
        self.token_probabilities.iter().map(|t| t.logprob).sum()
    }

    /// Running product after each token
    pub fn running_probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        self.token_probabilities.iter().scan(1.0_f64, |acc, t| {
            *acc *= t.probability;
            Some(*acc)
        })
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.token_probabilities.iter().map(|t| t.token.as_str())
    }
}
