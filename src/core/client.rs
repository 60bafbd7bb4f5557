//! Translation client that reports per-token probabilities

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{Provider, TokenProbability, TranslationRequest, TranslationResult};
use crate::core::prompt::build_messages;
use crate::core::transport::{ChatCompletionRequest, ChatCompletionResponse, ChatTransport, HttpTransport};

/// Translates text through a hosted chat model and keeps the token log-probabilities.
///
/// Without a credential the translator is disabled: every call fails with
/// [`TranslationError::ClientNotConfigured`] and the transport is never used.
#[derive(Clone)]
pub struct ProbabilityTranslator {
    config: Arc<TranslatorConfig>,
    transport: Option<Arc<dyn ChatTransport>>,
}

impl fmt::Debug for ProbabilityTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbabilityTranslator")
            .field("provider", &self.config.provider)
            .field("model", &self.config.model)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl ProbabilityTranslator {
    /// Create a translator talking HTTP to the configured endpoint
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let transport: Option<Arc<dyn ChatTransport>> = if config.has_api_key() {
            Some(Arc::new(HttpTransport::new(&config)?))
        } else {
            warn!("{} client is not initialized: no API key", config.provider);
            None
        };

        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Create from environment
    pub fn from_env(provider: Provider) -> Result<Self> {
        let config = TranslatorConfig::from_env(provider)?;
        Self::new(config)
    }

    /// Create with a caller-supplied transport; still disabled without a credential
    pub fn with_transport(config: TranslatorConfig, transport: Arc<dyn ChatTransport>) -> Result<Self> {
        config.validate()?;

        let transport = if config.has_api_key() {
            Some(transport)
        } else {
            warn!("{} client is not initialized: no API key", config.provider);
            None
        };

        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn provider(&self) -> Provider {
        self.config.provider
    }

    /// Translate a single request.
    ///
    /// Failures are logged with their cause and returned; nothing is retried.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        match self.send_request(request).await {
            Ok(result) => {
                info!(
                    provider = %self.config.provider,
                    tokens = result.token_probabilities.len(),
                    "Translation completed"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(provider = %self.config.provider, "An error occurred during the API call: {}", e);
                Err(e)
            }
        }
    }

    pub async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult> {
        let request = TranslationRequest::new(text, source_language, target_language);
        self.translate(&request).await
    }

    /// Wire request for a translation, as it would be sent
    pub fn build_request(&self, request: &TranslationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: build_messages(self.config.prompt_style, &self.config.system_prompt, request),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            logprobs: true,
        }
    }

    async fn send_request(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| TranslationError::ClientNotConfigured {
                provider: self.config.provider.to_string(),
            })?;

        if request.text.trim().is_empty() {
            return Err(TranslationError::InvalidRequest {
                message: "text to translate is empty".to_string(),
            });
        }

        let body = self.build_request(request);
        debug!(
            model = %body.model,
            temperature = body.temperature,
            max_tokens = body.max_tokens,
            "Requesting translation {} -> {}",
            request.source_language,
            request.target_language
        );

        let response = transport.complete(&body).await?;
        into_result(response)
    }
}

/// Extract the first choice's text and token probabilities
pub fn into_result(response: ChatCompletionResponse) -> Result<TranslationResult> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| TranslationError::missing("choices"))?;

    let content = choice
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| TranslationError::missing("choices[0].message.content"))?;

    let token_logprobs = choice
        .logprobs
        .and_then(|l| l.content)
        .ok_or_else(|| TranslationError::missing("choices[0].logprobs.content"))?;

    let token_probabilities = token_logprobs
        .into_iter()
        .map(|entry| {
            if !entry.logprob.is_finite() {
                return Err(TranslationError::InvalidResponseError {
                    message: format!("non-finite logprob for token {:?}", entry.token),
                });
            }
            Ok(TokenProbability::from_logprob(entry.token, entry.logprob))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TranslationResult {
        translation_text: content.trim().to_string(),
        token_probabilities,
        model_used: response.model,
        request_id: response.id,
        tokens_used: response.usage.map(|u| u.total_tokens),
        created_at: response
            .created
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
    })
}
