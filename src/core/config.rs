//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::Provider;
use crate::core::prompt::PromptStyle;

/// Built-in per-provider settings
struct ProviderDefaults {
    api_key_env: &'static str,
    base_url_env: &'static str,
    base_url: &'static str,
    model: &'static str,
    prompt_style: PromptStyle,
    temperature: f64,
    max_tokens: u32,
}

const OPENAI_DEFAULTS: ProviderDefaults = ProviderDefaults {
    api_key_env: "OPENAI_API_KEY",
    base_url_env: "OPENAI_BASE_URL",
    base_url: "https://api.openai.com/v1",
    model: "gpt-3.5-turbo",
    prompt_style: PromptStyle::Combined,
    temperature: 0.0,
    max_tokens: 256,
};

const DEEPSEEK_DEFAULTS: ProviderDefaults = ProviderDefaults {
    api_key_env: "DEEPSEEK_API_KEY",
    base_url_env: "DEEPSEEK_BASE_URL",
    base_url: "https://api.deepseek.com",
    model: "deepseek-chat",
    prompt_style: PromptStyle::Split,
    temperature: 1.5,
    max_tokens: 256,
};

impl Provider {
    fn defaults(&self) -> &'static ProviderDefaults {
        match self {
            Provider::OpenAi => &OPENAI_DEFAULTS,
            Provider::DeepSeek => &DEEPSEEK_DEFAULTS,
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env(&self) -> &'static str {
        self.defaults().api_key_env
    }

    /// Environment variable overriding this provider's base URL
    pub fn base_url_env(&self) -> &'static str {
        self.defaults().base_url_env
    }
}

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub provider: Provider,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub prompt_style: PromptStyle,
    pub system_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_top_p() -> f64 {
    1.0
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::for_provider(Provider::OpenAi)
    }
}

impl TranslatorConfig {
    /// Built-in settings for a provider, without a credential
    pub fn for_provider(provider: Provider) -> Self {
        let defaults = provider.defaults();
        Self {
            provider,
            api_key: None,
            base_url: defaults.base_url.to_string(),
            model: defaults.model.to_string(),
            prompt_style: defaults.prompt_style,
            system_prompt: defaults.prompt_style.default_system_prompt().to_string(),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            top_p: default_top_p(),
            timeout_ms: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// A missing credential is not an error here; the translator built from
    /// this config starts disabled instead.
    pub fn from_env(provider: Provider) -> Result<Self> {
        let mut config = Self::for_provider(provider);

        config.api_key = std::env::var(provider.api_key_env())
            .ok()
            .filter(|k| !k.trim().is_empty());

        if config.api_key.is_none() {
            warn!(
                "{} API key not found. Please set the {} environment variable.",
                provider,
                provider.api_key_env()
            );
        }

        if let Ok(base_url) = std::env::var(provider.base_url_env()) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }

        if let Ok(timeout) = std::env::var("REQUEST_TIMEOUT_MS") {
            let timeout_ms = timeout.parse::<u64>().map_err(|e| TranslationError::ConfigError {
                message: format!("REQUEST_TIMEOUT_MS: {}", e),
            })?;
            config.timeout_ms = Some(timeout_ms);
        }

        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file (the API key is never written)
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Switch prompt style, resetting the system prompt to that style's default
    pub fn with_prompt_style(mut self, style: PromptStyle) -> Self {
        self.prompt_style = style;
        self.system_prompt = style.default_system_prompt().to_string();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Full URL of the chat-completions endpoint
    pub fn completions_endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(config_error("base URL is required"));
        }

        if self.model.trim().is_empty() {
            return Err(config_error("model is required"));
        }

        if self.max_tokens == 0 {
            return Err(config_error("max_tokens must be greater than 0"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(config_error("temperature must be between 0 and 2"));
        }

        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(config_error("top_p must be in (0, 1]"));
        }

        Ok(())
    }
}

fn config_error(message: &str) -> TranslationError {
    TranslationError::ConfigError {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let openai = TranslatorConfig::for_provider(Provider::OpenAi);
        assert_eq!(openai.model, "gpt-3.5-turbo");
        assert_eq!(openai.prompt_style, PromptStyle::Combined);
        assert_eq!(openai.temperature, 0.0);
        assert_eq!(openai.max_tokens, 256);
        assert_eq!(openai.top_p, 1.0);
        assert_eq!(openai.completions_endpoint(), "https://api.openai.com/v1/chat/completions");

        let deepseek = TranslatorConfig::for_provider(Provider::DeepSeek);
        assert_eq!(deepseek.model, "deepseek-chat");
        assert_eq!(deepseek.prompt_style, PromptStyle::Split);
        assert_eq!(deepseek.temperature, 1.5);
        assert!(deepseek.system_prompt.contains("{target_language}"));
        assert!(!deepseek.has_api_key());
    }

    #[test]
    fn test_config_validation() {
        let config = TranslatorConfig::default().with_api_key("test_key");
        assert!(config.validate().is_ok());

        assert!(TranslatorConfig::default().with_max_tokens(0).validate().is_err());
        assert!(TranslatorConfig::default().with_temperature(2.5).validate().is_err());
        assert!(TranslatorConfig::default().with_model("").validate().is_err());

        let mut config = TranslatorConfig::default();
        config.top_p = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builders() {
        let config = TranslatorConfig::for_provider(Provider::OpenAi)
            .with_base_url("http://localhost:8080/")
            .with_prompt_style(PromptStyle::Split)
            .with_temperature(1.5);
        assert_eq!(config.completions_endpoint(), "http://localhost:8080/chat/completions");
        assert_eq!(config.system_prompt, PromptStyle::Split.default_system_prompt());
    }

    #[test]
    fn test_file_round_trip_drops_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translator.json");

        let config = TranslatorConfig::for_provider(Provider::DeepSeek)
            .with_api_key("sk-secret")
            .with_model("deepseek-reasoner");
        config.to_file(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("sk-secret"));

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.provider, Provider::DeepSeek);
        assert_eq!(loaded.model, "deepseek-reasoner");
        assert!(loaded.api_key.is_none());
    }
}
