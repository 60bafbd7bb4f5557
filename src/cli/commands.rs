//! CLI command definitions and handlers

use clap::Subcommand;
use tracing::{info, warn};

use crate::cli::report::render_report;
use crate::core::client::ProbabilityTranslator;
use crate::core::config::TranslatorConfig;
use crate::core::errors::Result;
use crate::core::models::{Provider, TranslationRequest};

/// Commands for the translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a fixed sample sentence and print token probabilities
    Demo {
        /// Provider to call
        #[arg(short, long, value_enum, default_value = "openai")]
        provider: Provider,
    },

    /// Translate arbitrary text
    Translate {
        /// Text to translate (required)
        #[arg(long)]
        text: String,

        /// Source language
        #[arg(long, default_value = "English")]
        source_lang: String,

        /// Target language
        #[arg(short, long, default_value = "French")]
        target_lang: String,

        /// Provider to call
        #[arg(short, long, value_enum, default_value = "openai")]
        provider: Provider,

        /// Override the provider's model
        #[arg(long)]
        model: Option<String>,

        /// Override the sampling temperature
        #[arg(long)]
        temperature: Option<f64>,

        /// Override the output token budget
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved provider configuration
    ShowConfig {
        /// Provider to show
        #[arg(short, long, value_enum, default_value = "openai")]
        provider: Provider,
    },
}

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub api_key: Option<String>,
}

impl Provider {
    /// Sample sentence and language pair used by `demo`
    pub fn demo_request(&self) -> TranslationRequest {
        match self {
            Provider::OpenAi => TranslationRequest::new("The cat sat on the mat.", "English", "French"),
            Provider::DeepSeek => TranslationRequest::new("What is your name, sir?", "English", "Quechua"),
        }
    }
}

fn load_config(provider: Provider, global: &GlobalOptions) -> Result<TranslatorConfig> {
    let mut config = TranslatorConfig::from_env(provider)?;
    if let Some(api_key) = &global.api_key {
        config = config.with_api_key(api_key.clone());
    }
    Ok(config)
}

/// Build the translator, printing a diagnostic instead of failing on bad config
fn build_translator(config: Result<TranslatorConfig>) -> Option<ProbabilityTranslator> {
    match config.and_then(ProbabilityTranslator::new) {
        Ok(translator) => Some(translator),
        Err(e) => {
            warn!("Failed to create client: {}", e);
            println!("Cannot create client: {}", e);
            None
        }
    }
}

/// Lines printed before the demo call; only the DeepSeek demo carries a banner
pub fn demo_preamble(provider: Provider, request: &TranslationRequest) -> String {
    let mut out = String::new();
    if provider == Provider::DeepSeek {
        out.push_str(&format!("--- Using {} API ---\n", provider));
    }
    out.push_str(&format!(
        "Original {} Text:\n\"{}\"\n\n",
        request.source_language, request.text
    ));
    out
}

/// Translate and print the report; failures are printed, not returned
async fn run_and_print(translator: &ProbabilityTranslator, request: &TranslationRequest, json: bool) -> anyhow::Result<()> {
    match translator.translate(request).await {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_report(&result, &request.target_language));
            }
        }
        Err(e) => {
            println!("An error occurred during the API call: {}", e);
        }
    }
    Ok(())
}

/// Handle demo command
pub async fn handle_demo(provider: Provider, global: &GlobalOptions) -> anyhow::Result<()> {
    if provider == Provider::DeepSeek {
        println!("{} API Example: Translation with Token Probabilities", provider);
    }

    let Some(translator) = build_translator(load_config(provider, global)) else {
        return Ok(());
    };

    if !translator.is_enabled() {
        println!(
            "\nCannot run example because {} client is not initialized. Please set the {} environment variable.",
            provider,
            provider.api_key_env()
        );
        return Ok(());
    }

    let request = provider.demo_request();
    info!("Running {} demo with model {}", provider, translator.config().model);

    print!("{}", demo_preamble(provider, &request));

    run_and_print(&translator, &request, false).await
}

/// Handle translate command
#[allow(clippy::too_many_arguments)]
pub async fn handle_translate(
    text: String,
    source_lang: String,
    target_lang: String,
    provider: Provider,
    model: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    json: bool,
    global: &GlobalOptions,
) -> anyhow::Result<()> {
    let config = load_config(provider, global).map(|mut config| {
        if let Some(model) = model {
            config = config.with_model(model);
        }
        if let Some(temperature) = temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(max_tokens) = max_tokens {
            config = config.with_max_tokens(max_tokens);
        }
        config
    });

    let Some(translator) = build_translator(config) else {
        return Ok(());
    };

    if !translator.is_enabled() {
        println!(
            "{} client is not initialized. Cannot make API call. Set {} or pass --api-key.",
            provider,
            provider.api_key_env()
        );
        return Ok(());
    }

    let request = TranslationRequest::new(text, source_lang, target_lang);
    if !json {
        println!("Original {} Text:\n\"{}\"\n", request.source_language, request.text);
    }

    run_and_print(&translator, &request, json).await
}

/// Handle show-config command
pub fn handle_show_config(provider: Provider, global: &GlobalOptions) -> anyhow::Result<()> {
    let config = match load_config(provider, global) {
        Ok(config) => config,
        Err(e) => {
            println!("Cannot load {} configuration: {}", provider, e);
            return Ok(());
        }
    };
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!(
        "API key ({}): {}",
        provider.api_key_env(),
        if config.has_api_key() { "set" } else { "not set" }
    );
    Ok(())
}
