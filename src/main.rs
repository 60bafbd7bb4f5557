//! Main entry point for the logprob translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logprob_translator::cli::commands::{self, Commands, GlobalOptions};
use logprob_translator::Provider;

/// Translate text with an LLM and report per-token probabilities
#[derive(Parser, Debug)]
#[command(name = "logprob-translator", version, about, long_about = None)]
struct Args {
    /// API key (optional, defaults to the provider's env var)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!("{}={}", env!("CARGO_CRATE_NAME"), log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let global = GlobalOptions {
        api_key: args.api_key,
    };

    match args.command {
        Some(Commands::Demo { provider }) => {
            commands::handle_demo(provider, &global).await?;
        }
        Some(Commands::Translate {
            text,
            source_lang,
            target_lang,
            provider,
            model,
            temperature,
            max_tokens,
            json,
        }) => {
            commands::handle_translate(
                text,
                source_lang,
                target_lang,
                provider,
                model,
                temperature,
                max_tokens,
                json,
                &global,
            )
            .await?;
        }
        Some(Commands::ShowConfig { provider }) => {
            commands::handle_show_config(provider, &global)?;
        }
        None => {
            commands::handle_demo(Provider::OpenAi, &global).await?;
        }
    }

    Ok(())
}
