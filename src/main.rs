//! Main entry point for the natlang CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use natlang::cli::commands::{self, Commands};
use natlang::NatlangConfig;

/// natlang - language identification and word translation
#[derive(Parser, Debug)]
#[command(name = "natlang", version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_PKG_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = NatlangConfig::load(args.config.as_deref())?;

    // Execute command
    match args.command {
        Some(Commands::Identify { text }) => {
            commands::handle_identify(&config, text, args.json)?;
        }
        Some(Commands::Translate { word, language }) => {
            commands::handle_translate(&config, word, language, args.json)?;
        }
        Some(Commands::Call { name, args: call_args }) => {
            commands::handle_call(&config, name, call_args, args.json)?;
        }
        Some(Commands::Builtins) => {
            commands::handle_builtins()?;
        }
        Some(Commands::Download { package, data_dir }) => {
            commands::handle_download(&config, package, data_dir).await?;
        }
        Some(Commands::Config) => {
            commands::handle_config(&config)?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
