//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::core::config::NatlangConfig;
use crate::core::detector::LanguageDetector;
use crate::host::{Registry, Session, Value};
use crate::utils::dataset::{DatasetManager, DatasetStatus};

/// Commands for natlang
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Identify the predominant language of a text
    Identify {
        /// Text to classify
        text: String,
    },

    /// Translate an English word into another language
    Translate {
        /// English word
        word: String,

        /// Target language name, e.g. French
        language: String,
    },

    /// Call a builtin by name
    Call {
        /// Builtin name, e.g. WordTranslation
        name: String,

        /// String arguments
        args: Vec<String>,
    },

    /// List available builtins
    Builtins,

    /// Download the lexical datasets if they are missing
    Download {
        /// Package to fetch (repeatable; defaults to the configured packages)
        #[arg(short, long)]
        package: Vec<String>,

        /// Data directory (defaults to the configured data_dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

/// Render a value as text or JSON
fn print_value(value: &Value, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", value.to_json()?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

/// Handle identify command
pub fn handle_identify(config: &NatlangConfig, text: String, json: bool) -> anyhow::Result<()> {
    // identification does not need the lexical database
    let session = Session::new(LanguageDetector::from_config(&config.detector)?);
    let value = Registry::natlang().call(&session, "LanguageIdentify", &[Value::String(text)])?;
    print_value(&value, json)
}

/// Handle translate command
pub fn handle_translate(
    config: &NatlangConfig,
    word: String,
    language: String,
    json: bool,
) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let session = Session::open(config)?;
    info!("Loaded lexical database in {:?}", start_time.elapsed());

    let value = Registry::natlang().call(
        &session,
        "WordTranslation",
        &[Value::String(word), Value::String(language)],
    )?;
    print_value(&value, json)
}

/// Handle call command
pub fn handle_call(
    config: &NatlangConfig,
    name: String,
    args: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let registry = Registry::natlang();
    let needs_lexicon = registry.get(&name).map_or(false, |b| b.needs_lexicon);
    let session = if needs_lexicon {
        Session::open(config)?
    } else {
        Session::new(LanguageDetector::from_config(&config.detector)?)
    };

    let args: Vec<Value> = args.into_iter().map(Value::String).collect();
    let value = registry.call(&session, &name, &args)?;
    print_value(&value, json)
}

/// Handle builtins command
pub fn handle_builtins() -> anyhow::Result<()> {
    for builtin in Registry::natlang().builtins() {
        println!("{}/{}\t{}", builtin.name, builtin.arity, builtin.summary);
    }
    Ok(())
}

/// Handle download command
pub async fn handle_download(
    config: &NatlangConfig,
    package: Vec<String>,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());

    let mut download = config.download.clone();
    if !package.is_empty() {
        download.packages = package;
    }

    info!("Ensuring datasets in {}", data_dir.display());
    let manager = DatasetManager::new(download, data_dir)?;

    for status in manager.ensure_all().await? {
        match status {
            DatasetStatus::AlreadyPresent(path) => println!("✅ Already present: {}", path.display()),
            DatasetStatus::Downloaded(path) => println!("📦 Downloaded: {}", path.display()),
        }
    }

    info!("Datasets ready in {:?}", start_time.elapsed());
    Ok(())
}

/// Handle config command
pub fn handle_config(config: &NatlangConfig) -> anyhow::Result<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}
