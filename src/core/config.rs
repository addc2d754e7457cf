//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Data directory used when neither the config nor `NLTK_DATA` names one
pub const DEFAULT_DATA_DIR: &str = ".natlang_data";

/// Where nltk_data packages are published
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/nltk/nltk_data/gh-pages/packages";

/// Packages needed by the word translation path
const DEFAULT_PACKAGES: &[&str] = &["wordnet", "omw-1.4"];

/// Upper bound for `download.max_retries`
const MAX_RETRIES: u32 = 16;

/// Configuration for the natlang builtins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NatlangConfig {
    /// Root of the nltk_data layout
    pub data_dir: PathBuf,
    pub detector: DetectorConfig,
    pub lexicon: LexiconConfig,
    pub download: DownloadConfig,
}

/// Language classifier settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// ISO 639-1 codes the classifier may answer with; empty means all
    pub allowlist: Vec<String>,
}

/// Lexical database settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// ISO 639-3 codes of the OMW tables to load; empty means every table found
    pub languages: Vec<String>,
    /// Overrides `<data_dir>/corpora/wordnet`
    pub wordnet_dir: Option<PathBuf>,
    /// Overrides `<data_dir>/corpora/omw-1.4`
    pub omw_dir: Option<PathBuf>,
}

/// Dataset download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Base URL of the package index
    pub base_url: String,
    /// Packages fetched by `natlang download`
    pub packages: Vec<String>,
    /// Per-request timeout
    pub timeout_ms: u64,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for NatlangConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            detector: DetectorConfig::default(),
            lexicon: LexiconConfig::default(),
            download: DownloadConfig::default(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            packages: DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
            timeout_ms: 60000,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

/// `NLTK_DATA` if set, else `.natlang_data` under the working directory
fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("NLTK_DATA") {
        return PathBuf::from(dir);
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(DEFAULT_DATA_DIR))
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR))
}

impl NatlangConfig {
    /// Load configuration: defaults, then the optional file, then `NATLANG_*` env vars
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NATLANG")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("detector.allowlist")
                .with_list_parse_key("lexicon.languages")
                .with_list_parse_key("download.packages")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.download.base_url.is_empty() {
            return Err(anyhow::anyhow!("download.base_url is required"));
        }

        if self.download.packages.is_empty() {
            return Err(anyhow::anyhow!("download.packages must name at least one package"));
        }

        if self.download.timeout_ms == 0 {
            return Err(anyhow::anyhow!("download.timeout_ms must be greater than 0"));
        }

        if self.download.max_retries > MAX_RETRIES {
            return Err(anyhow::anyhow!(
                "download.max_retries must be at most {}",
                MAX_RETRIES
            ));
        }

        for code in &self.detector.allowlist {
            if crate::core::detector::whatlang_lang(code).is_none() {
                return Err(anyhow::anyhow!(
                    "detector.allowlist: {} is not a language the classifier knows",
                    code
                ));
            }
        }

        if self.lexicon.languages.iter().any(|code| code.trim().is_empty()) {
            return Err(anyhow::anyhow!("lexicon.languages contains an empty code"));
        }

        if !self.data_dir.exists() {
            warn!(
                "Data directory {} does not exist yet; run `natlang download`",
                self.data_dir.display()
            );
        }

        Ok(())
    }

    /// Directory holding the Princeton WordNet files
    pub fn wordnet_dir(&self) -> PathBuf {
        self.lexicon
            .wordnet_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("corpora").join("wordnet"))
    }

    /// Directory holding the OMW `wn-data-*.tab` tables
    pub fn omw_dir(&self) -> PathBuf {
        self.lexicon
            .omw_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("corpora").join("omw-1.4"))
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> crate::core::errors::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
