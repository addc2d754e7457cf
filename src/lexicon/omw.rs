//! Open Multilingual Wordnet lemma tables

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::errors::{NatlangError, Result};
use crate::core::models::SynsetId;

const TABLE_PREFIX: &str = "wn-data-";
const TABLE_SUFFIX: &str = ".tab";

type Lemmas = HashMap<SynsetId, Vec<String>>;

/// Per-language lemma tables keyed by WordNet 3.0 synset
#[derive(Debug, Clone, Default)]
pub struct OmwTables {
    tables: HashMap<String, Lemmas>,
}

impl OmwTables {
    /// Load every `wn-data-<code>.tab` below `dir`
    ///
    /// When `languages` is not empty only those codes are loaded. A missing
    /// directory loads nothing.
    pub fn load(dir: &Path, languages: &[String]) -> Result<Self> {
        let mut tables = Self::default();

        if !dir.is_dir() {
            warn!("OMW directory {} not found; only English is available", dir.display());
            return Ok(tables);
        }

        for entry in walkdir::WalkDir::new(dir)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            let Some(code) = table_code(path) else {
                continue;
            };
            if !languages.is_empty() && !languages.iter().any(|l| l == code) {
                continue;
            }

            let content = std::fs::read_to_string(path)?;
            let count = tables.add_table(code, &path.display().to_string(), &content)?;
            debug!("Loaded {} lemmas for {} from {}", count, code, path.display());
        }

        for code in languages {
            if !tables.tables.contains_key(code) {
                warn!("No OMW table found for configured language {}", code);
            }
        }

        info!("Loaded OMW tables for {} languages", tables.tables.len());
        Ok(tables)
    }

    /// Parse one table and merge it into `code`, returning the lemma count
    pub fn add_table(&mut self, code: &str, path: &str, content: &str) -> Result<usize> {
        let lemmas = self.tables.entry(code.to_string()).or_default();
        let mut count = 0;

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = |message: String| NatlangError::MalformedData {
                path: path.to_string(),
                line: index + 1,
                message,
            };

            let mut fields = line.splitn(3, '\t');
            let (Some(key), Some(kind), Some(lemma)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(malformed("expected three tab-separated fields".to_string()));
            };

            if kind != "lemma" && !kind.ends_with(":lemma") {
                continue;
            }

            let synset: SynsetId = key.trim().parse().map_err(malformed)?;
            let name = lemma.trim().replace(' ', "_");
            if name.is_empty() {
                continue;
            }

            let names = lemmas.entry(synset).or_default();
            if !names.contains(&name) {
                names.push(name);
                count += 1;
            }
        }

        Ok(count)
    }

    /// Lemmas of `synset` in `code`; unknown codes are unsupported
    pub fn lemmas(&self, code: &str, synset: &SynsetId) -> Result<&[String]> {
        let table = self
            .tables
            .get(code)
            .ok_or_else(|| NatlangError::UnsupportedLanguage {
                code: code.to_string(),
            })?;
        Ok(table.get(synset).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Loaded language codes, sorted
    pub fn languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.tables.keys().cloned().collect();
        codes.sort();
        codes
    }
}

/// Language code of a `wn-data-<code>.tab` file name
fn table_code(path: &Path) -> Option<&str> {
    path.file_name()?
        .to_str()?
        .strip_prefix(TABLE_PREFIX)?
        .strip_suffix(TABLE_SUFFIX)
        .filter(|code| !code.is_empty())
}
