//! natlang - language identification and word translation builtins
//!
//! This library identifies the predominant language of a text and translates
//! English words through WordNet synsets and Open Multilingual Wordnet tables,
//! exposing both as host builtins dispatched by name and arity.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod core;
pub mod host;
pub mod lexicon;
pub mod utils;

// Re-export key types for convenience
pub use crate::core::{
    config::NatlangConfig,
    detector::{Classifier, LanguageDetector, WhatlangClassifier},
    errors::{NatlangError, Result},
    models::{Classification, PartOfSpeech, SynsetId, TranslationSet},
    translator::WordTranslator,
};

pub use host::{Registry, Session, Value};
pub use lexicon::{LexicalDatabase, WordNet};
pub use utils::dataset::{DatasetManager, DatasetStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
