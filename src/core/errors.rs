//! Custom error types for language operations

use thiserror::Error;

/// Language-related errors
#[derive(Error, Debug)]
pub enum NatlangError {
    /// Classifier code has no entry in the ISO 639-1 table
    #[error("Unknown language code: {code}")]
    UnknownLanguageCode {
        /// Code reported by the classifier
        code: String,
    },

    /// Language name has no entry in the ISO 639 name table
    #[error("Unknown language name: {name}")]
    UnknownLanguageName {
        /// Name given by the caller
        name: String,
    },

    /// Lexical database has no lemma table for the code
    #[error("Language is not supported: {code}")]
    UnsupportedLanguage {
        /// ISO 639-3 code
        code: String,
    },

    /// Classifier could not make a guess
    #[error("Could not determine the language of the text")]
    Undetermined,

    /// Lexical database files are missing
    #[error("Lexical database not found: {path}")]
    LexiconNotFound {
        path: String,
    },

    /// Lexical database file could not be parsed
    #[error("Malformed data: {path}:{line} - {message}")]
    MalformedData {
        /// Offending file
        path: String,
        /// 1-based line number, or 0 when unknown
        line: usize,
        message: String,
    },

    /// Session was opened without a lexical database
    #[error("Lexical database is not loaded")]
    LexiconUnavailable,

    /// No builtin registered under the name
    #[error("Unknown builtin: {name}")]
    UnknownBuiltin {
        name: String,
    },

    /// Builtin called with the wrong number of arguments
    #[error("{name} called with {given} arguments; {expected} arguments are expected")]
    ArgumentCount {
        name: String,
        expected: usize,
        given: usize,
    },

    /// Builtin argument has the wrong type
    #[error("{name}: argument {position} must be a string")]
    ArgumentType {
        name: String,
        position: usize,
    },

    /// Dataset download returned an error status
    #[error("Download failed for {package}: {status} - {message}")]
    DownloadError {
        package: String,
        status: u16,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Invariant broken inside the crate
    #[error("Internal error: {0}")]
    InternalError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Zip archive error
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

impl NatlangError {
    /// Whether the host should see this as `$Failed` instead of an error.
    ///
    /// Only resolution failures qualify. Missing data, bad input files and
    /// transport problems propagate unchanged.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            NatlangError::UnknownLanguageCode { .. }
                | NatlangError::UnknownLanguageName { .. }
                | NatlangError::UnsupportedLanguage { .. }
                | NatlangError::Undetermined
        )
    }
}

/// Result type for language operations
pub type Result<T> = std::result::Result<T, NatlangError>;
