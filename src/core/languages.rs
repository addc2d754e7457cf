//! ISO 639 code and name tables

use isolang::Language;

use crate::core::errors::{NatlangError, Result};

/// Canonical English name for an ISO 639-1 code, e.g. `de` -> `German`
pub fn language_name(code: &str) -> Result<String> {
    Language::from_639_1(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| NatlangError::UnknownLanguageCode {
            code: code.to_string(),
        })
}

/// ISO 639-3 code for an English language name, e.g. `French` -> `fra`
///
/// Names must match the table exactly.
pub fn language_code(name: &str) -> Result<String> {
    Language::from_name(name)
        .map(|lang| lang.to_639_3().to_string())
        .ok_or_else(|| NatlangError::UnknownLanguageName {
            name: name.to_string(),
        })
}
