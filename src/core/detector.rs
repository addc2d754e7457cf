//! Language identification

use isolang::Language;
use tracing::{debug, info};
use whatlang::{Detector, Lang};

use crate::core::config::DetectorConfig;
use crate::core::errors::{NatlangError, Result};
use crate::core::languages::language_name;
use crate::core::models::Classification;

/// Best-guess language classifier
pub trait Classifier: Send + Sync {
    /// Guess the language of `text`, or `None` when no guess is possible
    fn classify(&self, text: &str) -> Option<Classification>;
}

/// Trigram classifier backed by whatlang
pub struct WhatlangClassifier {
    detector: Detector,
}

impl WhatlangClassifier {
    /// Build a classifier, restricted to `config.allowlist` when it is not empty
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        if config.allowlist.is_empty() {
            info!("Initializing whatlang classifier for all languages");
            return Ok(Self {
                detector: Detector::new(),
            });
        }

        let langs = config
            .allowlist
            .iter()
            .map(|code| {
                whatlang_lang(code).ok_or_else(|| NatlangError::ConfigError {
                    message: format!("classifier does not support language {}", code),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Initializing whatlang classifier for {} languages", langs.len());
        Ok(Self {
            detector: Detector::with_allowlist(langs),
        })
    }
}

impl Classifier for WhatlangClassifier {
    fn classify(&self, text: &str) -> Option<Classification> {
        let info = self.detector.detect(text)?;
        Some(Classification::new(iso639_1_for_whatlang(info.lang()), info.confidence()))
    }
}

/// ISO 639-1 code for a whatlang language, or its ISO 639-3 code if it has none
pub fn iso639_1_for_whatlang(lang: Lang) -> String {
    match lang {
        // whatlang reports these by macrolanguage member
        Lang::Cmn => "zh".to_string(),
        Lang::Pes => "fa".to_string(),
        l => Language::from_639_3(l.code())
            .and_then(|iso| iso.to_639_1())
            .map(|code| code.to_string())
            .unwrap_or_else(|| l.code().to_string()),
    }
}

/// whatlang language for an ISO 639-1 code, if the classifier knows it
pub fn whatlang_lang(code: &str) -> Option<Lang> {
    Lang::all()
        .iter()
        .copied()
        .find(|lang| iso639_1_for_whatlang(*lang) == code)
}

/// Maps text to the English name of its predominant language
pub struct LanguageDetector {
    classifier: Box<dyn Classifier>,
}

impl LanguageDetector {
    /// Wrap any classifier
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Create with the whatlang classifier
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        Ok(Self::new(Box::new(WhatlangClassifier::new(config)?)))
    }

    /// Raw classifier output
    pub fn classify(&self, text: &str) -> Option<Classification> {
        self.classifier.classify(text)
    }

    /// Name of the predominant language in `text`
    pub fn detect(&self, text: &str) -> Result<String> {
        let classification = self.classify(text).ok_or(NatlangError::Undetermined)?;

        debug!(
            code = %classification.code,
            confidence = classification.confidence,
            "Classified text"
        );

        language_name(&classification.code)
    }
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector").finish_non_exhaustive()
    }
}
