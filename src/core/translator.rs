//! English word translation through the lexical database

use std::sync::Arc;
use tracing::debug;

use crate::core::errors::Result;
use crate::core::languages::language_code;
use crate::core::models::TranslationSet;
use crate::lexicon::LexicalDatabase;

/// Translates English words into other languages via shared synsets
#[derive(Clone)]
pub struct WordTranslator {
    lexicon: Arc<dyn LexicalDatabase>,
}

impl WordTranslator {
    /// Translator over a loaded lexical database
    pub fn new(lexicon: Arc<dyn LexicalDatabase>) -> Self {
        Self { lexicon }
    }

    /// Translations of `word` into the language called `language_name`
    ///
    /// An unknown language name fails before the lexicon is consulted. A word
    /// with no senses gives an empty set. Any lexicon error while collecting
    /// lemmas aborts the whole lookup, discarding what was gathered so far.
    pub fn translate(&self, word: &str, language_name: &str) -> Result<TranslationSet> {
        let code = language_code(language_name)?;

        let synsets = self.lexicon.synsets(word)?;
        debug!(word, code = %code, senses = synsets.len(), "Looking up translations");

        let mut translations = TranslationSet::new();
        for synset in &synsets {
            for name in self.lexicon.lemma_names(synset, &code)? {
                translations.insert(name);
            }
        }

        Ok(translations)
    }
}

impl std::fmt::Debug for WordTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordTranslator")
            .field("languages", &self.lexicon.languages())
            .finish()
    }
}
