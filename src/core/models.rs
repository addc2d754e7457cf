//! Core data models for language operations

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Classifier best guess for a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// ISO 639-1 code, or ISO 639-3 when the language has no 2-letter code
    pub code: String,
    /// Classifier confidence in `[0, 1]`
    pub confidence: f64,
}

impl Classification {
    /// Create a classification
    pub fn new(code: impl Into<String>, confidence: f64) -> Self {
        Self {
            code: code.into(),
            confidence,
        }
    }
}

/// Deduplicated translations of one word into one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSet {
    words: BTreeSet<String>,
}

impl TranslationSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation, returning false if it was already present
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        self.words.insert(word.into())
    }

    /// Whether `word` is one of the translations
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct translations
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no translation was found
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Translations in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Consume into a sorted vector
    pub fn into_vec(self) -> Vec<String> {
        self.words.into_iter().collect()
    }
}

impl FromIterator<String> for TranslationSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

/// WordNet part of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Lookup order used when enumerating senses
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// Single-letter tag used in synset keys
    pub fn tag(self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::Adverb => 'r',
        }
    }

    /// Suffix of the `index.*`/`data.*` files and prefix of the `*.exc` file
    pub fn file_stem(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for PartOfSpeech {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "n" => Ok(PartOfSpeech::Noun),
            "v" => Ok(PartOfSpeech::Verb),
            // satellites share the adjective data file
            "a" | "s" => Ok(PartOfSpeech::Adjective),
            "r" => Ok(PartOfSpeech::Adverb),
            other => Err(format!("unknown part of speech: {}", other)),
        }
    }
}

/// Synset identity: byte offset into the POS data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SynsetId {
    /// Byte offset of the synset line in `data.<pos>`
    pub offset: u64,
    /// Part of speech, which selects the data file
    pub pos: PartOfSpeech,
}

impl SynsetId {
    /// Create a synset id
    pub fn new(offset: u64, pos: PartOfSpeech) -> Self {
        Self { offset, pos }
    }
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}-{}", self.offset, self.pos)
    }
}

impl FromStr for SynsetId {
    type Err = String;

    /// Parse an OMW key such as `02084071-n`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (offset, pos) = s
            .split_once('-')
            .ok_or_else(|| format!("missing '-' in synset key: {}", s))?;
        let offset = offset
            .parse::<u64>()
            .map_err(|e| format!("bad synset offset {}: {}", offset, e))?;
        Ok(Self::new(offset, pos.parse()?))
    }
}
