//! Builtin registry and the natlang builtins

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::config::NatlangConfig;
use crate::core::detector::LanguageDetector;
use crate::core::errors::{NatlangError, Result};
use crate::core::languages::language_code;
use crate::core::translator::WordTranslator;
use crate::host::value::Value;
use crate::lexicon::WordNet;

/// Loaded classifier and lexicon shared by all builtin calls
#[derive(Debug)]
pub struct Session {
    detector: LanguageDetector,
    translator: Option<WordTranslator>,
}

impl Session {
    /// Session that can only identify languages
    pub fn new(detector: LanguageDetector) -> Self {
        Self {
            detector,
            translator: None,
        }
    }

    /// Attach a word translator
    pub fn with_translator(mut self, translator: WordTranslator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Build the classifier and load the lexical database up front
    pub fn open(config: &NatlangConfig) -> Result<Self> {
        let detector = LanguageDetector::from_config(&config.detector)?;
        let wordnet = WordNet::open(config)?;
        info!("Session ready");
        Ok(Self::new(detector).with_translator(WordTranslator::new(Arc::new(wordnet))))
    }

    /// Language detector
    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    /// Word translator, or `LexiconUnavailable` for a detector-only session
    pub fn translator(&self) -> Result<&WordTranslator> {
        self.translator.as_ref().ok_or(NatlangError::LexiconUnavailable)
    }
}

/// Builtin evaluation function; receives arguments already checked for arity
pub type EvalFn = fn(&Session, &[Value]) -> Result<Value>;

/// A named builtin with a fixed argument count
#[derive(Clone)]
pub struct Builtin {
    /// Name the host calls it by
    pub name: &'static str,
    /// Exact number of arguments
    pub arity: usize,
    /// One-line description for listings
    pub summary: &'static str,
    /// Whether evaluation needs a session with a lexical database
    pub needs_lexicon: bool,
    /// Evaluation function
    pub eval: EvalFn,
}

/// Builtins keyed by name
#[derive(Clone, Default)]
pub struct Registry {
    builtins: BTreeMap<&'static str, Builtin>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `LanguageIdentify` and `WordTranslation`
    pub fn natlang() -> Self {
        let mut registry = Self::new();
        registry.register(Builtin {
            name: "LanguageIdentify",
            arity: 1,
            summary: "determine the predominant human language in a string",
            needs_lexicon: false,
            eval: language_identify,
        });
        registry.register(Builtin {
            name: "WordTranslation",
            arity: 2,
            summary: "give word translations",
            needs_lexicon: true,
            eval: word_translation,
        });
        registry
    }

    /// Add a builtin, replacing any previous one with the same name
    pub fn register(&mut self, builtin: Builtin) {
        self.builtins.insert(builtin.name, builtin);
    }

    /// Builtin registered under `name`
    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name)
    }

    /// Registered builtins, sorted by name
    pub fn builtins(&self) -> impl Iterator<Item = &Builtin> {
        self.builtins.values()
    }

    /// Evaluate `name[args...]`
    pub fn call(&self, session: &Session, name: &str, args: &[Value]) -> Result<Value> {
        let builtin = self.get(name).ok_or_else(|| NatlangError::UnknownBuiltin {
            name: name.to_string(),
        })?;

        if args.len() != builtin.arity {
            return Err(NatlangError::ArgumentCount {
                name: builtin.name.to_string(),
                expected: builtin.arity,
                given: args.len(),
            });
        }

        debug!("Evaluating {} with {} arguments", builtin.name, args.len());
        (builtin.eval)(session, args)
    }
}

/// Convert resolution failures into `$Failed`; everything else propagates
fn to_value<T>(result: Result<T>, convert: impl FnOnce(T) -> Value) -> Result<Value> {
    match result {
        Ok(v) => Ok(convert(v)),
        Err(e) if e.is_failure() => {
            debug!("Returning $Failed: {}", e);
            Ok(Value::Failed)
        }
        Err(e) => Err(e),
    }
}

fn string_arg<'a>(name: &str, args: &'a [Value], position: usize) -> Result<&'a str> {
    args.get(position)
        .and_then(Value::as_str)
        .ok_or_else(|| NatlangError::ArgumentType {
            name: name.to_string(),
            position: position + 1,
        })
}

fn language_identify(session: &Session, args: &[Value]) -> Result<Value> {
    let text = string_arg("LanguageIdentify", args, 0)?;
    to_value(session.detector().detect(text), Value::String)
}

fn word_translation(session: &Session, args: &[Value]) -> Result<Value> {
    let word = string_arg("WordTranslation", args, 0)?;
    let language = string_arg("WordTranslation", args, 1)?;
    let translator = match session.translator() {
        Ok(translator) => translator,
        // an unknown language name fails before the missing lexicon is reported
        Err(e) => return to_value(language_code(language).and(Err(e)), Value::String),
    };
    to_value(translator.translate(word, language), |set| {
        Value::from(set.into_vec())
    })
}
