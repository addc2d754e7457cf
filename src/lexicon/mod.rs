//! Lexical database access

pub mod morphy;
pub mod omw;
pub mod wordnet;

pub use wordnet::WordNet;

use crate::core::errors::Result;
use crate::core::models::SynsetId;

/// ISO 639-3 code of the database's own sense inventory
pub const ENGLISH: &str = "eng";

/// Synset lookup with per-language lemmas
pub trait LexicalDatabase: Send + Sync {
    /// Synsets of an English word, in sense order
    fn synsets(&self, word: &str) -> Result<Vec<SynsetId>>;

    /// Lemma names of `synset` in the ISO 639-3 language `lang`
    ///
    /// Fails with `UnsupportedLanguage` when there is no data for `lang`.
    fn lemma_names(&self, synset: &SynsetId, lang: &str) -> Result<Vec<String>>;

    /// Codes `lemma_names` accepts
    fn languages(&self) -> Vec<String>;
}

/// Miniature on-disk WordNet and OMW tree for tests
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;

    use crate::core::config::{LexiconConfig, NatlangConfig};
    use crate::core::models::{PartOfSpeech, SynsetId};

    const HEADER: &str = "  1 This software and database is being provided to you, the LICENSEE, by\n  \
2 Princeton University under the following license.\n";

    /// (key, pos, ss_type, words)
    const SYNSETS: &[(&str, PartOfSpeech, &str, &[&str])] = &[
        ("dog", PartOfSpeech::Noun, "n", &["dog", "domestic_dog", "Canis_familiaris"]),
        ("frump", PartOfSpeech::Noun, "n", &["frump", "dog"]),
        ("hotdog", PartOfSpeech::Noun, "n", &["frank", "hotdog", "hot_dog", "dog", "wiener"]),
        ("cat", PartOfSpeech::Noun, "n", &["cat", "true_cat"]),
        ("church", PartOfSpeech::Noun, "n", &["church", "church_building"]),
        ("mouse", PartOfSpeech::Noun, "n", &["mouse"]),
        ("chase", PartOfSpeech::Verb, "v", &["chase", "chase_after", "dog"]),
        ("big", PartOfSpeech::Adjective, "s", &["big(a)", "large"]),
    ];

    pub struct Fixture {
        pub dir: TempDir,
        pub config: NatlangConfig,
        offsets: HashMap<&'static str, SynsetId>,
    }

    impl Fixture {
        /// Synset written for `key`
        pub fn synset(&self, key: &str) -> SynsetId {
            self.offsets[key]
        }
    }

    pub fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let wordnet = dir.path().join("wordnet");
        std::fs::create_dir_all(&wordnet).unwrap();

        let mut offsets = HashMap::new();
        for pos in PartOfSpeech::ALL {
            let mut data = String::from(HEADER);
            let mut index: Vec<(String, Vec<u64>)> = Vec::new();

            for (key, _, ss_type, words) in SYNSETS.iter().filter(|s| s.1 == pos) {
                let offset = data.len() as u64;
                offsets.insert(*key, SynsetId::new(offset, pos));

                data.push_str(&format!("{:08} 05 {} {:02x}", offset, ss_type, words.len()));
                for word in words.iter() {
                    data.push_str(&format!(" {} 0", word));

                    let lemma = word.trim_end_matches("(a)").to_lowercase();
                    match index.iter_mut().find(|(l, _)| *l == lemma) {
                        Some((_, list)) => list.push(offset),
                        None => index.push((lemma, vec![offset])),
                    }
                }
                data.push_str(" 000 | fixture gloss  \n");
            }

            let mut index_text = String::from(HEADER);
            for (lemma, list) in index {
                let joined: Vec<String> = list.iter().map(|o| format!("{:08}", o)).collect();
                index_text.push_str(&format!(
                    "{} {} {} 1 @ {} 0 {}  \n",
                    lemma,
                    pos,
                    list.len(),
                    list.len(),
                    joined.join(" ")
                ));
            }

            write(&wordnet, &format!("data.{}", pos.file_stem()), &data);
            write(&wordnet, &format!("index.{}", pos.file_stem()), &index_text);
        }
        write(&wordnet, "noun.exc", "geese goose\nmice mouse\n");

        let key = |k: &str| offsets[k].to_string();
        let omw = dir.path().join("omw");
        std::fs::create_dir_all(omw.join("fra")).unwrap();
        std::fs::create_dir_all(omw.join("jpn")).unwrap();
        write(
            &omw.join("fra"),
            "wn-data-fra.tab",
            &format!(
                "# Wordnet Libre du Français\tfra\thttp://example.org/wolf\tCeCILL-C\n\
                 {dog}\tfra:lemma\tchien\n\
                 {dog}\tfra:lemma\tchien domestique\n\
                 {dog}\tfra:def\tun membre du genre Canis\n\
                 {frump}\tfra:lemma\tchien\n\
                 {hotdog}\tfra:lemma\tsaucisse de Francfort\n\
                 {chase}\tfra:lemma\tpourchasser\n\
                 {cat}\tfra:lemma\tchat\n",
                dog = key("dog"),
                frump = key("frump"),
                hotdog = key("hotdog"),
                chase = key("chase"),
                cat = key("cat"),
            ),
        );
        write(
            &omw.join("jpn"),
            "wn-data-jpn.tab",
            &format!("{}\tjpn:lemma\t犬\n", key("dog")),
        );

        let config = NatlangConfig {
            data_dir: dir.path().to_path_buf(),
            lexicon: LexiconConfig {
                languages: vec![],
                wordnet_dir: Some(wordnet),
                omw_dir: Some(omw),
            },
            ..Default::default()
        };

        Fixture {
            dir,
            config,
            offsets,
        }
    }

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }
}
