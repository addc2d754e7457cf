//! File-backed Princeton WordNet 3.0 reader

use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::core::config::NatlangConfig;
use crate::core::errors::{NatlangError, Result};
use crate::core::models::{PartOfSpeech, SynsetId};
use crate::lexicon::morphy::morphy;
use crate::lexicon::omw::OmwTables;
use crate::lexicon::{LexicalDatabase, ENGLISH};

/// Princeton WordNet plus OMW tables, loaded once and read-only afterwards
#[derive(Debug)]
pub struct WordNet {
    /// lemma -> synset offsets, in sense order
    index: HashMap<PartOfSpeech, HashMap<String, Vec<u64>>>,
    /// irregular inflection -> base forms
    exceptions: HashMap<PartOfSpeech, HashMap<String, Vec<String>>>,
    data_files: HashMap<PartOfSpeech, PathBuf>,
    omw: OmwTables,
}

impl WordNet {
    /// Load the index, exception lists and OMW tables named by `config`
    pub fn open(config: &NatlangConfig) -> Result<Self> {
        let root = config.wordnet_dir();
        if !root.is_dir() {
            return Err(NatlangError::LexiconNotFound {
                path: root.display().to_string(),
            });
        }

        info!("Loading WordNet from {}", root.display());

        let mut index = HashMap::new();
        let mut exceptions = HashMap::new();
        let mut data_files = HashMap::new();

        for pos in PartOfSpeech::ALL {
            let index_path = required_file(&root, &format!("index.{}", pos.file_stem()))?;
            let data_path = required_file(&root, &format!("data.{}", pos.file_stem()))?;

            let lemmas = parse_index(&index_path)?;
            debug!("Indexed {} {} lemmas", lemmas.len(), pos.file_stem());
            index.insert(pos, lemmas);

            let exc_path = root.join(format!("{}.exc", pos.file_stem()));
            let exc = if exc_path.is_file() {
                parse_exceptions(&exc_path)?
            } else {
                HashMap::new()
            };
            exceptions.insert(pos, exc);

            data_files.insert(pos, data_path);
        }

        let omw = OmwTables::load(&config.omw_dir(), &config.lexicon.languages)?;

        Ok(Self {
            index,
            exceptions,
            data_files,
            omw,
        })
    }

    /// Base forms of `form` known for `pos`
    pub fn morphy(&self, form: &str, pos: PartOfSpeech) -> Vec<String> {
        let Some(lemmas) = self.index.get(&pos) else {
            return Vec::new();
        };
        let no_exceptions = HashMap::new();
        let exceptions = self.exceptions.get(&pos).unwrap_or(&no_exceptions);
        morphy(form, pos, exceptions, |candidate| lemmas.contains_key(candidate))
    }

    /// English lemma names of `synset`, read from its data file line
    fn english_lemmas(&self, synset: &SynsetId) -> Result<Vec<String>> {
        let path = self
            .data_files
            .get(&synset.pos)
            .ok_or_else(|| NatlangError::LexiconNotFound {
                path: format!("data.{}", synset.pos.file_stem()),
            })?;

        let mut reader = BufReader::new(File::open(path)?);
        reader.seek(SeekFrom::Start(synset.offset))?;
        let mut line = String::new();
        reader.read_line(&mut line)?;

        parse_data_line(&line, synset.offset).map_err(|message| NatlangError::MalformedData {
            path: path.display().to_string(),
            line: 0,
            message,
        })
    }
}

impl LexicalDatabase for WordNet {
    fn synsets(&self, word: &str) -> Result<Vec<SynsetId>> {
        let form = normalize(word);
        let mut synsets = Vec::new();

        for pos in PartOfSpeech::ALL {
            let Some(lemmas) = self.index.get(&pos) else {
                continue;
            };
            for base in self.morphy(&form, pos) {
                for offset in lemmas.get(&base).into_iter().flatten() {
                    let id = SynsetId::new(*offset, pos);
                    if !synsets.contains(&id) {
                        synsets.push(id);
                    }
                }
            }
        }

        debug!(word, form = %form, count = synsets.len(), "Found synsets");
        Ok(synsets)
    }

    fn lemma_names(&self, synset: &SynsetId, lang: &str) -> Result<Vec<String>> {
        if lang == ENGLISH {
            return self.english_lemmas(synset);
        }
        Ok(self.omw.lemmas(lang, synset)?.to_vec())
    }

    fn languages(&self) -> Vec<String> {
        let mut codes = vec![ENGLISH.to_string()];
        codes.extend(self.omw.languages().into_iter().filter(|c| c != ENGLISH));
        codes
    }
}

fn required_file(root: &Path, name: &str) -> Result<PathBuf> {
    let path = root.join(name);
    if !path.is_file() {
        return Err(NatlangError::LexiconNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(path)
}

/// Lowercase and join whitespace-separated words with `_`, as the index does
fn normalize(word: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    whitespace.replace_all(word.trim(), "_").to_lowercase()
}

/// Parse `index.<pos>`: `lemma pos synset_cnt p_cnt [ptr...] sense_cnt tagsense_cnt offset...`
fn parse_index(path: &Path) -> Result<HashMap<String, Vec<u64>>> {
    let content = std::fs::read_to_string(path)?;
    let mut lemmas = HashMap::new();

    for (index, line) in content.lines().enumerate() {
        // license header lines start with spaces
        if line.starts_with(' ') || line.trim().is_empty() {
            continue;
        }

        let (lemma, offsets) =
            parse_index_line(line).map_err(|message| NatlangError::MalformedData {
                path: path.display().to_string(),
                line: index + 1,
                message,
            })?;
        lemmas.insert(lemma, offsets);
    }

    Ok(lemmas)
}

fn parse_index_line(line: &str) -> std::result::Result<(String, Vec<u64>), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let count = |i: usize| -> std::result::Result<usize, String> {
        fields
            .get(i)
            .ok_or_else(|| format!("missing field {}", i))?
            .parse::<usize>()
            .map_err(|e| format!("field {}: {}", i, e))
    };

    let lemma = fields.first().ok_or("empty line")?.to_string();
    let synset_cnt = count(2)?;
    let pointer_cnt = count(3)?;
    // skip pointer symbols, sense_cnt and tagsense_cnt
    let start = 4 + pointer_cnt + 2;

    let offsets = fields
        .get(start..start + synset_cnt)
        .ok_or_else(|| format!("expected {} synset offsets", synset_cnt))?
        .iter()
        .map(|o| o.parse::<u64>().map_err(|e| format!("bad offset {}: {}", o, e)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok((lemma, offsets))
}

/// Parse `<pos>.exc`: `inflected base [base...]`
fn parse_exceptions(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    let mut exceptions: HashMap<String, Vec<String>> = HashMap::new();

    for line in content.lines() {
        let mut words = line.split_whitespace();
        let Some(inflected) = words.next() else {
            continue;
        };
        exceptions
            .entry(inflected.to_string())
            .or_default()
            .extend(words.map(str::to_string));
    }

    Ok(exceptions)
}

/// Word names from a data line: `offset lex_filenum ss_type w_cnt word lex_id ...`
fn parse_data_line(line: &str, expected_offset: u64) -> std::result::Result<Vec<String>, String> {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    let marker = MARKER.get_or_init(|| Regex::new(r"\((?:a|p|ip)\)$").expect("valid regex"));

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(format!("truncated synset at offset {}", expected_offset));
    }

    let offset = fields[0]
        .parse::<u64>()
        .map_err(|e| format!("bad offset {}: {}", fields[0], e))?;
    if offset != expected_offset {
        return Err(format!(
            "expected synset at offset {}, found {}",
            expected_offset, offset
        ));
    }

    let word_cnt = usize::from_str_radix(fields[3], 16)
        .map_err(|e| format!("bad word count {}: {}", fields[3], e))?;

    (0..word_cnt)
        .map(|i| {
            fields
                .get(4 + i * 2)
                .map(|word| marker.replace(word, "").into_owned())
                .ok_or_else(|| format!("synset {} lists fewer than {} words", offset, word_cnt))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::testing;

    #[test]
    fn test_parse_index_line() {
        let (lemma, offsets) =
            parse_index_line("dog n 3 2 @ ~ 3 1 02084071 10114209 07676602").unwrap();
        assert_eq!(lemma, "dog");
        assert_eq!(offsets, vec![2084071, 10114209, 7676602]);

        assert!(parse_index_line("dog n 3 0 3 1 02084071").is_err());
        assert!(parse_index_line("dog n x").is_err());
    }

    #[test]
    fn test_parse_data_line() {
        let line = "00001740 00 a 02 able(a) 0 capable 0 000 | usually followed by `to'";
        assert_eq!(parse_data_line(line, 1740).unwrap(), vec!["able", "capable"]);
        assert!(parse_data_line(line, 99).is_err());
        assert!(parse_data_line("00001740 00 a 03 able 0", 1740).is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Hot  Dog"), "hot_dog");
        assert_eq!(normalize(" dog\t"), "dog");
    }

    #[test]
    fn test_open_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = NatlangConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(matches!(
            WordNet::open(&config),
            Err(NatlangError::LexiconNotFound { .. })
        ));
    }

    #[test]
    fn test_synsets_in_pos_order() {
        let fixture = testing::fixture();
        let wordnet = WordNet::open(&fixture.config).unwrap();

        let synsets = wordnet.synsets("dog").unwrap();
        let expected: Vec<SynsetId> = vec![
            fixture.synset("dog"),
            fixture.synset("frump"),
            fixture.synset("hotdog"),
            fixture.synset("chase"),
        ];
        assert_eq!(synsets, expected);
    }

    #[test]
    fn test_synsets_use_morphy() {
        let fixture = testing::fixture();
        let wordnet = WordNet::open(&fixture.config).unwrap();

        assert_eq!(wordnet.synsets("Churches").unwrap(), vec![fixture.synset("church")]);
        assert_eq!(wordnet.synsets("mice").unwrap(), vec![fixture.synset("mouse")]);
        assert_eq!(wordnet.synsets("hot dog").unwrap(), vec![fixture.synset("hotdog")]);
        assert!(wordnet.synsets("unicorn").unwrap().is_empty());
    }

    #[test]
    fn test_english_lemmas_from_data_file() {
        let fixture = testing::fixture();
        let wordnet = WordNet::open(&fixture.config).unwrap();

        let names = wordnet.lemma_names(&fixture.synset("dog"), "eng").unwrap();
        assert_eq!(names, vec!["dog", "domestic_dog", "Canis_familiaris"]);

        let names = wordnet.lemma_names(&fixture.synset("big"), "eng").unwrap();
        assert_eq!(names, vec!["big", "large"]);
    }

    #[test]
    fn test_omw_lemmas_and_languages() {
        let fixture = testing::fixture();
        let wordnet = WordNet::open(&fixture.config).unwrap();

        assert_eq!(wordnet.languages(), vec!["eng", "fra", "jpn"]);
        assert_eq!(
            wordnet.lemma_names(&fixture.synset("dog"), "jpn").unwrap(),
            vec!["犬"]
        );
        assert!(wordnet
            .lemma_names(&fixture.synset("church"), "fra")
            .unwrap()
            .is_empty());
        assert!(matches!(
            wordnet.lemma_names(&fixture.synset("dog"), "deu"),
            Err(NatlangError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_language_filter_from_config() {
        let mut fixture = testing::fixture();
        fixture.config.lexicon.languages = vec!["jpn".to_string()];
        let wordnet = WordNet::open(&fixture.config).unwrap();

        assert_eq!(wordnet.languages(), vec!["eng", "jpn"]);
        assert!(wordnet.lemma_names(&fixture.synset("dog"), "fra").is_err());
    }
}
