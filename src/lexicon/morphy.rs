//! WordNet base-form reduction
//!
//! Inflected forms are reduced with the exception lists first and the
//! detachment rules second, keeping only forms present in the index.

use std::collections::HashMap;

use crate::core::models::PartOfSpeech;

/// (suffix, replacement) detachment rules per part of speech
fn substitutions(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        PartOfSpeech::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        PartOfSpeech::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        PartOfSpeech::Adverb => &[],
    }
}

fn apply_rules(forms: &[String], pos: PartOfSpeech) -> Vec<String> {
    let rules = substitutions(pos);
    forms
        .iter()
        .flat_map(|form| {
            rules.iter().filter_map(move |(old, new)| {
                form.strip_suffix(old).map(|stem| format!("{}{}", stem, new))
            })
        })
        .collect()
}

fn filter_forms<F>(forms: Vec<String>, exists: &F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut result: Vec<String> = Vec::new();
    for form in forms {
        if exists(&form) && !result.contains(&form) {
            result.push(form);
        }
    }
    result
}

/// Base forms of `form` that exist for `pos`
///
/// `exceptions` maps irregular inflections to their bases; `exists` tells
/// whether a form is in the index for this part of speech.
pub fn morphy<F>(
    form: &str,
    pos: PartOfSpeech,
    exceptions: &HashMap<String, Vec<String>>,
    exists: F,
) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    if let Some(bases) = exceptions.get(form) {
        let mut forms = vec![form.to_string()];
        forms.extend(bases.iter().cloned());
        return filter_forms(forms, &exists);
    }

    let mut forms = apply_rules(&[form.to_string()], pos);
    let mut candidates = vec![form.to_string()];
    candidates.extend(forms.iter().cloned());
    let results = filter_forms(candidates, &exists);
    if !results.is_empty() {
        return results;
    }

    // every rule shortens or keeps the length, so this terminates
    while !forms.is_empty() {
        forms = apply_rules(&forms, pos);
        let results = filter_forms(forms.clone(), &exists);
        if !results.is_empty() {
            return results;
        }
    }

    Vec::new()
}
