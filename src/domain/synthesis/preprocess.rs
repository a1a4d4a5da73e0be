use crate::domain::settings::PronunciationDictionary;
use regex::{NoExpand, Regex};

/// Apply the pronunciation dictionary to the input text.
///
/// Entries are applied in dictionary order; each entry replaces every
/// case-insensitive whole-word match of its word with the literal
/// replacement. Later entries operate on the already-substituted text, so
/// chained substitutions carry through. Skipped entirely when the
/// dictionary is empty.
pub fn apply_pronunciations(text: &str, dictionary: &PronunciationDictionary) -> String {
    if dictionary.is_empty() {
        return text.to_string();
    }

    let mut result = text.to_string();
    for entry in dictionary.iter() {
        if entry.word.is_empty() {
            continue;
        }
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&entry.word))).unwrap();
        result = pattern
            .replace_all(&result, NoExpand(&entry.replacement))
            .into_owned();
    }
    result
}
