//! Input vocabulary: turning raw player text into action keys.

use std::collections::{HashMap, HashSet};

use crate::story::ActionKey;

/// Word-level canonicalization of player input.
///
/// Normalization lowercases, strips everything but letters, digits, and
/// spaces, drops stop words, and replaces synonyms with their canonical
/// form, so `"Grab the crab!"` and `"get crab"` produce the same key.
/// Matching against scene actions stays exact afterwards; this is not
/// fuzzy matching. Stripping punctuation also makes the reserved
/// `_arrive` / `_no_match` keys unreachable from raw input.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    stop_words: HashSet<String>,
    synonyms: HashMap<String, String>,
}

impl Vocabulary {
    /// Create an empty vocabulary (no stop words, no synonyms).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word to ignore during normalization.
    pub fn add_stop_word(&mut self, word: impl Into<String>) {
        self.stop_words.insert(word.into());
    }

    /// Map a synonym to its canonical word, e.g. `grab` to `get`.
    pub fn add_synonym(&mut self, word: impl Into<String>, canonical: impl Into<String>) {
        self.synonyms.insert(word.into(), canonical.into());
    }

    /// Number of stop words.
    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Number of synonym mappings.
    pub fn synonym_count(&self) -> usize {
        self.synonyms.len()
    }

    /// Normalize a raw input line into a command key.
    pub fn action_key(&self, raw: &str) -> ActionKey {
        let cleaned: String = raw
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();

        let words: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|w| !self.stop_words.contains(*w))
            .map(|w| self.synonyms.get(w).map_or(w, String::as_str))
            .collect();

        ActionKey::Command(words.join(" "))
    }
}
