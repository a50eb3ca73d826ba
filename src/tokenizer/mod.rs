//! Tokenization for scoring and similarity
//!
//! Two views of the same normalized text:
//! - scoring tokens keep order and repetition, since frequency feeds the heat score
//! - similarity tokens are a set of unigrams and bigrams, since Jaccard only cares
//!   about shared vocabulary

mod lexicon;

pub use lexicon::{is_excluded, ADMIN_TERMS, STOPWORDS};

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Set of similarity tokens (unigrams and `head_tail` bigrams)
pub type TokenSet = BTreeSet<String>;

/// Minimum word length for scoring tokens
const SCORING_MIN_LEN: usize = 3;

/// Minimum word length for similarity unigrams and bigram halves
const SIMILARITY_MIN_LEN: usize = 4;

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-z]{3,}\b").expect("static regex"))
}

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\[|\]\]|\{\{|\}\}|https?://\S+").expect("static regex"))
}

/// Remove wiki link brackets and URLs, keeping every other character
pub fn strip_markup(text: &str) -> String {
    markup_regex().replace_all(text, " ").into_owned()
}

/// Lowercased runs of ASCII letters (length >= 3) minus stopwords and admin terms
///
/// Order and duplicates are preserved.
pub fn scoring_tokens(text: &str) -> Vec<String> {
    let lowered = strip_markup(text).to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| w.len() >= SCORING_MIN_LEN && !is_excluded(w))
        .map(str::to_string)
        .collect()
}

/// Unigrams and adjacent-word bigrams over ASCII words of length >= 4
///
/// A bigram is dropped when its head word is a stopword or admin term.
pub fn similarity_tokens(text: &str) -> TokenSet {
    let lowered = strip_markup(text).to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|w| w.len() >= SIMILARITY_MIN_LEN)
        .collect();

    let mut grams = TokenSet::new();
    for (i, word) in words.iter().enumerate() {
        if is_excluded(word) {
            continue;
        }
        grams.insert((*word).to_string());
        if let Some(next) = words.get(i + 1) {
            grams.insert(format!("{}_{}", word, next));
        }
    }
    grams
}
