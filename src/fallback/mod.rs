// Extractive fallback: deterministic headlines built from the window's own entries
//
// Used when the generator is unavailable, fails, returns nothing usable, or the
// window is too sparse to trust generation. No randomness, no external calls.
use std::collections::HashSet;

use crate::tokenizer;
use crate::window::WindowEntry;

/// Build up to `n` headlines from the entries with the largest byte deltas
///
/// Each headline is the entry's title words followed by the significant words of
/// its comment (stopwords, admin terms and words already used dropped), capped at
/// `max_words` words and capitalized word by word. Ties in byte delta keep input
/// order; empty and repeated headlines are skipped.
pub fn extractive_headlines(entries: &[WindowEntry], n: usize, max_words: usize) -> Vec<String> {
    let mut ranked: Vec<&WindowEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| b.byte_delta.cmp(&a.byte_delta));

    let mut seen: HashSet<String> = HashSet::new();
    let mut headlines = Vec::new();

    for entry in ranked {
        if headlines.len() >= n {
            break;
        }
        let Some(headline) = headline_for(entry, max_words) else {
            continue;
        };
        if seen.insert(headline.to_lowercase()) {
            headlines.push(headline);
        }
    }

    headlines
}

fn headline_for(entry: &WindowEntry, max_words: usize) -> Option<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut words: Vec<String> = Vec::new();

    let title_words = entry.title.split_whitespace().map(str::to_string);
    let comment_words = tokenizer::scoring_tokens(&entry.comment).into_iter();

    for word in title_words.chain(comment_words) {
        if words.len() >= max_words {
            break;
        }
        if used.insert(word.to_lowercase()) {
            words.push(capitalize(&word));
        }
    }

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Upper-case the first letter and lower-case the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
