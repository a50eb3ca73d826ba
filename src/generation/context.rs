// Compact window summary handed to generators as prompt material
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::tokenizer;
use crate::window::WindowEntry;

/// Entries sampled for the context
const SAMPLE_ENTRIES: usize = 8;
/// Most common terms listed
const COMMON_TERMS: usize = 15;
/// Example lines are cut to this many characters
const EXAMPLE_CHARS: usize = 140;
/// Default cap on the whole context
pub const DEFAULT_CONTEXT_CHARS: usize = 600;

fn long_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-zA-Z]{5,}\b").expect("static regex"))
}

/// Summarize a window as common terms plus a few short examples
pub fn window_context(entries: &[WindowEntry], max_chars: usize) -> String {
    let mut examples: Vec<String> = Vec::new();
    // (term, count) in first-seen order so ties rank deterministically
    let mut terms: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in entries.iter().take(SAMPLE_ENTRIES) {
        let raw = format!("{}: {}", entry.title, entry.comment);
        let text = tokenizer::strip_markup(&raw)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        for word in long_word_regex().find_iter(&text) {
            let word = word.as_str().to_lowercase();
            match positions.get(&word) {
                Some(&idx) => terms[idx].1 += 1,
                None => {
                    positions.insert(word.clone(), terms.len());
                    terms.push((word, 1));
                }
            }
        }

        if text.chars().count() > EXAMPLE_CHARS {
            examples.push(format!("{}...", text.chars().take(EXAMPLE_CHARS).collect::<String>()));
        } else {
            examples.push(text);
        }
    }

    terms.sort_by(|a, b| b.1.cmp(&a.1));
    let common = terms
        .iter()
        .take(COMMON_TERMS)
        .map(|(term, _)| term.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let blob = format!(
        "Common terms: {}\nExamples:\n- {}",
        common,
        examples.join("\n- ")
    );
    blob.chars().take(max_chars).collect()
}
