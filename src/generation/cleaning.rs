// Post-processing of raw generator output into usable headline candidates
//
// Anything that fails cleaning is dropped silently; a generator that yields
// nothing usable is handled by the caller's fallback.
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Boilerplate and namespace words removed from generated headlines
pub const BAN_WORDS: &[&str] = &[
    "whatlinkshere",
    "special",
    "wikiproject",
    "talk",
    "articles",
    "class",
    "stub",
    "category",
    "categories",
    "wp",
];

/// Words that disqualify a whole headline
pub const OFF_LIMITS: &[&str] = &[
    "masturbate",
    "masturbation",
    "porn",
    "pornography",
    "xxx",
    "sex",
    "sexual",
    "fetish",
    "nsfw",
];

/// Headlines need at least this many words after cleaning
const MIN_WORDS: usize = 2;

fn clutter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\[|\]\]|\{|\}|\(|\)|<|>|https?://\S+").expect("static regex")
    })
}

fn embedded_array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("static regex"))
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-z']+\b").expect("static regex"))
}

/// Scalar JSON values as text; anything nested is ignored
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extract candidate strings from a raw generator response
///
/// Accepts a JSON array, a JSON object (its scalar values), or prose with an
/// embedded JSON array. Returns an empty list when nothing parses.
pub fn parse_candidate_list(response: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(response.trim()) {
        Ok(Value::Array(items)) => return items.iter().filter_map(scalar_text).collect(),
        Ok(Value::Object(map)) => return map.values().filter_map(scalar_text).collect(),
        _ => {}
    }

    embedded_array_regex()
        .find(response)
        .and_then(|m| serde_json::from_str::<Vec<Value>>(m.as_str()).ok())
        .map(|items| items.iter().filter_map(scalar_text).collect())
        .unwrap_or_default()
}

/// True if any off-limits word appears in the text
pub fn contains_off_limits(text: &str) -> bool {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .any(|m| OFF_LIMITS.contains(&m.as_str()))
}

/// Clean a single raw candidate
///
/// NFC-normalizes, strips link/bracket/quote clutter, drops ban-listed words,
/// caps at `max_words`, upper-cases the first letter. Returns `None` for
/// candidates shorter than two words after cleaning.
pub fn clean_headline(raw: &str, max_words: usize) -> Option<String> {
    // Models sometimes answer with an object per headline
    let mut text = raw.to_string();
    if raw.trim_start().starts_with('{') {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
            text = map
                .values()
                .filter_map(scalar_text)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    let text: String = text.nfc().collect();
    let text = clutter_regex().replace_all(&text, " ");
    let text = text.replace(['“', '”', '«', '»', '"'], " ");

    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| !BAN_WORDS.contains(&w.to_lowercase().as_str()))
        .take(max_words)
        .collect();
    if words.len() < MIN_WORDS {
        return None;
    }

    let joined = words.join(" ");
    let mut chars = joined.chars();
    let capped: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return None,
    };

    let trimmed = capped.trim_matches(|c| c == ' ' || c == '-' || c == ':');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clean, sanitize and deduplicate raw candidates, keeping at most `limit`
pub fn clean_candidates(raw: &[String], max_words: usize, limit: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut cleaned = Vec::new();

    for item in raw {
        let Some(headline) = clean_headline(item, max_words) else {
            tracing::trace!("Dropped malformed candidate: {:?}", item);
            continue;
        };
        if contains_off_limits(&headline) {
            tracing::trace!("Dropped off-limits candidate");
            continue;
        }
        if !seen.insert(headline.to_lowercase()) {
            continue;
        }
        cleaned.push(headline);
        if cleaned.len() >= limit {
            break;
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let items = parse_candidate_list(r#"["Mars Rover Lands", "Senate Passes Budget", 42, null]"#);
        assert_eq!(items, vec!["Mars Rover Lands", "Senate Passes Budget", "42"]);
    }

    #[test]
    fn test_parse_json_object() {
        let items = parse_candidate_list(r#"{"headline": "Mars Rover Lands"}"#);
        assert_eq!(items, vec!["Mars Rover Lands"]);
    }

    #[test]
    fn test_parse_embedded_array() {
        let response = "Sure! Here you go:\n[\"Mars Rover Lands\",\n \"Storm Hits Coast\"]\nEnjoy.";
        let items = parse_candidate_list(response);
        assert_eq!(items, vec!["Mars Rover Lands", "Storm Hits Coast"]);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_candidate_list("no json here").is_empty());
        assert!(parse_candidate_list("[broken").is_empty());
    }

    #[test]
    fn test_clean_strips_clutter_and_ban_words() {
        let cleaned = clean_headline("[[talk]] \"mars rover\" lands (safely) WP", 8);
        assert_eq!(cleaned.as_deref(), Some("Mars rover lands safely"));
    }

    #[test]
    fn test_clean_caps_words() {
        let cleaned = clean_headline("one two three four five six", 3);
        assert_eq!(cleaned.as_deref(), Some("One two three"));
    }

    #[test]
    fn test_clean_rejects_single_word() {
        assert_eq!(clean_headline("Stub Mars", 8), None);
        assert_eq!(clean_headline("talk category Mars", 8), None);
        assert_eq!(clean_headline("   ", 8), None);
    }

    #[test]
    fn test_clean_keeps_apostrophes_and_hyphens() {
        let cleaned = clean_headline("world's long-running strike ends -", 8);
        assert_eq!(cleaned.as_deref(), Some("World's long-running strike ends"));
    }

    #[test]
    fn test_clean_object_string() {
        let cleaned = clean_headline(r#"{"title": "mars rover lands"}"#, 8);
        assert_eq!(cleaned.as_deref(), Some("Mars rover lands"));
    }

    #[test]
    fn test_object_values_keep_document_order() {
        let cleaned = clean_headline(r#"{"zeta": "mars rover", "alpha": "lands safely"}"#, 8);
        assert_eq!(cleaned.as_deref(), Some("Mars rover lands safely"));

        let items = parse_candidate_list(r#"{"second": "Storm Hits Coast", "first": "Mars Rover Lands"}"#);
        assert_eq!(items, vec!["Storm Hits Coast", "Mars Rover Lands"]);
    }

    #[test]
    fn test_clean_candidates_dedupes_and_limits() {
        let raw = vec![
            "Mars Rover Lands".to_string(),
            "mars rover lands".to_string(),
            "NSFW leak spreads online".to_string(),
            "x".to_string(),
            "Senate Passes Budget".to_string(),
            "Storm Hits Coast".to_string(),
        ];
        let cleaned = clean_candidates(&raw, 8, 2);
        assert_eq!(cleaned, vec!["Mars Rover Lands", "Senate Passes Budget"]);
    }
}
