// Per-window term aggregation: byte-weighted and frequency-weighted maps
use ahash::{HashMap, HashMapExt};

use crate::tokenizer;
use crate::window::WindowEntry;

/// Token -> accumulated weight for one window
pub type TermMap = HashMap<String, u64>;

/// The two term maps built from a window's entries
#[derive(Debug, Clone, Default)]
pub struct TermMaps {
    /// Sum of byte deltas of the entries mentioning each token
    pub bytes: TermMap,
    /// Raw occurrence count of each token across the window
    pub counts: TermMap,
}

impl TermMaps {
    /// Build both maps in a single pass over the entries
    ///
    /// Every scoring token of `"{title} {comment}"` adds the entry's byte delta to
    /// `bytes` and 1 to `counts`. Repeated tokens within one entry count each time.
    pub fn build(entries: &[WindowEntry]) -> Self {
        let mut bytes = TermMap::new();
        let mut counts = TermMap::new();

        for entry in entries {
            for token in tokenizer::scoring_tokens(&entry.combined_text()) {
                let count = counts.entry(token.clone()).or_insert(0);
                *count = count.saturating_add(1);
                let weight = bytes.entry(token).or_insert(0);
                *weight = weight.saturating_add(entry.byte_delta);
            }
        }

        Self { bytes, counts }
    }

    /// Byte weight of a token (0 if never seen)
    pub fn byte_weight(&self, token: &str) -> u64 {
        self.bytes.get(token).copied().unwrap_or(0)
    }

    /// Frequency of a token (0 if never seen)
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Average bytes contributed per token occurrence, rounded, never below 1
    ///
    /// Puts frequency on the same numeric scale as bytes.
    pub fn unit_scale(&self) -> u64 {
        let total_bytes = saturating_total(self.bytes.values());
        let total_count = saturating_total(self.counts.values());
        if total_count == 0 {
            return 1;
        }
        let scale = (total_bytes as f64 / total_count as f64).round() as u64;
        scale.max(1)
    }

    /// Number of distinct tokens seen in the window
    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Sum that pins at `u64::MAX` instead of overflowing on huge byte deltas
pub(crate) fn saturating_total<'a>(values: impl Iterator<Item = &'a u64>) -> u64 {
    values.fold(0u64, |acc, v| acc.saturating_add(*v))
}
