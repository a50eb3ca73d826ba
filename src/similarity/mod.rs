//! Similarity measures between headline texts
//!
//! Two interchangeable measures, both pure:
//! - [`jaccard`]: cheap, structural, over unigram + bigram token sets
//! - [`phrasal_ratio`]: expensive, character-level, catches paraphrase

mod jaccard;
mod phrasal;

pub use jaccard::{jaccard, jaccard_sets};
pub use phrasal::{matching_ratio, normalize_for_phrasal, phrasal_ratio};

/// A similarity measure over two texts, returning a value in [0, 1]
pub trait SimilarityMeasure {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Token-set Jaccard measure
#[derive(Debug, Clone, Copy, Default)]
pub struct Jaccard;

impl SimilarityMeasure for Jaccard {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        jaccard(a, b)
    }
}

/// Character-level phrasal measure
#[derive(Debug, Clone, Copy, Default)]
pub struct Phrasal;

impl SimilarityMeasure for Phrasal {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        phrasal_ratio(a, b)
    }
}
