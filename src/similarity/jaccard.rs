// Token-set Jaccard similarity over unigram + bigram sets
use crate::tokenizer::{self, TokenSet};

/// Jaccard similarity of two token sets
///
/// Two empty sets score 0.0 so degenerate texts never merge with each other.
pub fn jaccard_sets(a: &TokenSet, b: &TokenSet) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Jaccard similarity of the similarity tokens of two texts
pub fn jaccard(a: &str, b: &str) -> f64 {
    jaccard_sets(
        &tokenizer::similarity_tokens(a),
        &tokenizer::similarity_tokens(b),
    )
}
