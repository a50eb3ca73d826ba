// Jaccard pass: greedy single-pass merge of scored candidates
use crate::clustering::types::{Candidate, Cluster};
use crate::similarity::jaccard_sets;
use crate::tokenizer::{self, TokenSet};

/// Default Jaccard threshold for merging a candidate into a cluster
pub const DEFAULT_JACCARD_THRESHOLD: f64 = 0.55;

/// Group near-duplicate candidates by token Jaccard
///
/// # Algorithm
/// 1. Order candidates by descending score (stable, so ties keep input order)
/// 2. Compare each candidate against every cluster representative
/// 3. Merge into the most similar cluster (earliest on ties) when similarity >= threshold,
///    otherwise open a singleton cluster
/// 4. Order clusters by descending total score (stable)
///
/// Processing high scores first makes high-scoring phrasings the representatives.
pub fn cluster_and_merge(mut candidates: Vec<Candidate>, threshold: f64) -> Vec<Cluster> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let mut clusters: Vec<Cluster> = Vec::new();
    // Representative token sets, parallel to `clusters`
    let mut rep_tokens: Vec<TokenSet> = Vec::new();

    for candidate in candidates {
        let tokens = tokenizer::similarity_tokens(&candidate.text);

        // Degenerate texts with no tokens match nothing
        let mut best: Option<(usize, f64)> = None;
        for (idx, rep) in rep_tokens.iter().enumerate() {
            if tokens.is_empty() || rep.is_empty() {
                continue;
            }
            let sim = jaccard_sets(&tokens, rep);
            if best.map_or(true, |(_, best_sim)| sim > best_sim) {
                best = Some((idx, sim));
            }
        }

        match best {
            Some((idx, sim)) if sim >= threshold => {
                if clusters[idx].absorb(candidate) {
                    rep_tokens[idx] = tokens;
                }
            }
            _ => {
                clusters.push(Cluster::singleton(candidate));
                rep_tokens.push(tokens);
            }
        }
    }

    clusters.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    clusters
}
