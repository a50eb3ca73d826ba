// Final selection of at most K clusters
use crate::clustering::types::Cluster;
use crate::similarity::SimilarityMeasure;

/// How the final K clusters are picked from the fused list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionStrategy {
    /// Highest total score first
    TopK,
    /// Maximal Marginal Relevance; `lambda` 1.0 is pure relevance, 0.0 pure diversity
    Mmr { lambda: f64 },
}

impl SelectionStrategy {
    /// Parse strategy from configuration values
    pub fn parse_strategy(s: &str, lambda: f64) -> Self {
        match s.to_lowercase().as_str() {
            "mmr" => Self::Mmr { lambda },
            _ => Self::TopK, // Default
        }
    }
}

/// Keep the first `k` clusters of an already ranked list
pub fn top_k(mut clusters: Vec<Cluster>, k: usize) -> Vec<Cluster> {
    clusters.truncate(k);
    clusters
}

/// Pick `k` clusters balancing total score against redundancy with earlier picks
///
/// Each round selects the cluster maximizing
/// `lambda * score - (1 - lambda) * max_similarity_to_selected * score`;
/// the earliest cluster wins ties.
pub fn mmr_select<M: SimilarityMeasure>(
    clusters: Vec<Cluster>,
    k: usize,
    measure: &M,
    lambda: f64,
) -> Vec<Cluster> {
    let mut pool = clusters;
    pool.sort_by(|a, b| b.total_score.cmp(&a.total_score));

    let mut selected: Vec<Cluster> = Vec::with_capacity(k.min(pool.len()));

    while !pool.is_empty() && selected.len() < k {
        let mut best_idx = 0;
        let mut best_value = f64::NEG_INFINITY;

        for (idx, candidate) in pool.iter().enumerate() {
            let redundancy = selected
                .iter()
                .map(|s| measure.similarity(&candidate.representative, &s.representative))
                .fold(0.0, f64::max);
            let score = candidate.total_score as f64;
            let value = lambda * score - (1.0 - lambda) * redundancy * score;
            if value > best_value {
                best_idx = idx;
                best_value = value;
            }
        }

        selected.push(pool.remove(best_idx));
    }

    selected
}
