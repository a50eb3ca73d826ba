// Two-pass deduplication of scored headline candidates
//
// Pass 1: Jaccard merge over token sets (cheap, runs over every candidate)
// Pass 2: Phrasal fusion over pass-1 representatives only (expensive, small input)
// Then rank by total score and keep the top K.

mod fusion;
mod merge;
mod selection;
mod types;

pub use fusion::{fuse_phrasal_near_dupes, DEFAULT_PHRASAL_FUSE_THRESHOLD};
pub use merge::{cluster_and_merge, DEFAULT_JACCARD_THRESHOLD};
pub use selection::{mmr_select, top_k, SelectionStrategy};
pub use types::{Candidate, Cluster, ClusterStats};

use crate::config::ClusteringConfig;
use crate::similarity::Jaccard;

/// Settings for one clustering run
#[derive(Debug, Clone)]
pub struct ClusterSettings {
    pub jaccard_threshold: f64,
    pub phrasal_fuse_threshold: f64,
    pub top_k: usize,
    pub strategy: SelectionStrategy,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            jaccard_threshold: DEFAULT_JACCARD_THRESHOLD,
            phrasal_fuse_threshold: DEFAULT_PHRASAL_FUSE_THRESHOLD,
            top_k: 10,
            strategy: SelectionStrategy::TopK,
        }
    }
}

impl ClusterSettings {
    /// Build settings from the clustering section and the output cap
    pub fn from_config(config: &ClusteringConfig, top_k: usize) -> Self {
        Self {
            jaccard_threshold: config.jaccard_threshold,
            phrasal_fuse_threshold: config.phrasal_fuse_threshold,
            top_k,
            strategy: SelectionStrategy::parse_strategy(&config.selection, config.mmr_lambda),
        }
    }
}

/// Runs both passes and the final selection
pub struct Clusterer {
    settings: ClusterSettings,
}

impl Clusterer {
    pub fn new(settings: ClusterSettings) -> Self {
        Self { settings }
    }

    /// Cluster, fuse and select
    ///
    /// # Arguments
    /// * `candidates` - Scored candidates of one window, in any order
    ///
    /// # Returns
    /// Tuple of (at most `top_k` clusters, most relevant first; statistics)
    pub fn run(&self, candidates: Vec<Candidate>) -> (Vec<Cluster>, ClusterStats) {
        let candidate_count = candidates.len();

        let clusters = cluster_and_merge(candidates, self.settings.jaccard_threshold);
        let jaccard_count = clusters.len();
        tracing::debug!(
            "Jaccard pass: {} candidates -> {} clusters",
            candidate_count,
            jaccard_count
        );

        let fused = fuse_phrasal_near_dupes(clusters, self.settings.phrasal_fuse_threshold);
        let fused_count = fused.len();
        tracing::debug!(
            "Phrasal fusion: {} clusters -> {} clusters",
            jaccard_count,
            fused_count
        );

        let selected = match self.settings.strategy {
            SelectionStrategy::TopK => top_k(fused, self.settings.top_k),
            SelectionStrategy::Mmr { lambda } => {
                mmr_select(fused, self.settings.top_k, &Jaccard, lambda)
            }
        };

        let stats = ClusterStats {
            candidates: candidate_count,
            jaccard_clusters: jaccard_count,
            fused_clusters: fused_count,
            selected: selected.len(),
        };

        (selected, stats)
    }
}
