// Shared types for the clustering passes
use serde::{Deserialize, Serialize};

/// Headline text with its heat score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub score: u64,
}

impl Candidate {
    pub fn new(text: impl Into<String>, score: u64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Group of near-duplicate candidates
///
/// `total_score` is the sum of member scores and `representative` is the
/// highest-scoring member, first-seen on ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Display text chosen for the cluster
    pub representative: String,
    /// Score of the representative member
    pub representative_score: u64,
    /// Sum of all member scores
    pub total_score: u64,
    /// Members in merge order
    pub members: Vec<Candidate>,
}

impl Cluster {
    /// Open a singleton cluster
    pub fn singleton(candidate: Candidate) -> Self {
        Self {
            representative: candidate.text.clone(),
            representative_score: candidate.score,
            total_score: candidate.score,
            members: vec![candidate],
        }
    }

    /// Add one candidate; it becomes representative only with a strictly higher score
    ///
    /// Returns true when the representative changed.
    pub fn absorb(&mut self, candidate: Candidate) -> bool {
        self.total_score = self.total_score.saturating_add(candidate.score);
        let promoted = candidate.score > self.representative_score;
        if promoted {
            self.representative = candidate.text.clone();
            self.representative_score = candidate.score;
        }
        self.members.push(candidate);
        promoted
    }

    /// Fold another cluster into this one
    ///
    /// Returns true when the other cluster's representative took over.
    pub fn fuse(&mut self, other: Cluster) -> bool {
        self.total_score = self.total_score.saturating_add(other.total_score);
        let promoted = other.representative_score > self.representative_score;
        if promoted {
            self.representative = other.representative;
            self.representative_score = other.representative_score;
        }
        self.members.extend(other.members);
        promoted
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Member texts in merge order
    pub fn member_texts(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.text.as_str())
    }
}

/// Cluster counts through the passes of one window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    /// Candidates entering the Jaccard pass
    pub candidates: usize,
    /// Clusters after the Jaccard pass
    pub jaccard_clusters: usize,
    /// Clusters after phrasal fusion
    pub fused_clusters: usize,
    /// Clusters kept after top-K selection
    pub selected: usize,
}
