// Phrasal fusion pass: collapse clusters whose representatives are paraphrases
use crate::clustering::types::Cluster;
use crate::similarity::{matching_ratio, normalize_for_phrasal};

/// Default phrasal ratio at which two clusters are fused
pub const DEFAULT_PHRASAL_FUSE_THRESHOLD: f64 = 0.88;

/// Fuse clusters whose representatives are phrasal near-duplicates
///
/// Walks the clusters in order and folds each into the first kept cluster whose
/// current representative has a phrasal ratio >= threshold. Only representatives
/// are compared, so the cost is quadratic in the (already reduced) cluster count.
/// Output is ordered by descending total score (stable).
pub fn fuse_phrasal_near_dupes(clusters: Vec<Cluster>, threshold: f64) -> Vec<Cluster> {
    let mut fused: Vec<Cluster> = Vec::new();
    // Normalized representative keys, parallel to `fused`
    let mut keys: Vec<String> = Vec::new();

    for cluster in clusters {
        let key = normalize_for_phrasal(&cluster.representative);

        let target = keys
            .iter()
            .position(|existing| matching_ratio(&key, existing) >= threshold);

        match target {
            Some(idx) => {
                tracing::trace!(
                    "Fusing '{}' into '{}'",
                    cluster.representative,
                    fused[idx].representative
                );
                if fused[idx].fuse(cluster) {
                    keys[idx] = key;
                }
            }
            None => {
                fused.push(cluster);
                keys.push(key);
            }
        }
    }

    fused.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    fused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::types::Candidate;

    fn cluster(text: &str, score: u64) -> Cluster {
        Cluster::singleton(Candidate::new(text, score))
    }

    #[test]
    fn test_paraphrases_fuse() {
        let clusters = vec![
            cluster("City Council Approves Budget", 50),
            cluster("Storm Floods Coastal Towns", 40),
            cluster("City Council Approved Budget", 30),
        ];

        let fused = fuse_phrasal_near_dupes(clusters, DEFAULT_PHRASAL_FUSE_THRESHOLD);

        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].representative, "City Council Approves Budget");
        assert_eq!(fused[0].total_score, 80);
        assert_eq!(fused[0].size(), 2);
        assert_eq!(fused[1].representative, "Storm Floods Coastal Towns");
    }

    #[test]
    fn test_higher_scoring_representative_wins() {
        // A big cluster whose representative scores lower than the fused-in one
        let mut big = cluster("City Council Approved Budget", 20);
        big.absorb(Candidate::new("Council Approved Budget", 15));
        big.absorb(Candidate::new("Budget Approved By Council", 15));
        let clusters = vec![big, cluster("City Council Approves Budget", 30)];

        let fused = fuse_phrasal_near_dupes(clusters, DEFAULT_PHRASAL_FUSE_THRESHOLD);

        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].representative, "City Council Approves Budget");
        assert_eq!(fused[0].total_score, 80);
        assert_eq!(fused[0].size(), 4);
    }

    #[test]
    fn test_strict_threshold_keeps_apart() {
        let clusters = vec![
            cluster("City Council Approves Budget", 50),
            cluster("City Council Approved Budget", 30),
        ];
        let fused = fuse_phrasal_near_dupes(clusters, 0.99);
        assert_eq!(fused.len(), 2);
    }

    #[test]
    fn test_resorted_by_total() {
        let mut small_rep = cluster("Storm Floods Coastal Towns", 10);
        small_rep.absorb(Candidate::new("Storm Floods Coast", 5));
        let clusters = vec![
            cluster("Senate Passes Budget", 12),
            small_rep,
            cluster("Storm Floods Coastal Town", 9),
        ];

        let fused = fuse_phrasal_near_dupes(clusters, DEFAULT_PHRASAL_FUSE_THRESHOLD);

        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].representative, "Storm Floods Coastal Towns");
        assert_eq!(fused[0].total_score, 24);
        assert_eq!(fused[1].representative, "Senate Passes Budget");
    }

    #[test]
    fn test_empty() {
        assert!(fuse_phrasal_near_dupes(Vec::new(), DEFAULT_PHRASAL_FUSE_THRESHOLD).is_empty());
    }
}
