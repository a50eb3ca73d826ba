// Shared types for window processing
use serde::{Deserialize, Deserializer, Serialize};

use crate::clustering::ClusterStats;

/// One normalized edit event collected into a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    /// Normalized ASCII-word page title
    #[serde(default)]
    pub title: String,
    /// Normalized ASCII-word edit comment
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub user: String,
    /// Unix timestamp in seconds
    #[serde(default, alias = "timestampSeconds", alias = "ts")]
    pub timestamp: i64,
    /// Absolute size change of the edit in bytes
    #[serde(
        default,
        alias = "byteDelta",
        alias = "delta",
        deserialize_with = "non_negative_delta"
    )]
    pub byte_delta: u64,
}

/// Negative deltas from sloppy producers count as zero
fn non_negative_delta<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.max(0) as u64)
}

impl WindowEntry {
    pub fn new(
        title: impl Into<String>,
        comment: impl Into<String>,
        user: impl Into<String>,
        timestamp: i64,
        byte_delta: u64,
    ) -> Self {
        Self {
            title: title.into(),
            comment: comment.into(),
            user: user.into(),
            timestamp,
            byte_delta,
        }
    }

    /// Title and comment joined for tokenization
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.comment)
    }
}

/// One emitted headline with its heat score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub text: String,
    pub heat: u64,
}

/// Where a window's candidates came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// The window had no entries
    None,
    /// Cleaned output of the headline generator
    Generated,
    /// Extractive fallback headlines
    Fallback,
}

/// Statistics from processing one window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowStats {
    /// Number of entries in the window
    pub entries: usize,
    /// Distinct scoring tokens in the window
    pub vocabulary: usize,
    /// Origin of the candidates
    pub source: CandidateSource,
    /// Candidates entering the clusterer
    pub candidates: usize,
    /// Counts through the clustering passes
    pub clustering: ClusterStats,
    /// Total processing time in milliseconds
    pub processing_time_ms: u64,
}

impl WindowStats {
    pub fn empty() -> Self {
        Self {
            entries: 0,
            vocabulary: 0,
            source: CandidateSource::None,
            candidates: 0,
            clustering: ClusterStats::default(),
            processing_time_ms: 0,
        }
    }
}

/// Output of one window cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowReport {
    /// Most relevant first, at most `top_headlines`
    pub headlines: Vec<Headline>,
    pub stats: WindowStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_json_aliases() {
        let json = r#"{"title":"Alan Turing","comment":"expanded","user":"x","ts":1700000000,"delta":512}"#;
        let entry: WindowEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.timestamp, 1_700_000_000);
        assert_eq!(entry.byte_delta, 512);
    }

    #[test]
    fn test_negative_delta_clamped() {
        let json = r#"{"title":"Alan Turing","byteDelta":-40}"#;
        let entry: WindowEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.byte_delta, 0);
        assert_eq!(entry.comment, "");
    }

    #[test]
    fn test_combined_text() {
        let entry = WindowEntry::new("Alan Turing", "fixed typo", "x", 0, 1);
        assert_eq!(entry.combined_text(), "Alan Turing fixed typo");
    }
}
