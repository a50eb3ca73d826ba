//! Window orchestration
//!
//! One cycle per window: build term maps, obtain raw candidates (generated or
//! extractive), score, cluster, fuse, truncate and emit. Every cycle owns its
//! entries and intermediate structures; nothing carries over to the next window.

mod collector;
mod types;

pub use collector::{
    collect_window, parse_entry_line, read_entries, run_windows, spawn_line_reader,
    split_into_windows, CollectedWindow, ReplayWindow,
};
pub use types::{CandidateSource, Headline, WindowEntry, WindowReport, WindowStats};

use std::time::Instant;

use crate::clustering::{Candidate, ClusterSettings, Clusterer};
use crate::config::Config;
use crate::fallback::extractive_headlines;
use crate::generation::{
    clean_candidates, window_context, GenerationRequest, HeadlineGenerator, DEFAULT_CONTEXT_CHARS,
};
use crate::scoring::{Scorer, TermMaps, DEFAULT_BLEND};

/// Settings for the per-window pipeline
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Output cap per window
    pub top_headlines: usize,
    pub max_words: usize,
    /// Generators are asked for `top_headlines * candidate_multiplier` candidates
    pub candidate_multiplier: usize,
    /// Sparser windows skip generation
    pub min_entries_for_generation: usize,
    pub blend: f64,
    pub clustering: ClusterSettings,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        let top_headlines = config.headlines.top_headlines;
        Self {
            top_headlines,
            max_words: config.headlines.max_words,
            candidate_multiplier: config.headlines.candidate_multiplier,
            min_entries_for_generation: config.window.min_entries_for_generation,
            blend: config.scoring.blend,
            clustering: ClusterSettings::from_config(&config.clustering, top_headlines),
        }
    }

    /// Upper bound on cleaned candidates entering the scorer
    fn candidate_limit(&self) -> usize {
        self.top_headlines
            .saturating_mul(self.candidate_multiplier)
            .max(1)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            top_headlines: 10,
            max_words: 8,
            candidate_multiplier: 2,
            min_entries_for_generation: 12,
            blend: DEFAULT_BLEND,
            clustering: ClusterSettings::default(),
        }
    }
}

/// Drives window cycles against one headline generator
pub struct WindowProcessor {
    settings: PipelineSettings,
    generator: Box<dyn HeadlineGenerator + Send>,
    clusterer: Clusterer,
}

impl WindowProcessor {
    pub fn new(settings: PipelineSettings, generator: Box<dyn HeadlineGenerator + Send>) -> Self {
        let clusterer = Clusterer::new(settings.clustering.clone());
        Self {
            settings,
            generator,
            clusterer,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Process one window of entries into ranked headlines
    ///
    /// Never fails: a failed or useless generation falls back to extractive
    /// headlines, and an empty window yields an empty report.
    pub fn process(&mut self, entries: Vec<WindowEntry>) -> WindowReport {
        let start = Instant::now();

        if entries.is_empty() {
            tracing::debug!("Empty window, nothing to emit");
            self.generator.skip();
            return WindowReport {
                headlines: Vec::new(),
                stats: WindowStats::empty(),
            };
        }

        let maps = TermMaps::build(&entries);
        tracing::debug!(
            "Built term maps: {} entries, {} distinct tokens, unit scale {}",
            entries.len(),
            maps.vocabulary_size(),
            maps.unit_scale()
        );

        let (texts, source) = self.candidate_texts(&entries);

        let scorer = Scorer::new(&maps, self.settings.blend);
        let candidates: Vec<Candidate> = texts
            .into_iter()
            .map(|text| {
                let score = scorer.score(&text);
                Candidate::new(text, score)
            })
            .collect();
        let candidate_count = candidates.len();

        let (clusters, cluster_stats) = self.clusterer.run(candidates);

        let headlines: Vec<Headline> = clusters
            .into_iter()
            .take(self.settings.top_headlines)
            .map(|cluster| Headline {
                text: cluster.representative,
                heat: cluster.total_score,
            })
            .collect();

        let stats = WindowStats {
            entries: entries.len(),
            vocabulary: maps.vocabulary_size(),
            source,
            candidates: candidate_count,
            clustering: cluster_stats,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Window processed: {} entries -> {} headlines ({:?}, {}ms)",
            stats.entries,
            headlines.len(),
            stats.source,
            stats.processing_time_ms
        );

        WindowReport { headlines, stats }
    }

    /// Cleaned generator output, or the extractive fallback
    fn candidate_texts(&mut self, entries: &[WindowEntry]) -> (Vec<String>, CandidateSource) {
        if entries.len() < self.settings.min_entries_for_generation {
            tracing::debug!(
                "Sparse window ({} < {} entries), using extractive fallback",
                entries.len(),
                self.settings.min_entries_for_generation
            );
            self.generator.skip();
            return (self.fallback(entries), CandidateSource::Fallback);
        }

        let limit = self.settings.candidate_limit();
        let request = GenerationRequest {
            entries,
            context: window_context(entries, DEFAULT_CONTEXT_CHARS),
            wanted: limit,
            max_words: self.settings.max_words,
        };

        match self.generator.generate(&request) {
            Ok(raw) => {
                let cleaned = clean_candidates(&raw, self.settings.max_words, limit);
                tracing::debug!(
                    "Generator '{}' proposed {} candidates, {} survived cleaning",
                    self.generator.name(),
                    raw.len(),
                    cleaned.len()
                );
                if cleaned.is_empty() {
                    tracing::warn!("No usable generated candidates, using extractive fallback");
                    (self.fallback(entries), CandidateSource::Fallback)
                } else {
                    (cleaned, CandidateSource::Generated)
                }
            }
            Err(e) => {
                tracing::warn!("{}, using extractive fallback", e);
                (self.fallback(entries), CandidateSource::Fallback)
            }
        }
    }

    fn fallback(&self, entries: &[WindowEntry]) -> Vec<String> {
        extractive_headlines(entries, self.settings.top_headlines, self.settings.max_words)
    }
}
