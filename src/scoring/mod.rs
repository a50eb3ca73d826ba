// Heat scoring: blends byte-weighted and frequency-weighted term overlap
//
// Pure byte scoring leaves many small edits tied at zero; blending in frequency
// (scaled to bytes by the window's unit scale) breaks those ties.

mod term_maps;

pub use term_maps::{TermMap, TermMaps};

use crate::tokenizer;

/// Default weight of the byte component
pub const DEFAULT_BLEND: f64 = 0.80;

/// Score components of a single headline, kept for debugging and tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Sum of byte weights of the headline's tokens
    pub byte_score: u64,
    /// Sum of token frequencies, multiplied by the unit scale
    pub freq_score: u64,
    /// Final blended, rounded score
    pub total: u64,
}

/// Blended headline scorer for one window
pub struct Scorer<'a> {
    maps: &'a TermMaps,
    blend: f64,
    unit_scale: u64,
}

impl<'a> Scorer<'a> {
    /// Create a scorer over a window's term maps
    ///
    /// # Arguments
    /// * `maps` - Term maps of the current window
    /// * `blend` - Weight of the byte component, the rest goes to frequency
    pub fn new(maps: &'a TermMaps, blend: f64) -> Self {
        Self {
            maps,
            blend,
            unit_scale: maps.unit_scale(),
        }
    }

    /// Score a headline with its component breakdown
    pub fn breakdown(&self, headline: &str) -> ScoreBreakdown {
        let tokens = tokenizer::scoring_tokens(headline);

        let byte_score = tokens
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(self.maps.byte_weight(t)));
        let freq_score = tokens
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(self.maps.count(t)))
            .saturating_mul(self.unit_scale);

        let blended = self.blend * byte_score as f64 + (1.0 - self.blend) * freq_score as f64;

        ScoreBreakdown {
            byte_score,
            freq_score,
            total: blended.round().max(0.0) as u64,
        }
    }

    /// Final integer score of a headline
    pub fn score(&self, headline: &str) -> u64 {
        self.breakdown(headline).total
    }
}

/// Score one headline against a window's term maps
pub fn score(headline: &str, maps: &TermMaps, blend: f64) -> u64 {
    Scorer::new(maps, blend).score(headline)
}
