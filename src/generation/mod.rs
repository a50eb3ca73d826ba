//! Headline generation seam
//!
//! The generative model itself lives outside this crate. This module defines the
//! interface a generator implements, the compact context it receives, and the
//! cleaning applied to whatever it returns.

mod cleaning;
mod context;

pub use cleaning::{
    clean_candidates, clean_headline, contains_off_limits, parse_candidate_list, BAN_WORDS,
    OFF_LIMITS,
};
pub use context::{window_context, DEFAULT_CONTEXT_CHARS};

use crate::error::{HeatError, Result};
use crate::window::WindowEntry;
use std::collections::VecDeque;
use std::path::Path;
use thiserror::Error;

/// Failure of the generative step; always recovered by the extractive fallback
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Headline generator unavailable: {0}")]
    Unavailable(String),

    #[error("Headline generator failed: {0}")]
    Backend(String),

    #[error("Headline generator returned unusable output: {0}")]
    InvalidOutput(String),
}

/// Everything a generator gets for one window
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    /// Entries of the window
    pub entries: &'a [WindowEntry],
    /// Compact summary built by [`window_context`]
    pub context: String,
    /// Number of candidates wanted
    pub wanted: usize,
    /// Word cap the generator should respect
    pub max_words: usize,
}

/// Proposes raw candidate headlines for a window
pub trait HeadlineGenerator {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Raw, uncleaned candidate strings
    fn generate(
        &mut self,
        request: &GenerationRequest<'_>,
    ) -> std::result::Result<Vec<String>, GenerationError>;

    /// Called instead of `generate` for a window that does not use generation
    fn skip(&mut self) {}
}

/// Generator that is never available; every window uses the fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGenerator;

impl HeadlineGenerator for NoGenerator {
    fn name(&self) -> &str {
        "none"
    }

    fn generate(
        &mut self,
        _request: &GenerationRequest<'_>,
    ) -> std::result::Result<Vec<String>, GenerationError> {
        Err(GenerationError::Unavailable(
            "no generator configured".to_string(),
        ))
    }
}

/// Serves recorded raw generator responses, one per window, in order
///
/// Each response is parsed with [`parse_candidate_list`]. Once the recording is
/// exhausted the generator reports itself unavailable.
#[derive(Debug, Clone, Default)]
pub struct ReplayGenerator {
    responses: VecDeque<String>,
}

impl ReplayGenerator {
    pub fn new(responses: impl IntoIterator<Item = String>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
        }
    }

    /// Load responses from a file with one raw response per line
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HeatError::Io {
            source: e,
            context: format!("Failed to read candidates file: {:?}", path),
        })?;
        Ok(Self::new(content.lines().map(str::to_string)))
    }

    /// Responses not yet served
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl HeadlineGenerator for ReplayGenerator {
    fn name(&self) -> &str {
        "replay"
    }

    fn generate(
        &mut self,
        _request: &GenerationRequest<'_>,
    ) -> std::result::Result<Vec<String>, GenerationError> {
        let response = self
            .responses
            .pop_front()
            .ok_or_else(|| GenerationError::Unavailable("recording exhausted".to_string()))?;

        let items = parse_candidate_list(&response);
        if items.is_empty() {
            return Err(GenerationError::InvalidOutput(format!(
                "no candidate list in response of {} chars",
                response.len()
            )));
        }
        Ok(items)
    }

    /// Drop the response recorded for the skipped window
    fn skip(&mut self) {
        self.responses.pop_front();
    }
}
