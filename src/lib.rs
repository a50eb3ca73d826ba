//! wikiheat - headline heat scoring for wiki edit streams
//!
//! Collects edit events into fixed-length windows, scores candidate headlines
//! against the window's byte-weighted and frequency-weighted term maps, merges
//! near-duplicates in two passes (token-set Jaccard, then phrasal fusion) and
//! emits the top headlines of each window with their heat.

pub mod cli;
pub mod clustering;
pub mod config;
pub mod error;
pub mod fallback;
pub mod generation;
pub mod scoring;
pub mod similarity;
pub mod tokenizer;
pub mod window;

pub use error::{HeatError, Result};
