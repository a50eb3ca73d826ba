//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wikiheat",
    version,
    author = "neur0map",
    about = "Ranked, deduplicated headlines from windows of wiki edit activity",
    long_about = "wikiheat groups edit events into fixed-length windows, scores candidate headlines \
                  by byte-weighted and frequency-weighted term overlap, merges near-duplicates with \
                  Jaccard clustering and phrasal fusion, and emits the hottest headlines per window."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/wikiheat/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON-lines file of edit entries window by window
    Process {
        /// JSON-lines file of window entries
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Recorded generator responses, one JSON line per window
        #[arg(long, value_name = "FILE")]
        candidates: Option<PathBuf>,

        /// Profile to apply (e.g., "strict", "broad")
        #[arg(short, long)]
        profile: Option<String>,

        /// Print one JSON object per window
        #[arg(long)]
        json: bool,
    },

    /// Read JSON-lines entries from stdin and emit headlines every window
    Stream {
        /// Profile to apply
        #[arg(short, long)]
        profile: Option<String>,

        /// Print one JSON object per window
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Show only a specific section
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
