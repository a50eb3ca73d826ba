use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;
use wikiheat::cli::{Cli, Commands, ConfigAction};
use wikiheat::config::Config;
use wikiheat::error::{HeatError, Result};
use wikiheat::generation::{HeadlineGenerator, NoGenerator, ReplayGenerator};
use wikiheat::window::{
    read_entries, run_windows, spawn_line_reader, split_into_windows, PipelineSettings,
    WindowProcessor, WindowReport,
};

/// Capacity of the reader-to-collector channel
const CHANNEL_CAPACITY: usize = 1024;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    // Handle commands
    match cli.command {
        Commands::Process {
            input,
            candidates,
            profile,
            json,
        } => {
            cmd_process(cli.config, &input, candidates, profile, json)?;
        }
        Commands::Stream { profile, json } => {
            cmd_stream(cli.config, profile, json)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "wikiheat=debug" } else { "wikiheat=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_process(
    config_path: Option<PathBuf>,
    input: &Path,
    candidates: Option<PathBuf>,
    profile: Option<String>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path, profile)?;

    let generator: Box<dyn HeadlineGenerator + Send> = match candidates {
        Some(path) => Box::new(ReplayGenerator::from_file(&path)?),
        None => Box::new(NoGenerator),
    };
    let mut processor = WindowProcessor::new(PipelineSettings::from_config(&config), generator);

    let entries = read_entries(input)?;
    let windows = split_into_windows(entries, config.window.length_seconds);
    tracing::info!(
        "Replaying {} windows of {}s from {:?}",
        windows.len(),
        config.window.length_seconds,
        input
    );

    for (index, window) in windows.into_iter().enumerate() {
        let report = processor.process(window.entries);
        print_report(index, Some(window.start), &report, json);
    }

    Ok(())
}

fn cmd_stream(config_path: Option<PathBuf>, profile: Option<String>, json: bool) -> Result<()> {
    let config = load_config(config_path, profile)?;
    let length = Duration::from_secs(config.window.length_seconds);
    let mut processor =
        WindowProcessor::new(PipelineSettings::from_config(&config), Box::new(NoGenerator));

    let rt = tokio::runtime::Runtime::new().map_err(|e| HeatError::Io {
        source: e,
        context: "Failed to create tokio runtime".to_string(),
    })?;

    rt.block_on(async {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let reader = spawn_line_reader(tokio::io::BufReader::new(tokio::io::stdin()), tx);

        tracing::info!("Streaming stdin in {}s windows", length.as_secs());
        run_windows(rx, length, &mut processor, |index, report| {
            print_report(index, None, &report, json)
        })
        .await;

        match reader.await {
            Ok(forwarded) => tracing::debug!("{} entries read from stdin", forwarded),
            Err(e) => tracing::error!("Reader task failed: {}", e),
        }
    });

    Ok(())
}

fn print_report(index: usize, start: Option<i64>, report: &WindowReport, json: bool) {
    if json {
        let line = serde_json::json!({
            "window": index,
            "start": start,
            "headlines": report.headlines,
            "stats": report.stats,
        });
        println!("{}", line);
        return;
    }

    match start {
        Some(ts) => println!(
            "Window {} (t={}): {} entries",
            index, ts, report.stats.entries
        ),
        None => println!("Window {}: {} entries", index, report.stats.entries),
    }
    for headline in &report.headlines {
        println!("  → ({}, {})", headline.text, headline.heat);
    }
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { section } => {
            let config = load_config(config_path, None)?;
            let value = serde_json::to_value(&config).map_err(|e| HeatError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;

            let shown = match section {
                Some(section) => value.get(&section).cloned().ok_or_else(|| {
                    HeatError::Config(format!("Unknown config section: {}", section))
                })?,
                None => value,
            };

            let json = serde_json::to_string_pretty(&shown).map_err(|e| HeatError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;
            println!("{}", json);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            // Create parent directory
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| HeatError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>, profile: Option<String>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if !path.exists() {
        tracing::warn!(
            "Config file not found, using defaults. Run 'wikiheat config init' to create one."
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        if let Some(profile) = profile {
            config.apply_profile(&profile)?;
        }
        wikiheat::config::ConfigValidator::validate(&config)?;
        return Ok(config);
    }

    if let Some(profile) = profile {
        Config::load_with_profile(&path, &profile)
    } else {
        Config::load(&path)
    }
}
