// Configuration files, profiles and validation through the public API
use tempfile::TempDir;
use wikiheat::config::Config;
use wikiheat::window::PipelineSettings;
use wikiheat::HeatError;

const CONFIG: &str = r#"
[_meta]
schema_version = "1.0.0"

[window]
length_seconds = 30
min_entries_for_generation = 6

[headlines]
top_headlines = 5
max_words = 6
candidate_multiplier = 3

[scoring]
blend = 0.7

[clustering]
jaccard_threshold = 0.5
phrasal_fuse_threshold = 0.9
selection = "top_k"
mmr_lambda = 0.75

[profiles.strict]
jaccard_threshold = 0.8
top_headlines = 3
selection = "mmr"
"#;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_load_config_file() {
    let (_dir, path) = write_config(CONFIG);
    let config = Config::load(&path).unwrap();

    assert_eq!(config.window.length_seconds, 30);
    assert_eq!(config.headlines.max_words, 6);
    assert_eq!(config.scoring.blend, 0.7);

    let settings = PipelineSettings::from_config(&config);
    assert_eq!(settings.top_headlines, 5);
    assert_eq!(settings.min_entries_for_generation, 6);
    assert_eq!(settings.clustering.top_k, 5);
    assert_eq!(settings.clustering.phrasal_fuse_threshold, 0.9);
}

#[test]
fn test_profile_overrides() {
    let (_dir, path) = write_config(CONFIG);
    let config = Config::load_with_profile(&path, "strict").unwrap();

    assert_eq!(config.clustering.jaccard_threshold, 0.8);
    assert_eq!(config.headlines.top_headlines, 3);
    assert_eq!(config.clustering.selection, "mmr");
    // Untouched values survive
    assert_eq!(config.scoring.blend, 0.7);

    let missing = Config::load_with_profile(&path, "lenient");
    assert!(matches!(missing, Err(HeatError::ProfileNotFound { .. })));
}

#[test]
fn test_invalid_values_are_reported_together() {
    let broken = CONFIG
        .replace("blend = 0.7", "blend = 1.7")
        .replace("length_seconds = 30", "length_seconds = 0");
    let (_dir, path) = write_config(&broken);

    match Config::load(&path) {
        Err(HeatError::ConfigValidation { errors }) => {
            let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
            assert!(paths.contains(&"scoring.blend"));
            assert!(paths.contains(&"window.length_seconds"));
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn test_malformed_toml() {
    let (_dir, path) = write_config("[window\nlength_seconds = ");
    assert!(matches!(Config::load(&path), Err(HeatError::Toml(_))));
}

#[test]
fn test_default_config_roundtrips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    Config::default().save(&path).unwrap();
    let loaded = Config::load(&path).unwrap();

    assert_eq!(loaded.headlines.top_headlines, 10);
    assert_eq!(loaded.clustering.jaccard_threshold, 0.55);
    assert_eq!(loaded.clustering.phrasal_fuse_threshold, 0.88);
    assert_eq!(loaded.scoring.blend, 0.80);
}
