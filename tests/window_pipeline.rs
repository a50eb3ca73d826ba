// End-to-end window processing through the public API
use wikiheat::clustering::{cluster_and_merge, Candidate, ClusterSettings};
use wikiheat::fallback::extractive_headlines;
use wikiheat::generation::{GenerationError, GenerationRequest, HeadlineGenerator, ReplayGenerator};
use wikiheat::similarity::jaccard;
use wikiheat::window::{CandidateSource, PipelineSettings, WindowEntry, WindowProcessor};

/// Generator that fails every call
struct BrokenGenerator;

impl HeadlineGenerator for BrokenGenerator {
    fn name(&self) -> &str {
        "broken"
    }

    fn generate(
        &mut self,
        _request: &GenerationRequest<'_>,
    ) -> Result<Vec<String>, GenerationError> {
        Err(GenerationError::Backend("timeout".to_string()))
    }
}

fn entry(title: &str, comment: &str, ts: i64, byte_delta: u64) -> WindowEntry {
    WindowEntry::new(title, comment, "editor", ts, byte_delta)
}

fn eager_settings() -> PipelineSettings {
    PipelineSettings {
        min_entries_for_generation: 1,
        ..Default::default()
    }
}

#[test]
fn test_empty_window_emits_nothing() {
    let mut processor = WindowProcessor::new(PipelineSettings::default(), Box::new(BrokenGenerator));
    let report = processor.process(Vec::new());

    assert!(report.headlines.is_empty());
    assert_eq!(report.stats.entries, 0);
}

#[test]
fn test_near_duplicate_headlines_merge() {
    let entries = vec![
        entry("Alan Turing", "biography expanded", 1, 500),
        entry("Alan Turing", "early life", 2, 300),
    ];
    let generator = ReplayGenerator::new(vec![
        r#"["Alan Turing Biography Updated", "Alan Turing Biography Expanded"]"#.to_string(),
    ]);
    let mut processor = WindowProcessor::new(eager_settings(), Box::new(generator));

    let report = processor.process(entries);

    assert_eq!(report.stats.source, CandidateSource::Generated);
    assert_eq!(report.stats.clustering.jaccard_clusters, 1);
    assert_eq!(report.headlines.len(), 1);
    // 2080 + 2560; the higher-scoring phrasing represents the cluster
    assert_eq!(report.headlines[0].text, "Alan Turing Biography Expanded");
    assert_eq!(report.headlines[0].heat, 4640);
}

#[test]
fn test_sparse_window_with_failing_generator_uses_fallback() {
    let entries = vec![
        entry("Senate", "passes budget bill", 1, 700),
        entry("Mars Rover", "lands in jezero crater", 2, 900),
        entry("Nobel Prize", "physics laureates announced", 3, 300),
        entry("Storm Ciaran", "floods coastal towns", 4, 500),
        entry("Chess Olympiad", "final round results", 5, 100),
    ];
    let expected = extractive_headlines(&entries, 10, 8);

    let mut processor = WindowProcessor::new(PipelineSettings::default(), Box::new(BrokenGenerator));
    let report = processor.process(entries);

    assert_eq!(report.stats.source, CandidateSource::Fallback);
    let texts: Vec<String> = report.headlines.iter().map(|h| h.text.clone()).collect();
    assert_eq!(texts, expected);
    assert_eq!(texts[0], "Mars Rover Lands Jezero Crater");
    assert_eq!(report.headlines[0].heat, 4092);
}

#[test]
fn test_busy_window_respects_output_invariants() {
    let topics = [
        ("Mars Rover", "lands in jezero crater"),
        ("Senate", "passes budget bill"),
        ("Storm Ciaran", "floods coastal towns"),
        ("Nobel Prize", "physics laureates announced"),
    ];
    let entries: Vec<WindowEntry> = (0..16)
        .map(|i| {
            let (title, comment) = topics[i % topics.len()];
            entry(title, comment, i as i64, 50 + 10 * i as u64)
        })
        .collect();

    let generator = ReplayGenerator::new(vec![serde_json::json!([
        "Mars Rover Lands In Jezero Crater",
        "Mars Rover Lands In Crater",
        "Rover Lands On Mars",
        "Senate Passes Budget Bill",
        "Senate Passes The Budget Bill",
        "Storm Ciaran Floods Coastal Towns",
        "Coastal Towns Flooded By Storm",
        "Nobel Physics Laureates Announced",
        "Nobel Prize In Physics Announced",
    ])
    .to_string()]);

    let settings = PipelineSettings {
        top_headlines: 3,
        clustering: ClusterSettings {
            top_k: 3,
            ..Default::default()
        },
        ..Default::default()
    };
    let threshold = settings.clustering.jaccard_threshold;
    let mut processor = WindowProcessor::new(settings, Box::new(generator));

    let report = processor.process(entries);

    assert_eq!(report.stats.source, CandidateSource::Generated);
    assert!(report.headlines.len() <= 3);
    for (i, a) in report.headlines.iter().enumerate() {
        for b in &report.headlines[i + 1..] {
            assert!(
                jaccard(&a.text, &b.text) < threshold,
                "{:?} and {:?} should have merged",
                a.text,
                b.text
            );
        }
    }
    assert!(report
        .headlines
        .windows(2)
        .all(|pair| pair[0].heat >= pair[1].heat));

    // Re-clustering the emitted headlines merges nothing further
    let again = cluster_and_merge(
        report
            .headlines
            .iter()
            .map(|h| Candidate::new(h.text.clone(), h.heat))
            .collect(),
        threshold,
    );
    assert_eq!(again.len(), report.headlines.len());
}

#[test]
fn test_windows_do_not_share_state() {
    let mut processor = WindowProcessor::new(PipelineSettings::default(), Box::new(BrokenGenerator));

    let first = processor.process(vec![entry("Mars Rover", "lands", 1, 400)]);
    let second = processor.process(vec![entry("Senate", "passes budget", 70, 10)]);

    assert_eq!(first.headlines[0].text, "Mars Rover Lands");
    assert_eq!(second.headlines.len(), 1);
    assert_eq!(second.headlines[0].text, "Senate Passes Budget");
}
