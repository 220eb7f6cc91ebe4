// tests/metrics_counters.rs
//
// Counters are emitted through the `metrics` facade; capture them with a
// thread-local debugging recorder.

use metrics::{SharedString, Unit};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::CompositeKey;
use std::collections::HashMap;

use award_predictor::telemetry::{
    CATEGORIES_SKIPPED, CATEGORIES_TRAINED, FALLBACK_SCORED, MALFORMED_ODDS, MERGE_MATCHES,
    ZERO_VARIANCE,
};
use award_predictor::{
    odds, CandidateRecord, EngineConfig, HistoricalRecord, PredictionEngine, ProbabilityRecord,
};

fn hist(cat: &str, i: usize, x: bool, winner: bool) -> HistoricalRecord {
    HistoricalRecord {
        year: 2000 + i as i32,
        category: cat.to_string(),
        candidate_name: format!("{cat}-{i}"),
        film_or_work: String::new(),
        source_win_flags: HashMap::from([("X".to_string(), x)]),
        critics_score: None,
        audience_score: None,
        is_winner: winner,
    }
}

type Snapshot = Vec<(CompositeKey, Option<Unit>, Option<SharedString>, DebugValue)>;

/// Sum counters by name across label sets.
fn counters(snapshot: Snapshot) -> HashMap<String, u64> {
    let mut out = HashMap::new();
    for (key, _, _, value) in snapshot {
        if let DebugValue::Counter(n) = value {
            *out.entry(key.key().name().to_string()).or_insert(0) += n;
        }
    }
    out
}

#[test]
fn pipeline_counters_are_emitted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let engine = PredictionEngine::new(EngineConfig::with_sources(["X", "Y"]));

        let mut history: Vec<_> = (0..10)
            .map(|i| hist("Directing", i, i % 2 == 0, i % 2 == 0))
            .collect();
        history.extend((0..3).map(|i| hist("Sound", i, true, i == 0)));
        let w = engine.train(&history).unwrap();
        assert!(w.is_trained("Directing"));

        let candidates = vec![CandidateRecord {
            year: 2025,
            category: "Sound".into(),
            candidate_name: "Dune".into(),
            film_or_work: String::new(),
            source_win_flags: HashMap::new(),
            critics_score: None,
            audience_score: None,
        }];
        let scored = engine.score(&candidates, &[], &w).unwrap();

        let betting = vec![ProbabilityRecord::new("Sound", "Dune: Part Two", 60.0)];
        engine.merge(&scored, &betting, &[]).unwrap();

        assert_eq!(odds::to_probability("x/y"), odds::NEUTRAL_PROBABILITY);
    });

    let got = counters(snapshotter.snapshot().into_vec());
    assert_eq!(got.get(CATEGORIES_TRAINED), Some(&1));
    assert_eq!(got.get(CATEGORIES_SKIPPED), Some(&1));
    // "Y" never appears in history → undefined correlation.
    assert_eq!(got.get(ZERO_VARIANCE), Some(&1));
    assert_eq!(got.get(FALLBACK_SCORED), Some(&1));
    assert_eq!(got.get(MERGE_MATCHES), Some(&1));
    assert_eq!(got.get(MALFORMED_ODDS), Some(&1));
}
