// tests/pipeline_e2e.rs
//
// End-to-end run over the built-in award-season config: venue results in
// their own category vocabulary, betting odds strings and market rows.

use std::collections::HashMap;

use award_predictor::{
    leaders, roster, CandidateRecord, EngineConfig, HistoricalRecord, PipelineInput,
    PredictionEngine, ProbabilityRecord, SourceResult,
};

fn hist(year: i32, cat: &str, name: &str, winners_at: &[&str], winner: bool) -> HistoricalRecord {
    HistoricalRecord {
        year,
        category: cat.to_string(),
        candidate_name: name.to_string(),
        film_or_work: String::new(),
        source_win_flags: winners_at
            .iter()
            .map(|s| (s.to_string(), true))
            .collect::<HashMap<_, _>>(),
        critics_score: Some(80.0),
        audience_score: Some(70.0),
        is_winner: winner,
    }
}

/// Ten years of Directing: DGA always agrees with the outcome, BAFTA agrees
/// on even years and picks a loser otherwise. Best Picture has only two years.
fn history() -> Vec<HistoricalRecord> {
    let mut v = Vec::new();
    for year in 2010..2020 {
        for i in 0..5 {
            let winner = i == 0;
            let mut at = Vec::new();
            if winner {
                at.push("DGA");
            }
            if (year % 2 == 0 && winner) || (year % 2 == 1 && i == 1) {
                at.push("BAFTA");
            }
            v.push(hist(year, "Directing", &format!("d{year}{i}"), &at, winner));
        }
    }
    for year in 2018..2020 {
        for i in 0..5 {
            let at: &[&str] = if i == 0 { &["PGA"] } else { &[] };
            v.push(hist(year, "Best Picture", &format!("p{year}{i}"), at, i == 0));
        }
    }
    v
}

fn candidate(cat: &str, name: &str, film: &str) -> CandidateRecord {
    CandidateRecord {
        year: 2025,
        category: cat.to_string(),
        candidate_name: name.to_string(),
        film_or_work: film.to_string(),
        source_win_flags: HashMap::new(),
        critics_score: None,
        audience_score: None,
    }
}

fn result(source: &str, label: &str, nominee: &str) -> SourceResult {
    SourceResult {
        source: source.to_string(),
        category: label.to_string(),
        nominee: nominee.to_string(),
        won: true,
    }
}

#[test]
fn full_pipeline_over_default_seed() {
    let engine = PredictionEngine::new(EngineConfig::default_seed());

    let historical = history();
    let candidates = vec![
        candidate("Directing", "Brady Corbet", "The Brutalist"),
        candidate("Directing", "Sean Baker", "Anora"),
        candidate("Best Picture", "Anora", "Anora"),
        candidate("Best Picture", "Conclave", "Conclave"),
    ];
    let current = vec![
        result("DGA", "Outstanding Directorial Achievement in Motion Pictures", "Sean Baker"),
        result("BAFTA", "Director", "Brady Corbet – The Brutalist"),
        result("PGA", "Outstanding Producer of Theatrical Motion Pictures", "Anora"),
        // Label only reachable through the fallback rules.
        result("Critics Choice", "Best Director (Feature)", "Sean Baker"),
        // Source outside the configured list is ignored.
        result("Venice", "Golden Lion", "The Brutalist"),
    ];
    let betting = vec![
        ProbabilityRecord::from_odds("Best Picture", "Anora", "1/3"),
        ProbabilityRecord::from_odds("Best Picture", "Conclave", "not-odds"),
    ];
    let market = vec![ProbabilityRecord::new("Directing", "Sean Baker", 78.0)];

    let out = engine
        .run(PipelineInput {
            historical: &historical,
            candidates: &candidates,
            current_results: &current,
            betting: &betting,
            market: &market,
        })
        .unwrap();

    // Directing trained, Best Picture (10 rows) trained too, nothing else present.
    assert!(out.weights.is_trained("Directing"));
    assert!(out.weights.is_trained("Best Picture"));
    assert!(out.weights.skipped().is_empty());
    let dga = out.weights.weight("Directing", "DGA").unwrap();
    let bafta = out.weights.weight("Directing", "BAFTA").unwrap();
    assert!((dga - 1.0).abs() < 1e-12);
    assert!(bafta < dga);

    // Ranking: Sean Baker (DGA + Critics Choice) ahead of Brady Corbet (BAFTA).
    let directing: Vec<_> = out
        .predictions
        .iter()
        .filter(|p| p.category == "Directing")
        .collect();
    assert_eq!(directing[0].candidate_name, "Sean Baker");
    assert_eq!(
        directing[0].supporting_sources,
        vec!["Critics Choice".to_string(), "DGA".to_string()]
    );
    assert_eq!(directing[1].supporting_sources, vec!["BAFTA".to_string()]);
    assert_eq!(directing[0].market_probability, 78.0);

    // Category order: Best Picture before Directing.
    assert_eq!(out.predictions[0].category, "Best Picture");
    let l = leaders(&out.predictions);
    assert_eq!(l["Best Picture"].candidate_name, "Anora");
    assert_eq!(l["Best Picture"].betting_probability, 75.0);
    assert_eq!(l["Directing"].film_or_work, "Anora");

    let conclave = out
        .predictions
        .iter()
        .find(|p| p.candidate_name == "Conclave")
        .unwrap();
    assert_eq!(conclave.betting_probability, 50.0);

    let r = roster(&out.predictions);
    assert_eq!(r["Best Picture"], vec!["Anora", "Conclave"]);

    // Strength report covers both categories and only sources that picked someone.
    let sources: Vec<_> = out
        .strength
        .iter()
        .map(|r| (r.category.as_str(), r.source_id.as_str()))
        .collect();
    assert_eq!(
        sources,
        vec![
            ("Best Picture", "PGA"),
            ("Directing", "BAFTA"),
            ("Directing", "DGA"),
        ]
    );
    let bafta_row = &out.strength[1];
    assert_eq!(bafta_row.historical_accuracy, 50.0);
    assert_eq!(bafta_row.sample_size, 10);
}

#[test]
fn recent_years_window_limits_training() {
    let mut cfg = EngineConfig::default_seed();
    cfg.recent_years = Some(1);
    let engine = PredictionEngine::new(cfg);

    // One year of five rows per category: under the ten-row threshold.
    let w = engine.train(&history()).unwrap();
    assert!(w.is_empty());
    let skipped: Vec<_> = w.skipped().iter().map(|s| s.category.as_str()).collect();
    assert_eq!(skipped, vec!["Best Picture", "Directing"]);
}

#[test]
fn output_serializes_to_json() {
    let engine = PredictionEngine::new(EngineConfig::default_seed());
    let historical = history();
    let candidates = vec![candidate("Directing", "Sean Baker", "Anora")];
    let out = engine
        .run(PipelineInput {
            historical: &historical,
            candidates: &candidates,
            ..PipelineInput::default()
        })
        .unwrap();

    let v = serde_json::to_value(&out).unwrap();
    assert!(v["predictions"].is_array());
    assert_eq!(v["predictions"][0]["candidate_name"], "Sean Baker");
    assert!(v["weights"]["weights"]["Directing"]["DGA"].is_number());
    assert!(v["strength"].is_array());
}
