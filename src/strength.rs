//! # Venue Strength
//! Audit view: how often each source's pick went on to win, per category.
//! Independent of trained weights.
//!
//! accuracy = (source won ∧ is_winner) / (source won) · 100
//!
//! Categories under `min_strength_samples` are left out; within a kept
//! category, sources that never picked anyone are left out (not reported as 0%).

use std::collections::BTreeMap;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::records::{validate_identity, HistoricalRecord, VenueStrengthRow};
use crate::stats::clamp_pct;

#[derive(Debug, Clone)]
pub struct VenueStrengthAnalyzer {
    sources: Vec<String>,
    min_samples: usize,
}

impl VenueStrengthAnalyzer {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            sources: cfg.sources.clone(),
            min_samples: cfg.min_strength_samples.max(1),
        }
    }

    /// Rows ordered by category ascending, then configured source order.
    pub fn analyze(&self, records: &[HistoricalRecord]) -> Result<Vec<VenueStrengthRow>> {
        validate_identity(records)?;

        let mut by_category: BTreeMap<&str, Vec<&HistoricalRecord>> = BTreeMap::new();
        for r in records {
            by_category.entry(r.category.as_str()).or_default().push(r);
        }

        let mut out = Vec::new();
        for (category, rows) in by_category {
            if rows.len() < self.min_samples {
                debug!(target: "strength", category, samples = rows.len(), "category below strength threshold");
                continue;
            }
            for source in &self.sources {
                let picks = rows.iter().filter(|r| r.won_at(source)).count();
                if picks == 0 {
                    continue;
                }
                let hits = rows
                    .iter()
                    .filter(|r| r.won_at(source) && r.is_winner)
                    .count();
                out.push(VenueStrengthRow {
                    category: category.to_string(),
                    source_id: source.clone(),
                    historical_accuracy: clamp_pct(hits as f64 / picks as f64 * 100.0),
                    sample_size: picks,
                });
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(cat: &str, name: &str, flags: &[(&str, bool)], winner: bool) -> HistoricalRecord {
        HistoricalRecord {
            year: 2024,
            category: cat.into(),
            candidate_name: name.into(),
            film_or_work: String::new(),
            source_win_flags: flags.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            critics_score: None,
            audience_score: None,
            is_winner: winner,
        }
    }

    fn analyzer(sources: &[&str]) -> VenueStrengthAnalyzer {
        VenueStrengthAnalyzer::new(&EngineConfig::with_sources(sources.iter().copied()))
    }

    #[test]
    fn accuracy_over_picks() {
        let rows = vec![
            rec("Directing", "a", &[("DGA", true), ("BAFTA", true)], true),
            rec("Directing", "b", &[("DGA", true)], false),
            rec("Directing", "c", &[("DGA", true)], true),
            rec("Directing", "d", &[], false),
            rec("Directing", "e", &[("DGA", true)], true),
        ];
        let out = analyzer(&["BAFTA", "DGA"]).analyze(&rows).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].source_id, "BAFTA");
        assert_eq!(out[0].historical_accuracy, 100.0);
        assert_eq!(out[0].sample_size, 1);
        assert_eq!(out[1].source_id, "DGA");
        assert_eq!(out[1].historical_accuracy, 75.0);
        assert_eq!(out[1].sample_size, 4);
    }

    #[test]
    fn sources_without_picks_are_omitted() {
        let rows: Vec<_> = (0..5)
            .map(|i| rec("Sound", &format!("n{i}"), &[("CAS", i == 0)], i == 0))
            .collect();
        let out = analyzer(&["CAS", "MPSE"]).analyze(&rows).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source_id, "CAS");
    }

    #[test]
    fn small_categories_are_omitted() {
        let rows: Vec<_> = (0..4)
            .map(|i| rec("Sound", &format!("n{i}"), &[("CAS", true)], i == 0))
            .collect();
        assert!(analyzer(&["CAS"]).analyze(&rows).unwrap().is_empty());
    }
}
