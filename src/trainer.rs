//! # Historical Correlation Trainer
//!
//! Learns, per canonical category, how well each configured source's pick
//! lined up with the real outcome.
//!
//! weight = max(0, (pearson(source_won, is_winner) + 1) / 2)
//!
//! - Undefined correlation (a constant column) → neutral weight (0.5 by default).
//! - Categories below `min_training_samples` get no entry at all, so downstream
//!   scoring treats them as untrained rather than "every source weighs 0".

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::records::{validate_identity, HistoricalRecord};
use crate::stats::{clamp01, pearson_binary};
use crate::telemetry;

/// category → (source → weight in [0,1])
pub type WeightTable = BTreeMap<String, BTreeMap<String, f64>>;

/// A category left untrained for lack of history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCategory {
    pub category: String,
    pub samples: usize,
}

/// Immutable result of one training call. Callers that want to amortize
/// training across many scoring calls keep this value around themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainedWeights {
    weights: WeightTable,
    #[serde(default)]
    skipped: Vec<SkippedCategory>,
}

impl TrainedWeights {
    /// Rebuild from a stored table (e.g. a cached snapshot). Values are clamped to [0,1].
    pub fn from_table(table: WeightTable) -> Self {
        let weights = table
            .into_iter()
            .map(|(cat, row)| {
                let row = row.into_iter().map(|(s, w)| (s, clamp01(w))).collect();
                (cat, row)
            })
            .collect();
        Self {
            weights,
            skipped: Vec::new(),
        }
    }

    pub fn for_category(&self, category: &str) -> Option<&BTreeMap<String, f64>> {
        self.weights.get(category)
    }

    pub fn weight(&self, category: &str, source: &str) -> Option<f64> {
        self.weights.get(category)?.get(source).copied()
    }

    pub fn is_trained(&self, category: &str) -> bool {
        self.weights.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn skipped(&self) -> &[SkippedCategory] {
        &self.skipped
    }

    pub fn as_table(&self) -> &WeightTable {
        &self.weights
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct HistoricalCorrelationTrainer {
    sources: Vec<String>,
    min_samples: usize,
    neutral_weight: f64,
}

impl HistoricalCorrelationTrainer {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            sources: cfg.sources.clone(),
            min_samples: cfg.min_training_samples.max(1),
            neutral_weight: clamp01(cfg.neutral_weight),
        }
    }

    /// Train on every record.
    pub fn train(&self, records: &[HistoricalRecord]) -> Result<TrainedWeights> {
        validate_identity(records)?;

        let mut by_category: BTreeMap<&str, Vec<&HistoricalRecord>> = BTreeMap::new();
        for r in records {
            by_category.entry(r.category.as_str()).or_default().push(r);
        }

        let mut out = TrainedWeights::default();
        for (category, rows) in by_category {
            if rows.len() < self.min_samples {
                info!(
                    target: "trainer",
                    category,
                    samples = rows.len(),
                    min = self.min_samples,
                    "category skipped: not enough history"
                );
                telemetry::category_skipped();
                out.skipped.push(SkippedCategory {
                    category: category.to_string(),
                    samples: rows.len(),
                });
                continue;
            }

            let outcome: Vec<bool> = rows.iter().map(|r| r.is_winner).collect();
            let mut row_weights = BTreeMap::new();
            for source in &self.sources {
                let picks: Vec<bool> = rows.iter().map(|r| r.won_at(source)).collect();
                let w = match pearson_binary(&picks, &outcome) {
                    Some(r) => clamp01(((r + 1.0) / 2.0).max(0.0)),
                    None => {
                        debug!(target: "trainer", category, source = %source, "zero variance, neutral weight");
                        telemetry::zero_variance();
                        self.neutral_weight
                    }
                };
                row_weights.insert(source.clone(), w);
            }

            debug!(target: "trainer", category, samples = rows.len(), weights = ?row_weights, "category trained");
            telemetry::category_trained();
            out.weights.insert(category.to_string(), row_weights);
        }

        info!(
            target: "trainer",
            trained = out.weights.len(),
            skipped = out.skipped.len(),
            "training finished"
        );
        Ok(out)
    }

    /// Train on the latest `years` distinct years present in `records`.
    pub fn train_recent(&self, records: &[HistoricalRecord], years: u32) -> Result<TrainedWeights> {
        let window = recent_window(records, years);
        let filtered: Vec<HistoricalRecord> = records
            .iter()
            .filter(|r| window.contains(&r.year))
            .cloned()
            .collect();
        debug!(target: "trainer", years, kept = filtered.len(), total = records.len(), "recent-years window");
        self.train(&filtered)
    }
}

/// The latest `years` distinct years found in `records`.
fn recent_window(records: &[HistoricalRecord], years: u32) -> BTreeSet<i32> {
    let all: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    all.into_iter().rev().take(years as usize).collect()
}
